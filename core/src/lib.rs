//! Counter RNG Core - Counter-Based Random Number Generation
//!
//! Generators whose entire state is a small counter plus a fixed key:
//! output is a pure mixing function of (counter, key), which buys O(1)
//! random access to any position of an effectively infinite stream. No
//! history to replay makes these generators the natural fit for parallel
//! simulation and reproducible sampling.
//!
//! # Architecture
//!
//! - **word**: bit-width masking and wide-multiply utilities
//! - **prf**: the pseudo-random function contract and the Philox family
//! - **counter**: multi-word carry-propagating counter arithmetic
//! - **engine**: the generic counter-based engine (buffering, bulk fill,
//!   jump-ahead, seeding, snapshots)
//!
//! # Critical Invariants
//!
//! 1. Every word is kept masked to its declared bit width
//! 2. All arithmetic is modular; counters wrap, nothing errors at runtime
//! 3. Same seed produces the same sequence, however draws are grouped
//!
//! # Example
//! ```
//! use counter_rng_core::Philox4x32Engine;
//!
//! let mut engine = Philox4x32Engine::new(); // default seed 20111115
//! let word = engine.next();
//!
//! // O(1) jump-ahead: skip a billion words without generating them
//! engine.discard(1_000_000_000);
//! ```

// Module declarations
pub mod counter;
pub mod engine;
pub mod prf;
pub mod word;

// Re-exports for convenience
pub use engine::{
    BlockInputs, CounterBasedEngine, EngineSnapshot, Philox2x32Engine, Philox2x64Engine,
    Philox4x32Engine, Philox4x64Engine, RestoreError, SeedSequence, SeedValues,
};
pub use prf::{Philox2x32, Philox2x64, Philox4x32, Philox4x64, PseudoRandomFunction};
pub use word::Word;
