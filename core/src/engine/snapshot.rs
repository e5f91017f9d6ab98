//! Snapshot - save/restore engine state
//!
//! Externalizes the full generator state for pause/resume and
//! cross-validation. Two equivalent encodings:
//!
//! - the textual stream form: space-separated input words then the cursor
//! - `EngineSnapshot`: the same fields as a serde-serializable structure
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored engine continues the exact word stream
//!   of the engine it was captured from
//! - **Cache repopulation**: the cache is never persisted; restoring a
//!   nonzero cursor re-evaluates the PRF at the counter value one less
//!   than the stored one (the block that cursor points into)
//! - **Validation**: word count and cursor range are checked before any
//!   state is trusted; recovery policy is the caller's responsibility

use super::CounterBasedEngine;
use crate::counter;
use crate::prf::PseudoRandomFunction;
use crate::word::Word;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Serializable engine state: input block words (least-significant counter
/// word first, then key words) and the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Input block words, widened to u64
    pub words: Vec<u64>,
    /// Index of the next unread cached word; 0 means none
    pub cursor: usize,
}

/// Errors restoring externalized engine state
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("expected {expected} state fields, found {found}")]
    WrongWordCount { expected: usize, found: usize },

    #[error("unparsable state token `{0}`")]
    InvalidToken(String),

    #[error("cursor {cursor} out of range: output block holds {limit} words")]
    CursorOutOfRange { cursor: usize, limit: usize },
}

impl<P: PseudoRandomFunction, const C: usize> CounterBasedEngine<P, C> {
    /// Capture the engine state.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            words: self
                .input
                .as_ref()
                .iter()
                .map(|word| word.to_u128() as u64)
                .collect(),
            cursor: self.cursor,
        }
    }

    /// Rebuild an engine from a captured snapshot.
    ///
    /// # Example
    /// ```
    /// use counter_rng_core::Philox4x32Engine;
    ///
    /// let mut engine = Philox4x32Engine::with_seed(42);
    /// for _ in 0..6 {
    ///     engine.next();
    /// }
    /// let snapshot = engine.snapshot();
    ///
    /// let mut restored = Philox4x32Engine::restore(&snapshot).unwrap();
    /// assert_eq!(restored, engine);
    /// assert_eq!(restored.next(), engine.next());
    /// ```
    pub fn restore(snapshot: &EngineSnapshot) -> Result<Self, RestoreError> {
        if snapshot.words.len() != P::INPUT_COUNT {
            return Err(RestoreError::WrongWordCount {
                expected: P::INPUT_COUNT,
                found: snapshot.words.len(),
            });
        }
        let words: Vec<P::Word> = snapshot
            .words
            .iter()
            .map(|&word| P::Word::from_u128(word as u128))
            .collect();
        Self::from_parts(&words, snapshot.cursor)
    }

    /// Assemble an engine from raw state, masking words and repopulating
    /// the cache when the cursor is nonzero.
    fn from_parts(words: &[P::Word], cursor: usize) -> Result<Self, RestoreError> {
        if words.len() != P::INPUT_COUNT {
            return Err(RestoreError::WrongWordCount {
                expected: P::INPUT_COUNT,
                found: words.len(),
            });
        }
        if cursor >= P::OUTPUT_COUNT {
            return Err(RestoreError::CursorOutOfRange {
                cursor,
                limit: P::OUTPUT_COUNT,
            });
        }

        let mut engine = Self {
            input: Default::default(),
            cache: Default::default(),
            cursor,
        };
        for (slot, &word) in engine.input.as_mut().iter_mut().zip(words) {
            *slot = word.masked(P::INPUT_WORD_SIZE);
        }

        if cursor > 0 {
            // The stored counter is pre-armed; the cached block belongs to
            // the value one less.
            let mut previous = engine.input;
            counter::decrement(&mut previous.as_mut()[..C], P::INPUT_WORD_SIZE);
            P::evaluate(&previous, &mut engine.cache);
        }
        Ok(engine)
    }
}

/// Textual stream insertion: input words then cursor, space-separated.
impl<P: PseudoRandomFunction, const C: usize> fmt::Display for CounterBasedEngine<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.input.as_ref() {
            write!(f, "{} ", word)?;
        }
        write!(f, "{}", self.cursor)
    }
}

/// Textual stream extraction; the counterpart of `Display`.
impl<P: PseudoRandomFunction, const C: usize> FromStr for CounterBasedEngine<P, C> {
    type Err = RestoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != P::INPUT_COUNT + 1 {
            return Err(RestoreError::WrongWordCount {
                expected: P::INPUT_COUNT + 1,
                found: tokens.len(),
            });
        }

        let mut words = Vec::with_capacity(P::INPUT_COUNT);
        for token in &tokens[..P::INPUT_COUNT] {
            let word = token
                .parse::<P::Word>()
                .map_err(|_| RestoreError::InvalidToken((*token).to_string()))?;
            words.push(word);
        }
        let cursor = tokens[P::INPUT_COUNT]
            .parse::<usize>()
            .map_err(|_| RestoreError::InvalidToken(tokens[P::INPUT_COUNT].to_string()))?;

        Self::from_parts(&words, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Philox4x32Engine;

    #[test]
    fn test_display_format_fresh_engine() {
        let engine = Philox4x32Engine::with_seed(7777);
        assert_eq!(engine.to_string(), "0 0 0 0 7777 0 0");
    }

    #[test]
    fn test_display_tracks_counter_and_cursor() {
        let mut engine = Philox4x32Engine::with_seed(7777);
        engine.next();
        assert_eq!(engine.to_string(), "1 0 0 0 7777 0 1");
    }

    #[test]
    fn test_snapshot_fields() {
        let mut engine = Philox4x32Engine::with_seed(7777);
        engine.next();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.words, vec![1, 0, 0, 0, 7777, 0]);
        assert_eq!(snapshot.cursor, 1);
    }

    #[test]
    fn test_restore_rejects_wrong_word_count() {
        let snapshot = EngineSnapshot {
            words: vec![0; 5],
            cursor: 0,
        };
        assert_eq!(
            Philox4x32Engine::restore(&snapshot),
            Err(RestoreError::WrongWordCount {
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn test_restore_rejects_cursor_out_of_range() {
        let snapshot = EngineSnapshot {
            words: vec![0; 6],
            cursor: 4,
        };
        assert_eq!(
            Philox4x32Engine::restore(&snapshot),
            Err(RestoreError::CursorOutOfRange {
                cursor: 4,
                limit: 4
            })
        );
    }
}
