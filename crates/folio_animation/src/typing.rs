//! Typing effect state machine
//!
//! Cycles through title/subtitle phrase pairs, typing the title one character
//! per tick, holding it, deleting it at double speed, holding the empty line,
//! then moving to the next phrase. Each [`TypingEngine::tick`] returns the
//! text to render and how long to wait before the next tick.
//!
//! ```text
//!   Typing ──(cursor = len)──▶ PausingFull ──▶ Deleting ──(cursor = 0)──▶ PausingEmpty
//!     ▲                                                                      │
//!     └──────────────────────────── next phrase ◀────────────────────────────┘
//! ```
//!
//! The cursor counts characters, so multi-byte text is never split.

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};

/// One title/subtitle combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasePair {
    pub title: String,
    pub subtitle: String,
}

impl PhrasePair {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// The phrases shown on the landing page by default
pub fn default_phrases() -> Vec<PhrasePair> {
    vec![
        PhrasePair::new(
            "Hello, I'm Boranno Goloder",
            "Computer Science & Engineering Student",
        ),
        PhrasePair::new("I'm a Developer", "Full-Stack Web Developer"),
        PhrasePair::new("I'm a Problem Solver", "AI/ML Enthusiast"),
        PhrasePair::new("I'm a Tech Enthusiast", "Open Source Contributor"),
    ]
}

/// Tick delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingTimings {
    /// Delay after typing a character
    pub type_ms: u64,
    /// Delay after deleting a character
    pub delete_ms: u64,
    /// Hold once the title is complete
    pub hold_full_ms: u64,
    /// Hold once the title is fully deleted
    pub hold_empty_ms: u64,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            hold_full_ms: 2000,
            hold_empty_ms: 500,
        }
    }
}

/// Phase reached after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingPhase {
    #[default]
    Typing,
    /// Title complete, holding before deleting
    PausingFull,
    Deleting,
    /// Title erased, holding before the next phrase
    PausingEmpty,
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    /// Visible part of the title
    pub title: String,
    /// Full subtitle of the phrase being typed
    pub subtitle: String,
    /// Delay before the next tick
    pub delay_ms: u64,
}

/// Type/delete loop over a non-empty phrase list
#[derive(Debug, Clone)]
pub struct TypingEngine {
    phrases: Vec<PhrasePair>,
    timings: TypingTimings,
    index: usize,
    cursor: usize,
    deleting: bool,
    phase: TypingPhase,
}

impl TypingEngine {
    /// Create an engine positioned before the first character of the first
    /// phrase
    pub fn new(phrases: Vec<PhrasePair>, timings: TypingTimings) -> Result<Self> {
        if phrases.is_empty() {
            return Err(AnimationError::EmptyPhraseList);
        }
        Ok(Self {
            phrases,
            timings,
            index: 0,
            cursor: 0,
            deleting: false,
            phase: TypingPhase::Typing,
        })
    }

    /// Index of the current phrase
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Characters of the current title currently shown
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn phrases(&self) -> &[PhrasePair] {
        &self.phrases
    }

    /// Advance by one step
    pub fn tick(&mut self) -> TypingFrame {
        let phrase = &self.phrases[self.index];
        let len = phrase.title.chars().count();

        if self.deleting {
            self.cursor = self.cursor.saturating_sub(1);
        } else {
            self.cursor = (self.cursor + 1).min(len);
        }

        let title = char_prefix(&phrase.title, self.cursor).to_string();
        let subtitle = phrase.subtitle.clone();

        let (delay_ms, phase) = if !self.deleting && self.cursor == len {
            self.deleting = true;
            (self.timings.hold_full_ms, TypingPhase::PausingFull)
        } else if self.deleting && self.cursor == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            (self.timings.hold_empty_ms, TypingPhase::PausingEmpty)
        } else if self.deleting {
            (self.timings.delete_ms, TypingPhase::Deleting)
        } else {
            (self.timings.type_ms, TypingPhase::Typing)
        };
        self.phase = phase;

        TypingFrame {
            title,
            subtitle,
            delay_ms,
        }
    }
}

/// First `chars` characters of `s`
fn char_prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
