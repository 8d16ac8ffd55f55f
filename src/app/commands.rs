//! Parsed command arguments.
//!
//! The general command parser (external) tokenizes an incoming line into a
//! code number and single-letter argument words.  [`CommandArgs`] is the
//! hand-off: it carries those words into the handlers, which only ever ask
//! "was this letter given, and with what value".

use crate::units::UnitSystem;

/// Maximum argument words on one command line.
pub const MAX_WORDS: usize = 12;

/// One argument word, e.g. `X12.5` or a bare flag `L`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgWord {
    pub letter: char,
    pub value: Option<f32>,
}

/// Argument words of a single command, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    words: heapless::Vec<ArgWord, MAX_WORDS>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word.  Returns `false` (and drops the word) when full.
    pub fn push(&mut self, letter: char, value: Option<f32>) -> bool {
        self.words
            .push(ArgWord {
                letter: letter.to_ascii_uppercase(),
                value,
            })
            .is_ok()
    }

    /// Builder form of [`push`](Self::push) for a valued word.
    #[must_use]
    pub fn with(mut self, letter: char, value: f32) -> Self {
        self.push(letter, Some(value));
        self
    }

    /// Builder form of [`push`](Self::push) for a bare flag.
    #[must_use]
    pub fn with_flag(mut self, letter: char) -> Self {
        self.push(letter, None);
        self
    }

    fn find(&self, letter: char) -> Option<&ArgWord> {
        let letter = letter.to_ascii_uppercase();
        self.words.iter().find(|w| w.letter == letter)
    }

    /// Letter present, with or without a value.
    pub fn seen(&self, letter: char) -> bool {
        self.find(letter).is_some()
    }

    /// Value of `letter`, if present with a finite number.
    pub fn value(&self, letter: char) -> Option<f32> {
        self.find(letter)
            .and_then(|w| w.value)
            .filter(|v| v.is_finite())
    }

    /// Linear value converted from the active unit to millimetres.
    pub fn value_axis(&self, letter: char, units: UnitSystem) -> Option<f32> {
        self.value(letter).map(|v| units.to_mm(v))
    }

    /// Value clamped into a byte.
    pub fn value_byte(&self, letter: char) -> Option<u8> {
        self.value(letter).map(|v| v.round().clamp(0.0, 255.0) as u8)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[ArgWord] {
        &self.words
    }
}
