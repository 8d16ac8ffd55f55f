//! Host-side command-line tokenizer.
//!
//! Stands in for the firmware's general command parser when replaying
//! scripts on the host: splits a line into its command word and
//! single-letter argument words, drops `;` comments, and keeps the free
//! text of `M117`/`M118` messages.  Words need not be separated by spaces
//! (`G4S1` is `G4` with `S1`).

use core::fmt;

use crate::app::commands::CommandArgs;

/// One tokenized command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// Command family, upper case (`G`, `M`, `C`, ...).
    pub letter: char,
    pub code: u16,
    pub args: CommandArgs,
    /// Message text for commands that take a string.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptError {
    /// The line does not start with a letter followed by a code number.
    MissingCode,
    /// An argument value is not a number.
    BadNumber(char),
    /// More argument words than a command can carry.
    TooManyWords,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode => write!(f, "missing command code"),
            Self::BadNumber(letter) => write!(f, "bad number for {letter}"),
            Self::TooManyWords => write!(f, "too many arguments"),
        }
    }
}

impl ScriptLine {
    /// Tokenize one line.  Blank and comment-only lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ScriptError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            return Ok(None);
        }

        let mut chars = line.char_indices().peekable();
        let letter = match chars.next() {
            Some((_, c)) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
            _ => return Err(ScriptError::MissingCode),
        };
        let mut digits = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            chars.next();
        }
        let code: u16 = digits.parse().map_err(|_| ScriptError::MissingCode)?;

        if letter == 'M' && matches!(code, 117 | 118) {
            let rest = chars.peek().map_or("", |&(i, _)| &line[i..]);
            return Ok(Some(Self {
                letter,
                code,
                args: CommandArgs::new(),
                text: Some(rest.trim().to_string()),
            }));
        }

        let mut args = CommandArgs::new();
        while let Some((_, c)) = chars.next() {
            if c == ';' {
                break;
            }
            if c.is_whitespace() {
                continue;
            }
            if !c.is_ascii_alphabetic() {
                return Err(ScriptError::BadNumber(c));
            }
            let mut number = String::new();
            while let Some(&(_, n)) = chars.peek() {
                if !(n.is_ascii_digit() || matches!(n, '.' | '-' | '+')) {
                    break;
                }
                number.push(n);
                chars.next();
            }
            let value = if number.is_empty() {
                None
            } else {
                Some(number.parse::<f32>().map_err(|_| ScriptError::BadNumber(c))?)
            };
            if !args.push(c, value) {
                return Err(ScriptError::TooManyWords);
            }
        }

        Ok(Some(Self {
            letter,
            code,
            args,
            text: None,
        }))
    }
}

impl fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.code)?;
        for word in self.args.words() {
            match word.value {
                Some(v) => write!(f, " {}{}", word.letter, v)?,
                None => write!(f, " {}", word.letter)?,
            }
        }
        if let Some(text) = &self.text {
            write!(f, " {text}")?;
        }
        Ok(())
    }
}
