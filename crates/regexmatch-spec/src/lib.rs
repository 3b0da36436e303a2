//! Parser for regexmatch answer specifications.
//!
//! A specification lists one or more pattern blocks, each with its own
//! modifier letters, followed by optional key/value metadata:
//!
//! ```text
//! [[ls -l]] [[ls -la]]/OI/
//! %50[[ls]]//
//! separator=;
//! points=2
//! feedback=Use the long listing format.
//! ```
//!
//! # Example
//!
//! ```
//! let spec = regexmatch_spec::parse("[[hello world]]/I/\nfeedback=Hi!");
//!
//! assert!(spec.is_valid());
//! assert_eq!(spec.groups()[0].patterns, vec!["hello world"]);
//! assert!(spec.groups()[0].options.ignore_case);
//! assert_eq!(spec.feedback(), "Hi!");
//! ```

mod flags;
mod metadata;
mod parser;

pub use flags::OptionFlags;
pub use parser::{parse, try_parse};

use thiserror::Error;

/// Characters stripped when trimming specification text and answers.
pub const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Strip [`TRIM_CHARS`] from both ends.
pub fn trim(text: &str) -> &str {
    text.trim_matches(TRIM_CHARS)
}

/// Strip [`TRIM_CHARS`] from the start only; trailing whitespace is kept.
pub fn trim_start(text: &str) -> &str {
    text.trim_start_matches(TRIM_CHARS)
}

// ============ Data Types ============

/// One weighted block of patterns sharing the same options.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternGroup {
    /// Weight in percent. The first block is always 100.
    pub percent: u32,
    /// Raw patterns in authoring order.
    pub patterns: Vec<String>,
    pub options: OptionFlags,
}

/// A parsed answer specification.
///
/// Built once by [`parse`] and only read afterwards. The default value is
/// the invalid specification: no groups and default metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSpec {
    groups: Vec<PatternGroup>,
    separator: String,
    points: f64,
    size: i64,
    feedback: String,
}

impl Default for AnswerSpec {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            separator: metadata::DEFAULT_SEPARATOR.to_string(),
            points: metadata::DEFAULT_POINTS,
            size: metadata::DEFAULT_SIZE,
            feedback: String::new(),
        }
    }
}

impl AnswerSpec {
    /// A valid specification has at least one group.
    pub fn is_valid(&self) -> bool {
        !self.groups.is_empty()
    }

    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&PatternGroup> {
        self.groups.get(index)
    }

    /// Splits submitted text into lines for any-order matching.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    /// Input field size hint for the host.
    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("no ']] /flags/' delimiter found after offset {offset}")]
    MissingDelimiter { offset: usize },
    #[error("expected '%' followed by a weight at offset {offset}")]
    MissingWeight { offset: usize },
    #[error("invalid block weight '{digits}'")]
    InvalidWeight { digits: String },
}
