//! Regex construction and scoring for regexmatch answer specifications.
//!
//! # Example
//!
//! ```
//! use regexmatch_score::score;
//!
//! let spec = regexmatch_spec::parse("[[ls -l]] [[pwd]]/O/");
//!
//! // Both expected lines, in any order
//! assert_eq!(score(&spec, "pwd\nls   -l"), 1.0);
//!
//! // One line missing costs one of two points
//! assert_eq!(score(&spec, "pwd"), 0.5);
//! ```

mod builder;
mod scorer;

pub use builder::{build, construct, BuildError};
pub use scorer::{score, score_group, Scorer};
