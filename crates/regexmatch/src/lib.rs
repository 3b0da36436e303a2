pub mod cli;
pub mod discover;
pub mod error;
pub mod grade;
pub mod logging;
pub mod output;

pub use regexmatch_score::{score, score_group};
pub use regexmatch_spec::{parse, try_parse, AnswerSpec, OptionFlags, PatternGroup, SpecError};
