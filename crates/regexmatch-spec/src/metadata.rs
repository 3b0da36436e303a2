//! Key/value lines trailing the last pattern block.
//!
//! ```text
//! separator=;
//! points=0.5
//! size=10
//! comment=not shown to anyone
//! feedback=Well done,
//!  and this line is appended too
//! ```

use tracing::debug;
use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

pub(crate) const DEFAULT_SEPARATOR: &str = "\n";
pub(crate) const DEFAULT_POINTS: f64 = 1.0;
pub(crate) const DEFAULT_SIZE: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Key {
    Comment,
    Separator,
    Feedback,
    Points,
    Size,
}

/// Matched as exact, case-sensitive line prefixes.
const KEYS: [(&str, Key); 5] = [
    ("comment=", Key::Comment),
    ("separator=", Key::Separator),
    ("feedback=", Key::Feedback),
    ("points=", Key::Points),
    ("size=", Key::Size),
];

/// What happens to a line that starts with no key.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LineMode {
    Idle,
    SkipComment,
    AccumulateFeedback,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Metadata {
    pub separator: String,
    pub points: f64,
    pub size: i64,
    pub feedback: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            points: DEFAULT_POINTS,
            size: DEFAULT_SIZE,
            feedback: String::new(),
        }
    }
}

pub(crate) fn read_metadata(region: &str) -> Metadata {
    let mut metadata = Metadata::default();
    let mut mode = LineMode::Idle;

    for line in region.split('\n') {
        let Some((key, value)) = split_key(line) else {
            if mode == LineMode::AccumulateFeedback {
                metadata.feedback.push_str(line);
            }
            continue;
        };

        debug!(?key, "metadata key");
        mode = match key {
            Key::Comment => LineMode::SkipComment,
            Key::Separator => {
                metadata.separator = value.to_string();
                LineMode::Idle
            }
            Key::Feedback => {
                metadata.feedback.push_str(value);
                LineMode::AccumulateFeedback
            }
            Key::Points => {
                metadata.points = parse_points(value);
                LineMode::Idle
            }
            Key::Size => {
                metadata.size = parse_size(value);
                LineMode::Idle
            }
        };
    }

    metadata
}

fn split_key(line: &str) -> Option<(Key, &str)> {
    KEYS.iter()
        .find_map(|(prefix, key)| line.strip_prefix(prefix).map(|value| (*key, value)))
}

/// Leading decimal number of the trimmed value, or 0.0.
fn parse_points(value: &str) -> f64 {
    let mut input = crate::trim(value);
    leading_decimal.parse_next(&mut input).unwrap_or(0.0)
}

/// Leading integer after optional whitespace, or 0.
fn parse_size(value: &str) -> i64 {
    let mut input = value;
    leading_integer.parse_next(&mut input).unwrap_or(0)
}

fn leading_integer(input: &mut &str) -> ModalResult<i64> {
    take_while(0.., |c: char| c.is_ascii_whitespace() || c == '\x0B')
        .void()
        .parse_next(input)?;
    let digits = (opt(one_of(['+', '-'])), digit1).take().parse_next(input)?;

    Ok(digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

fn leading_decimal(input: &mut &str) -> ModalResult<f64> {
    let number = (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;

    Ok(number.parse().unwrap_or(0.0))
}
