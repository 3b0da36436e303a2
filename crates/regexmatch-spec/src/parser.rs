//! Pattern block grammar.
//!
//! ```text
//! spec     := block ("%" weight block)* metadata
//! block    := "[[" pattern ("]]" WS* "[[" pattern)* "]]" WS* "/" flags "/"
//! weight   := digit+
//! flags    := letter*
//! ```
//!
//! `WS` is spaces and newlines only. Carriage returns are removed before
//! anything else is looked at.

use crate::metadata::read_metadata;
use crate::{trim, trim_start, AnswerSpec, OptionFlags, PatternGroup, SpecError};
use std::ops::Range;
use tracing::debug;
use winnow::ascii::digit1;
use winnow::combinator::{delimited, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

/// Weight of the first block, which never carries a `%` marker.
const FIRST_BLOCK_PERCENT: u32 = 100;

/// Parse specification text. Any syntax error yields the invalid
/// specification, never a partially filled one.
pub fn parse(text: &str) -> AnswerSpec {
    match try_parse(text) {
        Ok(spec) => spec,
        Err(e) => {
            debug!(error = %e, "rejected answer specification");
            AnswerSpec::default()
        }
    }
}

/// Parse specification text, reporting why it is malformed.
pub fn try_parse(text: &str) -> Result<AnswerSpec, SpecError> {
    let text = text.replace('\r', "");
    let mut remaining = text.as_str();
    let mut groups = Vec::new();

    loop {
        let percent = if groups.is_empty() {
            FIRST_BLOCK_PERCENT
        } else {
            let offset = text.len() - remaining.len();
            let digits = block_weight
                .parse_next(&mut remaining)
                .map_err(|_| SpecError::MissingWeight { offset })?;
            digits.parse().map_err(|_| SpecError::InvalidWeight {
                digits: digits.to_string(),
            })?
        };

        let Some((delimiter, flags)) = find_at_brackets(remaining, block_delimiter) else {
            return Err(SpecError::MissingDelimiter {
                offset: text.len() - remaining.len(),
            });
        };

        let body = trim(&remaining[..delimiter.start]);
        let body = body.strip_prefix("[[").unwrap_or(body);
        let group = PatternGroup {
            percent,
            patterns: split_patterns(body),
            options: OptionFlags::parse(flags),
        };
        debug!(
            percent = group.percent,
            flags,
            patterns = group.patterns.len(),
            "parsed pattern block"
        );
        groups.push(group);

        remaining = trim_start(&remaining[delimiter.end..]);
        if !remaining.starts_with('%') {
            break;
        }
    }

    let metadata = read_metadata(trim(remaining));

    Ok(AnswerSpec {
        groups,
        separator: metadata.separator,
        points: metadata.points,
        size: metadata.size,
        feedback: metadata.feedback,
    })
}

/// `]] WS* /flags/`, yielding the flag letters.
fn block_delimiter<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    "]]".parse_next(input)?;
    take_while(0.., [' ', '\n']).void().parse_next(input)?;
    delimited('/', take_while(0.., |c: char| c.is_ascii_alphabetic()), '/').parse_next(input)
}

/// `]] WS* [[` between two patterns of one block.
fn pattern_boundary(input: &mut &str) -> ModalResult<()> {
    ("]]", take_while(0.., [' ', '\n']), "[[")
        .void()
        .parse_next(input)
}

fn block_weight<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded('%', digit1).parse_next(input)
}

/// Find the first position where `parser` matches, trying every `]]` in
/// `text` from left to right (overlapping runs of brackets included).
fn find_at_brackets<'a, O>(
    text: &'a str,
    mut parser: impl FnMut(&mut &'a str) -> ModalResult<O>,
) -> Option<(Range<usize>, O)> {
    let mut pos = 0;
    while let Some(found) = text[pos..].find("]]") {
        let start = pos + found;
        let mut input = &text[start..];
        if let Ok(output) = parser(&mut input) {
            let end = text.len() - input.len();
            return Some((start..end, output));
        }
        pos = start + 1;
    }
    None
}

fn split_patterns(body: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut rest = body;

    while let Some((boundary, ())) = find_at_brackets(rest, pattern_boundary) {
        patterns.push(rest[..boundary.start].to_string());
        rest = &rest[boundary.end..];
    }
    patterns.push(rest.to_string());

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let spec = try_parse("[[ls -l]]/I/").unwrap();
        assert!(spec.is_valid());
        assert_eq!(spec.groups().len(), 1);

        let group = &spec.groups()[0];
        assert_eq!(group.percent, 100);
        assert_eq!(group.patterns, vec!["ls -l"]);
        assert!(group.options.ignore_case);
    }

    #[test]
    fn test_empty_flags() {
        let spec = try_parse("[[abc]]//").unwrap();
        assert_eq!(spec.groups()[0].options, OptionFlags::default());
    }

    #[test]
    fn test_whitespace_before_flags() {
        let spec = try_parse("[[abc]] \n /O/").unwrap();
        assert_eq!(spec.groups()[0].patterns, vec!["abc"]);
        assert!(spec.groups()[0].options.match_any_order);
    }

    #[test]
    fn test_multiple_patterns_in_block() {
        let spec = try_parse("[[a]] [[b]]\n[[c]]/O/").unwrap();
        assert_eq!(spec.groups()[0].patterns, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_weighted_blocks() {
        let spec = try_parse("[[full]]/i/\n%50[[half]]/D/ %25 [[quarter]]//").unwrap();
        let groups = spec.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].percent, 100);
        assert_eq!(groups[0].patterns, vec!["full"]);
        assert_eq!(groups[1].percent, 50);
        assert_eq!(groups[1].patterns, vec!["half"]);
        assert!(groups[1].options.dot_all);
        assert_eq!(groups[2].percent, 25);
        assert_eq!(groups[2].patterns, vec!["quarter"]);
    }

    #[test]
    fn test_carriage_returns_removed() {
        let spec = try_parse("[[a]]\r\n[[b]]/O/\r\nfeedback=ok\r\n").unwrap();
        assert_eq!(spec.groups()[0].patterns, vec!["a", "b"]);
        assert_eq!(spec.feedback(), "ok");
    }

    #[test]
    fn test_metadata_after_blocks() {
        let spec = try_parse("[[x]]//\npoints=0.5\nsize=10\nfeedback=Well done").unwrap();
        assert_eq!(spec.points(), 0.5);
        assert_eq!(spec.size(), 10);
        assert_eq!(spec.feedback(), "Well done");
        assert_eq!(spec.separator(), "\n");
    }

    #[test]
    fn test_slash_inside_pattern() {
        let spec = try_parse("[[cd /tmp]]/I/").unwrap();
        assert_eq!(spec.groups()[0].patterns, vec!["cd /tmp"]);
    }

    #[test]
    fn test_brackets_inside_pattern() {
        let spec = try_parse("[[a[[:digit:]]]]/I/").unwrap();
        assert_eq!(spec.groups()[0].patterns, vec!["a[[:digit:]]"]);
    }

    #[test]
    fn test_missing_delimiter() {
        assert!(matches!(
            try_parse("just some text"),
            Err(SpecError::MissingDelimiter { offset: 0 })
        ));
        assert!(matches!(
            try_parse("[[abc]] I"),
            Err(SpecError::MissingDelimiter { .. })
        ));
    }

    #[test]
    fn test_missing_delimiter_in_later_block() {
        let result = try_parse("[[a]]//\n%50[[b]]");
        assert!(matches!(result, Err(SpecError::MissingDelimiter { .. })));
        assert!(!parse("[[a]]//\n%50[[b]]").is_valid());
        assert!(parse("[[a]]//\n%50[[b]]").groups().is_empty());
    }

    #[test]
    fn test_missing_weight_digits() {
        assert!(matches!(
            try_parse("[[a]]//\n%[[b]]//"),
            Err(SpecError::MissingWeight { offset: 8 })
        ));
    }

    #[test]
    fn test_weight_overflow() {
        assert!(matches!(
            try_parse("[[a]]//%99999999999[[b]]//"),
            Err(SpecError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_invalid_spec_keeps_defaults() {
        let spec = parse("no blocks here\npoints=3");
        assert!(!spec.is_valid());
        assert_eq!(spec.points(), 1.0);
        assert_eq!(spec.size(), 5);
        assert_eq!(spec.feedback(), "");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "[[a]] [[b]]/OI/\n%40[[c]]/s/\nseparator=;\nfeedback=x\ny";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_percent_in_metadata_region_is_not_a_block() {
        let spec = try_parse("[[a]]//\nfeedback=100%").unwrap();
        assert_eq!(spec.groups().len(), 1);
        assert_eq!(spec.feedback(), "100%");
    }

    #[test]
    fn test_empty_pattern() {
        let spec = try_parse("[[]]//").unwrap();
        assert_eq!(spec.groups()[0].patterns, vec![""]);
    }
}
