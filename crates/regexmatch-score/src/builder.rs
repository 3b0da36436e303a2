//! Turns one raw pattern plus its options into an anchored regex.

use regex::Regex;
use regexmatch_spec::OptionFlags;
use thiserror::Error;
use tracing::trace;

/// `$` as PCRE reads it without the `m` and `D` modifiers: end of input, or
/// just before a single trailing newline.
const ANCHOR_END: &str = r")\n?$";

const SPACES: &str = r"(?:[ \t]+)";
const SEMICOLON: &str = r"(?:[ \t]*[;\n][ \t]*)";
const ESCAPED_PIPE: &str = r"\|";
const SPACED_PIPE: &str = r"(?:[ \t]*\|[ \t]*)";

/// Longest tokens first, so `>>` is never split into two `>`.
const REDIRECT_TOKENS: [&str; 4] = ["<<", ">>", "<", ">"];

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to build regex '{regex}': {source}")]
    InvalidRegex {
        regex: String,
        #[source]
        source: regex::Error,
    },
}

/// Regex text for `pattern`, anchored to the whole input.
///
/// Substitutions run in a fixed order: spaces, then `;` and `\|`, then
/// redirections, then `/` escaping. Each step only rewrites characters the
/// author wrote, never text inserted by an earlier step.
pub fn construct(pattern: &str, options: &OptionFlags) -> String {
    let mut regex = pattern.to_string();

    if options.collapse_infinite_spaces {
        regex = regex.replace(' ', SPACES);
    }

    if options.pipe_semicolon_spacing {
        regex = regex.replace(';', SEMICOLON).replace(ESCAPED_PIPE, SPACED_PIPE);
    }

    if options.redirect_spacing {
        regex = space_redirects(&regex);
    }

    let mut constructed = String::new();
    if options.ignore_case || options.dot_all {
        constructed.push_str("(?");
        if options.ignore_case {
            constructed.push('i');
        }
        if options.dot_all {
            constructed.push('s');
        }
        constructed.push(')');
    }
    constructed.push_str("^(?:");
    constructed.push_str(&escape_slashes(&regex));
    constructed.push_str(ANCHOR_END);
    constructed
}

pub fn build(pattern: &str, options: &OptionFlags) -> Result<Regex, BuildError> {
    let regex = construct(pattern, options);
    trace!(pattern, %regex, "constructed regex");
    Regex::new(&regex).map_err(|source| BuildError::InvalidRegex { regex, source })
}

fn space_redirects(regex: &str) -> String {
    let mut spaced = String::with_capacity(regex.len());
    let mut rest = regex;

    while let Some(c) = rest.chars().next() {
        match REDIRECT_TOKENS.iter().find(|token| rest.starts_with(*token)) {
            Some(token) => {
                spaced.push_str(r"(?:[ \t]*");
                spaced.push_str(token);
                spaced.push_str(r"[ \t]*)");
                rest = &rest[token.len()..];
            }
            None => {
                spaced.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    spaced
}

/// Escape every `/` that is not already escaped.
fn escape_slashes(regex: &str) -> String {
    let mut escaped = String::with_capacity(regex.len());
    let mut backslashes = 0;

    for c in regex.chars() {
        if c == '/' && backslashes % 2 == 0 {
            escaped.push('\\');
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        escaped.push(c);
    }

    escaped
}
