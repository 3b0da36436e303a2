//! Scores a submitted answer against one pattern group.

use crate::builder::build;
use regex::Regex;
use regexmatch_spec::{trim, AnswerSpec, OptionFlags, PatternGroup};
use tracing::warn;

/// Score against the first group.
pub fn score(spec: &AnswerSpec, submitted: &str) -> f64 {
    score_group(spec, 0, submitted)
}

/// Score against the group at `index`. Invalid specifications and
/// out-of-range groups score 0.0.
pub fn score_group(spec: &AnswerSpec, index: usize, submitted: &str) -> f64 {
    match spec.group(index) {
        Some(group) => Scorer::new(group, spec.separator()).score(submitted),
        None => 0.0,
    }
}

pub struct Scorer<'a> {
    group: &'a PatternGroup,
    separator: &'a str,
}

impl<'a> Scorer<'a> {
    pub fn new(group: &'a PatternGroup, separator: &'a str) -> Self {
        Self { group, separator }
    }

    /// Correctness fraction in `[0.0, 1.0]`.
    pub fn score(&self, submitted: &str) -> f64 {
        let answer = if self.group.options.trim_spaces {
            trim(submitted)
        } else {
            submitted
        };

        if self.group.options.match_any_order {
            self.score_any_order(answer)
        } else {
            self.score_single(answer)
        }
    }

    /// Only the first pattern is consulted.
    fn score_single(&self, answer: &str) -> f64 {
        let Some(pattern) = self.group.patterns.first() else {
            return 0.0;
        };

        match compile(pattern, &self.group.options) {
            Some(regex) if regex.is_match(answer) => 1.0,
            _ => 0.0,
        }
    }

    fn score_any_order(&self, answer: &str) -> f64 {
        let max_points = self.group.patterns.len() as i64;
        if max_points == 0 {
            return 0.0;
        }

        let mut lines: Vec<&str> = if self.separator.is_empty() {
            vec![answer]
        } else {
            answer.split(self.separator).collect()
        };
        if self.group.options.trim_spaces {
            for line in &mut lines {
                *line = trim(*line);
            }
        }

        let mut consumed = vec![false; lines.len()];
        for pattern in &self.group.patterns {
            let Some(regex) = compile(pattern, &self.group.options) else {
                continue;
            };
            let first_free = (0..lines.len()).find(|&i| !consumed[i] && regex.is_match(lines[i]));
            if let Some(i) = first_free {
                consumed[i] = true;
            }
        }

        let line_count = lines.len() as i64;
        let unmatched = consumed.iter().filter(|&&c| !c).count() as i64;
        let count_delta = max_points - line_count;

        // Missing lines and unmatched extra lines cost one point each; extra
        // lines already charged through the count difference are not
        // charged again.
        let points = (max_points - count_delta.abs() - (unmatched - (-count_delta).max(0))).max(0);

        points as f64 / max_points as f64
    }
}

fn compile(pattern: &str, options: &OptionFlags) -> Option<Regex> {
    match build(pattern, options) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(error = %e, "pattern never matches");
            None
        }
    }
}
