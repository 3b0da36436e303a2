//! Grades answers against one selected group of a specification.
//!
//! How several weighted groups combine into one grade is up to the caller;
//! a `Grader` only ever scores the group it was built for.

use crate::discover::Submission;
use crate::error::{Error, Result};
use rayon::prelude::*;
use regexmatch_score::score_group;
use regexmatch_spec::{try_parse, AnswerSpec, PatternGroup};

#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub name: String,
    /// Correctness in `[0.0, 1.0]`.
    pub fraction: f64,
    /// Weight of the graded group.
    pub percent: u32,
    pub points_awarded: f64,
}

impl Grade {
    pub fn is_correct(&self) -> bool {
        self.fraction >= 1.0
    }

    pub fn is_wrong(&self) -> bool {
        self.fraction <= 0.0
    }
}

#[derive(Debug)]
pub struct Grader {
    spec: AnswerSpec,
    group: usize,
}

impl Grader {
    pub fn new(spec: AnswerSpec, group: usize) -> Result<Self> {
        if spec.group(group).is_none() {
            return Err(Error::GroupOutOfRange {
                index: group,
                count: spec.groups().len(),
            });
        }
        Ok(Self { spec, group })
    }

    pub fn from_text(text: &str, group: usize) -> Result<Self> {
        Self::new(try_parse(text)?, group)
    }

    pub fn spec(&self) -> &AnswerSpec {
        &self.spec
    }

    pub fn group_index(&self) -> usize {
        self.group
    }

    pub fn group(&self) -> &PatternGroup {
        &self.spec.groups()[self.group]
    }

    pub fn grade(&self, name: &str, submitted: &str) -> Grade {
        let fraction = score_group(&self.spec, self.group, submitted);
        Grade {
            name: name.to_string(),
            fraction,
            percent: self.group().percent,
            points_awarded: fraction * self.spec.points(),
        }
    }

    /// Grades in input order.
    pub fn grade_all(&self, submissions: &[Submission], parallel: bool) -> Vec<Grade> {
        if parallel && submissions.len() > 1 {
            submissions
                .par_iter()
                .map(|s| self.grade(&s.name, &s.text))
                .collect()
        } else {
            submissions
                .iter()
                .map(|s| self.grade(&s.name, &s.text))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regexmatch_spec::{parse, SpecError};

    fn submission(name: &str, text: &str) -> Submission {
        Submission {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_grade_awards_points() {
        let grader = Grader::from_text("[[a]] [[b]]/O/\npoints=4", 0).unwrap();
        let grade = grader.grade("x", "a");
        assert_eq!(grade.fraction, 0.5);
        assert_eq!(grade.points_awarded, 2.0);
        assert_eq!(grade.percent, 100);
        assert!(!grade.is_correct());
        assert!(!grade.is_wrong());
    }

    #[test]
    fn test_selected_group() {
        let grader = Grader::from_text("[[a]]//\n%40[[b]]//", 1).unwrap();
        assert_eq!(grader.group().percent, 40);

        let grade = grader.grade("x", "b");
        assert!(grade.is_correct());
        assert_eq!(grade.percent, 40);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        assert!(matches!(
            Grader::from_text("nothing to see", 0),
            Err(Error::InvalidSpec(SpecError::MissingDelimiter { .. }))
        ));
        assert!(matches!(
            Grader::new(parse("nothing to see"), 0),
            Err(Error::GroupOutOfRange { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_group_out_of_range() {
        assert!(matches!(
            Grader::from_text("[[a]]//", 2),
            Err(Error::GroupOutOfRange { index: 2, count: 1 })
        ));
    }

    #[test]
    fn test_grade_all_preserves_order() {
        let grader = Grader::from_text("[[ok]]//", 0).unwrap();
        let submissions: Vec<_> = (0..50)
            .map(|i| submission(&i.to_string(), if i % 2 == 0 { "ok" } else { "no" }))
            .collect();

        let parallel = grader.grade_all(&submissions, true);
        let sequential = grader.grade_all(&submissions, false);
        assert_eq!(parallel, sequential);
        for (i, grade) in parallel.iter().enumerate() {
            assert_eq!(grade.name, i.to_string());
            assert_eq!(grade.is_correct(), i % 2 == 0);
        }
    }
}
