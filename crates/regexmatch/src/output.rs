use crate::grade::{Grade, Grader};
use regexmatch_score::construct;
use regexmatch_spec::AnswerSpec;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub struct Output {
    stdout: StandardStream,
}

impl Output {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(color_choice),
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
    }

    fn set_bold(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_bold(true));
    }

    fn set_dim(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_dimmed(true));
    }

    fn reset(&mut self) {
        let _ = self.stdout.reset();
    }

    pub fn print_grade(&mut self, grade: &Grade) -> io::Result<()> {
        if grade.is_correct() {
            self.set_color(Color::Green);
            write!(self.stdout, "✓")?;
        } else if grade.is_wrong() {
            self.set_color(Color::Red);
            write!(self.stdout, "✗")?;
        } else {
            self.set_color(Color::Yellow);
            write!(self.stdout, "◐")?;
        }
        self.reset();

        write!(self.stdout, " {} {:.2}", grade.name, grade.fraction)?;
        self.set_dim();
        writeln!(self.stdout, " ({:.2} points)", grade.points_awarded)?;
        self.reset();
        Ok(())
    }

    pub fn print_summary(&mut self, grades: &[Grade], grader: &Grader) -> io::Result<()> {
        let correct = grades.iter().filter(|g| g.is_correct()).count();
        let wrong = grades.iter().filter(|g| g.is_wrong()).count();
        let partial = grades.len() - correct - wrong;

        writeln!(self.stdout)?;
        self.set_bold();
        write!(
            self.stdout,
            "{} answer{} graded against block {} ({}%):",
            grades.len(),
            if grades.len() == 1 { "" } else { "s" },
            grader.group_index() + 1,
            grader.group().percent
        )?;
        self.reset();

        self.set_color(Color::Green);
        write!(self.stdout, " {} correct", correct)?;
        self.reset();
        if partial > 0 {
            write!(self.stdout, ",")?;
            self.set_color(Color::Yellow);
            write!(self.stdout, " {} partial", partial)?;
            self.reset();
        }
        if wrong > 0 {
            write!(self.stdout, ",")?;
            self.set_color(Color::Red);
            write!(self.stdout, " {} wrong", wrong)?;
            self.reset();
        }
        writeln!(self.stdout)?;

        let feedback = grader.spec().feedback();
        if !feedback.is_empty() {
            self.set_dim();
            write!(self.stdout, "Feedback: ")?;
            self.reset();
            writeln!(self.stdout, "{}", feedback)?;
        }
        Ok(())
    }

    pub fn print_json(&mut self, grade: &Grade, spec: &AnswerSpec) -> io::Result<()> {
        let record = serde_json::json!({
            "name": grade.name,
            "fraction": grade.fraction,
            "percent": grade.percent,
            "points": spec.points(),
            "points_awarded": grade.points_awarded,
            "size": spec.size(),
            "feedback": spec.feedback(),
        });
        writeln!(self.stdout, "{}", record)
    }

    pub fn print_spec(&mut self, spec: &AnswerSpec) -> io::Result<()> {
        for (i, group) in spec.groups().iter().enumerate() {
            self.set_bold();
            write!(self.stdout, "block {} ({}%)", i + 1, group.percent)?;
            self.reset();
            let flags = group.options.to_string();
            if !flags.is_empty() {
                self.set_dim();
                write!(self.stdout, " /{}/", flags)?;
                self.reset();
            }
            if group.options.match_any_order {
                write!(self.stdout, " any order")?;
            }
            writeln!(self.stdout)?;

            for pattern in &group.patterns {
                writeln!(self.stdout, "  [[{}]]", pattern)?;
                self.set_dim();
                writeln!(self.stdout, "    {}", construct(pattern, &group.options))?;
                self.reset();
            }
        }

        writeln!(self.stdout, "separator: {:?}", spec.separator())?;
        writeln!(self.stdout, "points: {}", spec.points())?;
        writeln!(self.stdout, "size: {}", spec.size())?;
        if !spec.feedback().is_empty() {
            writeln!(self.stdout, "feedback: {}", spec.feedback())?;
        }
        Ok(())
    }
}
