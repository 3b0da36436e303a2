use clap::Parser;
use regexmatch::cli::Cli;
use regexmatch::discover::{collect_submissions, is_stdin, read_spec};
use regexmatch::error::Error;
use regexmatch::grade::{Grade, Grader};
use regexmatch::logging::init_logging;
use regexmatch::output::Output;

/// Exit status when the specification cannot be parsed.
const EXIT_INVALID_SPEC: i32 = 2;

fn main() -> anyhow::Result<()> {
    // Reset SIGPIPE handler to default (terminate) so piping to head/tail works correctly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = !cli.no_color && atty::is(atty::Stream::Stdout);
    let mut output = Output::new(use_color);

    let spec_text = read_spec(&cli.spec)?;
    let grader = match Grader::from_text(&spec_text, cli.group) {
        Ok(grader) => grader,
        Err(e @ Error::InvalidSpec(_)) => {
            eprintln!("{}: {}", cli.spec.display(), e);
            std::process::exit(EXIT_INVALID_SPEC);
        }
        Err(e) => return Err(e.into()),
    };

    if cli.list {
        output.print_spec(grader.spec())?;
        return Ok(());
    }

    let submissions = collect_submissions(&cli.answers, &cli.submissions, is_stdin(&cli.spec))?;
    tracing::info!(count = submissions.len(), group = cli.group, "grading");

    let grades = grader.grade_all(&submissions, !cli.sequential);

    if cli.json {
        for grade in &grades {
            output.print_json(grade, grader.spec())?;
        }
    } else {
        for grade in &grades {
            output.print_grade(grade)?;
        }
        output.print_summary(&grades, &grader)?;
    }

    let all_correct = grades.iter().all(Grade::is_correct);
    std::process::exit(if all_correct { 0 } else { 1 });
}
