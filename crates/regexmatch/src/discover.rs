use crate::error::{Error, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Reads from stdin when given as the specification or submission path.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: String,
    pub text: String,
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

pub fn read_spec(path: &Path) -> Result<String> {
    if is_stdin(path) {
        return read_stdin();
    }
    std::fs::read_to_string(path).map_err(|e| Error::ReadSpec {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Submission files named on the command line, with directories expanded to
/// the `*.txt` files below them in sorted order.
pub fn discover_submission_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry?;
            let file = entry.path();
            if file.is_file() && file.extension().is_some_and(|ext| ext == "txt") {
                found.push(file.to_path_buf());
            }
        }
        found.sort();
        debug!(dir = %path.display(), count = found.len(), "discovered submissions");
        files.extend(found);
    }

    Ok(files)
}

/// Every answer to grade: inline `--answer` texts first, then files. With
/// neither, a single answer is read from stdin.
pub fn collect_submissions(
    answers: &[String],
    paths: &[PathBuf],
    spec_from_stdin: bool,
) -> Result<Vec<Submission>> {
    let mut submissions: Vec<Submission> = answers
        .iter()
        .enumerate()
        .map(|(i, text)| Submission {
            name: format!("answer {}", i + 1),
            text: text.clone(),
        })
        .collect();

    let files = discover_submission_files(paths)?;
    let stdin_reads = files.iter().filter(|file| is_stdin(file)).count() + spec_from_stdin as usize;
    if stdin_reads > 1 {
        return Err(Error::StdinTwice);
    }

    for file in files {
        let text = if is_stdin(&file) {
            read_stdin()?
        } else {
            std::fs::read_to_string(&file).map_err(|e| Error::ReadSubmission {
                path: file.clone(),
                source: e,
            })?
        };
        submissions.push(Submission {
            name: file.display().to_string(),
            text,
        });
    }

    if submissions.is_empty() {
        if spec_from_stdin {
            return Err(Error::StdinTwice);
        }
        submissions.push(Submission {
            name: "<stdin>".to_string(),
            text: read_stdin()?,
        });
    }

    Ok(submissions)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_directories_expand_to_txt_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::write(dir.path().join("nested/c.txt"), "c").unwrap();

        let files = discover_submission_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("nested/c.txt"),
            ]
        );
    }

    #[test]
    fn test_files_kept_in_order() {
        let dir = TempDir::new().unwrap();
        let second = dir.path().join("second.log");
        let first = dir.path().join("first.log");
        fs::write(&second, "2").unwrap();
        fs::write(&first, "1").unwrap();

        let files = discover_submission_files(&[second.clone(), first.clone()]).unwrap();
        assert_eq!(files, vec![second, first]);
    }

    #[test]
    fn test_collect_inline_answers_before_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("x.txt");
        fs::write(&file, "from file").unwrap();

        let submissions =
            collect_submissions(&["inline".to_string()], &[file.clone()], false).unwrap();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].name, "answer 1");
        assert_eq!(submissions[0].text, "inline");
        assert_eq!(submissions[1].name, file.display().to_string());
        assert_eq!(submissions[1].text, "from file");
    }

    #[test]
    fn test_missing_submission_file() {
        let result = collect_submissions(&[], &[PathBuf::from("/nonexistent/answer")], false);
        assert!(matches!(result, Err(Error::ReadSubmission { .. })));
    }

    #[test]
    fn test_stdin_cannot_serve_twice() {
        let result = collect_submissions(&[], &[], true);
        assert!(matches!(result, Err(Error::StdinTwice)));
    }

    #[test]
    fn test_stdin_listed_twice() {
        let dash = PathBuf::from(STDIN_PATH);
        let result = collect_submissions(&[], &[dash.clone(), dash], false);
        assert!(matches!(result, Err(Error::StdinTwice)));
    }
}
