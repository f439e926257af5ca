/*! Materializing a simulation result as a Git repository.

The persisted timestamp file is consumed line by line; every line
becomes one commit whose authored and committed dates are forced to the
simulated instant via the `GIT_AUTHOR_DATE`/`GIT_COMMITTER_DATE`
environment, with a rewritten README as the commit's content.
*/

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::Command;

use chrono::NaiveDateTime;
use rand::distr::{Alphanumeric, SampleString};
use rand::RngCore;
use thiserror::Error;
use tracing::info;

use crate::report::TIMESTAMP_FORMAT;

/// Error type returned when repository materialization fails.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("git {subcommand} exited with {status}")]
    GitFailure { subcommand: &'static str, status: std::process::ExitStatus },
    #[error("malformed timestamp line {0:?}")]
    MalformedTimestamp(String),
}

/// Random alphanumeric suffix for a generated repository name.
pub fn random_repo_suffix(length: usize, rng: &mut dyn RngCore) -> String {
    Alphanumeric.sample_string(rng, length)
}

/// Replay a persisted timestamp file as a fresh Git repository at
/// `repo_path`. Returns the number of commits created.
pub fn create_simulated_repository(
    sim_result_path: &Path,
    repo_path: &Path,
) -> Result<usize, RepoError> {
    fs::create_dir_all(repo_path)?;
    git_init(repo_path)?;

    let mut commits = 0;
    let reader = BufReader::new(File::open(sim_result_path)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let date = parse_timestamp_line(&line)?;
        write_readme(repo_path, &line)?;
        git_add_all(repo_path)?;
        git_commit(repo_path, date, &format!("Update {}", line.trim()))?;
        commits += 1;
    }
    info!("replayed {} commits into {}", commits, repo_path.display());
    Ok(commits)
}

fn parse_timestamp_line(line: &str) -> Result<NaiveDateTime, RepoError> {
    NaiveDateTime::parse_from_str(line.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| RepoError::MalformedTimestamp(line.to_string()))
}

fn write_readme(repo_path: &Path, date_line: &str) -> io::Result<()> {
    let mut readme = File::create(repo_path.join("README.md"))?;
    writeln!(readme, "# Simulated Git Repository")?;
    writeln!(readme)?;
    writeln!(readme, "{}", date_line.trim())
}

fn run_git(repo_path: &Path, subcommand: &'static str, configure: impl FnOnce(&mut Command)) -> Result<(), RepoError> {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo_path);
    configure(&mut cmd);
    let status = cmd.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(RepoError::GitFailure { subcommand, status })
    }
}

/// `git init` with `main` as the default branch.
fn git_init(repo_path: &Path) -> Result<(), RepoError> {
    run_git(repo_path, "init", |cmd| {
        cmd.args(["init", "-b", "main"]);
    })
}

fn git_add_all(repo_path: &Path) -> Result<(), RepoError> {
    run_git(repo_path, "add", |cmd| {
        cmd.args(["add", "."]);
    })
}

/// Commit all staged changes with both Git dates forced to the
/// simulated instant. The timestamp carries no zone; Git interprets it
/// in the machine-local zone, matching how the file was written.
fn git_commit(repo_path: &Path, date: NaiveDateTime, message: &str) -> Result<(), RepoError> {
    let iso_date = date.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    run_git(repo_path, "commit", |cmd| {
        cmd.args(["commit", "-m", message])
            .env("GIT_AUTHOR_DATE", &iso_date)
            .env("GIT_COMMITTER_DATE", &iso_date);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn suffix_has_requested_length_and_charset() {
        let mut rng = StdRng::seed_from_u64(99);
        let suffix = random_repo_suffix(8, &mut rng);
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn timestamp_lines_parse_and_reject_garbage() {
        let parsed = parse_timestamp_line("2026-08-05 09:30:00.250000\n").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "09:30");
        assert!(parse_timestamp_line("not a timestamp").is_err());
    }

    #[test]
    fn readme_embeds_the_commit_date() {
        let dir = tempfile::tempdir().unwrap();
        write_readme(dir.path(), "2026-08-05 09:30:00.250000").unwrap();
        let content = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(content.starts_with("# Simulated Git Repository"));
        assert!(content.contains("2026-08-05 09:30:00.250000"));
    }
}
