use crate::error::CollectorError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as GitCommand;

type Result<T> = std::result::Result<T, CollectorError>;

/// Runs git commands inside one working tree.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run a git command and capture stdout as String.
    pub fn output(&self, args: &[&str]) -> Result<String> {
        let output = GitCommand::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| CollectorError::Spawn {
                args: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            return Err(CollectorError::Exit {
                args: args.join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Get the full staged diff.
    pub fn staged_diff(&self) -> Result<String> {
        self.output(&["diff", "--cached"])
    }

    /// Subjects of the last `count` commits, most recent first.
    ///
    /// With `author`, only commits by that identity are listed: an email is
    /// matched literally and whole, anything else as a literal substring of
    /// `Name <email>`. A repository without any commits yet has no history
    /// rather than failing.
    pub fn recent_subjects(&self, count: usize, author: Option<&str>) -> Result<Vec<String>> {
        if !self.has_commits()? {
            log::debug!("repository has no commits yet");
            return Ok(vec![]);
        }

        let limit = format!("-{count}");
        let author_arg;
        let mut args = vec!["log", "--pretty=format:%s", limit.as_str()];
        if let Some(author) = author {
            author_arg = format!("--author={}", author_pattern(author));
            args.push("--fixed-strings");
            args.push(&author_arg);
        }

        let output = self.output(&args)?;
        let subjects = output
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Ok(subjects)
    }

    /// The configured `user.email`, if any.
    pub fn user_email(&self) -> Result<Option<String>> {
        match self.output(&["config", "user.email"]) {
            Ok(email) => {
                let email = email.trim();
                Ok((!email.is_empty()).then(|| email.to_string()))
            }
            // `git config` exits 1 when the key is unset.
            Err(CollectorError::Exit { code: Some(1), .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn has_commits(&self) -> Result<bool> {
        match self.output(&["rev-parse", "--verify", "--quiet", "HEAD"]) {
            Ok(_) => Ok(true),
            Err(CollectorError::Exit { code: Some(1), .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get the path to the Git directory (e.g. .git)
    pub fn git_dir(&self) -> Result<PathBuf> {
        let dir = self.output(&["rev-parse", "--git-dir"])?;
        Ok(self.workdir.join(dir.trim()))
    }

    /// Write the commit message into .git/COMMIT_EDITMSG so the next `git commit`
    /// will use it as the default message in the editor.
    pub fn write_commit_editmsg(&self, message: &str) -> Result<PathBuf> {
        let path = self.git_dir()?.join("COMMIT_EDITMSG");
        fs::write(&path, format!("{message}\n")).map_err(|source| CollectorError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}

/// `bob@example.com` becomes `<bob@example.com>` so it cannot match
/// `jacob@example.com`.
fn author_pattern(author: &str) -> String {
    let author = author.trim();
    if author.contains('@') && !author.contains('<') {
        format!("<{author}>")
    } else {
        author.to_string()
    }
}
