//! Live git adapter using `git` CLI commands.

use std::process::Command;

use crate::ports::git::GitRepo;

/// Live git adapter that shells out to the `git` CLI in the current directory.
pub struct LiveGitRepo;

impl GitRepo for LiveGitRepo {
    fn changed_paths(
        &self,
        base: Option<&str>,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut args = vec!["diff", "--name-only"];
        args.extend(base);
        args.push("HEAD");

        let output = Command::new("git").args(&args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git {} failed: {}", args.join(" "), stderr.trim()).into());
        }
        let paths = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Ok(paths)
    }
}
