use std::{fs, path::PathBuf, process::Command};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod sync;

const BIN_NAME: &str = "locsync";

/// Harness for driving the locsync binary against a temporary locale
/// directory. No test in this tree talks to the network: only the
/// dry-run, deletion-only, and fatal-error paths are exercised, none of
/// which invoke the translation provider.
pub struct CliTest {
    _temp_dir: TempDir,
    locale_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let locale_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            locale_dir,
        })
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.locale_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.locale_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// A command pointed at the locale directory, with a dummy credential
    /// so argument parsing succeeds.
    pub fn command(&self) -> Command {
        let mut cmd = self.bare_command();
        cmd.env("GEMINI_API_KEY", "test-key");
        cmd.arg(".");
        cmd
    }

    /// A command with a scrubbed environment and no arguments.
    pub fn bare_command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.locale_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }
}
