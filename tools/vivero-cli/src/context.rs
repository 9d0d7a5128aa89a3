//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::CliConfig;
use crate::output::Output;

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["vivero.toml", ".vivero.toml", "vivero.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_file: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file and environment.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_file = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => find_config(&cwd),
        };

        let config = match &config_file {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        Ok(Self {
            config: config.with_env(),
            config_file,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".vivero.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".vivero.toml")));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vivero.json"), "{}").unwrap();
        std::fs::write(dir.path().join("vivero.toml"), "").unwrap();

        assert_eq!(find_config(dir.path()), Some(dir.path().join("vivero.toml")));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let cwd = Path::new("/work");
        assert_eq!(resolve(cwd, "/etc/key"), PathBuf::from("/etc/key"));
        assert_eq!(resolve(cwd, "out/key"), PathBuf::from("/work/out/key"));
    }
}
