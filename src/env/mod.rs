//! Environment patching - mirror the new version into a project's build files
//!
//! Each [Environment] variant has one handler. Only Flutter projects are
//! patched today; [Environment::None] leaves the tree untouched and is
//! what an absent `--env` means.

pub mod flutter;

use crate::config::Config;
use crate::domain::VersionInfo;
use crate::error::{Result, TagNextError};
use crate::git::Repository;
use git2::Oid;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Development environment whose build files carry the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    None,
    Flutter,
}

/// What the patcher did
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOutcome {
    /// Nothing to patch for this environment, or the manifest already
    /// carries the version
    Skipped,
    /// The manifest the environment expects does not exist
    ManifestMissing { manifest: PathBuf },
    /// The manifest was rewritten and committed
    Patched { manifest: PathBuf, commit: Oid },
}

impl Environment {
    /// Write `version` into the project's build files and commit the change.
    ///
    /// `project_dir` is the directory the manifest path is resolved against.
    pub fn apply<R: Repository + ?Sized>(
        &self,
        version: &VersionInfo,
        project_dir: &Path,
        config: &Config,
        repo: &R,
    ) -> Result<PatchOutcome> {
        match self {
            Environment::None => Ok(PatchOutcome::Skipped),
            Environment::Flutter => flutter::apply(version, project_dir, &config.flutter, repo),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::None => f.write_str("none"),
            Environment::Flutter => f.write_str("flutter"),
        }
    }
}

impl FromStr for Environment {
    type Err = TagNextError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flutter" => Ok(Environment::Flutter),
            "spring-java" | "spring-kotlin" => Err(TagNextError::config(format!(
                "environment '{}' is not supported yet",
                s
            ))),
            other => Err(TagNextError::config(format!(
                "unknown environment '{}' (expected: flutter)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BuildType;
    use crate::git::MockRepository;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("flutter".parse::<Environment>().unwrap(), Environment::Flutter);
    }

    #[test]
    fn test_spring_environments_rejected() {
        for name in ["spring-java", "spring-kotlin"] {
            let err = name.parse::<Environment>().unwrap_err();
            assert!(err.to_string().contains("not supported yet"), "{}", err);
        }
    }

    #[test]
    fn test_unknown_environment_rejected() {
        assert!("gradle".parse::<Environment>().is_err());
        // only reachable by omitting --env
        assert!("none".parse::<Environment>().is_err());
    }

    #[test]
    fn test_none_environment_does_nothing() {
        let repo = MockRepository::new();
        let version = VersionInfo::new(1, 0, 2, BuildType::Dev);
        let outcome = Environment::None
            .apply(&version, Path::new("."), &Config::default(), &repo)
            .unwrap();

        assert_eq!(outcome, PatchOutcome::Skipped);
        assert!(repo.commits().is_empty());
    }
}
