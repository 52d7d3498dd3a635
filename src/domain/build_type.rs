use crate::error::{Result, TagNextError};
use std::fmt;
use std::str::FromStr;

/// Release channel a build is tagged for.
///
/// Rendered as the suffix of every build tag (`v1.2.34-internal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BuildType {
    Dev,
    Internal,
    External,
    Release,
}

impl BuildType {
    /// All build types, in the order they are offered on the command line
    pub const ALL: [BuildType; 4] = [
        BuildType::Dev,
        BuildType::Internal,
        BuildType::External,
        BuildType::Release,
    ];

    /// The literal marker used inside tag names
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Dev => "dev",
            BuildType::Internal => "internal",
            BuildType::External => "external",
            BuildType::Release => "release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = TagNextError;

    fn from_str(s: &str) -> Result<Self> {
        BuildType::ALL
            .into_iter()
            .find(|build_type| build_type.as_str() == s)
            .ok_or_else(|| TagNextError::version(format!("Unknown build type: '{}'", s)))
    }
}
