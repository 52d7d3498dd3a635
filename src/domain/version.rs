use crate::domain::BuildType;
use crate::error::{Result, TagNextError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Matches `v<major>.<minor>[.<hotfix>].<build>[-.]<type>` anywhere in a tag.
const TAG_PATTERN: &str = r"v(\d+)\.(\d+)(\.(\d+))?\.(\d+)[-.](dev|internal|external|release)";

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(TAG_PATTERN).expect("tag pattern is a valid regex"))
}

/// Structured form of a build tag such as `v4.14.1.384-internal`.
///
/// A present `hotfix_version` renders with four numeric components,
/// an absent one with three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub major_version: u64,
    pub minor_version: u64,
    pub hotfix_version: Option<u64>,
    pub build_number: u64,
    pub build_type: BuildType,
}

/// Which component of the version to bump on top of the build number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Hotfix,
    Build,
}

impl VersionBump {
    /// Resolve the command-line flags into a single bump.
    ///
    /// Precedence is major, minor, hotfix; only the highest set flag counts.
    pub fn from_flags(major: bool, minor: bool, hotfix: bool) -> Self {
        if major {
            VersionBump::Major
        } else if minor {
            VersionBump::Minor
        } else if hotfix {
            VersionBump::Hotfix
        } else {
            VersionBump::Build
        }
    }
}

impl VersionInfo {
    /// Create a new version without a hotfix component
    pub fn new(major: u64, minor: u64, build_number: u64, build_type: BuildType) -> Self {
        VersionInfo {
            major_version: major,
            minor_version: minor,
            hotfix_version: None,
            build_number,
            build_type,
        }
    }

    /// Same version with the given hotfix component
    pub fn with_hotfix(mut self, hotfix: u64) -> Self {
        self.hotfix_version = Some(hotfix);
        self
    }

    /// First version of a build type lineage: no hotfix, build number 1.
    pub fn first(major: u64, minor: u64, build_type: BuildType) -> Self {
        VersionInfo::new(major, minor, 1, build_type)
    }

    /// Parse a version out of a tag string.
    ///
    /// Returns `None` when the tag does not contain a recognisable build version
    /// or a component does not fit in a `u64`. Use [parse_tag] to tell the two apart.
    ///
    /// # Example
    /// ```
    /// # use tag_next_build::domain::{BuildType, VersionInfo};
    /// let v = VersionInfo::parse("v4.14.1.384-internal").unwrap();
    /// assert_eq!(v.hotfix_version, Some(1));
    /// assert_eq!(v.build_number, 384);
    /// assert_eq!(v.build_type, BuildType::Internal);
    /// assert!(VersionInfo::parse("v1.2").is_none());
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        parse_tag(tag).ok()
    }

    /// Compute the successor version.
    ///
    /// The build number always increases by one and the build type is always
    /// replaced with `build_type`, so an existing lineage can be retagged
    /// under another release channel. Fails when a bumped component would
    /// overflow.
    pub fn increment(&self, build_type: BuildType, bump: VersionBump) -> Result<Self> {
        let mut next = VersionInfo {
            build_type,
            build_number: bumped(self.build_number, "build number")?,
            ..*self
        };

        match bump {
            VersionBump::Major => {
                next.major_version = bumped(self.major_version, "major version")?;
                next.minor_version = 0;
                next.hotfix_version = None;
            }
            VersionBump::Minor => {
                next.minor_version = bumped(self.minor_version, "minor version")?;
                next.hotfix_version = None;
            }
            VersionBump::Hotfix => {
                next.hotfix_version = Some(match self.hotfix_version {
                    Some(hotfix) => bumped(hotfix, "hotfix version")?,
                    None => 1,
                });
            }
            VersionBump::Build => {}
        }

        Ok(next)
    }

    /// Canonical tag string, e.g. `v4.14.1.385-release`
    pub fn assemble(&self) -> String {
        self.to_string()
    }

    /// Version as written into package manifests (no leading `v`)
    pub fn manifest_version(&self) -> String {
        let tag = self.assemble();
        tag.strip_prefix('v').unwrap_or(&tag).to_string()
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hotfix_version {
            Some(hotfix) => write!(
                f,
                "v{}.{}.{}.{}-{}",
                self.major_version, self.minor_version, hotfix, self.build_number, self.build_type
            ),
            None => write!(
                f,
                "v{}.{}.{}-{}",
                self.major_version, self.minor_version, self.build_number, self.build_type
            ),
        }
    }
}

fn bumped(value: u64, name: &str) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| TagNextError::version(format!("{} overflow: {} + 1", name, value)))
}

fn component(tag: &str, digits: &str, name: &str) -> Result<u64> {
    digits.parse().map_err(|_| {
        TagNextError::version(format!(
            "{} {} in tag {} is out of range",
            name, digits, tag
        ))
    })
}

/// Parse a tag, treating a non-matching tag as fatal.
///
/// A tag that matches but carries a component too large for a `u64` is a
/// version error, not an unparseable tag.
pub fn parse_tag(tag: &str) -> Result<VersionInfo> {
    let caps = tag_regex()
        .captures(tag)
        .ok_or_else(|| TagNextError::unparseable(tag))?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str());

    let major_version = component(tag, group(1).unwrap_or_default(), "Major version")?;
    let minor_version = component(tag, group(2).unwrap_or_default(), "Minor version")?;
    let hotfix_version = match group(4) {
        Some(digits) => Some(component(tag, digits, "Hotfix version")?),
        None => None,
    };
    let build_number = component(tag, group(5).unwrap_or_default(), "Build number")?;
    let build_type = group(6).unwrap_or_default().parse()?;

    Ok(VersionInfo {
        major_version,
        minor_version,
        hotfix_version,
        build_number,
        build_type,
    })
}

/// Parse the operator's `major.minor` base version answer.
///
/// # Example
/// ```
/// # use tag_next_build::domain::version::parse_base_version;
/// assert_eq!(parse_base_version("2.3").unwrap(), (2, 3));
/// assert!(parse_base_version("2").is_err());
/// ```
pub fn parse_base_version(input: &str) -> Result<(u64, u64)> {
    let input = input.trim();
    let (major, minor) = input.split_once('.').ok_or_else(|| {
        TagNextError::version(format!(
            "Invalid base version '{}' - expected <major>.<minor>",
            input
        ))
    })?;

    let major = major
        .parse::<u64>()
        .map_err(|_| TagNextError::version(format!("Invalid major version: {}", major)))?;
    let minor = minor
        .parse::<u64>()
        .map_err(|_| TagNextError::version(format!("Invalid minor version: {}", minor)))?;

    Ok((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_hotfix() {
        let v = VersionInfo::parse("v4.14.1.384-internal").unwrap();
        assert_eq!(
            v,
            VersionInfo::new(4, 14, 384, BuildType::Internal).with_hotfix(1)
        );
    }

    #[test]
    fn test_parse_without_hotfix() {
        let v = VersionInfo::parse("v4.14.384-internal").unwrap();
        assert_eq!(v, VersionInfo::new(4, 14, 384, BuildType::Internal));
    }

    #[test]
    fn test_parse_dot_separated_build_type() {
        let v = VersionInfo::parse("v1.0.7.release").unwrap();
        assert_eq!(v, VersionInfo::new(1, 0, 7, BuildType::Release));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(VersionInfo::parse("v1.2-dev").is_none());
        assert!(VersionInfo::parse("1.2.3-dev").is_none());
        assert!(VersionInfo::parse("v1.2.3-beta").is_none());
        assert!(VersionInfo::parse("").is_none());
    }

    #[test]
    fn test_parse_tag_error_is_unparseable() {
        let err = parse_tag("nonsense").unwrap_err();
        assert!(matches!(err, TagNextError::UnparseableTag { ref tag } if tag == "nonsense"));
    }

    #[test]
    fn test_assemble() {
        assert_eq!(
            VersionInfo::new(4, 14, 385, BuildType::Release)
                .with_hotfix(1)
                .assemble(),
            "v4.14.1.385-release"
        );
        assert_eq!(
            VersionInfo::new(2, 3, 1, BuildType::Dev).assemble(),
            "v2.3.1-dev"
        );
    }

    #[test]
    fn test_assemble_parse_round_trip() {
        let versions = [
            VersionInfo::new(0, 1, 1, BuildType::Dev),
            VersionInfo::new(4, 14, 384, BuildType::Internal).with_hotfix(1),
            VersionInfo::new(10, 0, 9999, BuildType::External).with_hotfix(0),
            VersionInfo::new(3, 7, 42, BuildType::Release),
        ];
        for v in versions {
            assert_eq!(VersionInfo::parse(&v.assemble()), Some(v));
        }
    }

    #[test]
    fn test_increment_build_retags_channel() {
        let prev = VersionInfo::parse("v4.14.1.384-internal").unwrap();
        let next = prev.increment(BuildType::Release, VersionBump::Build).unwrap();
        assert_eq!(next.assemble(), "v4.14.1.385-release");
    }

    #[test]
    fn test_increment_hotfix_introduces_one() {
        let prev = VersionInfo::parse("v4.14.384-internal").unwrap();
        let next = prev.increment(BuildType::Internal, VersionBump::Hotfix).unwrap();
        assert_eq!(next.assemble(), "v4.14.1.385-internal");
    }

    #[test]
    fn test_increment_hotfix_existing() {
        let prev = VersionInfo::parse("v4.14.2.384-internal").unwrap();
        let next = prev.increment(BuildType::Internal, VersionBump::Hotfix).unwrap();
        assert_eq!(next.assemble(), "v4.14.3.385-internal");
    }

    #[test]
    fn test_increment_minor_clears_hotfix() {
        let prev = VersionInfo::parse("v4.14.1.384-internal").unwrap();
        let next = prev.increment(BuildType::Internal, VersionBump::Minor).unwrap();
        assert_eq!(next.assemble(), "v4.15.385-internal");
    }

    #[test]
    fn test_increment_major_resets_minor_and_hotfix() {
        let prev = VersionInfo::parse("v4.14.1.384-internal").unwrap();
        let next = prev.increment(BuildType::Dev, VersionBump::Major).unwrap();
        assert_eq!(next.assemble(), "v5.0.385-dev");
    }

    #[test]
    fn test_increment_does_not_mutate_previous() {
        let prev = VersionInfo::new(1, 2, 3, BuildType::Dev);
        let _ = prev.increment(BuildType::Release, VersionBump::Major).unwrap();
        assert_eq!(prev, VersionInfo::new(1, 2, 3, BuildType::Dev));
    }

    #[test]
    fn test_bump_precedence() {
        assert_eq!(VersionBump::from_flags(true, true, true), VersionBump::Major);
        assert_eq!(VersionBump::from_flags(false, true, true), VersionBump::Minor);
        assert_eq!(VersionBump::from_flags(false, false, true), VersionBump::Hotfix);
        assert_eq!(VersionBump::from_flags(false, false, false), VersionBump::Build);
    }

    #[test]
    fn test_increment_flags_only_highest_applies() {
        let prev = VersionInfo::parse("v1.2.3.10-dev").unwrap();
        let bump = VersionBump::from_flags(false, true, true);
        let next = prev.increment(BuildType::Dev, bump).unwrap();
        assert_eq!(next.assemble(), "v1.3.11-dev");
    }

    #[test]
    fn test_increment_build_number_overflow_is_error() {
        let prev = VersionInfo::parse("v1.0.18446744073709551615-dev").unwrap();
        assert_eq!(prev.build_number, u64::MAX);

        let err = prev.increment(BuildType::Dev, VersionBump::Build).unwrap_err();
        assert!(matches!(err, TagNextError::Version(_)));
        assert!(err.to_string().contains("build number overflow"), "{}", err);
    }

    #[test]
    fn test_increment_component_overflow_is_error() {
        let prev = VersionInfo::new(u64::MAX, 0, 1, BuildType::Dev);
        assert!(prev.increment(BuildType::Dev, VersionBump::Major).is_err());
        assert!(prev.increment(BuildType::Dev, VersionBump::Build).is_ok());

        let prev = VersionInfo::new(1, 0, 1, BuildType::Dev).with_hotfix(u64::MAX);
        assert!(prev.increment(BuildType::Dev, VersionBump::Hotfix).is_err());
        assert!(prev.increment(BuildType::Dev, VersionBump::Minor).is_ok());
    }

    #[test]
    fn test_parse_tag_out_of_range_is_not_unparseable() {
        let err = parse_tag("v1.0.18446744073709551616-dev").unwrap_err();
        assert!(matches!(err, TagNextError::Version(_)), "{:?}", err);
        assert!(err.to_string().contains("out of range"), "{}", err);
        assert!(VersionInfo::parse("v1.0.18446744073709551616-dev").is_none());
    }

    #[test]
    fn test_first_version() {
        let (major, minor) = parse_base_version("2.3").unwrap();
        let v = VersionInfo::first(major, minor, BuildType::Dev);
        assert_eq!(v.assemble(), "v2.3.1-dev");
    }

    #[test]
    fn test_parse_base_version_invalid() {
        assert!(parse_base_version("").is_err());
        assert!(parse_base_version("1.2.3").is_err());
        assert!(parse_base_version("a.b").is_err());
        assert_eq!(parse_base_version(" 0.1 ").unwrap(), (0, 1));
    }

    #[test]
    fn test_manifest_version_strips_prefix() {
        let v = VersionInfo::new(1, 2, 30, BuildType::Release).with_hotfix(4);
        assert_eq!(v.manifest_version(), "1.2.4.30-release");
    }
}
