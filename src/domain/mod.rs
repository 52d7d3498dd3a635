//! Domain logic - pure versioning rules independent of git operations

pub mod build_type;
pub mod tag;
pub mod version;

pub use build_type::BuildType;
pub use tag::select_recent_tags;
pub use version::{VersionBump, VersionInfo};
