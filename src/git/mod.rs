//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations tag-next-build needs, so the tagging workflow can run against
//! a real repository or an in-memory one in tests.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use tag_next_build::git::{self, Repository};
//! # fn example<R: Repository>(repo: &R) -> tag_next_build::Result<()> {
//! let build_tags = git::list_build_tags(repo)?;
//! if !repo.has_staged_changes()? {
//!     repo.create_tag("v1.0.2-dev", repo.head_oid()?)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::tag::has_build_marker;
use crate::error::Result;
use git2::Oid;
use std::path::Path;

/// Common git operation trait for abstraction
///
/// All methods return [crate::error::Result<T>]; implementations map
/// `git2::Error` and I/O failures into [crate::error::TagNextError].
pub trait Repository: Send {
    /// Get all tag names in the repository, in no particular order
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Whether the index differs from HEAD (staged but uncommitted changes)
    ///
    /// In a repository without commits, any staged entry counts.
    fn has_staged_changes(&self) -> Result<bool>;

    /// Object ID of the commit HEAD points to
    fn head_oid(&self) -> Result<Oid>;

    /// Create a lightweight tag at the given OID
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, OID doesn't exist, or Git error occurs
    fn create_tag(&self, name: &str, oid: Oid) -> Result<()>;

    /// Stage a single file and commit it on top of HEAD
    ///
    /// `path` must point inside the repository's working directory.
    fn commit_file(&self, path: &Path, message: &str) -> Result<Oid>;
}

/// List the tags that carry a build type marker (`dev`, `internal`,
/// `external` or `release`). No ordering is implied.
pub fn list_build_tags<R: Repository + ?Sized>(repo: &R) -> Result<Vec<String>> {
    let tags = repo.list_tags()?;
    Ok(tags.into_iter().filter(|tag| has_build_marker(tag)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_build_tags_filters_markers() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0");
        repo.add_tag("v1.0.1-dev");
        repo.add_tag("v1.0.2.external");

        let mut tags = list_build_tags(&repo).unwrap();
        tags.sort();
        assert_eq!(tags, vec!["v1.0.1-dev", "v1.0.2.external"]);
    }
}
