use crate::error::{Result, TagNextError};
use crate::git::Repository;
use git2::Oid;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Mock repository for testing without actual git operations
///
/// Records every tag and commit the workflow asks for so tests can assert
/// on what would have been written.
pub struct MockRepository {
    tags: Mutex<Vec<String>>,
    staged_changes: bool,
    head: Oid,
    created_tags: Mutex<Vec<(String, Oid)>>,
    commits: Mutex<Vec<(PathBuf, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Mutex::new(Vec::new()),
            staged_changes: false,
            head: Oid::zero(),
            created_tags: Mutex::new(Vec::new()),
            commits: Mutex::new(Vec::new()),
        }
    }

    /// Add an existing tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        lock(&self.tags).push(name.into());
    }

    /// Pretend the index has (or has not) staged changes
    pub fn set_staged_changes(&mut self, staged: bool) {
        self.staged_changes = staged;
    }

    /// Set the HEAD commit
    pub fn set_head(&mut self, oid: Oid) {
        self.head = oid;
    }

    /// Tags created through [Repository::create_tag], in order
    pub fn created_tags(&self) -> Vec<(String, Oid)> {
        lock(&self.created_tags).clone()
    }

    /// Files committed through [Repository::commit_file], in order
    pub fn commits(&self) -> Vec<(PathBuf, String)> {
        lock(&self.commits).clone()
    }
}

// a poisoned lock only means another test thread panicked mid-push
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(lock(&self.tags).clone())
    }

    fn has_staged_changes(&self) -> Result<bool> {
        Ok(self.staged_changes)
    }

    fn head_oid(&self) -> Result<Oid> {
        Ok(self.head)
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let mut tags = lock(&self.tags);
        if tags.iter().any(|tag| tag == name) {
            return Err(TagNextError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        tags.push(name.to_string());
        lock(&self.created_tags).push((name.to_string(), oid));
        Ok(())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<Oid> {
        lock(&self.commits).push((path.to_path_buf(), message.to_string()));
        Ok(self.head)
    }
}
