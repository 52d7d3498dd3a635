//! Flutter projects keep their version in `pubspec.yaml` as
//! `version: <name>+<build number>`.

use crate::config::FlutterConfig;
use crate::domain::VersionInfo;
use crate::env::PatchOutcome;
use crate::error::{Result, TagNextError};
use crate::git::Repository;
use crate::ui;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

fn version_line_regex() -> &'static Regex {
    static VERSION_LINE: OnceLock<Regex> = OnceLock::new();
    VERSION_LINE.get_or_init(|| {
        Regex::new(r"version: [0-9.\-a-z+]*").expect("version line pattern is a valid regex")
    })
}

/// Replace every `version:` declaration in a pubspec with `version: <version>+<build>`.
///
/// # Example
/// ```
/// # use tag_next_build::env::flutter::rewrite_manifest_version;
/// let pubspec = "name: app\nversion: 1.0.0+1\n";
/// assert_eq!(
///     rewrite_manifest_version(pubspec, "1.2.3-dev", 3),
///     "name: app\nversion: 1.2.3-dev+3\n"
/// );
/// ```
pub fn rewrite_manifest_version(content: &str, version: &str, build_number: u64) -> String {
    let replacement = format!("version: {}+{}", version, build_number);
    version_line_regex()
        .replace_all(content, NoExpand(&replacement))
        .into_owned()
}

/// Patch the Flutter manifest with `version` and commit it.
///
/// A missing manifest is reported as [PatchOutcome::ManifestMissing], not an error.
/// A manifest the rewrite leaves unchanged is not committed.
pub fn apply<R: Repository + ?Sized>(
    version: &VersionInfo,
    project_dir: &Path,
    config: &FlutterConfig,
    repo: &R,
) -> Result<PatchOutcome> {
    let manifest = project_dir.join(&config.manifest);
    if !manifest.is_file() {
        warn!(manifest = %manifest.display(), "flutter manifest not found");
        return Ok(PatchOutcome::ManifestMissing { manifest });
    }

    let manifest_version = version.manifest_version();
    ui::display_status(&format!(
        "Will add {} to {}",
        manifest_version,
        config.manifest.display()
    ));

    let content = fs::read_to_string(&manifest)?;
    let patched = rewrite_manifest_version(&content, &manifest_version, version.build_number);
    if patched == content {
        warn!(manifest = %manifest.display(), "manifest version unchanged, nothing to commit");
        return Ok(PatchOutcome::Skipped);
    }
    fs::write(&manifest, patched)?;
    info!(manifest = %manifest.display(), version = %manifest_version, "patched manifest");

    if config.run_pub_get {
        run_pub_get(project_dir)?;
    }

    let message = format!(
        "Update version of {} to {}",
        config.manifest.display(),
        manifest_version
    );
    let commit = repo.commit_file(&manifest, &message)?;

    Ok(PatchOutcome::Patched { manifest, commit })
}

fn run_pub_get(project_dir: &Path) -> Result<()> {
    debug!(dir = %project_dir.display(), "running flutter pub get");
    let status = Command::new("flutter")
        .args(["pub", "get"])
        .current_dir(project_dir)
        .status()
        .map_err(|e| TagNextError::command(format!("failed to run flutter: {}", e)))?;

    if !status.success() {
        return Err(TagNextError::command(format!(
            "flutter pub get exited with {}",
            status
        )));
    }
    Ok(())
}
