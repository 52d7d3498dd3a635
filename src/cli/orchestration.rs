//! Main workflow orchestration logic
//!
//! Resolves the previous tag, derives the next version, checks the index,
//! asks for confirmation and finally patches the environment and tags HEAD.
//! Prompts go through [Prompter] so the whole flow runs headlessly in tests.

use std::path::PathBuf;

use tracing::{debug, info, info_span};

use crate::config::Config;
use crate::domain::version::{parse_base_version, parse_tag};
use crate::domain::{select_recent_tags, BuildType, VersionBump, VersionInfo};
use crate::env::{Environment, PatchOutcome};
use crate::error::Result;
use crate::git::{self, Repository};
use crate::ui::{self, Prompter};

/// Arguments for the tagging workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic,
/// so the workflow can be called without clap.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWorkflowArgs {
    /// Build type of the tag to create
    pub build_type: BuildType,

    pub bump_major: bool,
    pub bump_minor: bool,
    pub bump_hotfix: bool,

    /// Explicit previous tag; discovered from the repository when `None`
    pub previous_tag: Option<String>,

    /// Environment whose build files get the new version
    pub environment: Environment,

    /// Directory manifests are resolved against
    pub project_dir: PathBuf,
}

impl TagWorkflowArgs {
    /// Plain build increment for `build_type`, no environment
    pub fn new(build_type: BuildType) -> Self {
        TagWorkflowArgs {
            build_type,
            bump_major: false,
            bump_minor: false,
            bump_hotfix: false,
            previous_tag: None,
            environment: Environment::None,
            project_dir: PathBuf::from("."),
        }
    }

    pub fn bump(&self) -> VersionBump {
        VersionBump::from_flags(self.bump_major, self.bump_minor, self.bump_hotfix)
    }
}

/// Why the workflow stopped without creating a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The index has staged but uncommitted changes
    DirtyStagingArea,
    /// The operator answered "no"
    Declined,
}

/// Result of a successful tagging run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version the new tag was derived from, `None` for a first tag
    pub previous: Option<VersionInfo>,

    pub next: VersionInfo,

    /// The tag that was created
    pub tag: String,

    /// What the environment patcher did
    pub patch: PatchOutcome,
}

/// Terminal state of the workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Applied(WorkflowResult),
    Aborted(AbortReason),
}

/// Previous tag: the explicit one if given, else the highest-build-number build tag.
pub fn resolve_previous_tag<R: Repository + ?Sized>(
    args: &TagWorkflowArgs,
    config: &Config,
    repo: &R,
) -> Result<Option<String>> {
    if let Some(tag) = &args.previous_tag {
        debug!(%tag, "using explicit previous tag");
        return Ok(Some(tag.clone()));
    }

    let candidates = select_recent_tags(git::list_build_tags(repo)?, config.discovery.lookback);
    debug!(?candidates, "recent build tags");
    Ok(candidates.into_iter().next())
}

/// First version of a build type, from the operator's base `major.minor`.
pub fn create_first_version<P: Prompter + ?Sized>(
    build_type: BuildType,
    config: &Config,
    prompter: &P,
) -> Result<VersionInfo> {
    let default_base = &config.first_version.default_base;
    let answer = prompter.ask_base_version(build_type, default_base)?;
    let base = if answer.trim().is_empty() {
        default_base.as_str()
    } else {
        answer.as_str()
    };

    let (major, minor) = parse_base_version(base)?;
    Ok(VersionInfo::first(major, minor, build_type))
}

/// Parse the previous tag (or create a first version) and compute the next one.
///
/// An unparseable previous tag is fatal; there is no fallback to a first version.
pub fn compute_next_version<P: Prompter + ?Sized>(
    args: &TagWorkflowArgs,
    previous_tag: Option<&str>,
    config: &Config,
    prompter: &P,
) -> Result<(Option<VersionInfo>, VersionInfo)> {
    match previous_tag {
        Some(tag) => {
            let previous = parse_tag(tag)?;
            let next = previous.increment(args.build_type, args.bump())?;
            Ok((Some(previous), next))
        }
        None => {
            info!(build_type = %args.build_type, "no previous build tag, creating first version");
            let first = create_first_version(args.build_type, config, prompter)?;
            Ok((None, first))
        }
    }
}

/// Main tagging workflow
///
/// Nothing is written to the repository unless the index is clean and the
/// operator confirms.
pub fn run_tag_workflow<R, P>(
    args: &TagWorkflowArgs,
    config: &Config,
    repo: &R,
    prompter: &P,
) -> Result<WorkflowOutcome>
where
    R: Repository + ?Sized,
    P: Prompter + ?Sized,
{
    let span = info_span!("tag_workflow", build_type = %args.build_type);
    let _enter = span.enter();

    let previous_tag = resolve_previous_tag(args, config, repo)?;
    let (previous, next) = compute_next_version(args, previous_tag.as_deref(), config, prompter)?;
    let tag = next.assemble();
    debug!(previous = ?previous_tag, next = %tag, "computed next version");

    if repo.has_staged_changes()? {
        ui::display_warning("Git currently has some uncommitted files, aborting");
        return Ok(WorkflowOutcome::Aborted(AbortReason::DirtyStagingArea));
    }

    let previous_display = previous.map(|v| v.assemble());
    ui::display_version_report(previous_display.as_deref(), &tag);

    let question = format!(
        "Confirm execution of command 'git tag {}' and adding it to build script",
        tag
    );
    if !prompter.confirm(&question)? {
        println!("Command not executed");
        return Ok(WorkflowOutcome::Aborted(AbortReason::Declined));
    }

    let patch = args
        .environment
        .apply(&next, &args.project_dir, config, repo)?;
    report_patch(&patch, &next);

    repo.create_tag(&tag, repo.head_oid()?)?;
    info!(%tag, "created tag");
    ui::display_success(&format!("Created tag: {}", tag));

    Ok(WorkflowOutcome::Applied(WorkflowResult {
        previous,
        next,
        tag,
        patch,
    }))
}

fn report_patch(patch: &PatchOutcome, next: &VersionInfo) {
    match patch {
        PatchOutcome::Skipped => {}
        PatchOutcome::ManifestMissing { manifest } => ui::display_warning(&format!(
            "{} is not found, this tool must be run in the root of the project",
            manifest.display()
        )),
        PatchOutcome::Patched { manifest, commit } => ui::display_success(&format!(
            "Added {} to {} ({})",
            next.manifest_version(),
            manifest.display(),
            commit
        )),
    }
}
