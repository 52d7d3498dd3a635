//! Command-line surface

use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli::orchestration::TagWorkflowArgs;
use crate::domain::BuildType;
use crate::env::Environment;
use crate::error::TagNextError;

#[derive(Debug, clap::Parser)]
#[command(
    name = "tag-next-build",
    version,
    about = "Runs \"git tag\" after generating a tag name for next build"
)]
pub struct Args {
    #[arg(value_enum, help = "Requested build type")]
    pub buildtype: BuildType,

    #[arg(long, help = "Increase hotfix version (also accepted as -hh)")]
    pub hotfix: bool,

    #[arg(short, long, help = "Increase minor version")]
    pub minor: bool,

    #[arg(short = 'M', long, help = "Increase major version")]
    pub major: bool,

    #[arg(
        short,
        long,
        help = "Tag to use as the tag of previous build. Found automatically if not specified"
    )]
    pub tag: Option<String>,

    #[arg(
        short,
        long,
        value_parser = parse_environment,
        help = "Current development environment (used to put tag versions into build scripts)"
    )]
    pub env: Option<Environment>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long = "dir",
        default_value = ".",
        help = "Project directory (repository and manifests)"
    )]
    pub dir: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More log output (-v debug, -vv trace)")]
    pub verbose: u8,

    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,
}

impl Args {
    /// Workflow arguments decoupled from clap
    pub fn to_workflow_args(&self) -> TagWorkflowArgs {
        TagWorkflowArgs {
            build_type: self.buildtype,
            bump_major: self.major,
            bump_minor: self.minor,
            bump_hotfix: self.hotfix,
            previous_tag: self.tag.clone(),
            environment: self.env.unwrap_or_default(),
            project_dir: self.dir.clone(),
        }
    }
}

fn parse_environment(s: &str) -> Result<Environment, String> {
    s.parse::<Environment>().map_err(|e| match e {
        TagNextError::Config(msg) => msg,
        other => other.to_string(),
    })
}

/// Rewrite the two-letter short flag `-hh` to `--hotfix`.
///
/// clap short flags are single characters and `-h` is help, so `-hh`
/// would otherwise print help.
pub fn normalize_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if arg == "-hh" {
                OsString::from("--hotfix")
            } else {
                arg
            }
        })
        .collect()
}
