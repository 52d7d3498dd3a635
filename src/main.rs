use anyhow::{Context, Result};
use clap::Parser;

use tag_next_build::cli::{self, Args, WorkflowOutcome};
use tag_next_build::git::Git2Repository;
use tag_next_build::ui::{self, ConsolePrompter};
use tag_next_build::{config, logging};

fn main() -> Result<()> {
    let args = Args::parse_from(cli::normalize_args(std::env::args_os()));
    logging::init(args.quiet, args.verbose);

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = Git2Repository::open(&args.dir).with_context(|| {
        format!("Not in a git repository: {}", args.dir.display())
    })?;

    let prompter = ConsolePrompter::stdin();
    match cli::run_tag_workflow(&args.to_workflow_args(), &config, &repo, &prompter) {
        Ok(WorkflowOutcome::Applied(result)) => {
            tracing::debug!(tag = %result.tag, "workflow applied");
            Ok(())
        }
        Ok(WorkflowOutcome::Aborted(reason)) => {
            tracing::debug!(?reason, "workflow aborted");
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
