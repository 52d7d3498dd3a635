//! Command-line entry points: argument parsing and the tagging workflow

pub mod args;
pub mod orchestration;

pub use args::{normalize_args, Args};
pub use orchestration::{
    run_tag_workflow, AbortReason, TagWorkflowArgs, WorkflowOutcome, WorkflowResult,
};
