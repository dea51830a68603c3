use crate::{
    builder::{self, BuildReport},
    config::{self, ParaStructure},
    preview,
    validate::{self, PathError},
};
use std::path::Path;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ParaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),
}

/// Result of one run: either a dry-run preview or the materialized
/// structure with its per-entry outcomes.
#[derive(Debug)]
pub enum RunOutcome {
    /// Dry run: the rendered tree, nothing written.
    Preview(String),
    /// The structure was materialized; the tree is rendered afterwards as
    /// confirmation, even when some entries failed.
    Applied { report: BuildReport, tree: String },
}

/// Validates the base directory, then previews or materializes the
/// structure under it.
///
/// The sequence is linear with no retries: validate, then (unless
/// `preview_only`) build, then render. The render step always runs after a
/// build, whatever the per-entry outcomes.
///
/// # Errors
///
/// Returns a [`ParaError`] if:
///
/// - The base path does not exist, cannot be inspected, or is not a
///   directory. In that case nothing has been written.
///
/// Per-entry build failures are not errors here: they are collected in the
/// returned [`BuildReport`] for the caller to summarize.
pub fn run(
    structure: &ParaStructure,
    base: &Path,
    preview_only: bool,
) -> Result<RunOutcome, ParaError> {
    validate::validate_base_dir(base)?;

    if preview_only {
        log::debug!("dry run, rendering preview for {}", base.display());

        return Ok(RunOutcome::Preview(preview::render_tree(base, structure)));
    }

    log::debug!(
        "building {} directories under {}",
        structure.directories.len(),
        base.display()
    );

    let report = builder::build(structure, base);
    let tree = preview::render_tree(base, structure);

    Ok(RunOutcome::Applied { report, tree })
}
