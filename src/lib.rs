pub mod api;
pub mod builder;
pub mod config;
pub mod errors;
pub mod preview;
pub mod validate;

pub use api::{run, ParaError, RunOutcome};
pub use builder::{build, BuildReport, EntryError, EntryOutcome};
pub use config::{ParaDirectory, ParaStructure};
pub use preview::render_tree;
pub use validate::{validate_base_dir, PathError};
