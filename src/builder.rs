use crate::config::{ParaDirectory, ParaStructure};
use crate::errors::{FileOperation, IoError};
use indexmap::IndexMap;
use miette::Diagnostic;
use rayon::prelude::*;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum EntryError {
    #[error("creating the directory failed: {source}")]
    #[diagnostic(code(paragen::build::create_dir))]
    DirectoryCreateFailed {
        #[source]
        source: IoError,
    },

    #[error("writing README.md failed: {source}")]
    #[diagnostic(code(paragen::build::write_readme))]
    ReadmeWriteFailed {
        #[source]
        source: IoError,
    },
}

pub type EntryOutcome = Result<(), EntryError>;

/// Per-entry outcomes of one build run, keyed by directory name in
/// definition order.
#[derive(Debug)]
pub struct BuildReport {
    outcomes: IndexMap<String, EntryOutcome>,
}

impl BuildReport {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntryOutcome)> {
        self.outcomes
            .iter()
            .map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn get(&self, name: &str) -> Option<&EntryOutcome> {
        self.outcomes.get(name)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|outcome| outcome.is_err())
            .count()
    }

    /// True when every entry was created and documented.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Materializes the structure under `base`: for every directory, ensures it
/// exists and writes its README.
///
/// Entries run concurrently and independently on the rayon pool; one
/// entry's failure never blocks, cancels or rolls back another. The call
/// returns only after every entry has completed, with failures collected in
/// the report instead of raised.
pub fn build(structure: &ParaStructure, base: &Path) -> BuildReport {
    let completed: Vec<(String, EntryOutcome)> = structure
        .directories
        .par_iter()
        .map(|directory| (directory.name.clone(), build_entry(directory, base)))
        .collect();

    BuildReport {
        outcomes: completed.into_iter().collect(),
    }
}

/// Ensures `base/<name>` exists, then writes `README.md` into it. Both
/// steps are idempotent: an existing directory is fine, an existing README
/// is truncated and overwritten.
fn build_entry(directory: &ParaDirectory, base: &Path) -> EntryOutcome {
    let directory_path = base.join(&directory.name);

    if let Err(error) = fs::create_dir_all(&directory_path) {
        return Err(EntryError::DirectoryCreateFailed {
            source: IoError::new(FileOperation::Mkdir, directory_path, error),
        });
    }

    let readme_path = directory_path.join("README.md");

    if let Err(error) = fs::write(&readme_path, &directory.readme_content) {
        return Err(EntryError::ReadmeWriteFailed {
            source: IoError::new(FileOperation::Write, readme_path, error),
        });
    }

    log::debug!("materialized {}", directory_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn structure_of(entries: &[(&str, &str)]) -> ParaStructure {
        ParaStructure {
            directories: entries
                .iter()
                .map(|(name, readme_content)| ParaDirectory {
                    name: name.to_string(),
                    readme_content: readme_content.to_string(),
                })
                .collect(),
        }
    }

    fn para_structure() -> ParaStructure {
        structure_of(&[
            ("01 PROJECTS", "P body"),
            ("02 AREAS", "A body"),
            ("03 RESOURCES", "R body"),
            ("04 ARCHIVE", "Ar body"),
        ])
    }

    #[test]
    fn builds_every_directory_with_its_readme() {
        let base = tempfile::tempdir().unwrap();
        let structure = para_structure();

        let report = build(&structure, base.path());

        assert_eq!(report.len(), 4);
        assert!(report.is_clean());

        for directory in &structure.directories {
            let readme = base.path().join(&directory.name).join("README.md");
            let content = fs::read_to_string(&readme).unwrap();
            assert_eq!(content, directory.readme_content);
        }

        // Nothing else landed under the base.
        let on_disk: BTreeSet<String> = walkdir::WalkDir::new(base.path())
            .min_depth(1)
            .into_iter()
            .map(|entry| {
                entry
                    .unwrap()
                    .path()
                    .strip_prefix(base.path())
                    .unwrap()
                    .display()
                    .to_string()
            })
            .collect();
        assert_eq!(on_disk.len(), 8);
    }

    #[test]
    fn report_preserves_definition_order() {
        let base = tempfile::tempdir().unwrap();

        let report = build(&para_structure(), base.path());

        let names: Vec<&str> = report.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            ["01 PROJECTS", "02 AREAS", "03 RESOURCES", "04 ARCHIVE"]
        );
    }

    #[test]
    fn building_twice_is_idempotent() {
        let base = tempfile::tempdir().unwrap();
        let structure = para_structure();

        let first = build(&structure, base.path());
        let second = build(&structure, base.path());

        assert!(first.is_clean());
        assert!(second.is_clean());

        let readme = base.path().join("01 PROJECTS").join("README.md");
        assert_eq!(fs::read_to_string(readme).unwrap(), "P body");
    }

    #[test]
    fn a_rerun_overwrites_stale_readme_content() {
        let base = tempfile::tempdir().unwrap();

        build(&structure_of(&[("notes", "old")]), base.path());
        let report = build(&structure_of(&[("notes", "new")]), base.path());

        assert!(report.is_clean());
        let readme = base.path().join("notes").join("README.md");
        assert_eq!(fs::read_to_string(readme).unwrap(), "new");
    }

    #[test]
    fn missing_base_components_are_created() {
        let scratch = tempfile::tempdir().unwrap();
        let base = scratch.path().join("deep").join("nested");

        let report = build(&structure_of(&[("only", "body")]), &base);

        assert!(report.is_clean());
        assert!(base.join("only").join("README.md").is_file());
    }

    #[test]
    fn one_failing_entry_does_not_block_the_others() {
        let base = tempfile::tempdir().unwrap();
        let structure = para_structure();

        // A file squatting on an entry's path makes create_dir_all fail for
        // that entry alone.
        fs::write(base.path().join("02 AREAS"), "in the way").unwrap();

        let report = build(&structure, base.path());

        assert_eq!(report.len(), 4);
        assert_eq!(report.failed_count(), 1);
        assert!(matches!(
            report.get("02 AREAS"),
            Some(Err(EntryError::DirectoryCreateFailed { .. }))
        ));

        for name in ["01 PROJECTS", "03 RESOURCES", "04 ARCHIVE"] {
            assert!(matches!(report.get(name), Some(Ok(()))), "{name} should succeed");
            assert!(base.path().join(name).join("README.md").is_file());
        }
    }

    #[test]
    fn a_blocked_readme_is_reported_as_a_write_failure() {
        let base = tempfile::tempdir().unwrap();

        // A directory where README.md should go makes the write fail while
        // the entry's directory itself is fine.
        fs::create_dir_all(base.path().join("notes").join("README.md")).unwrap();

        let report = build(&structure_of(&[("notes", "body")]), base.path());

        assert!(matches!(
            report.get("notes"),
            Some(Err(EntryError::ReadmeWriteFailed { .. }))
        ));
        assert!(base.path().join("notes").is_dir());
    }
}
