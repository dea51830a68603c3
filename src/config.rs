use crate::errors::{FileOperation, IoError, ParseError};
use miette::Diagnostic;
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path};
use thiserror::Error;

/// Default structure definition, compiled into the binary so the tool works
/// without any external files.
const EMBEDDED_CONFIG: &str = include_str!("../config.toml");

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid directory name: '{name}'")]
    #[diagnostic(
        code(paragen::config::invalid_name),
        help("Directory names must be non-empty, must not contain path separators and must not be '.' or '..'")
    )]
    InvalidName { name: String },
}

/// One directory of the structure: its name and the content written to the
/// README.md inside it. Read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ParaDirectory {
    pub name: String,
    pub readme_content: String,
}

/// The full structure definition. `directories` keeps the order of the TOML
/// file; that order only matters for preview rendering, creation is
/// concurrent and unordered.
#[derive(Debug, Clone, Deserialize)]
pub struct ParaStructure {
    pub directories: Vec<ParaDirectory>,
}

impl ParaStructure {
    /// Loads the structure definition compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(EMBEDDED_CONFIG, Path::new("config.toml"))
    }

    /// Loads a structure definition from an external TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let parsed: ParaStructure = toml::from_str(content)
            .map_err(|error| ParseError::new(origin.to_path_buf(), error))?;

        parsed.validate()?;

        Ok(parsed)
    }

    /// Checks every directory name against the naming rules and warns on
    /// duplicates. Duplicates are allowed; the last README write wins.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = HashSet::new();

        for directory in &self.directories {
            if !is_valid_directory_name(&directory.name) {
                return Err(ConfigError::InvalidName {
                    name: directory.name.clone(),
                });
            }

            if !seen.insert(&directory.name) {
                log::warn!(
                    "duplicate directory name '{}': the last README write wins",
                    directory.name
                );
            }
        }

        Ok(())
    }
}

/// A directory name must stay a single path component below the base:
/// non-empty, no separators, no traversal upward.
fn is_valid_directory_name(name: &str) -> bool {
    lazy_static::lazy_static! {
        static ref DIRECTORY_NAME_REGEX: regex::Regex = regex::Regex::new(
            r"(?x)       # Enable extended mode
            ^
            [^/\\]+      # one or more characters, none of them a separator
            $"
        ).expect("a valid regex pattern");
    }

    DIRECTORY_NAME_REGEX.is_match(name) && name != "." && name != ".."
}
