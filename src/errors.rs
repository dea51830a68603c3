use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(paragen::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
#[error("unable to parse structure definition at '{path}'")]
#[diagnostic(
    code(paragen::parse),
    help("Review the [[directories]] entries in the file")
)]
pub struct ParseError {
    pub path: std::path::PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn new(path: std::path::PathBuf, error: toml::de::Error) -> Self {
        Self {
            path,
            source: error,
        }
    }
}
