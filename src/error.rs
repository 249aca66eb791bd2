use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("invalid assembly accession: {0}")]
    #[diagnostic(help("expected GCF_XXXXXXXXX.X or GCA_XXXXXXXXX.X where X is a digit"))]
    InvalidAccession(String),

    #[error("expected exactly one assembly folder in {directory}, found {candidates:?}")]
    AmbiguousOrMissingFolder {
        directory: String,
        candidates: Vec<String>,
    },

    #[error("expected exactly one assembly_report file in {folder}, found {candidates:?}")]
    AmbiguousOrMissingReport {
        folder: String,
        candidates: Vec<String>,
    },

    #[error("failed to open FTP session: {0}")]
    FtpConnect(String),

    #[error("FTP command failed: {0}")]
    Ftp(String),

    #[error("HTTPS request failed: {0}")]
    Http(String),

    #[error("archive returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ReportError::FtpConnect(_)
                | ReportError::Ftp(_)
                | ReportError::Http(_)
                | ReportError::HttpStatus { .. }
        )
    }
}
