use serde::Serialize;
use tracing::{debug, info};

use crate::archive::{ArchiveClient, FtpArchive, HttpsArchive};
use crate::config::ResolvedConfig;
use crate::domain::{AssemblyAccession, Transport};
use crate::error::ReportError;

pub const REPORT_MARKER: &str = "assembly_report";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
    pub accession: String,
    pub host: String,
    pub directory: String,
    pub folder: String,
    pub report: String,
    pub url: String,
}

pub struct AssemblyReportResolver<C: ArchiveClient> {
    client: C,
}

impl<C: ArchiveClient> AssemblyReportResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    pub fn resolve(&mut self, accession: &AssemblyAccession) -> Result<AssemblyReport, ReportError> {
        let directory = accession.directory();
        debug!(%accession, %directory, "derived assembly directory");

        let entries = self.client.list_dir(&directory)?;
        debug!(entries = entries.len(), "listed assembly directory");
        let folder = single_match(entries, accession.as_str()).map_err(|candidates| {
            ReportError::AmbiguousOrMissingFolder {
                directory: directory.clone(),
                candidates,
            }
        })?;

        let folder_path = format!("{directory}{folder}/");
        let files = self.client.list_dir(&folder_path)?;
        debug!(files = files.len(), %folder, "listed assembly folder");
        let report = single_match(files, REPORT_MARKER).map_err(|candidates| {
            ReportError::AmbiguousOrMissingReport {
                folder: folder_path.clone(),
                candidates,
            }
        })?;

        let url = format!(
            "{}://{}/{}{}",
            self.client.scheme(),
            self.client.host(),
            folder_path,
            report
        );
        info!(%url, "resolved assembly report");

        Ok(AssemblyReport {
            accession: accession.to_string(),
            host: self.client.host().to_string(),
            directory,
            folder,
            report,
            url,
        })
    }
}

/// Opens a session for the configured transport and resolves `accession`.
/// The session is closed before this returns, whatever the outcome.
pub fn resolve_with_config(
    accession: &AssemblyAccession,
    config: &ResolvedConfig,
) -> Result<AssemblyReport, ReportError> {
    match config.transport {
        Transport::Ftp => {
            let archive = FtpArchive::connect(&config.host, config.port, config.timeout)?;
            AssemblyReportResolver::new(archive).resolve(accession)
        }
        Transport::Https => {
            let archive = HttpsArchive::new(&config.host, config.timeout)?;
            AssemblyReportResolver::new(archive).resolve(accession)
        }
    }
}

/// Returns the only entry containing `needle`, or every candidate when there
/// is not exactly one.
fn single_match(entries: Vec<String>, needle: &str) -> Result<String, Vec<String>> {
    let mut candidates: Vec<String> = entries
        .into_iter()
        .filter(|entry| entry.contains(needle))
        .collect();
    if candidates.len() == 1 {
        Ok(candidates.remove(0))
    } else {
        Err(candidates)
    }
}
