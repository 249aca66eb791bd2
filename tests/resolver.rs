use std::collections::HashMap;

use assert_matches::assert_matches;

use assembly_report_url::archive::ArchiveClient;
use assembly_report_url::domain::AssemblyAccession;
use assembly_report_url::error::ReportError;
use assembly_report_url::resolver::AssemblyReportResolver;

const DIRECTORY: &str = "genomes/all/GCF/000/001/405/";
const FOLDER: &str = "GCF_000001405.39_GRCh38.p13";

struct MockArchive {
    scheme: &'static str,
    host: &'static str,
    listings: HashMap<String, Vec<String>>,
    requested: Vec<String>,
}

impl Default for MockArchive {
    fn default() -> Self {
        Self {
            scheme: "ftp",
            host: "ftp.ncbi.nlm.nih.gov",
            listings: HashMap::new(),
            requested: Vec::new(),
        }
    }
}

impl MockArchive {
    fn with(mut self, path: &str, entries: &[&str]) -> Self {
        self.listings.insert(
            path.to_string(),
            entries.iter().map(|entry| entry.to_string()).collect(),
        );
        self
    }
}

impl ArchiveClient for MockArchive {
    fn host(&self) -> &str {
        self.host
    }

    fn scheme(&self) -> &str {
        self.scheme
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, ReportError> {
        self.requested.push(path.to_string());
        self.listings
            .get(path)
            .cloned()
            .ok_or_else(|| ReportError::Ftp(format!("550 {path}: No such file or directory")))
    }
}

fn grch38() -> AssemblyAccession {
    "GCF_000001405.39".parse().unwrap()
}

fn folder_path() -> String {
    format!("{DIRECTORY}{FOLDER}/")
}

#[test]
fn resolves_report_url() {
    let archive = MockArchive::default()
        .with(DIRECTORY, &[FOLDER])
        .with(
            &folder_path(),
            &["GCF_000001405.39_GRCh38.p13_assembly_report.txt"],
        );
    let mut resolver = AssemblyReportResolver::new(archive);

    let report = resolver.resolve(&grch38()).unwrap();
    assert_eq!(
        report.url,
        "ftp://ftp.ncbi.nlm.nih.gov/genomes/all/GCF/000/001/405/GCF_000001405.39_GRCh38.p13/GCF_000001405.39_GRCh38.p13_assembly_report.txt"
    );
    assert_eq!(report.folder, FOLDER);
    assert_eq!(report.directory, DIRECTORY);

    let archive = resolver.into_inner();
    assert_eq!(archive.requested, vec![DIRECTORY.to_string(), folder_path()]);
}

#[test]
fn url_uses_client_scheme_and_host() {
    let archive = MockArchive {
        scheme: "https",
        host: "mirror.example.org",
        ..MockArchive::default()
    }
    .with(DIRECTORY, &[FOLDER])
    .with(
        &folder_path(),
        &["GCF_000001405.39_GRCh38.p13_assembly_report.txt"],
    );

    let report = AssemblyReportResolver::new(archive)
        .resolve(&grch38())
        .unwrap();
    assert_eq!(
        report.url,
        "https://mirror.example.org/genomes/all/GCF/000/001/405/GCF_000001405.39_GRCh38.p13/GCF_000001405.39_GRCh38.p13_assembly_report.txt"
    );
    assert_eq!(report.host, "mirror.example.org");
}

#[test]
fn shorter_version_matches_longer_versions_too() {
    let archive = MockArchive::default().with(
        DIRECTORY,
        &["GCF_000001405.3_NCBI33", "GCF_000001405.39_GRCh38.p13"],
    );
    let accession: AssemblyAccession = "GCF_000001405.3".parse().unwrap();
    let err = AssemblyReportResolver::new(archive)
        .resolve(&accession)
        .unwrap_err();
    assert_matches!(
        err,
        ReportError::AmbiguousOrMissingFolder { ref candidates, .. } if candidates.len() == 2
    );
}

#[test]
fn ignores_unrelated_entries() {
    let archive = MockArchive::default()
        .with(
            DIRECTORY,
            &[FOLDER, "GCF_000001405.40_GRCh38.p14", "GCF_000001405.26_GRCh38"],
        )
        .with(
            &folder_path(),
            &[
                "GCF_000001405.39_GRCh38.p13_genomic.fna.gz",
                "GCF_000001405.39_GRCh38.p13_assembly_report.txt",
                "md5checksums.txt",
            ],
        );

    let report = AssemblyReportResolver::new(archive)
        .resolve(&grch38())
        .unwrap();
    assert_eq!(report.report, "GCF_000001405.39_GRCh38.p13_assembly_report.txt");
}

#[test]
fn missing_folder_is_reported() {
    let archive = MockArchive::default().with(DIRECTORY, &["GCF_000001405.40_GRCh38.p14"]);
    let err = AssemblyReportResolver::new(archive)
        .resolve(&grch38())
        .unwrap_err();
    assert_matches!(
        err,
        ReportError::AmbiguousOrMissingFolder { ref directory, ref candidates }
            if directory == DIRECTORY && candidates.is_empty()
    );
}

#[test]
fn ambiguous_folder_reports_every_candidate() {
    let archive = MockArchive::default().with(
        DIRECTORY,
        &[FOLDER, "GCF_000001405.39_GRCh38.p13_alt"],
    );
    let err = AssemblyReportResolver::new(archive)
        .resolve(&grch38())
        .unwrap_err();
    assert_matches!(
        err,
        ReportError::AmbiguousOrMissingFolder { ref candidates, .. }
            if candidates == &vec![FOLDER.to_string(), "GCF_000001405.39_GRCh38.p13_alt".to_string()]
    );
}

#[test]
fn missing_report_is_reported() {
    let archive = MockArchive::default()
        .with(DIRECTORY, &[FOLDER])
        .with(&folder_path(), &["GCF_000001405.39_GRCh38.p13_genomic.gff.gz"]);
    let err = AssemblyReportResolver::new(archive)
        .resolve(&grch38())
        .unwrap_err();
    assert_matches!(
        err,
        ReportError::AmbiguousOrMissingReport { ref candidates, .. } if candidates.is_empty()
    );
}

#[test]
fn ambiguous_report_is_reported() {
    let archive = MockArchive::default()
        .with(DIRECTORY, &[FOLDER])
        .with(
            &folder_path(),
            &[
                "GCF_000001405.39_GRCh38.p13_assembly_report.txt",
                "GCF_000001405.39_GRCh38.p13_assembly_report.old.txt",
            ],
        );
    let err = AssemblyReportResolver::new(archive)
        .resolve(&grch38())
        .unwrap_err();
    assert_matches!(
        err,
        ReportError::AmbiguousOrMissingReport { ref folder, ref candidates }
            if folder == &folder_path() && candidates.len() == 2
    );
}

#[test]
fn listing_failure_propagates() {
    let err = AssemblyReportResolver::new(MockArchive::default())
        .resolve(&grch38())
        .unwrap_err();
    assert_matches!(err, ReportError::Ftp(_));
    assert!(err.is_network());
}
