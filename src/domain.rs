use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

pub const NCBI_HOST: &str = "ftp.ncbi.nlm.nih.gov";
pub const GENOMES_ROOT: &str = "genomes/all";

static ACCESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^GC[AF]_[0-9]{9}\.[0-9]+$").expect("accession pattern compiles"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Ftp,
    Https,
}

impl Transport {
    pub fn scheme(&self) -> &'static str {
        match self {
            Transport::Ftp => "ftp",
            Transport::Https => "https",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

/// A `GCF_`/`GCA_` assembly accession with a nine digit body and a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssemblyAccession(String);

impl AssemblyAccession {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `GCF_000001405.39` splits into `GCF`, `000`, `001`, `405`.
    pub fn directory_segments(&self) -> [&str; 4] {
        let acc = self.0.as_str();
        [&acc[0..3], &acc[4..7], &acc[7..10], &acc[10..13]]
    }

    /// Archive directory holding the versioned assembly folders, with a trailing slash.
    pub fn directory(&self) -> String {
        format!("{}/{}/", GENOMES_ROOT, self.directory_segments().join("/"))
    }
}

impl fmt::Display for AssemblyAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Surrounding whitespace is trimmed before matching; digits must be ASCII so
/// the fixed-offset directory slices stay on character boundaries.
impl FromStr for AssemblyAccession {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        if !ACCESSION_RE.is_match(normalized) {
            return Err(ReportError::InvalidAccession(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}
