use std::io::{self, Write};

use serde::Serialize;

use crate::resolver::AssemblyReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Plain,
    Json,
}

pub struct ReportOutput;

impl ReportOutput {
    pub fn print(report: &AssemblyReport, mode: OutputMode) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        Self::write(&mut stdout, report, mode)
    }

    pub fn write<W: Write>(out: &mut W, report: &AssemblyReport, mode: OutputMode) -> io::Result<()> {
        match mode {
            OutputMode::Plain => writeln!(out, "{}", report.url),
            OutputMode::Json => Self::write_json(out, report),
        }
    }

    fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
