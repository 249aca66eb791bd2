use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use assembly_report_url::config::{ConfigLoader, ConfigOverrides};
use assembly_report_url::domain::{AssemblyAccession, Transport};
use assembly_report_url::error::ReportError;
use assembly_report_url::output::{OutputMode, ReportOutput};
use assembly_report_url::resolver::resolve_with_config;

#[derive(Parser)]
#[command(name = "assembly-report-url")]
#[command(about = "Retrieve the assembly report URL of a given assembly accession")]
#[command(version)]
struct Cli {
    #[arg(
        short = 'a',
        long = "accession",
        value_name = "ACCESSION",
        help = "GCF_XXXXXXXXX.X or GCA_XXXXXXXXX.X where X is a number"
    )]
    accession: String,

    #[arg(long, value_enum, help = "Protocol used to list the archive [default: ftp]")]
    transport: Option<Transport>,

    #[arg(long, help = "Archive host [default: ftp.ncbi.nlm.nih.gov]")]
    host: Option<String>,

    #[arg(long, help = "FTP control port [default: 21]")]
    port: Option<u16>,

    #[arg(long, value_name = "SECS", help = "Network timeout in seconds [default: 60]")]
    timeout: Option<u64>,

    #[arg(long, help = "JSON config file [default: ./assembly-report.json if present]")]
    config: Option<String>,

    #[arg(long, help = "Print the full resolution as JSON")]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<ReportError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &ReportError) -> u8 {
    match error {
        ReportError::InvalidAccession(_) => 2,
        ReportError::AmbiguousOrMissingFolder { .. }
        | ReportError::AmbiguousOrMissingReport { .. } => 4,
        error if error.is_network() => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let accession: AssemblyAccession = cli.accession.parse()?;
    let config = ConfigLoader::resolve(
        cli.config.as_deref(),
        ConfigOverrides {
            host: cli.host,
            port: cli.port,
            transport: cli.transport,
            timeout_secs: cli.timeout,
        },
    )?;

    let report = resolve_with_config(&accession, &config)?;
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Plain
    };
    ReportOutput::print(&report, mode).into_diagnostic()?;
    Ok(())
}
