use assembly_report_url::output::{OutputMode, ReportOutput};
use assembly_report_url::resolver::AssemblyReport;

fn report() -> AssemblyReport {
    AssemblyReport {
        accession: "GCA_000001405.28".to_string(),
        host: "ftp.ncbi.nlm.nih.gov".to_string(),
        directory: "genomes/all/GCA/000/001/405/".to_string(),
        folder: "GCA_000001405.28_GRCh38.p13".to_string(),
        report: "GCA_000001405.28_GRCh38.p13_assembly_report.txt".to_string(),
        url: "ftp://ftp.ncbi.nlm.nih.gov/genomes/all/GCA/000/001/405/GCA_000001405.28_GRCh38.p13/GCA_000001405.28_GRCh38.p13_assembly_report.txt".to_string(),
    }
}

#[test]
fn plain_output_is_url_line() {
    let mut out = Vec::new();
    ReportOutput::write(&mut out, &report(), OutputMode::Plain).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", report().url));
}

#[test]
fn json_output_has_all_fields() {
    let mut out = Vec::new();
    ReportOutput::write(&mut out, &report(), OutputMode::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["accession"], "GCA_000001405.28");
    assert_eq!(value["folder"], "GCA_000001405.28_GRCh38.p13");
    assert_eq!(value["url"], report().url);
}
