// Primitives for reading CSV exports.

use std::fs::File;

use survey_analysis::builder::Builder;

use crate::survey::{
    io_common::{read_cell, simplify_file_name},
    *,
};

/// Reads a CSV export with the questions in the first line.
///
/// Headers are kept verbatim. Short lines are padded with missing answers.
pub fn read_csv_table(path: &str, label: &str) -> SurveyResult<RawResponseTable> {
    let mut rdr = get_reader(path)?;
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1u64 })?
        .iter()
        .map(|h| h.to_string())
        .collect();
    debug!("read_csv_table: headers: {:?}", headers);

    let file_name = simplify_file_name(path);
    let mut builder = Builder::new(label, &headers);
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1
        let lineno = (idx + 2) as u64;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        if line.len() > headers.len() {
            warn!(
                "read_csv_table: {}: line {}: dropping {} extra fields",
                file_name,
                lineno,
                line.len() - headers.len()
            );
        }
        let cells: Vec<Option<String>> = (0..headers.len())
            .map(|i| line.get(i).and_then(read_cell))
            .collect();
        debug!("read_csv_table: {}: line {}: {:?}", file_name, lineno, cells);
        builder.add_row(cells).context(AnalysisSnafu {})?;
    }
    info!(
        "read_csv_table: {}: {} responses",
        file_name,
        builder.num_rows()
    );
    Ok(builder.build())
}

fn get_reader(path: &str) -> SurveyResult<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })
}
