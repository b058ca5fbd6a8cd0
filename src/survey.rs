use log::{debug, info, warn};

use snafu::prelude::*;
pub use survey_analysis::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod charts;
pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

use crate::survey::charts::{render_report_charts, PlottersRenderer};
use crate::survey::config_reader::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: u64,
    },
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Spreadsheet {path} has no worksheet with responses"))]
    EmptyExcel { path: String },
    #[snafu(display("Unexpected cell type at row {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error reading file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unknown provider {provider:?} for {path}"))]
    UnknownProvider { provider: String, path: String },
    #[snafu(display("Unknown language {language:?} for source {label}"))]
    UnknownLanguage { language: String, label: String },
    #[snafu(display("Error rendering chart {path}: {message}"))]
    Chart { path: String, message: String },
    #[snafu(display("{source}"))]
    Analysis { source: AnalysisError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Options of a run that do not come from the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunOptions {
    /// File path or `stdout`
    pub summary_out: Option<String>,
    /// Reference summary to compare with
    pub reference: Option<String>,
    /// Overrides the configuration
    pub generate_charts: Option<bool>,
}

/// Every aggregate of a survey.
#[derive(PartialEq, Debug, Clone)]
pub struct SurveyReport {
    /// (source label, number of responses), in the order of the sources
    pub responses: Vec<(String, usize)>,
    pub total_responses: usize,
    pub roles: RoleCounts,
    pub deflation: Distribution,
    pub inflation: Distribution,
    pub impact: Distribution,
    pub comparison: FrequencyComparison,
    pub remedies_responses: usize,
}

fn read_survey_data(survey_dir: &Path, cfs: &FileSource) -> SurveyResult<RawResponseTable> {
    let p: PathBuf = survey_dir.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read response file {:?}", p2);
    match cfs.provider().as_str() {
        "csv" => io_csv::read_csv_table(&p2, &cfs.label),
        "excel" => io_excel::read_excel_table(&p2, &cfs.label, cfs.excel_worksheet_name.as_deref()),
        x => UnknownProviderSnafu {
            provider: x,
            path: p2.clone(),
        }
        .fail(),
    }
}

/// Computes all the aggregates over canonical tables, in the order given.
pub fn analyze(tables: &[CanonicalResponseTable]) -> SurveyResult<SurveyReport> {
    let responses: Vec<(String, usize)> = tables
        .iter()
        .map(|t| (t.name().to_string(), t.num_rows()))
        .collect();
    let total_responses = responses.iter().map(|(_, n)| n).sum();

    let roles_series = merge_column(tables, Column::Roles).context(AnalysisSnafu {})?;
    let roles = count_roles(&roles_series);

    let deflation_series =
        merge_column(tables, Column::DeflationFrequency).context(AnalysisSnafu {})?;
    let inflation_series =
        merge_column(tables, Column::InflationFrequency).context(AnalysisSnafu {})?;
    let impact_series = merge_column(tables, Column::Impact).context(AnalysisSnafu {})?;
    let comparison = compare_frequencies(&deflation_series, &inflation_series);

    // Not every questionnaire asked for remedies.
    let remedies_tables: Vec<CanonicalResponseTable> = tables
        .iter()
        .filter(|t| t.has_column(Column::RemediesText))
        .cloned()
        .collect();
    let remedies_responses = if remedies_tables.is_empty() {
        0
    } else {
        merge_column(&remedies_tables, Column::RemediesText)
            .context(AnalysisSnafu {})?
            .num_present()
    };
    debug!(
        "analyze: remedies from {} of {} tables",
        remedies_tables.len(),
        tables.len()
    );

    Ok(SurveyReport {
        responses,
        total_responses,
        roles,
        deflation: frequency_distribution(&deflation_series),
        inflation: frequency_distribution(&inflation_series),
        impact: frequency_distribution(&impact_series),
        comparison,
        remedies_responses,
    })
}

pub fn print_report(report: &SurveyReport) {
    for (label, count) in report.responses.iter() {
        println!("{} Responses: {}", label, count);
    }
    println!("Total responses: {}", report.total_responses);

    for (role, count) in report.roles.roles.iter() {
        println!("Role: {} Count: {}", role.label(), count);
    }
    println!("{}: {}", OTHER, report.roles.other);

    for (title, distribution) in [
        ("Priority deflation", &report.deflation),
        ("Priority inflation", &report.inflation),
        ("Impact", &report.impact),
    ] {
        println!("{} ({} answers):", title, distribution.total);
        for c in distribution.categories.iter() {
            println!(
                "  {}: {} ({:.1}%)",
                c.label,
                c.count,
                c.proportion * 100.0
            );
        }
    }

    println!("Deflation vs. inflation:");
    for l in report.comparison.levels.iter() {
        println!(
            "  {}: deflation {} inflation {}",
            l.level.label(),
            l.deflation,
            l.inflation
        );
    }
    println!("Remedies responses: {}", report.remedies_responses);
}

fn distribution_to_json(d: &Distribution) -> JSValue {
    let mut counts: JSMap<String, JSValue> = JSMap::new();
    let mut proportions: JSMap<String, JSValue> = JSMap::new();
    for c in d.categories.iter() {
        counts.insert(c.label.clone(), json!(c.count));
        proportions.insert(c.label.clone(), json!(c.proportion));
    }
    json!({"answers": d.total, "counts": counts, "distribution": proportions})
}

fn build_summary_js(report: &SurveyReport) -> JSValue {
    let sources: Vec<JSValue> = report
        .responses
        .iter()
        .map(|(label, count)| json!({"label": label, "responses": count}))
        .collect();

    let mut roles: JSMap<String, JSValue> = JSMap::new();
    for (label, count) in report.roles.by_label() {
        roles.insert(label, json!(count));
    }

    let comparison: Vec<JSValue> = report
        .comparison
        .levels
        .iter()
        .map(|l| json!({"level": l.level.label(), "deflation": l.deflation, "inflation": l.inflation}))
        .collect();

    json!({
        "responses": {"sources": sources, "total": report.total_responses},
        "roles": roles,
        "deflation": distribution_to_json(&report.deflation),
        "inflation": distribution_to_json(&report.inflation),
        "impact": distribution_to_json(&report.impact),
        "comparison": comparison,
        "remedies": {"responses": report.remedies_responses},
    })
}

/// Runs the survey described by a configuration file.
///
/// Paths in the configuration are relative to the directory of the file.
pub fn run_survey_from_file(config_path: &str, options: &RunOptions) -> SurveyResult<SurveyReport> {
    let config = read_config(config_path)?;
    info!("config: {:?}", config);
    let root = Path::new(config_path)
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    run_survey(&config, &root, options)
}

pub fn run_survey(
    config: &SurveyConfig,
    root: &Path,
    options: &RunOptions,
) -> SurveyResult<SurveyReport> {
    if config.file_sources.is_empty() {
        whatever!("no file sources detected");
    }

    let survey_dir = config.survey_dir(root);
    let mut tables: Vec<CanonicalResponseTable> = Vec::new();
    for cfs in config.file_sources.iter() {
        let layout = cfs.layout()?;
        let raw = read_survey_data(&survey_dir, cfs)?;
        let table = translate(&raw, &layout).context(AnalysisSnafu {})?;
        tables.push(table);
    }

    let report = analyze(&tables)?;
    print_report(&report);

    if options.generate_charts.unwrap_or_else(|| config.generate_charts()) {
        let output_dir = config.output_dir(root);
        let renderer = PlottersRenderer::new(&output_dir);
        let paths = render_report_charts(&renderer, &report, config.plot_size())?;
        info!("charts: {:?}", paths);
    }

    let summary_js = build_summary_js(&report);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    match options.summary_out.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, pretty_js_stats.as_str()).context(WritingSummarySnafu { path })?;
            info!("summary written to {}", path);
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = options.reference.as_deref() {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(report)
}

#[cfg(test)]
fn run_survey_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> SurveyResult<SurveyReport> {
    let test_dir = format!("{}/tests/data", env!("CARGO_MANIFEST_DIR"));
    info!("Running test {}", test_name);
    let options = RunOptions {
        summary_out: None,
        reference: Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        generate_charts: Some(false),
    };
    run_survey_from_file(
        format!("{}/{}/{}", test_dir, test_name, config_lpath).as_str(),
        &options,
    )
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) -> SurveyResult<SurveyReport> {
    run_survey_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    )
}

#[cfg(test)]
pub(crate) mod tests_common {
    use super::*;
    use survey_analysis::builder::Builder;

    pub fn english(name: &str, rows: &[[&str; 4]]) -> CanonicalResponseTable {
        let headers: Vec<String> = [
            ENGLISH_ROLES_HEADER,
            ENGLISH_DEFLATION_HEADER,
            ENGLISH_INFLATION_HEADER,
            ENGLISH_IMPACT_HEADER,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let mut builder = Builder::new(name, &headers);
        for row in rows {
            builder.add_row_simple(row).unwrap();
        }
        translate(&builder.build(), &SourceLayout::english()).unwrap()
    }

    pub fn small_report() -> SurveyReport {
        let t = english(
            "English",
            &[
                ["Developer", "Never", "Frequently", "It has no impact"],
                ["Tester;DBA", "Occasionally", "", "Its impact is minimum"],
            ],
        );
        analyze(&[t]).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::tests_common::english;
    use super::*;

    #[test]
    fn basic() {
        let report = test_wrapper("basic").unwrap();
        assert_eq!(report.total_responses, 10);
        assert_eq!(report.roles.count(Role::Developer), 4);
        assert_eq!(report.roles.other, 3);
        assert_eq!(report.remedies_responses, 4);
    }

    #[test]
    fn untranslatable_spanish() {
        let res = test_wrapper("untranslatable");
        assert!(matches!(
            res,
            Err(SurveyError::Analysis {
                source: AnalysisError::UntranslatableValue { .. }
            })
        ));
    }

    #[test]
    fn analyze_counts_every_source() {
        let t1 = english(
            "Apache",
            &[
                ["Developer;Architect", "Never", "Never", "It has no impact"],
                ["", "", "", ""],
            ],
        );
        let t2 = english(
            "English",
            &[["Architecture Fan", "Frequently", "Never", "It has no impact"]],
        );
        let report = analyze(&[t1, t2]).unwrap();
        assert_eq!(
            report.responses,
            vec![("Apache".to_string(), 2), ("English".to_string(), 1)]
        );
        assert_eq!(report.total_responses, 3);
        assert_eq!(report.roles.count(Role::Architect), 1);
        assert_eq!(report.roles.other, 1);
        assert_eq!(report.deflation.total, 2);
        assert_eq!(report.inflation.proportion("Never"), Some(1.0));
        assert_eq!(report.comparison.levels[0].inflation, 2);
        // No remedies column at all
        assert_eq!(report.remedies_responses, 0);
    }

    #[test]
    fn missing_required_column() {
        let mut builder =
            survey_analysis::builder::Builder::new("Short", &[ENGLISH_ROLES_HEADER.to_string()]);
        builder.add_row_simple(&["Developer"]).unwrap();
        let t = translate(&builder.build(), &SourceLayout::english()).unwrap();
        let res = analyze(&[t]);
        assert!(matches!(
            res,
            Err(SurveyError::Analysis {
                source: AnalysisError::MissingColumn {
                    column: Column::DeflationFrequency,
                    ..
                }
            })
        ));
    }

    #[test]
    fn summary_json() {
        let js = build_summary_js(&tests_common::small_report());
        assert_eq!(js["responses"]["total"], json!(2));
        assert_eq!(js["roles"]["Other"], json!(1));
        assert_eq!(js["roles"]["Tester"], json!(1));
        assert_eq!(js["deflation"]["distribution"]["Never"], json!(0.5));
        assert_eq!(js["inflation"]["answers"], json!(1));
        assert_eq!(js["comparison"][2]["level"], json!("Frequently"));
        assert_eq!(js["comparison"][2]["inflation"], json!(1));
    }
}
