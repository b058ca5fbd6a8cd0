pub mod builder;
mod layout;
pub mod manual;
mod table;
mod vocabulary;

use log::{debug, info};
use snafu::prelude::*;
use std::collections::HashMap;

pub use crate::layout::*;
pub use crate::table::*;
pub use crate::vocabulary::*;

/// Errors that prevent the normalization or the aggregation from completing.
///
/// None of them is recovered: a survey with an untranslatable answer is not analyzed.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum AnalysisError {
    #[snafu(display(
        "no {language} translation for {value:?} (column {column}, row {row} of table {table})"
    ))]
    UntranslatableValue {
        table: String,
        column: Column,
        row: usize,
        value: String,
        language: Language,
    },
    #[snafu(display("table {table} has no column {column}"))]
    MissingColumn { table: String, column: Column },
    #[snafu(display("row {row} of table {table} has {found} cells, expected {expected}"))]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

// ******** Translator *********

/// Converts a raw table into the canonical schema.
///
/// Spanish tables have every piece of their role sets, and every frequency and
/// impact answer, translated through the closed dictionaries. English tables are
/// already canonical: their columns are relabelled and their frequency and impact
/// answers checked against the vocabularies.
///
/// Columns of the layout that the table does not have are left out.
pub fn translate(
    source: &RawResponseTable,
    layout: &SourceLayout,
) -> AnalysisResult<CanonicalResponseTable> {
    let language = layout.language();
    info!(
        "translate: table {} ({} rows) from {}",
        source.name(),
        source.num_rows(),
        language
    );
    let mut res = CanonicalResponseTable::new(source.name(), source.num_rows());
    for (column, header) in layout.headers() {
        let cells = match source.column(header) {
            Some(cells) => cells,
            None => {
                debug!(
                    "translate: table {}: no header {:?} for column {}",
                    source.name(),
                    header,
                    column
                );
                continue;
            }
        };
        let mut translated: Vec<Cell> = Vec::with_capacity(cells.len());
        for (row, cell) in cells.into_iter().enumerate() {
            let t = match cell {
                Some(value) => Some(translate_value(source.name(), *column, language, row, value)?),
                None => None,
            };
            translated.push(t);
        }
        res.insert_column(*column, translated);
    }
    Ok(res)
}

fn translate_value(
    table: &str,
    column: Column,
    language: Language,
    row: usize,
    value: &str,
) -> AnalysisResult<String> {
    match column {
        Column::Roles => {
            let mut roles: Vec<String> = Vec::new();
            for piece in value.split(SEPARATOR) {
                let role = translate_role(language, piece).context(UntranslatableValueSnafu {
                    table,
                    column,
                    row,
                    value: piece,
                    language,
                })?;
                roles.push(role);
            }
            Ok(roles.join(SEPARATOR))
        }
        Column::DeflationFrequency | Column::InflationFrequency => {
            translate_frequency(language, value)
                .map(|f| f.label().to_string())
                .context(UntranslatableValueSnafu {
                    table,
                    column,
                    row,
                    value,
                    language,
                })
        }
        Column::Impact => translate_impact(language, value)
            .map(|i| i.label().to_string())
            .context(UntranslatableValueSnafu {
                table,
                column,
                row,
                value,
                language,
            }),
        Column::RemediesText => Ok(value.to_string()),
    }
}

// ******** Merger *********

/// Concatenates one column of the tables, in the order of the tables.
///
/// Every table must have the column. Optional columns (such as the remedies)
/// should be checked with [CanonicalResponseTable::has_column] first.
pub fn merge_column(
    tables: &[CanonicalResponseTable],
    column: Column,
) -> AnalysisResult<MergedSeries> {
    let mut values: Vec<Cell> = Vec::with_capacity(tables.iter().map(|t| t.num_rows()).sum());
    let mut sources: Vec<(String, usize)> = Vec::new();
    for table in tables {
        let cells = table.column(column).context(MissingColumnSnafu {
            table: table.name(),
            column,
        })?;
        values.extend(cells.iter().cloned());
        sources.push((table.name().to_string(), cells.len()));
    }
    debug!(
        "merge_column: column {}: {} values from {:?}",
        column,
        values.len(),
        sources
    );
    Ok(MergedSeries {
        column,
        values,
        sources,
    })
}

// ******** Role analysis *********

/// Number of respondents per role.
///
/// A respondent is counted once for each canonical role listed, and once in
/// `other` if any of the listed roles is not canonical.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoleCounts {
    pub roles: Vec<(Role, u64)>,
    pub other: u64,
}

impl RoleCounts {
    pub fn count(&self, role: Role) -> u64 {
        self.roles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// All the counts by label, the canonical roles first and [OTHER] last.
    pub fn by_label(&self) -> Vec<(String, u64)> {
        let mut res: Vec<(String, u64)> = self
            .roles
            .iter()
            .map(|(r, c)| (r.label().to_string(), *c))
            .collect();
        res.push((OTHER.to_string(), self.other));
        res
    }
}

/// Counts the respondents holding each role in a merged role column.
///
/// Role sets are split on [SEPARATOR] and matched exactly. Missing cells hold no role.
pub fn count_roles(series: &MergedSeries) -> RoleCounts {
    let mut roles: Vec<(Role, u64)> = Role::ALL.iter().map(|r| (*r, 0)).collect();
    let mut other: u64 = 0;
    for all_roles in series.values().iter().flatten() {
        let role_set: Vec<&str> = all_roles.split(SEPARATOR).collect();
        for (role, count) in roles.iter_mut() {
            if role_set.contains(&role.label()) {
                *count += 1;
            }
        }
        if role_set.iter().any(|l| Role::from_label(l).is_none()) {
            other += 1;
        }
    }
    info!(
        "count_roles: {} respondents, roles: {:?}, other: {}",
        series.len(),
        roles,
        other
    );
    RoleCounts { roles, other }
}

// ******** Distributions *********

#[derive(PartialEq, Debug, Clone)]
pub struct CategoryShare {
    pub label: String,
    pub count: u64,
    /// Between 0 and 1.
    pub proportion: f64,
}

/// The distribution of the answered cells of a categorical column.
#[derive(PartialEq, Debug, Clone)]
pub struct Distribution {
    pub column: Column,
    /// Number of answered cells.
    pub total: u64,
    /// Most frequent category first. Ties keep the order of first appearance.
    pub categories: Vec<CategoryShare>,
}

impl Distribution {
    /// 0 for a category that never appears.
    pub fn count(&self, label: &str) -> u64 {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn proportion(&self, label: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.proportion)
    }
}

/// The normalized distribution of a column. Missing cells are ignored.
pub fn frequency_distribution(series: &MergedSeries) -> Distribution {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for value in series.values().iter().flatten() {
        let c = counts.entry(value.as_str()).or_insert_with(|| {
            order.push(value.as_str());
            0
        });
        *c += 1;
    }
    let total: u64 = counts.values().sum();
    let mut categories: Vec<CategoryShare> = order
        .iter()
        .map(|label| {
            let count = counts[label];
            CategoryShare {
                label: label.to_string(),
                count,
                proportion: count as f64 / total as f64,
            }
        })
        .collect();
    // Stable sort: ties stay in order of appearance.
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    debug!(
        "frequency_distribution: column {}: total {} categories {:?}",
        series.column(),
        total,
        categories
    );
    Distribution {
        column: series.column(),
        total,
        categories,
    }
}

/// The counts of deflation and inflation for one frequency level.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FrequencyLevelCounts {
    pub level: Frequency,
    pub deflation: u64,
    pub inflation: u64,
}

/// Side-by-side counts of deflation and inflation, in [Frequency::COMPARISON_ORDER].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FrequencyComparison {
    pub levels: Vec<FrequencyLevelCounts>,
}

impl FrequencyComparison {
    pub fn max_count(&self) -> u64 {
        self.levels
            .iter()
            .map(|l| l.deflation.max(l.inflation))
            .max()
            .unwrap_or(0)
    }
}

/// The absolute count of each frequency level, in [Frequency::COMPARISON_ORDER].
/// A level that never appears has a count of 0.
pub fn frequency_counts(series: &MergedSeries) -> Vec<(Frequency, u64)> {
    let distribution = frequency_distribution(series);
    Frequency::COMPARISON_ORDER
        .iter()
        .map(|f| (*f, distribution.count(f.label())))
        .collect()
}

pub fn compare_frequencies(
    deflation: &MergedSeries,
    inflation: &MergedSeries,
) -> FrequencyComparison {
    let levels = frequency_counts(deflation)
        .into_iter()
        .zip(frequency_counts(inflation))
        .map(|((level, d), (_, i))| FrequencyLevelCounts {
            level,
            deflation: d,
            inflation: i,
        })
        .collect();
    FrequencyComparison { levels }
}
