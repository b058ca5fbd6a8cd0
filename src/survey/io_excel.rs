use calamine::{open_workbook_auto, DataType, Reader};
use survey_analysis::builder::Builder;

use crate::survey::{
    io_common::{read_cell, simplify_file_name},
    *,
};

/// Reads a spreadsheet export with the questions in the first row.
///
/// Uses the named worksheet, or the first one.
pub fn read_excel_table(
    path: &str,
    label: &str,
    worksheet_name: Option<&str>,
) -> SurveyResult<RawResponseTable> {
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    }
    .context(EmptyExcelSnafu { path })?
    .context(OpeningExcelSnafu { path })?;

    let file_name = simplify_file_name(path);
    let mut iter = wrange.rows();
    let header_row = iter.next().context(EmptyExcelSnafu { path })?;
    let mut headers: Vec<String> = Vec::new();
    for cell in header_row {
        headers.push(read_excel_cell(cell, 1)?.unwrap_or_default());
    }
    debug!("read_excel_table: {}: headers: {:?}", file_name, headers);

    let mut builder = Builder::new(label, &headers);
    for (idx, row) in iter.enumerate() {
        // The header is row 1
        let lineno = (idx + 2) as u64;
        let mut cells: Vec<Option<String>> = Vec::with_capacity(row.len());
        for cell in row {
            cells.push(read_excel_cell(cell, lineno)?);
        }
        debug!("read_excel_table: {}: row {}: {:?}", file_name, lineno, cells);
        builder.add_row(cells).context(AnalysisSnafu {})?;
    }
    info!(
        "read_excel_table: {}: {} responses",
        file_name,
        builder.num_rows()
    );
    Ok(builder.build())
}

fn read_excel_cell(cell: &DataType, lineno: u64) -> SurveyResult<Option<String>> {
    match cell {
        DataType::String(s) => Ok(read_cell(s)),
        DataType::Empty => Ok(None),
        DataType::Int(i) => Ok(Some(i.to_string())),
        DataType::Float(f) => Ok(Some(f.to_string())),
        DataType::Bool(b) => Ok(Some(b.to_string())),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(
            read_excel_cell(&DataType::String("Nunca".to_string()), 2).unwrap(),
            Some("Nunca".to_string())
        );
        assert_eq!(
            read_excel_cell(&DataType::String("".to_string()), 2).unwrap(),
            None
        );
        assert_eq!(read_excel_cell(&DataType::Empty, 2).unwrap(), None);
        assert_eq!(
            read_excel_cell(&DataType::Int(3), 2).unwrap(),
            Some("3".to_string())
        );
        assert!(matches!(
            read_excel_cell(&DataType::DateTime(44000.0), 7),
            Err(SurveyError::ExcelWrongCellType { lineno: 7, .. })
        ));
    }

    fn workbook() -> String {
        format!(
            "{}/tests/data/basic/spanish.xlsx",
            env!("CARGO_MANIFEST_DIR")
        )
    }

    #[test]
    fn named_worksheet() {
        let table = read_excel_table(&workbook(), "Spanish", Some("Respuestas")).unwrap();
        assert_eq!(table.name(), "Spanish");
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.headers()[0], "Marca temporal");
        assert_eq!(table.headers()[1], SPANISH_ROLES_HEADER);

        let inflation = table.column(SPANISH_INFLATION_HEADER).unwrap();
        assert_eq!(inflation[0], &Some("Ocasionalmente".to_string()));
        assert_eq!(inflation[1], &None);
        // Trailing blank cell
        let remedies = table.column(SPANISH_REMEDIES_HEADER).unwrap();
        assert_eq!(remedies[1], &None);

        let canonical = translate(&table, &SourceLayout::spanish()).unwrap();
        assert_eq!(
            canonical.column(Column::Roles).unwrap()[1],
            Some("Architect".to_string())
        );
        assert_eq!(
            canonical.column(Column::DeflationFrequency).unwrap()[1],
            Some("Frequently".to_string())
        );
    }

    #[test]
    fn first_worksheet_by_default() {
        let table = read_excel_table(&workbook(), "Notes", None).unwrap();
        assert_eq!(table.headers(), &["Encuesta de prioridades".to_string()]);
        assert_eq!(table.num_rows(), 1);
    }

    #[test]
    fn unknown_worksheet() {
        let res = read_excel_table(&workbook(), "Spanish", Some("Hoja 3"));
        assert!(matches!(res, Err(SurveyError::EmptyExcel { .. })));
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_table("/does/not/exist.xlsx", "None", None);
        assert!(matches!(res, Err(SurveyError::OpeningExcel { .. })));
    }
}
