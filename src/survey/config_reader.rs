use crate::survey::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "generateCharts")]
    pub generate_charts: Option<bool>,
    #[serde(rename = "plotWidth")]
    pub plot_width: Option<u32>,
    #[serde(rename = "plotHeight")]
    pub plot_height: Option<u32>,
}

/// Header overrides for one source. Unset columns keep the questionnaire's header.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnHeaders {
    pub roles: Option<String>,
    #[serde(rename = "deflationFrequency")]
    pub deflation_frequency: Option<String>,
    #[serde(rename = "inflationFrequency")]
    pub inflation_frequency: Option<String>,
    pub impact: Option<String>,
    #[serde(rename = "remediesText")]
    pub remedies_text: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub label: String,
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub language: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    pub columns: Option<ColumnHeaders>,
}

impl FileSource {
    pub fn new(label: &str, file_path: &str, language: &str) -> FileSource {
        FileSource {
            label: label.to_string(),
            provider: None,
            file_path: file_path.to_string(),
            language: language.to_string(),
            excel_worksheet_name: None,
            columns: None,
        }
    }

    /// The provider, inferred from the file extension if not set.
    pub fn provider(&self) -> String {
        if let Some(p) = self.provider.clone() {
            return p.to_lowercase();
        }
        let ext = Path::new(&self.file_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => "excel".to_string(),
            _ => "csv".to_string(),
        }
    }

    pub fn language(&self) -> SurveyResult<Language> {
        Language::from_name(&self.language).context(UnknownLanguageSnafu {
            language: self.language.clone(),
            label: self.label.clone(),
        })
    }

    pub fn layout(&self) -> SurveyResult<SourceLayout> {
        let mut layout = SourceLayout::for_language(self.language()?);
        let columns = self.columns.clone().unwrap_or_default();
        let overrides = [
            (Column::Roles, columns.roles),
            (Column::DeflationFrequency, columns.deflation_frequency),
            (Column::InflationFrequency, columns.inflation_frequency),
            (Column::Impact, columns.impact),
            (Column::RemediesText, columns.remedies_text),
        ];
        for (column, header) in overrides {
            if let Some(h) = header {
                layout = layout.with_header(column, &h);
            }
        }
        Ok(layout)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "surveyDirectory")]
    pub survey_directory: Option<String>,
    #[serde(rename = "fileSources")]
    pub file_sources: Vec<FileSource>,
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
}

impl SurveyConfig {
    /// The three questionnaires, in the order in which they are reported.
    pub fn from_files(
        survey_directory: &str,
        apache_file: &str,
        english_file: &str,
        spanish_file: &str,
    ) -> SurveyConfig {
        SurveyConfig {
            survey_directory: Some(survey_directory.to_string()),
            file_sources: vec![
                FileSource::new("Apache", apache_file, "english"),
                FileSource::new("English", english_file, "english"),
                FileSource::new("Spanish", spanish_file, "spanish"),
            ],
            output_settings: None,
        }
    }

    /// The directory of the response files, relative to `root`.
    pub fn survey_dir(&self, root: &Path) -> PathBuf {
        match &self.survey_directory {
            Some(d) => root.join(d),
            None => root.to_path_buf(),
        }
    }

    /// Where the charts go. Defaults to the survey directory.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        match self
            .output_settings
            .as_ref()
            .and_then(|o| o.output_directory.clone())
        {
            Some(d) => root.join(d),
            None => self.survey_dir(root),
        }
    }

    pub fn generate_charts(&self) -> bool {
        self.output_settings
            .as_ref()
            .and_then(|o| o.generate_charts)
            .unwrap_or(true)
    }

    pub fn plot_size(&self) -> Option<(u32, u32)> {
        let o = self.output_settings.as_ref()?;
        match (o.plot_width, o.plot_height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
