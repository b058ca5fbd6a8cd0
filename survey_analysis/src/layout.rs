use crate::vocabulary::{Column, Language};

// Question texts of the English (and Apache) questionnaire.
pub const ENGLISH_ROLES_HEADER: &str =
    "What is your role in your current software development project(s)?";
pub const ENGLISH_DEFLATION_HEADER: &str =
    "How often have you found bug reports whose priority was lower than it should be (priority deflation)?";
pub const ENGLISH_INFLATION_HEADER: &str =
    "How often have you found bug reports whose priority was higher than it should be (priority inflation)?";
pub const ENGLISH_IMPACT_HEADER: &str =
    "What is the impact of priority inflation and deflation on your project?";
pub const ENGLISH_REMEDIES_HEADER: &str =
    "What would you do to mitigate priority inflation and deflation?";

// The Spanish export keeps a leading space on every question.
pub const SPANISH_ROLES_HEADER: &str =
    " ¿Qué roles cumples en el proyecto de desarrollo de Software en el que estás participando?";
pub const SPANISH_DEFLATION_HEADER: &str =
    " ¿Con qué frecuencia has encontrado reportes de defectos con una prioridad menor a la que deberían tener?";
pub const SPANISH_INFLATION_HEADER: &str =
    " ¿Con qué frecuencia has encontrado reportes de defectos con una prioridad mayor a la que deberían tener?";
pub const SPANISH_IMPACT_HEADER: &str =
    " ¿Qué impacto tiene la inflación y deflación de prioridades en tu proyecto?";
pub const SPANISH_REMEDIES_HEADER: &str =
    " ¿Qué harías para mitigar la inflación y deflación de prioridades?";

/// Where the canonical columns live in one source table.
///
/// Headers are matched verbatim, whitespace included.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceLayout {
    language: Language,
    headers: Vec<(Column, String)>,
}

impl SourceLayout {
    /// A layout with no column mapped yet.
    pub fn new(language: Language) -> SourceLayout {
        SourceLayout {
            language,
            headers: Vec::new(),
        }
    }

    pub fn english() -> SourceLayout {
        SourceLayout::new(Language::English)
            .with_header(Column::Roles, ENGLISH_ROLES_HEADER)
            .with_header(Column::DeflationFrequency, ENGLISH_DEFLATION_HEADER)
            .with_header(Column::InflationFrequency, ENGLISH_INFLATION_HEADER)
            .with_header(Column::Impact, ENGLISH_IMPACT_HEADER)
            .with_header(Column::RemediesText, ENGLISH_REMEDIES_HEADER)
    }

    pub fn spanish() -> SourceLayout {
        SourceLayout::new(Language::Spanish)
            .with_header(Column::Roles, SPANISH_ROLES_HEADER)
            .with_header(Column::DeflationFrequency, SPANISH_DEFLATION_HEADER)
            .with_header(Column::InflationFrequency, SPANISH_INFLATION_HEADER)
            .with_header(Column::Impact, SPANISH_IMPACT_HEADER)
            .with_header(Column::RemediesText, SPANISH_REMEDIES_HEADER)
    }

    /// The default questionnaire for a language.
    pub fn for_language(language: Language) -> SourceLayout {
        match language {
            Language::English => SourceLayout::english(),
            Language::Spanish => SourceLayout::spanish(),
        }
    }

    /// Maps a column to a header, replacing any previous mapping of that column.
    pub fn with_header(mut self, column: Column, header: &str) -> SourceLayout {
        self.headers.retain(|(c, _)| *c != column);
        self.headers.push((column, header.to_string()));
        self.headers.sort_by_key(|(c, _)| *c);
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn header(&self, column: Column) -> Option<&str> {
        self.headers
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, h)| h.as_str())
    }

    pub fn headers(&self) -> &[(Column, String)] {
        &self.headers
    }
}
