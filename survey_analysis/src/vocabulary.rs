// ********* Closed vocabularies ***********

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Display;

/// The character joining the labels of a multi-valued cell.
pub const SEPARATOR: &str = ";";

/// The synthetic category for any role outside of [Role::ALL].
pub const OTHER: &str = "Other";

/// The roles a respondent may hold in a software project.
///
/// Respondents may hold several roles, and may list roles that are not part of this
/// set. Those are reported under [OTHER].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Role {
    Developer,
    Tester,
    ProjectManager,
    Architect,
    BusinessAnalyst,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Developer,
        Role::Tester,
        Role::ProjectManager,
        Role::Architect,
        Role::BusinessAnalyst,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::Tester => "Tester",
            Role::ProjectManager => "Project Manager",
            Role::Architect => "Architect",
            Role::BusinessAnalyst => "Business Analyst",
        }
    }

    /// Exact, case-sensitive match against the canonical labels.
    pub fn from_label(label: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.label() == label)
    }
}

/// How often a respondent observed priority deflation or inflation.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Frequency {
    Frequently,
    Occasionally,
    Never,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [
        Frequency::Frequently,
        Frequency::Occasionally,
        Frequency::Never,
    ];

    /// The order of the levels in the deflation / inflation comparison.
    pub const COMPARISON_ORDER: [Frequency; 3] = [
        Frequency::Never,
        Frequency::Occasionally,
        Frequency::Frequently,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Frequently => "Frequently",
            Frequency::Occasionally => "Occasionally",
            Frequency::Never => "Never",
        }
    }

    pub fn from_label(label: &str) -> Option<Frequency> {
        Frequency::ALL.iter().copied().find(|f| f.label() == label)
    }
}

/// The perceived impact of wrong priorities on a project.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Impact {
    NoImpact,
    MinimumImpact,
    SignificantImpact,
}

impl Impact {
    pub const ALL: [Impact; 3] = [
        Impact::NoImpact,
        Impact::MinimumImpact,
        Impact::SignificantImpact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Impact::NoImpact => "It has no impact",
            Impact::MinimumImpact => "Its impact is minimum",
            Impact::SignificantImpact => "It has a significant impact",
        }
    }

    pub fn from_label(label: &str) -> Option<Impact> {
        Impact::ALL.iter().copied().find(|i| i.label() == label)
    }
}

/// The language a source table was answered in.
///
/// The Apache variant of the survey is answered in English.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    /// Case-insensitive, accepts the usual two-letter codes.
    pub fn from_name(name: &str) -> Option<Language> {
        match name.trim().to_lowercase().as_str() {
            "english" | "en" | "apache" => Some(Language::English),
            "spanish" | "es" => Some(Language::Spanish),
            _ => None,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Spanish => write!(f, "Spanish"),
        }
    }
}

/// The columns of a canonical response table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Column {
    Roles,
    DeflationFrequency,
    InflationFrequency,
    Impact,
    RemediesText,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Roles,
        Column::DeflationFrequency,
        Column::InflationFrequency,
        Column::Impact,
        Column::RemediesText,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Roles => "Roles",
            Column::DeflationFrequency => "DeflationFrequency",
            Column::InflationFrequency => "InflationFrequency",
            Column::Impact => "Impact",
            Column::RemediesText => "RemediesText",
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Answers exactly as exported, accents included.
static SPANISH_ROLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Desarrollador", "Developer"),
        ("Analista de Calidad", "Tester"),
        ("Jefe de Proyecto", "Project Manager"),
        ("Arquitecto", "Architect"),
        ("Analista Funcional", "Business Analyst"),
        ("Líder técnico", "Technical Lead"),
        ("Gobierno TI", "IT Governance"),
        ("Tester", "Tester"),
        ("Asegurador de Calidad", "Quality Assurance"),
        ("Jefe de Desarrollo y Sistemas", "Development Manager"),
        ("DBA", "DBA"),
    ])
});

static SPANISH_FREQUENCIES: Lazy<HashMap<&'static str, Frequency>> = Lazy::new(|| {
    HashMap::from([
        ("Frecuentemente", Frequency::Frequently),
        ("Ocasionalmente", Frequency::Occasionally),
        ("Nunca", Frequency::Never),
    ])
});

static SPANISH_IMPACTS: Lazy<HashMap<&'static str, Impact>> = Lazy::new(|| {
    HashMap::from([
        ("No tiene impacto", Impact::NoImpact),
        ("Su impacto es mínimo", Impact::MinimumImpact),
        ("Tiene un impacto significativo", Impact::SignificantImpact),
    ])
});

/// Translates a single role label (one piece of a delimited role set).
///
/// English labels are kept verbatim: custom roles are valid answers.
/// The Spanish dictionary has no catch-all.
pub fn translate_role(language: Language, label: &str) -> Option<String> {
    match language {
        Language::English => Some(label.to_string()),
        Language::Spanish => SPANISH_ROLES.get(label).map(|s| s.to_string()),
    }
}

pub fn translate_frequency(language: Language, value: &str) -> Option<Frequency> {
    match language {
        Language::English => Frequency::from_label(value),
        Language::Spanish => SPANISH_FREQUENCIES.get(value).copied(),
    }
}

pub fn translate_impact(language: Language, value: &str) -> Option<Impact> {
    match language {
        Language::English => Impact::from_label(value),
        Language::Spanish => SPANISH_IMPACTS.get(value).copied(),
    }
}
