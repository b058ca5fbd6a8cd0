use clap::Parser;

/// Normalizes and aggregates the answers of the priority inflation survey.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON description of the survey sources. When given, the
    /// --survey-dir and --*-file options are ignored.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, default current directory) The directory holding the response files.
    #[clap(short, long, value_parser)]
    pub survey_dir: Option<String>,

    /// (file name, default apache.csv) Responses of the Apache community questionnaire.
    #[clap(long, value_parser, default_value = "apache.csv")]
    pub apache_file: String,

    /// (file name, default english.csv) Responses of the English questionnaire.
    #[clap(long, value_parser, default_value = "english.csv")]
    pub english_file: String,

    /// (file name, default spanish.csv) Responses of the Spanish questionnaire.
    #[clap(long, value_parser, default_value = "spanish.csv")]
    pub spanish_file: String,

    /// (file path) A reference summary in JSON format. If provided, the computed summary
    /// must match it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the survey will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// If passed as an argument, no chart is rendered.
    #[clap(long, takes_value = false)]
    pub no_charts: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
