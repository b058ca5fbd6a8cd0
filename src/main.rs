mod args;
mod survey;

use clap::Parser;
use log::{debug, error};
use std::path::Path;
use std::process;

use crate::args::Args;
use crate::survey::config_reader::SurveyConfig;
use crate::survey::{run_survey, run_survey_from_file, RunOptions, SurveyResult};

fn run(args: &Args) -> SurveyResult<()> {
    let options = RunOptions {
        summary_out: args.out.clone(),
        reference: args.reference.clone(),
        generate_charts: if args.no_charts { Some(false) } else { None },
    };
    match &args.config {
        Some(config_path) => run_survey_from_file(config_path, &options)?,
        None => {
            let survey_dir = args.survey_dir.clone().unwrap_or_else(|| ".".to_string());
            let config = SurveyConfig::from_files(
                &survey_dir,
                &args.apache_file,
                &args.english_file,
                &args.spanish_file,
            );
            run_survey(&config, Path::new(""), &options)?
        }
    };
    Ok(())
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    if let Err(e) = run(&args) {
        error!("{:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
