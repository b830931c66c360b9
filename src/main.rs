mod args;
mod survey;

use clap::Parser;
use log::{debug, LevelFilter};
use std::error::Error;
use std::process::exit;

use crate::survey::{RunSettings, SurveyError};

fn main() {
    let args = args::Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();
    debug!("args: {:?}", args);

    let settings = RunSettings {
        config_path: args.config,
        input: args.input,
        input_type: args.input_type,
        output: args.out,
        excel_worksheet_name: args.excel_worksheet_name,
        summary: args.summary,
        reference: args.reference,
    };

    match survey::run_export(&settings) {
        Ok(()) => {}
        Err(e @ SurveyError::ConfigurationMissing { .. }) => {
            eprintln!("{}", e);
            exit(2);
        }
        Err(e) => {
            eprintln!("An error occured: {}", e);
            let mut source = e.source();
            while let Some(s) = source {
                eprintln!("  caused by: {}", s);
                source = s.source();
            }
            exit(1);
        }
    }
}
