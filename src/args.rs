use clap::Parser;

/// Builds the course programming spreadsheet from the answers to a course preference survey.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, default config.json) The JSON configuration file with the school identifiers
    /// and the input and output paths. If the file does not exist, it is created with default
    /// values and the program stops.
    #[clap(short, long, value_parser, default_value = "config.json")]
    pub config: String,

    /// (file path) The survey responses. Setting this option overrides the input file of the
    /// configuration.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path) The Excel workbook to write. Setting this option overrides the output file of
    /// the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Only required when
    /// the workbook has more than one worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path or 'stdout') If specified, the choices of every student are written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, surveyx
    /// will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
