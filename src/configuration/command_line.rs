use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// Journal of runner events, one JSON object per line. Reads stdin when omitted
    #[structopt(parse(from_os_str))]
    pub journal: Option<PathBuf>,

    /// Set a custom configuration file. Supported: YAML, JSON, TOML, HJSON
    #[structopt(long, short = "c", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,

    /// Directory receiving allure results, overrides the configured one
    #[structopt(long, short = "r", parse(from_os_str))]
    pub results_dir: Option<PathBuf>,
}

impl Into<LevelFilter> for LogLevel {
    fn into(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
