#[macro_use]
extern crate log;

use allure_listener::configuration::{
    command_line::{LogLevel, Opt},
    journal,
};
use allure_listener::{AllureResults, Listener, Settings};
use log::LevelFilter;
use signal_hook::{iterator::Signals, SIGINT};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::exit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use structopt::StructOpt;

fn main() {
    let options = Opt::from_args();

    if let Err(e) = init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
        exit(1);
    }

    let mut settings = match Settings::load(options.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration {}", e);
            exit(1);
        }
    };
    if let Some(results_dir) = options.results_dir {
        settings.results_dir = results_dir;
    }
    debug!("Initiated configuration {:#?}", settings);

    let results = match AllureResults::new(&settings.results_dir) {
        Ok(results) => results,
        Err(e) => {
            error!("Cannot prepare results directory: {}", e);
            exit(1);
        }
    };
    let listener = Arc::new(Listener::new(results, settings));

    let stop = Arc::new(AtomicBool::new(false));
    match Signals::new(&[SIGINT]) {
        Ok(signals) => {
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                for sig in signals.forever() {
                    // A blocked stdin read never reaches the next event, so a second signal wins.
                    if stop.swap(true, Ordering::SeqCst) {
                        warn!("Received signal {:?} again, exiting without closing suites", sig);
                        exit(130);
                    }
                    info!("Received signal {:?}, stopping after the current event", sig);
                }
            });
        }
        Err(e) => warn!("Cannot install signal handler: {}", e),
    }

    let summary = match &options.journal {
        Some(path) => match File::open(path) {
            Ok(file) => journal::replay_until(BufReader::new(file), &listener, &stop),
            Err(e) => {
                error!("Cannot open journal '{}': {}", path.display(), e);
                listener.run_finished();
                exit(1);
            }
        },
        None => journal::replay_until(io::stdin(), &listener, &stop),
    };
    info!(
        "Replayed {} events ({} skipped), {} suites reported",
        summary.events,
        summary.malformed,
        listener.suites().len()
    );
    if summary.interrupted {
        exit(130);
    }
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
