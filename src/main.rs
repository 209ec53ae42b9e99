//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use log::{error, info, LevelFilter};
use rayon::prelude::*;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tikv_jemallocator::Jemalloc;

use huffpress::tools::cli::{huffopts_init, Output};
use huffpress::tools::file_ops::{process_file, process_stdin};

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace.
    // Log to stderr, since stdout may carry data.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let options = huffopts_init();

    //----- No files means a filter from stdin to stdout
    if options.files.is_empty() {
        return match process_stdin(&options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("stdin: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    //----- Each file is independent. Stdout output keeps the files in order.
    let work = |name: &String| match process_file(&options, name) {
        Ok(()) => true,
        Err(e) => {
            error!("{}: {}", name, e);
            false
        }
    };
    let failures = match options.output {
        Output::Stdout => options.files.iter().map(work).filter(|ok| !ok).count(),
        Output::File => options.files.par_iter().map(work).filter(|ok| !ok).count(),
    };

    info!("Done.\n");
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
