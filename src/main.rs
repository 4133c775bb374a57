//! xcforge - build, test, archive and release Apple-platform projects.
//!
//! Every command line is printed before it runs; failures end the process
//! with exit status 1.

use std::process;
use xcforge::{OutputManager, cli};

fn main() {
    // Initialize logging
    env_logger::init();

    if let Err(e) = cli::run() {
        OutputManager::default().fatal(&format!("{e:#}"));
        process::exit(1);
    }
}
