mod args;
mod onoe;

use clap::Parser;
use log::{debug, warn};
use snafu::ErrorCompat;

use crate::args::{Args, Command};

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("args: {:?}", args);

    let res = match &args.command {
        Command::Generate(g) => onoe::run_generator(g),
        Command::Dashboard(d) => onoe::run_dashboard(d),
    };

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e.as_ref()) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
