mod cli;

use crate::cli::Cli;

fn main() {
    // Parse CLI, init logging, dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("oggrab error: {:#}", err);
        std::process::exit(1);
    }
}
