mod cli;
mod display;
mod models;
mod parser;
mod session;
mod store;

use clap::Parser;
use crate::cli::Cli;

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();
    cli::run(cli);
}
