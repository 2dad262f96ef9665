use clap::Parser;

mod args;
mod commands;
pub mod exit_codes;

use args::Cli;

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = Cli::parse();
    std::process::exit(commands::dispatch(cli));
}
