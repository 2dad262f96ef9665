use clap::{Parser, Subcommand};

use crate::commands::{inspect::InspectArgs, sign::SignArgs, verify::VerifyArgs};

#[derive(Parser)]
#[command(
    name = "sigresp",
    version,
    about = "Sign and verify time-bound Ed25519 response tokens"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign a JSON payload into a token
    Sign(SignArgs),
    /// Verify a token and print its payload
    Verify(VerifyArgs),
    /// Print token fields without verifying
    Inspect(InspectArgs),
}
