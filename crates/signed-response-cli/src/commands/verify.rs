//! `sigresp verify` - Verify a token and print its payload.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use signed_response::{load_public_key_pem, OpenError, Verifier};

use crate::exit_codes;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Token file (JSON)
    pub token: PathBuf,

    /// Public key file (SPKI PEM)
    #[arg(long, env = "SIGRESP_PUBLIC_KEY")]
    pub pubkey: PathBuf,

    /// Reject tokens dated further than this into the future (e.g. "30s")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub max_future_skew: Option<std::time::Duration>,

    /// Quiet mode - only exit code, no output
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn cmd_verify(args: VerifyArgs) -> i32 {
    match run_verify(&args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            if !args.quiet {
                eprintln!("error: {e:#}");
            }
            if let Some(open_err) = e.downcast_ref::<OpenError>() {
                exit_codes::for_open_error(open_err)
            } else {
                exit_codes::USAGE_ERROR
            }
        }
    }
}

fn run_verify(args: &VerifyArgs) -> Result<()> {
    let mut verifier = Verifier::new(load_public_key_pem(&args.pubkey)?);
    if let Some(skew) = args.max_future_skew {
        let skew = chrono::Duration::from_std(skew).context("--max-future-skew is too large")?;
        verifier = verifier.with_max_future_skew(skew);
    }

    let token = fs::read(&args.token)
        .with_context(|| format!("failed to read token file: {}", args.token.display()))?;

    let payload = verifier.open(&token)?;

    if !args.quiet {
        println!("{}", String::from_utf8_lossy(&payload));
    }

    Ok(())
}
