//! `sigresp inspect` - Show token fields. Does not verify.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use std::fs;
use std::path::PathBuf;

use signed_response::{unix_nanos, SignedResponse, VALIDITY_WINDOW};

use crate::exit_codes;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Token file (JSON)
    pub token: PathBuf,
}

pub fn cmd_inspect(args: InspectArgs) -> i32 {
    match run_inspect(&args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_codes::USAGE_ERROR
        }
    }
}

fn run_inspect(args: &InspectArgs) -> Result<()> {
    let token = fs::read(&args.token)
        .with_context(|| format!("failed to read token file: {}", args.token.display()))?;

    let response = SignedResponse::from_slice(&token)
        .with_context(|| format!("malformed token: {}", args.token.display()))?;

    let expires_at = response.created_at.checked_add_signed(VALIDITY_WINDOW);

    println!("Token (not verified):");
    println!("  created_at:  {}", response.created_at);
    println!("  unix_nanos:  {}", unix_nanos(response.created_at));
    match expires_at {
        Some(expires_at) => {
            println!("  expires_at:  {expires_at}");
            println!("  expired:     {}", Utc::now() > expires_at);
        }
        None => println!("  expires_at:  never"),
    }
    println!("  signature:   {} bytes", response.signature.len());
    println!("  data:        {}", response.data.get());

    Ok(())
}
