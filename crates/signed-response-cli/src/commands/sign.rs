//! `sigresp sign` - Sign a JSON payload.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use serde_json::value::RawValue;
use signed_response::{load_private_key_pem, SignedResponse, Signer};

use crate::exit_codes;

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Payload file (JSON)
    pub payload: PathBuf,

    /// Private key file (PKCS#8 PEM)
    #[arg(long, short, env = "SIGRESP_PRIVATE_KEY")]
    pub key: PathBuf,

    /// Output file for the token (stdout if omitted)
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Creation time (RFC 3339); defaults to now
    #[arg(long)]
    pub created_at: Option<DateTime<Utc>>,
}

pub fn cmd_sign(args: SignArgs) -> i32 {
    match run_sign(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_codes::USAGE_ERROR
        }
    }
}

fn run_sign(args: SignArgs) -> Result<()> {
    let signer = Signer::new(load_private_key_pem(&args.key)?);

    let payload_json = fs::read_to_string(&args.payload)
        .with_context(|| format!("failed to read payload file: {}", args.payload.display()))?;

    // Signed as written: key order and number literals are part of the signature.
    let payload: Box<RawValue> = serde_json::from_str(&payload_json)
        .with_context(|| format!("failed to parse payload JSON: {}", args.payload.display()))?;

    let mut response = SignedResponse::new(payload);
    if let Some(created_at) = args.created_at {
        response.created_at = created_at;
    }
    signer.seal(&mut response);
    let token = serde_json::to_string_pretty(&response)?;

    match &args.out {
        Some(path) => {
            fs::write(path, &token)
                .with_context(|| format!("failed to write token: {}", path.display()))?;
            tracing::info!(
                key_id = %signer.key_id(),
                created_at = %response.created_at,
                out = %path.display(),
                "token written"
            );
        }
        None => println!("{token}"),
    }

    Ok(())
}
