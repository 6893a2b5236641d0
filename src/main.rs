use std::io::Read;

use anyhow::{Context, Error, Result};
use fcm_package::{FcmClient, build_package_from_value, config::Config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_params() -> Result<String, Error> {
    let mut raw = String::new();

    match std::env::args().nth(1) {
        Some(path) => {
            raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read parameters from {}", path))?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read parameters from stdin")?;
        }
    }

    Ok(raw)
}

fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::load()?;
    let client = FcmClient::from_config(&config)?;

    let params: serde_json::Value =
        serde_json::from_str(&read_params()?).context("Parameters are not valid JSON")?;

    let (package, notices) = build_package_from_value(&params)?;
    for notice in &notices {
        warn!(notice = %notice, "Deprecated parameter");
    }

    let request = client.build_request(&package)?;
    info!(
        method = %request.method(),
        url = %request.url(),
        "FCM request prepared"
    );

    println!("{}", serde_json::to_string_pretty(&package)?);

    Ok(())
}
