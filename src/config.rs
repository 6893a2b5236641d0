use std::collections::HashMap;

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::clients::fcm::FCM_URL;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub server_key: String,

    #[serde(default = "default_url")]
    pub url: String,

    /// JSON object of header name to value, merged over the default headers.
    #[serde(default)]
    pub extra_headers: Option<String>,
}

fn default_url() -> String {
    FCM_URL.to_string()
}

impl Config {
    /// Reads `FCM_*` variables from the environment, after loading `.env`.
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed("FCM_")
            .from_iter::<_, Self>(vars)
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;
        Ok(config)
    }

    pub fn extra_headers(&self) -> Result<HashMap<String, String>, Error> {
        match &self.extra_headers {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)
                .map_err(|e| anyhow!("FCM_EXTRA_HEADERS must be a JSON object of strings: {}", e)),
            _ => Ok(HashMap::new()),
        }
    }
}
