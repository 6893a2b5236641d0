use std::collections::HashMap;

use anyhow::{Error, Result};
use reqwest::{
    Client, Request,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use tracing::{debug, info};

use crate::{
    config::Config,
    errors::ClientError,
    models::fcm::{FcmPackage, FcmParams},
    utils::build_package,
};

pub const FCM_URL: &str = "https://fcm.googleapis.com/fcm/send";

/// Prepares legacy HTTP API requests. Sending them, and any timeout or retry
/// policy around that, is left to the caller.
pub struct FcmClient {
    http_client: Client,
    url: String,
    headers: HeaderMap,
}

impl FcmClient {
    pub fn new(
        server_key: &str,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<Self, ClientError> {
        Self::with_url(FCM_URL, server_key, extra_headers)
    }

    pub fn with_url(
        url: &str,
        server_key: &str,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<Self, ClientError> {
        let mut authorization = header_value("Authorization", &format!("key={}", server_key))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra_headers.unwrap_or_default() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value(&name, &value)?);
        }

        info!(url, header_count = headers.len(), "FCM client initialized");

        Ok(Self {
            http_client: Client::new(),
            url: url.to_string(),
            headers,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let extra_headers = config.extra_headers()?;
        Ok(Self::with_url(&config.url, &config.server_key, Some(extra_headers))?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn build_request(&self, package: &FcmPackage) -> Result<Request, ClientError> {
        debug!(
            url = %self.url,
            registration_ids = package.registration_ids().len(),
            "Preparing FCM request"
        );

        let request = self
            .http_client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(package)
            .build()?;

        Ok(request)
    }

    /// Validates `params` and wraps the resulting package in a request.
    pub fn prepare(&self, params: FcmParams) -> Result<Request, ClientError> {
        let package = build_package(params)?;
        self.build_request(&package)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
