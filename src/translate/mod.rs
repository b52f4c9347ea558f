//! Text translation client.
//!
//! Thin blocking client for an MD5-signed translation HTTP API. Each request
//! carries a fresh random salt and a signature over the app id, query, salt,
//! and shared secret.

use md5::{Digest, Md5};
use rand::Rng;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// Credentials and endpoint for the translation service.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Application id issued by the service.
    pub app_id: String,

    /// Shared signing secret.
    pub secret: String,

    /// API endpoint URL.
    pub endpoint: String,
}

impl TranslateConfig {
    /// Create a config for the default endpoint.
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret: secret.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Compute the request signature: lowercase hex MD5 of
/// `app_id + query + salt + secret`.
pub fn sign_request(app_id: &str, query: &str, salt: u32, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(app_id.as_bytes());
    hasher.update(query.as_bytes());
    hasher.update(salt.to_string().as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    error_code: Option<String>,
    error_msg: Option<String>,
    trans_result: Option<Vec<TranslatedSegment>>,
}

#[derive(Debug, Deserialize)]
struct TranslatedSegment {
    #[allow(dead_code)]
    src: String,
    dst: String,
}

/// Blocking translation client.
pub struct TranslateClient {
    config: TranslateConfig,
    http: reqwest::blocking::Client,
}

impl TranslateClient {
    /// Create a client from a config.
    pub fn new(config: TranslateConfig) -> Self {
        Self {
            config,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Translate `query` between the given language codes (e.g. "en", "zh";
    /// "auto" asks the service to detect the source language).
    pub fn translate(&self, query: &str, from: &str, to: &str) -> Result<String> {
        let salt: u32 = rand::thread_rng().gen_range(32_768..=65_536);
        let sign = sign_request(&self.config.app_id, query, salt, &self.config.secret);
        let salt = salt.to_string();

        let params = [
            ("q", query),
            ("from", from),
            ("to", to),
            ("appid", self.config.app_id.as_str()),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
        ];

        let response: TranslateResponse = self
            .http
            .post(&self.config.endpoint)
            .form(&params)
            .send()?
            .json()?;

        if let Some(code) = response.error_code {
            return Err(Error::Translate {
                code,
                message: response.error_msg.unwrap_or_default(),
            });
        }

        response
            .trans_result
            .and_then(|segments| segments.into_iter().next())
            .map(|segment| segment.dst)
            .ok_or_else(|| Error::Other("translation response had no result".into()))
    }
}
