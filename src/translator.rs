use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;

const FREE_ENDPOINT: &str = "https://api-free.deepl.com";
const PRO_ENDPOINT: &str = "https://api.deepl.com";
/// DeepL answers 456 when the character quota is used up.
const QUOTA_EXCEEDED: u16 = 456;

/// Translates a single piece of text into `target_lang`, authenticated by `api_key`.
pub trait Translator {
    fn translate(&self, api_key: &str, text: &str, target_lang: &str) -> Result<String, ProviderError>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, api_key: &str, text: &str, target_lang: &str) -> Result<String, ProviderError> {
        (**self).translate(api_key, text, target_lang)
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

pub struct DeeplTranslator {
    http: Client,
    endpoint: Option<String>,
}

impl DeeplTranslator {
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .user_agent(concat!("folder-translate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { http, endpoint })
    }

    fn endpoint_for(&self, api_key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => default_endpoint(api_key).to_string(),
        }
    }
}

impl Translator for DeeplTranslator {
    fn translate(&self, api_key: &str, text: &str, target_lang: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v2/translate", self.endpoint_for(api_key));
        debug!("POST {} ({} chars, target {})", url, text.len(), target_lang);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", api_key))
            .form(&[("text", text), ("target_lang", target_lang)])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(status_error(status, body));
        }

        parse_translation(&body)
    }
}

/// Free-plan keys carry a `:fx` suffix and are only accepted by the free endpoint.
pub fn default_endpoint(api_key: &str) -> &'static str {
    if api_key.trim_end().ends_with(":fx") {
        FREE_ENDPOINT
    } else {
        PRO_ENDPOINT
    }
}

pub fn status_error(status: StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::Auth,
        QUOTA_EXCEEDED => ProviderError::Quota,
        code => ProviderError::Http { status: code, body },
    }
}

pub fn parse_translation(body: &str) -> Result<String, ProviderError> {
    let response: TranslateResponse = serde_json::from_str(body)?;

    response
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| ProviderError::Response("missing translation text".to_string()))
}
