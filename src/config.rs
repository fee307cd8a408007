use std::time::Duration;

use anyhow::Result;

pub const DEFAULT_TARGET_LANG: &str = "JA";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper-cases a DeepL language code ("ja" -> "JA", "en-gb" -> "EN-GB").
/// Returns `None` when the code is blank or holds anything but letters and '-'.
pub fn normalize_target_lang(lang: &str) -> Option<String> {
    let lang = lang.trim().to_uppercase();
    if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return None;
    }
    Some(lang)
}

/// Which immediate children of the selected folder take part in a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    pub include_hidden: bool,
    pub include_symlinks: bool,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            include_hidden: true,
            include_symlinks: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub target_lang: String,
    /// Overrides the provider endpoint picked from the key type.
    pub endpoint: Option<String>,
    pub timeout: Duration,
    pub keep_extension: bool,
    pub sanitize: bool,
    pub listing: ListingPolicy,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
            keep_extension: false,
            sanitize: true,
            listing: ListingPolicy::default(),
        }
    }
}

pub struct ConfigBuilder {
    target_lang: Option<String>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    keep_extension: bool,
    sanitize: bool,
    listing: ListingPolicy,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            target_lang: None,
            endpoint: None,
            timeout: None,
            keep_extension: false,
            sanitize: true,
            listing: ListingPolicy::default(),
        }
    }

    /// Blank input keeps the default; anything else is checked in `build()`.
    pub fn target_lang(mut self, lang: impl Into<String>) -> Self {
        let lang = lang.into();
        if !lang.trim().is_empty() {
            self.target_lang = Some(lang);
        }
        self
    }

    pub fn endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .filter(|e| !e.is_empty());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn keep_extension(mut self, keep: bool) -> Self {
        self.keep_extension = keep;
        self
    }

    pub fn sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.listing.include_hidden = include;
        self
    }

    pub fn include_symlinks(mut self, include: bool) -> Self {
        self.listing.include_symlinks = include;
        self
    }

    pub fn build(self) -> Result<TranslateConfig> {
        let target_lang = match self.target_lang {
            Some(lang) => normalize_target_lang(&lang)
                .ok_or_else(|| anyhow::anyhow!("Invalid target language: {}", lang))?,
            None => DEFAULT_TARGET_LANG.to_string(),
        };

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(anyhow::anyhow!("Timeout must be greater than zero"));
        }

        Ok(TranslateConfig {
            target_lang,
            endpoint: self.endpoint,
            timeout,
            keep_extension: self.keep_extension,
            sanitize: self.sanitize,
            listing: self.listing,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
