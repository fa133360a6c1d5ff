use std::collections::HashMap;

use thiserror::Error;

use crate::images::{self, AcceptAll, HttpImageValidator, ImageRotator, ImageValidator, OverrideTable};
use crate::paginator::{EmptyListPolicy, PAGE_SIZE};
use crate::repository::{self, Character, CharacterRepository};
use crate::session::Session;

#[derive(Clone, Debug)]
pub struct Options {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
    pub page_size: usize,
    pub empty_list_policy: EmptyListPolicy,
    pub default_image: String,
    pub validate_images: bool,
    /// Merged over the built-in table; an empty list removes an entry.
    pub image_overrides: HashMap<String, Vec<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            endpoint: repository::DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 10,
            proxy: None,
            page_size: PAGE_SIZE,
            empty_list_policy: EmptyListPolicy::FloorToOne,
            default_image: images::DEFAULT_IMAGE.to_string(),
            validate_images: false,
            image_overrides: HashMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("default image must not be empty")]
    EmptyDefaultImage,

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Loads the character list once and hands out a ready session.
#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
    repository: CharacterRepository,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if reqwest::Url::parse(&options.endpoint).is_err() {
            return Err(RunnerError::InvalidEndpoint {
                url: options.endpoint.clone(),
            });
        }
        if options.page_size == 0 {
            return Err(RunnerError::InvalidPageSize);
        }
        if options.timeout_seconds == 0 {
            return Err(RunnerError::InvalidTimeout);
        }
        if options.default_image.trim().is_empty() {
            return Err(RunnerError::EmptyDefaultImage);
        }
        if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            reqwest::Proxy::all(proxy).map_err(|e| RunnerError::ProxySetup {
                proxy: proxy.to_string(),
                source: e,
            })?;
        }
        let client = repository::build_client(options.proxy.as_deref(), options.timeout_seconds)
            .map_err(|e| RunnerError::HttpClientBuild { source: e })?;
        let repository = CharacterRepository::new(client, options.endpoint.clone());
        Ok(Self {
            options,
            repository,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The single network round trip; a failed load yields an empty list.
    pub async fn load(&self) -> Vec<Character> {
        self.repository.load_or_empty().await
    }

    pub fn overrides(&self) -> OverrideTable {
        let mut table = OverrideTable::builtin();
        table.extend(self.options.image_overrides.clone());
        table
    }

    /// Builds the session for an already loaded list.
    ///
    /// With `validate_images` this creates a blocking HTTP client, so call it
    /// outside the async runtime.
    pub fn session(&self, characters: Vec<Character>) -> Result<Session, RunnerError> {
        let validator: Box<dyn ImageValidator> = if self.options.validate_images {
            Box::new(
                HttpImageValidator::new(self.options.proxy.as_deref(), self.options.timeout_seconds)
                    .map_err(|e| RunnerError::HttpClientBuild { source: e })?,
            )
        } else {
            Box::new(AcceptAll)
        };
        let rotator = ImageRotator::new(
            self.overrides(),
            self.options.default_image.clone(),
            validator,
        );
        Ok(Session::new(
            characters,
            self.options.page_size,
            self.options.empty_list_policy,
            rotator,
        ))
    }
}
