//! Shell boundary: the two operations the UI drives.
//!
//! A [`Shell`] is built once at process start and lives for the process
//! lifetime, holding the HTTP client and settings. Each operation is an
//! independent, stateless call; overlapping-request coordination is the
//! caller's concern.

use crate::extractor::{self, ExtractError, ExtractedContent};
use crate::relay::{self, RelayError};
use crate::settings::Settings;
use crate::summary::SummaryResult;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Entry point for extraction and summarization requests
pub struct Shell {
    client: Client,
    settings: Settings,
}

impl Shell {
    /// Build the shell from loaded settings
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let client = extractor::create_client()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch a page and extract its main article content
    pub async fn request_extraction(&self, url: &str) -> Result<ExtractedContent, ShellError> {
        let document = extractor::fetch_document(&self.client, url).await?;
        Ok(extractor::extract(&document, url)?)
    }

    /// Summarise previously extracted content with the configured provider
    pub async fn request_summary(
        &self,
        content: &ExtractedContent,
    ) -> Result<SummaryResult, ShellError> {
        Ok(relay::summarize(&self.client, content, &self.settings).await?)
    }
}
