//! # Summora
//!
//! A CLI for readable-article extraction and LLM summarisation.
//!
//! ## Features
//!
//! - **Readability extraction**: Finds the main article container on a page
//!   and renders it as clean plain text with an estimated reading time
//! - **Provider agnostic**: Summarises via OpenAI or Anthropic behind a
//!   shared prompt template
//! - **History & favourites**: Past summaries stored in sled, pinnable from
//!   the CLI

pub mod extractor;
pub mod history;
pub mod prompt;
pub mod provider;
pub mod relay;
pub mod settings;
pub mod shell;
pub mod summary;

pub use extractor::ExtractedContent;
pub use history::History;
pub use settings::Settings;
pub use shell::Shell;
pub use summary::SummaryResult;
