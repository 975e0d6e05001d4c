//! Machine translation behind a trait.
//!
//! - `google`: Google Cloud Translation v2 over HTTP
//! - `translator`: pass-through, batching, rate limiting and retries around
//!   any provider

pub mod google;
pub mod translator;

use thiserror::Error;

pub use google::GoogleTranslateProvider;
pub use translator::{FillReport, Translator, TranslatorOptions, fill_missing};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("quota exceeded: {0}")]
    Quota(String),
    #[error("request timed out")]
    Timeout,
    #[error("service error {status}: {message}")]
    Service { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Worth retrying after a backoff.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Quota(_) | Self::Timeout | Self::Transport(_) => true,
            Self::Service { status, .. } => *status >= 500,
            Self::Malformed(_) => false,
        }
    }
}

/// Translates batches of texts between two locales.
///
/// Implementations return exactly one output per input, in input order.
#[allow(async_fn_in_trait)]
pub trait TranslationProvider {
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ProviderError::Quota("daily limit".into()).is_transient());
        assert!(ProviderError::Timeout.is_transient());
        assert!(
            ProviderError::Service {
                status: 503,
                message: "unavailable".into()
            }
            .is_transient()
        );
        assert!(
            !ProviderError::Service {
                status: 400,
                message: "bad language".into()
            }
            .is_transient()
        );
        assert!(!ProviderError::Malformed("no data".into()).is_transient());
    }
}
