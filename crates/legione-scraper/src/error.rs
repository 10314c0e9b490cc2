use thiserror::Error;

/// Terminal outcomes of a single scrape call.
///
/// None of these are retried above the fetcher's internal attempt bound.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// No ASIN could be derived from the input, including a failed short-link
    /// resolution.
    #[error("no product identifier found in \"{input}\"")]
    NotFound { input: String },

    /// Retries were exhausted, or a non-transient status/transport error was hit.
    #[error("fetching {url} failed after {attempts} attempt(s): {reason}")]
    FetchFailed {
        url: String,
        attempts: u32,
        reason: String,
    },

    /// The page was fetched but carries no product title (usually a CAPTCHA).
    #[error("product page {url} could not be parsed: {reason}")]
    ParseFailed { url: String, reason: String },

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ScraperError {
    /// `true` when the caller should say "try again later" rather than
    /// "link not recognized".
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        matches!(
            self,
            ScraperError::FetchFailed { .. } | ScraperError::ParseFailed { .. }
        )
    }

    /// Italian text shown to whoever sent the link.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ScraperError::NotFound { .. } => {
                "Link non riconosciuto: invia il link di un prodotto Amazon."
            }
            ScraperError::FetchFailed { .. } | ScraperError::ParseFailed { .. } => {
                "Prodotto temporaneamente non disponibile, riprova più tardi."
            }
            ScraperError::Client(_) => "Errore interno, riprova più tardi.",
        }
    }
}

/// Failure of a single HTTP exchange, before any status code is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl TransportError {
    /// Timeouts and connection failures are worth another attempt.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, TransportError::Timeout(_) | TransportError::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
