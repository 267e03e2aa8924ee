//! Error types for the decode-and-normalize pipeline

use thiserror::Error;

/// Errors the summarization pipeline reports to callers.
///
/// Detailed diagnostics from the PEM and X.509 libraries are deliberately
/// swallowed at this boundary: submitters are untrusted and must not see
/// parser internals. The three kinds below are the entire external surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// The submitted text is not a PEM block labeled `CERTIFICATE`.
    #[error("invalid certificate input")]
    InvalidEnvelope,

    /// The PEM payload is not a syntactically valid X.509 certificate.
    #[error("failed to parse certificate")]
    ParseFailure,

    /// The certificate parsed but carries a public key algorithm the
    /// normalizer cannot size. Carries the algorithm OID for diagnostics.
    #[error("unsupported public key algorithm: {0}")]
    UnsupportedKeyType(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SummaryError>;
