//! Decode a PEM-encoded X.509 certificate and normalize its fields into a
//! presentation-ready summary.
//!
//! The pipeline runs in one direction with no state between invocations:
//!
//! submitted text → [`envelope::decode_certificate`] → DER bytes →
//! [`normalize::normalize`] → [`CertificateSummary`]
//!
//! [`summarize`] composes the two stages and is the entry point callers
//! should use. The crate makes no security claims about the certificates it
//! describes: no chain building, no trust checks, no signature verification
//! — it only reports what is inside the envelope.

#![forbid(unsafe_code)]

pub mod envelope;
pub mod error;
pub mod normalize;
pub mod summary;

pub use error::{Result, SummaryError};
pub use summary::CertificateSummary;

/// Run the full pipeline on submitted text.
///
/// Decodes the PEM envelope, parses the certificate structure, and builds
/// the normalized summary. Fails with one of the three [`SummaryError`]
/// kinds; never panics on malformed input.
pub fn summarize(text: &str) -> Result<CertificateSummary> {
    let der_bytes = envelope::decode_certificate(text)?;
    normalize::normalize(&der_bytes)
}
