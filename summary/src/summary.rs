//! The normalized certificate record handed to rendering collaborators

use serde::Serialize;

/// Flat, presentation-ready view of one decoded certificate.
///
/// Constructed once per submission by the normalizer and never mutated
/// afterwards. Multi-valued distinguished-name fields keep the order they
/// appear in inside the certificate; absent fields are empty rather than
/// missing, so renderers never deal with optionality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSummary {
    /// Subject common name, empty when the subject carries none.
    pub common_name: String,
    /// DNS subject alternative names, in certificate order.
    pub subject_alt_names: Vec<String>,
    /// Subject organization values (O), in certificate order.
    pub organization: Vec<String>,
    /// Subject organizational unit values (OU), in certificate order.
    pub organizational_unit: Vec<String>,
    /// Subject locality values (L), in certificate order.
    pub locality: Vec<String>,
    /// Subject state/province values (ST), in certificate order.
    pub state: Vec<String>,
    /// Subject country values (C), in certificate order.
    pub country: Vec<String>,
    /// Start of the validity period, rendered for display.
    pub valid_from: String,
    /// End of the validity period, rendered for display.
    pub valid_to: String,
    /// Issuer display string: common name plus first organization value.
    pub issuer: String,
    /// Public key size in bits.
    pub key_size: u32,
    /// Serial number as a decimal string, arbitrary precision.
    pub serial_number: String,
}
