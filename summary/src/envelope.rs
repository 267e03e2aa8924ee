//! PEM envelope decoding
//!
//! First stage of the pipeline: strip the textual PEM wrapping from the
//! submitted text and hand the raw DER payload to the normalizer. Anything
//! that is not a single well-formed `CERTIFICATE` block is rejected.

use crate::error::{Result, SummaryError};

/// PEM label a submitted block must carry.
const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Decode one PEM certificate block from arbitrary submitted text.
///
/// Returns the binary certificate payload on success. Fails with
/// [`SummaryError::InvalidEnvelope`] when no PEM block can be decoded from
/// the text, or when a block is found but its label is not `CERTIFICATE`.
/// The two cases are indistinguishable to the caller on purpose: the error
/// must not leak which stage of envelope handling rejected the input.
pub fn decode_certificate(text: &str) -> Result<Vec<u8>> {
    let block = pem::parse(text).map_err(|_| SummaryError::InvalidEnvelope)?;
    if block.tag() != CERTIFICATE_LABEL {
        return Err(SummaryError::InvalidEnvelope);
    }
    Ok(block.into_contents())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert_eq!(decode_certificate(""), Err(SummaryError::InvalidEnvelope));
    }

    #[test]
    fn rejects_garbage_input() {
        assert_eq!(
            decode_certificate("not a certificate at all"),
            Err(SummaryError::InvalidEnvelope)
        );
        assert_eq!(
            decode_certificate("\u{0}\u{1}\u{2}binary-ish\u{fffd}"),
            Err(SummaryError::InvalidEnvelope)
        );
    }

    #[test]
    fn rejects_wrong_label() {
        let block = pem::Pem::new("PRIVATE KEY", vec![1, 2, 3, 4]);
        let text = pem::encode(&block);
        assert_eq!(
            decode_certificate(&text),
            Err(SummaryError::InvalidEnvelope)
        );
    }

    #[test]
    fn accepts_certificate_label_and_returns_payload() {
        let payload = vec![0xde, 0xad, 0xbe, 0xef];
        let block = pem::Pem::new(CERTIFICATE_LABEL, payload.clone());
        let text = pem::encode(&block);
        assert_eq!(decode_certificate(&text), Ok(payload));
    }
}
