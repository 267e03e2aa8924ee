//! Public key size derivation
//!
//! The summary reports the key strength in bits for every certificate it
//! accepts. The size depends on the key algorithm, so this module dispatches
//! over the SubjectPublicKeyInfo algorithm OID: RSA and DH-like keys are
//! sized from their embedded integers, elliptic-curve keys from the named
//! curve (or the group order for explicit parameters), and the modern
//! fixed-size algorithms from a table. An algorithm outside the supported
//! set is reported as unsupported instead of faulting.

use der::asn1::BitStringRef;
use der::{AnyRef, Encode, Reader, SliceReader, Tag};
use spki::SubjectPublicKeyInfoOwned;

use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, SECP_224_R_1, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use const_oid::db::rfc8410::{ID_ED_448, ID_ED_25519, ID_X_448, ID_X_25519};

use crate::error::{Result, SummaryError};

const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";
const DSA_OID: &str = "1.2.840.10040.4.1";
const DH_OID: &str = "1.2.840.10046.2.1";

/// Derive the key size in bits from a certificate's SubjectPublicKeyInfo.
///
/// Fails with [`SummaryError::UnsupportedKeyType`] when the algorithm OID is
/// outside the supported set, and with [`SummaryError::ParseFailure`] when
/// the algorithm is recognized but its key material does not decode.
pub fn key_size_bits(spki: &SubjectPublicKeyInfoOwned) -> Result<u32> {
    let algorithm = &spki.algorithm;
    let oid = algorithm.oid;
    let oid_str = oid.to_string();

    if oid_str == RSA_ENCRYPTION_OID {
        let key_bits = spki
            .subject_public_key
            .as_bytes()
            .ok_or(SummaryError::ParseFailure)?;
        let public_key =
            BitStringRef::new(0, key_bits).map_err(|_| SummaryError::ParseFailure)?;
        rsa_key_size(&public_key).ok_or(SummaryError::ParseFailure)
    } else if oid_str == DSA_OID || oid_str == DH_OID {
        dh_like_key_size(algorithm.parameters.as_ref().map(AnyRef::from))
            .ok_or(SummaryError::ParseFailure)
    } else if oid == ID_EC_PUBLIC_KEY {
        ec_key_size(algorithm.parameters.as_ref().map(AnyRef::from))
            .ok_or_else(|| SummaryError::UnsupportedKeyType(oid_str))
    } else if oid == ID_X_25519 || oid == ID_ED_25519 {
        Ok(256)
    } else if oid == ID_X_448 {
        Ok(448)
    } else if oid == ID_ED_448 {
        Ok(456)
    } else {
        Err(SummaryError::UnsupportedKeyType(oid_str))
    }
}

/// Bit length of a big-endian byte slice holding a positive integer.
fn bit_length(bytes: &[u8]) -> Option<u32> {
    let start = bytes.iter().position(|&b| b != 0)?;
    let effective = &bytes[start..];
    let high_bits = 8u32 - effective[0].leading_zeros();
    let rest_bits = ((effective.len() - 1) * 8) as u32;
    Some(high_bits + rest_bits)
}

/// Significant byte length of a big-endian integer, leading zeros stripped.
fn byte_length(bytes: &[u8]) -> Option<usize> {
    let start = bytes.iter().position(|&b| b != 0)?;
    Some(bytes.len() - start)
}

/// Skip a single ASN.1 element using a `SliceReader`.
fn skip_element(reader: &mut SliceReader) -> Option<()> {
    let header = reader.peek_header().ok()?;
    let header_len: usize = header.encoded_len().ok()?.try_into().ok()?;
    let content_len: usize = header.length.try_into().ok()?;
    let total_len = header_len + content_len;
    reader
        .read_slice(der::Length::try_from(total_len).ok()?)
        .ok()?;
    Some(())
}

/// RSA key size: modulus byte length times eight.
///
/// The subjectPublicKey holds `RSAPublicKey ::= SEQUENCE { modulus INTEGER,
/// publicExponent INTEGER }`. The DER sign-padding octet on the modulus is
/// stripped before sizing, so a 2048-bit modulus reports exactly 2048.
fn rsa_key_size(public_key: &BitStringRef) -> Option<u32> {
    let key_bytes = public_key.as_bytes()?;
    let mut reader = SliceReader::new(key_bytes).ok()?;

    let sequence_header = reader.peek_header().ok()?;
    if sequence_header.tag != Tag::Sequence {
        return None;
    }
    let header_len = sequence_header.encoded_len().ok()?;
    reader.read_slice(header_len).ok()?;

    let modulus_header = reader.peek_header().ok()?;
    if modulus_header.tag != Tag::Integer {
        return None;
    }
    let modulus_header_len = modulus_header.encoded_len().ok()?;
    reader.read_slice(modulus_header_len).ok()?;

    let modulus_bytes = reader.read_slice(modulus_header.length).ok()?;
    let modulus_len = byte_length(modulus_bytes)?;
    u32::try_from(modulus_len * 8).ok()
}

/// DSA/DH key size: bit length of the prime `p` from the parameters.
fn dh_like_key_size(parameters: Option<AnyRef>) -> Option<u32> {
    let parameters = parameters?;
    let bytes = parameters.value();
    let mut reader = SliceReader::new(bytes).ok()?;

    let sequence_header = reader.peek_header().ok()?;
    if sequence_header.tag != Tag::Sequence {
        return None;
    }
    let seq_header_len = sequence_header.encoded_len().ok()?;
    reader.read_slice(seq_header_len).ok()?;

    let p_header = reader.peek_header().ok()?;
    if p_header.tag != Tag::Integer {
        return None;
    }
    let p_header_len = p_header.encoded_len().ok()?;
    reader.read_slice(p_header_len).ok()?;

    let p_bytes = reader.read_slice(p_header.length).ok()?;
    bit_length(p_bytes)
}

/// Elliptic-curve key size from the algorithm parameters.
///
/// Named curves map through a table; explicit `specifiedCurve` parameters
/// are sized from the bit length of the group order.
fn ec_key_size(parameters: Option<AnyRef>) -> Option<u32> {
    let parameters = parameters?;
    let bytes = parameters.value();
    let mut reader = SliceReader::new(bytes).ok()?;

    let header = reader.peek_header().ok()?;
    match header.tag {
        Tag::ObjectIdentifier => {
            let header_len = header.encoded_len().ok()?;
            reader.read_slice(header_len).ok()?;
            let oid_bytes = reader.read_slice(header.length).ok()?;
            let curve = const_oid::ObjectIdentifier::from_bytes(oid_bytes).ok()?;
            match curve {
                SECP_224_R_1 => Some(224),
                SECP_256_R_1 => Some(256),
                SECP_384_R_1 => Some(384),
                SECP_521_R_1 => Some(521),
                _ => match curve.to_string().as_str() {
                    // secp192r1 and secp192k1 both carry 192-bit keys
                    "1.2.840.10045.3.1.1" | "1.3.132.0.31" => Some(192),
                    "1.3.132.0.32" => Some(224), // secp224k1
                    "1.3.132.0.10" => Some(256), // secp256k1
                    _ => None,
                },
            }
        }
        Tag::Sequence => {
            // specifiedCurve: ECParameters
            let header_len = header.encoded_len().ok()?;
            reader.read_slice(header_len).ok()?;
            // version INTEGER, fieldID SEQUENCE, curve SEQUENCE,
            // base OCTET STRING
            skip_element(&mut reader)?;
            skip_element(&mut reader)?;
            skip_element(&mut reader)?;
            skip_element(&mut reader)?;
            // order INTEGER
            let order_header = reader.peek_header().ok()?;
            if order_header.tag != Tag::Integer {
                return None;
            }
            let order_header_len = order_header.encoded_len().ok()?;
            reader.read_slice(order_header_len).ok()?;
            let order_bytes = reader.read_slice(order_header.length).ok()?;
            bit_length(order_bytes)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_length_strips_leading_zeros() {
        assert_eq!(bit_length(&[0x00, 0x80, 0x00]), Some(16));
        assert_eq!(bit_length(&[0x01]), Some(1));
        assert_eq!(bit_length(&[0xff, 0xff]), Some(16));
        assert_eq!(bit_length(&[0x00, 0x00]), None);
    }

    #[test]
    fn byte_length_strips_leading_zeros() {
        // A 2048-bit modulus arrives with a DER sign-padding octet.
        let mut modulus = vec![0u8; 257];
        modulus[0] = 0x00;
        modulus[1] = 0xc1;
        assert_eq!(byte_length(&modulus), Some(256));
        assert_eq!(byte_length(&[0x00]), None);
    }
}
