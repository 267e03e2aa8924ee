//! Certificate normalization
//!
//! Second stage of the pipeline: parse the binary certificate structure and
//! map its fields into a [`CertificateSummary`]. The parsed certificate
//! never leaves this module; callers only see the flat summary record or a
//! classified error. Construction is all-or-nothing — no partial summaries.

pub mod key;
pub mod name;

use der::Decode;
use num_bigint::BigUint;
use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::SubjectAltName;
use x509_cert::ext::Extension;
use x509_cert::Certificate;

use crate::error::{Result, SummaryError};
use crate::summary::CertificateSummary;

use name::{extract_name_fields, NameFields};

/// Parse validated certificate bytes and produce the normalized summary.
///
/// Structural failures collapse into [`SummaryError::ParseFailure`]; the
/// underlying parser diagnostics are intentionally discarded. Once the
/// structure parses, missing subject and issuer fields normalize to empty
/// values — only an unsupported key algorithm can still fail the summary.
pub fn normalize(der_bytes: &[u8]) -> Result<CertificateSummary> {
    let cert = Certificate::from_der(der_bytes).map_err(|_| SummaryError::ParseFailure)?;
    let tbs = &cert.tbs_certificate;

    let subject = extract_name_fields(&tbs.subject);
    let issuer = extract_name_fields(&tbs.issuer);

    let subject_alt_names = extract_dns_names(tbs.extensions.as_deref().unwrap_or(&[]))?;

    let key_size = key::key_size_bits(&tbs.subject_public_key_info)?;

    let valid_from = render_timestamp(tbs.validity.not_before.to_system_time())?;
    let valid_to = render_timestamp(tbs.validity.not_after.to_system_time())?;

    let serial_number = BigUint::from_bytes_be(tbs.serial_number.as_bytes()).to_str_radix(10);

    Ok(CertificateSummary {
        common_name: subject.common_name(),
        subject_alt_names,
        organization: subject.organization,
        organizational_unit: subject.organizational_unit,
        locality: subject.locality,
        state: subject.state,
        country: subject.country,
        valid_from,
        valid_to,
        issuer: issuer_display(&issuer),
        key_size,
        serial_number,
    })
}

/// Build the issuer display string from its common name and organization.
///
/// The issuer organization is a possibly-empty sequence: self-signed and
/// minimal issuers often carry no organization at all, so the display
/// degrades to the common name alone instead of indexing into an empty
/// sequence. Both absent yields an empty string.
fn issuer_display(issuer: &NameFields) -> String {
    let common_name = issuer.common_name();
    match issuer.organization.first() {
        Some(org) if common_name.is_empty() => org.clone(),
        Some(org) => format!("{common_name}, {org}"),
        None => common_name,
    }
}

/// Collect the DNS subject alternative names, in certificate order.
///
/// An absent extension yields an empty list; a present extension that does
/// not decode as GeneralNames fails the summary as structurally invalid.
fn extract_dns_names(extensions: &[Extension]) -> Result<Vec<String>> {
    let mut dns_names = Vec::new();

    for ext in extensions {
        if ext.extn_id != const_oid::db::rfc5280::ID_CE_SUBJECT_ALT_NAME {
            continue;
        }
        let san = SubjectAltName::from_der(ext.extn_value.as_bytes())
            .map_err(|_| SummaryError::ParseFailure)?;
        for general_name in &san.0 {
            if let GeneralName::DnsName(dns) = general_name {
                dns_names.push(dns.to_string());
            }
        }
    }

    Ok(dns_names)
}

/// Render a validity bound as a fixed, locale-independent timestamp.
///
/// RFC 2822 formatting ("Tue, 15 Jan 2030 12:00:00 +0000") is deterministic
/// and carries date, time, and timezone designator.
fn render_timestamp(at: std::time::SystemTime) -> Result<String> {
    OffsetDateTime::from(at)
        .format(&Rfc2822)
        .map_err(|_| SummaryError::ParseFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuer_display_joins_cn_and_first_org() {
        let issuer = NameFields {
            common_names: vec!["Example CA".into()],
            organization: vec!["Example Corp".into(), "Ignored".into()],
            ..NameFields::default()
        };
        assert_eq!(issuer_display(&issuer), "Example CA, Example Corp");
    }

    #[test]
    fn issuer_display_degrades_without_org() {
        let issuer = NameFields {
            common_names: vec!["Example CA".into()],
            ..NameFields::default()
        };
        assert_eq!(issuer_display(&issuer), "Example CA");
    }

    #[test]
    fn issuer_display_degrades_without_cn() {
        let issuer = NameFields {
            organization: vec!["Example Corp".into()],
            ..NameFields::default()
        };
        assert_eq!(issuer_display(&issuer), "Example Corp");

        assert_eq!(issuer_display(&NameFields::default()), "");
    }

    #[test]
    fn serial_rendering_is_arbitrary_precision() {
        // 2^64 + 1, larger than any machine integer the renderer could use.
        let bytes = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
        let decimal = BigUint::from_bytes_be(&bytes).to_str_radix(10);
        assert_eq!(decimal, "18446744073709551617");
    }

    #[test]
    fn normalize_rejects_non_certificate_bytes() {
        assert_eq!(
            normalize(&[0x30, 0x03, 0x02, 0x01, 0x01]),
            Err(SummaryError::ParseFailure)
        );
        assert_eq!(normalize(&[]), Err(SummaryError::ParseFailure));
    }
}
