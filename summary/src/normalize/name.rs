//! Distinguished-name attribute extraction
//!
//! Walks the RDN sequence of a subject or issuer name and collects the
//! attribute values the summary cares about, using proper ASN.1 string type
//! handling. Every field is a possibly-empty sequence: certificates may
//! carry an attribute zero, one, or many times, and derived display strings
//! must degrade gracefully when a field is absent.

use der::asn1::{Ia5StringRef, PrintableStringRef, Utf8StringRef};
use x509_cert::name::Name;

// DN component OIDs, RFC 4519.
const OID_CN: &str = "2.5.4.3"; // commonName
const OID_O: &str = "2.5.4.10"; // organizationName
const OID_OU: &str = "2.5.4.11"; // organizationalUnitName
const OID_C: &str = "2.5.4.6"; // countryName
const OID_ST: &str = "2.5.4.8"; // stateOrProvinceName
const OID_L: &str = "2.5.4.7"; // localityName

/// Ordered, possibly-empty view of one distinguished name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameFields {
    /// Common name values (CN), in certificate order.
    pub common_names: Vec<String>,
    /// Organization values (O).
    pub organization: Vec<String>,
    /// Organizational unit values (OU).
    pub organizational_unit: Vec<String>,
    /// Locality values (L).
    pub locality: Vec<String>,
    /// State or province values (ST).
    pub state: Vec<String>,
    /// Country values (C).
    pub country: Vec<String>,
}

impl NameFields {
    /// First common name, or the empty string when the name carries none.
    pub fn common_name(&self) -> String {
        self.common_names.first().cloned().unwrap_or_default()
    }
}

/// Extract the summary-relevant attributes from an X.501 name.
///
/// Attributes with string types other than PrintableString, UTF8String, or
/// IA5String are skipped rather than rejected: an exotic attribute encoding
/// must not fail the whole summary.
pub fn extract_name_fields(name: &Name) -> NameFields {
    let mut fields = NameFields::default();

    // Iterate RDNs in encounter order; each RDN holds one or more
    // AttributeTypeAndValue entries.
    for rdn in &name.0 {
        for atv in rdn.0.iter() {
            let oid = atv.oid.to_string();

            let value = if let Ok(ps) = PrintableStringRef::try_from(&atv.value) {
                Some(ps.to_string())
            } else if let Ok(utf8s) = Utf8StringRef::try_from(&atv.value) {
                Some(utf8s.to_string())
            } else if let Ok(ia5s) = Ia5StringRef::try_from(&atv.value) {
                Some(ia5s.to_string())
            } else {
                None
            };

            let Some(value) = value else { continue };

            match oid.as_str() {
                OID_CN => fields.common_names.push(value),
                OID_O => fields.organization.push(value),
                OID_OU => fields.organizational_unit.push(value),
                OID_L => fields.locality.push(value),
                OID_ST => fields.state.push(value),
                OID_C => fields.country.push(value),
                _ => {}
            }
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_name_defaults_to_empty() {
        let fields = NameFields::default();
        assert_eq!(fields.common_name(), "");
    }

    #[test]
    fn common_name_takes_first_value() {
        let fields = NameFields {
            common_names: vec!["first".into(), "second".into()],
            ..NameFields::default()
        };
        assert_eq!(fields.common_name(), "first");
    }
}
