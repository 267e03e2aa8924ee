//! Page templates
//!
//! All templates are read from disk once at process start and kept as
//! immutable shared state for the lifetime of the server. Rendering is a
//! plain placeholder substitution; every certificate-derived value is
//! HTML-escaped before it reaches the page.

use std::path::Path;

use anyhow::{Context, Result};
use certsight_summary::CertificateSummary;

/// The immutable template set, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Templates {
    index: String,
    summary: String,
}

impl Templates {
    /// Load every template from the given directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let index = std::fs::read_to_string(dir.join("index.html"))
            .with_context(|| format!("failed to read {}", dir.join("index.html").display()))?;
        let summary = std::fs::read_to_string(dir.join("summary.html"))
            .with_context(|| format!("failed to read {}", dir.join("summary.html").display()))?;
        Ok(Self { index, summary })
    }

    /// Render the bare submission form.
    pub fn render_index(&self) -> String {
        self.index.replace("{{result}}", "")
    }

    /// Render the submission form with a decoded summary below it.
    pub fn render_summary(&self, summary: &CertificateSummary) -> String {
        let result = self
            .summary
            .replace("{{common_name}}", &escape_html(&summary.common_name))
            .replace(
                "{{subject_alt_names}}",
                &render_list(&summary.subject_alt_names),
            )
            .replace("{{organization}}", &render_list(&summary.organization))
            .replace(
                "{{organizational_unit}}",
                &render_list(&summary.organizational_unit),
            )
            .replace("{{locality}}", &render_list(&summary.locality))
            .replace("{{state}}", &render_list(&summary.state))
            .replace("{{country}}", &render_list(&summary.country))
            .replace("{{valid_from}}", &escape_html(&summary.valid_from))
            .replace("{{valid_to}}", &escape_html(&summary.valid_to))
            .replace("{{issuer}}", &escape_html(&summary.issuer))
            .replace("{{key_size}}", &summary.key_size.to_string())
            .replace("{{serial_number}}", &escape_html(&summary.serial_number));

        self.index.replace("{{result}}", &result)
    }
}

/// Render a multi-valued field as a list, preserving value order.
fn render_list(values: &[String]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let items: String = values
        .iter()
        .map(|value| format!("<li>{}</li>", escape_html(value)))
        .collect();
    format!("<ul>{items}</ul>")
}

/// Escape the five HTML-significant characters.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
