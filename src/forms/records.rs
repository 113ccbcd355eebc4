//! Records a consultant already submitted, with their review status.

use serde::Serialize;
use serde_json::Value;

use super::FormKind;
use crate::review::text;

/// One submitted record as listed back to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedRecord {
    pub kind: FormKind,
    pub id: String,
    pub name: String,
    /// Backend status, or the kind's default when the record carries none.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SubmittedRecord {
    #[must_use]
    pub fn from_value(kind: FormKind, record: &Value) -> Self {
        let (name, detail) = match kind {
            FormKind::Skill => (
                first_text(
                    record,
                    &["speciality_area", "speciality", "specialty", "product_portfolio"],
                ),
                joined(record, &["platform", "segment"]),
            ),
            FormKind::Project => (
                first_text(record, &["project_name", "name"]),
                non_blank(first_text(record, &["client_name", "client"])),
            ),
            FormKind::Certification => (
                first_text(record, &["cert_name", "name"]),
                non_blank(text(record, "issue_date")),
            ),
            FormKind::Asset => (
                first_text(record, &["asset_name", "name"]),
                non_blank(first_text(record, &["asset_desc", "description"])),
            ),
            FormKind::Eminence => (
                text(record, "eminence_type"),
                non_blank(first_text(record, &["url", "description"])),
            ),
        };
        let status = match first_text(record, &["status", "state"]) {
            status if status.is_empty() => default_status(kind).to_string(),
            status => status,
        };

        Self {
            kind,
            id: text(record, "id"),
            name,
            status,
            detail,
        }
    }

    /// Case-insensitive status match.
    #[must_use]
    pub fn has_status(&self, status: &str) -> bool {
        self.status.eq_ignore_ascii_case(status.trim())
    }
}

/// Listing endpoints answer with an array, a single object or null.
#[must_use]
pub fn record_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        record => vec![record],
    }
}

const fn default_status(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Asset => "Draft",
        FormKind::Certification | FormKind::Eminence => "Pending",
        FormKind::Skill | FormKind::Project => "",
    }
}

fn first_text(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(record, key))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn joined(record: &Value, keys: &[&str]) -> Option<String> {
    let parts: Vec<String> = keys
        .iter()
        .map(|key| text(record, key))
        .filter(|value| !value.is_empty())
        .collect();
    non_blank(parts.join(" / "))
}

fn non_blank(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}
