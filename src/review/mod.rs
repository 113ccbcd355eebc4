//! Manager review: flatten reportee records into pending items and send
//! approve/reject decisions back to the backend.

pub mod overview;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

use crate::backend::routes;
use crate::error::{Result, SkpError};

pub use overview::{RecordCounts, ReporteeOverview, TeamOverview, TeamSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Skill,
    Project,
    Asset,
    Certification,
    Eminence,
}

impl SectionType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Project => "project",
            Self::Asset => "asset",
            Self::Certification => "certification",
            Self::Eminence => "eminence",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skill => "Skill",
            Self::Project => "Project",
            Self::Asset => "Asset",
            Self::Certification => "Certification",
            Self::Eminence => "Eminence",
        }
    }
}

impl FromStr for SectionType {
    type Err = SkpError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "skill" => Ok(Self::Skill),
            "project" => Ok(Self::Project),
            "asset" => Ok(Self::Asset),
            "certification" => Ok(Self::Certification),
            "eminence" => Ok(Self::Eminence),
            _ => Err(SkpError::UnknownSection(raw.to_string())),
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A manager's verdict. Sent to the backend as `"Approved"` / `"Rejected"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direct report with the records the team endpoint returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reportee {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "user_type")]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub professional_eminence: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eminence_count: u64,
}

/// Keep the fields of a detailed skill record that review needs, renaming
/// `date` to `submission_date`.
#[must_use]
pub fn detailed_skill_record(record: &Value) -> Value {
    json!({
        "id": field(record, "id"),
        "platform": field(record, "platform"),
        "segment": field(record, "segment"),
        "proficiency_level": field(record, "proficiency_level"),
        "skill_type": field(record, "skill_type"),
        "yoe": field(record, "yoe"),
        "status": field(record, "status"),
        "submission_date": field(record, "date"),
    })
}

/// One record awaiting a decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingItem {
    pub key: String,
    pub section: SectionType,
    pub name: String,
    pub user_id: String,
    pub user_name: String,
    pub manager_id: Option<String>,
    pub submission_date: String,
    /// JSON object carrying at least the record id.
    pub request_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

struct Flattener<'a> {
    reportee: &'a Reportee,
    manager_id: Option<&'a str>,
    today: String,
    items: Vec<PendingItem>,
}

impl Flattener<'_> {
    fn push(
        &mut self,
        section: SectionType,
        index: usize,
        record: &Value,
        name: String,
        request_data: &Value,
        detail: Option<String>,
    ) {
        let key = match text(record, "id") {
            id if id.is_empty() => format!("{section}-{index}"),
            id => id,
        };
        let submission_date = match text(record, "submission_date") {
            date if date.is_empty() => self.today.clone(),
            date => date,
        };
        self.items.push(PendingItem {
            key,
            section,
            name,
            user_id: self.reportee.user_id.clone(),
            user_name: self.reportee.name.clone(),
            manager_id: self.manager_id.map(str::to_string),
            submission_date,
            request_data: request_data.to_string(),
            detail,
        });
    }
}

/// Flatten a reportee's records whose status is pending.
///
/// Certification status compares case-insensitively. Eminence entries are
/// only considered when `include_eminence` is set, and a missing status
/// counts as pending for them.
#[must_use]
pub fn pending_items(
    reportee: &Reportee,
    manager_id: Option<&str>,
    include_eminence: bool,
    today: NaiveDate,
) -> Vec<PendingItem> {
    let mut out = Flattener {
        reportee,
        manager_id,
        today: today.format("%Y-%m-%d").to_string(),
        items: Vec::new(),
    };

    for (index, skill) in reportee.skills.iter().enumerate() {
        if text(skill, "status") == "pending" {
            let proficiency = text(skill, "proficiency_level");
            out.push(
                SectionType::Skill,
                index,
                skill,
                format!("{} - {proficiency}", text(skill, "platform")),
                &json!({ "id": field(skill, "id"), "proficiency": field(skill, "proficiency_level") }),
                Some(proficiency),
            );
        }
    }

    for (index, project) in reportee.projects.iter().enumerate() {
        if text(project, "status") == "pending" {
            out.push(
                SectionType::Project,
                index,
                project,
                text(project, "project_name"),
                &json!({ "id": field(project, "id"), "role": field(project, "your_role") }),
                non_empty(text(project, "client_name")),
            );
        }
    }

    for (index, cert) in reportee.certifications.iter().enumerate() {
        if text(cert, "status").eq_ignore_ascii_case("pending") {
            let cert_id = match field(cert, "cert_id") {
                Value::Null => field(cert, "id"),
                id => id,
            };
            out.push(
                SectionType::Certification,
                index,
                cert,
                text(cert, "cert_name"),
                &json!({ "id": field(cert, "id"), "cert_id": cert_id }),
                None,
            );
        }
    }

    for (index, asset) in reportee.assets.iter().enumerate() {
        if text(asset, "status") == "pending" {
            let desc = text(asset, "asset_desc");
            out.push(
                SectionType::Asset,
                index,
                asset,
                text(asset, "asset_name"),
                &json!({ "id": field(asset, "id"), "asset_desc": field(asset, "asset_desc") }),
                non_empty(desc),
            );
        }
    }

    if include_eminence {
        for (index, eminence) in reportee.professional_eminence.iter().enumerate() {
            let status = text(eminence, "status");
            if status.is_empty() || status == "pending" {
                let description = text(eminence, "description");
                out.push(
                    SectionType::Eminence,
                    index,
                    eminence,
                    text(eminence, "eminence_type"),
                    &json!({ "id": field(eminence, "id"), "description": field(eminence, "description") }),
                    non_empty(description),
                );
            }
        }
    }

    out.items
}

/// A resolved decision: the PUT path and its JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRequest {
    pub section: SectionType,
    pub path: String,
    pub body: Value,
}

/// Work out where and what to PUT for a decision.
///
/// The section is checked first so unknown sections never reach the
/// network. `request_data` must be a JSON object with a non-empty `id`.
pub fn resolve_decision(
    section_type: &str,
    decision: Decision,
    request_data: &str,
    item_name: Option<&str>,
) -> Result<DecisionRequest> {
    let section: SectionType = section_type.parse()?;

    let data: Value = serde_json::from_str(request_data)
        .map_err(|err| SkpError::InvalidRequestData(format!("not valid JSON: {err}")))?;
    let Value::Object(data) = data else {
        return Err(SkpError::InvalidRequestData(
            "expected a JSON object".to_string(),
        ));
    };
    let id = record_id(&data)
        .ok_or_else(|| SkpError::InvalidRequestData("no id found in request data".to_string()))?;

    let mut body = Map::new();
    body.insert("status".to_string(), json!(decision.as_str()));
    let base = match section {
        SectionType::Skill => {
            if let Some(proficiency) = data.get("proficiency").filter(|v| !v.is_null()) {
                body.insert("proficiency_level".to_string(), proficiency.clone());
            }
            routes::USER_SKILLS
        }
        SectionType::Project => {
            if let Some(name) = item_name {
                body.insert("project_name".to_string(), json!(name));
            }
            routes::PROJECTS
        }
        SectionType::Asset => {
            if let Some(name) = item_name {
                body.insert("asset_name".to_string(), json!(name));
            }
            routes::ASSETS
        }
        SectionType::Certification => routes::USER_CERTS,
        SectionType::Eminence => routes::PROFESSIONAL_EMINENCE,
    };

    Ok(DecisionRequest {
        section,
        path: format!("{base}{id}"),
        body: Value::Object(body),
    })
}

/// Destination for decision PUTs.
pub trait DecisionSink {
    fn apply_decision(&self, request: &DecisionRequest) -> impl Future<Output = Result<()>>;
}

/// Resolve and send one decision. Every failure is logged and reported as
/// `false`; callers refresh their view on `true`.
pub async fn dispatch_decision<S: DecisionSink>(
    sink: &S,
    section_type: &str,
    decision: Decision,
    request_data: &str,
    item_name: Option<&str>,
) -> bool {
    let request = match resolve_decision(section_type, decision, request_data, item_name) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(section_type, error = %err, "decision not sent");
            return false;
        }
    };

    match sink.apply_decision(&request).await {
        Ok(()) => {
            tracing::info!(path = %request.path, decision = %decision, "decision recorded");
            true
        }
        Err(err) => {
            tracing::warn!(path = %request.path, error = %err, "decision failed");
            false
        }
    }
}

fn record_id(data: &Map<String, Value>) -> Option<String> {
    match data.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        _ => None,
    }
}

fn field(record: &Value, key: &str) -> Value {
    record.get(key).cloned().unwrap_or(Value::Null)
}

pub(crate) fn text(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
