//! Draft forms a consultant can queue for submission.
//!
//! One struct per kind, plus [`PendingPayload`], the tagged union the queue
//! stores. Admission checks live in `validate()`; mapping to backend bodies
//! lives in [`payload`].

pub mod drafts;
pub mod payload;
pub mod records;

use std::fmt;

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SkpError};

/// Discriminator for the five draft kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Skill,
    Project,
    Certification,
    Asset,
    Eminence,
}

impl FormKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Project => "project",
            Self::Certification => "certification",
            Self::Asset => "asset",
            Self::Eminence => "eminence",
        }
    }

    /// Card heading shown in listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skill => "Skill",
            Self::Project => "Project",
            Self::Certification => "Certification",
            Self::Asset => "Asset",
            Self::Eminence => "Professional Eminence",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Proficiency {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// Optional enum field where a blank string means unset.
fn blank_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(raw.trim().to_string().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertType {
    Professional,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EminenceType {
    #[serde(rename = "Thought Leadership")]
    ThoughtLeadership,
    #[serde(rename = "Speaking Engagements")]
    SpeakingEngagements,
    #[serde(rename = "Awards & Recognitions")]
    AwardsAndRecognitions,
    #[serde(rename = "Patents / Innovations")]
    PatentsAndInnovations,
    #[serde(rename = "Community Contributions")]
    CommunityContributions,
}

impl EminenceType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ThoughtLeadership => "Thought Leadership",
            Self::SpeakingEngagements => "Speaking Engagements",
            Self::AwardsAndRecognitions => "Awards & Recognitions",
            Self::PatentsAndInnovations => "Patents / Innovations",
            Self::CommunityContributions => "Community Contributions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EminenceScope {
    #[serde(rename = "IBM Internal")]
    Internal,
    External,
    Both,
}

impl EminenceScope {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "IBM Internal",
            Self::External => "External",
            Self::Both => "Both",
        }
    }
}

/// A skill picked from the taxonomy cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillForm {
    pub platform_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    pub segment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_name: Option<String>,
    pub portfolio_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_name: Option<String>,
    pub specialty_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<i64>,
    pub proficiency: Proficiency,
    pub years: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<SkillType>,
}

impl SkillForm {
    pub fn validate(&self) -> Result<()> {
        require(FormKind::Skill, "years", &self.years)
    }

    /// Display name of the chosen specialty, falling back to its id.
    #[must_use]
    pub fn specialty_display(&self) -> &str {
        name_or_id(self.specialty_name.as_deref(), &self.specialty_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub name: String,
    pub client: String,
    pub technology: String,
    pub role: String,
    pub description: String,
    pub is_foak: bool,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub asset_used: Option<YesNo>,
    pub asset_name: String,
    pub project_id: String,
    pub contribution: String,
    pub asset_description: String,
    pub asset_link: String,
    pub estimated_hours: String,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<()> {
        require(FormKind::Project, "name", &self.name)?;
        require(FormKind::Project, "client", &self.client)?;
        require(FormKind::Project, "role", &self.role)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub cert_type: Option<CertType>,
    pub name: String,
    pub issue_date: String,
    pub file_name: String,
}

impl CertificationEntry {
    pub fn validate(&self) -> Result<()> {
        require(FormKind::Certification, "name", &self.name)?;
        if self.cert_type.is_none() {
            return Err(SkpError::ValidationFailed {
                kind: FormKind::Certification,
                message: "cert_type is required".to_string(),
            });
        }
        require(FormKind::Certification, "issue_date", &self.issue_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetForm {
    pub name: String,
    pub description: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub used_in_project: Option<YesNo>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_adoption: Option<YesNo>,
    pub your_contribution: String,
}

impl AssetForm {
    pub fn validate(&self) -> Result<()> {
        require(FormKind::Asset, "name", &self.name)?;
        require(FormKind::Asset, "description", &self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalEminenceForm {
    pub url: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub eminence_type: Option<EminenceType>,
    pub description: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub scope: Option<EminenceScope>,
}

impl ProfessionalEminenceForm {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() && self.url.trim().is_empty() {
            return Err(SkpError::ValidationFailed {
                kind: FormKind::Eminence,
                message: "either description or url is required".to_string(),
            });
        }
        Ok(())
    }
}

/// The payload of a queued form. The variant is the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum PendingPayload {
    Skill(SkillForm),
    Project(ProjectForm),
    Certification(CertificationEntry),
    Asset(AssetForm),
    #[serde(rename = "eminence")]
    ProfessionalEminence(ProfessionalEminenceForm),
}

impl PendingPayload {
    #[must_use]
    pub const fn kind(&self) -> FormKind {
        match self {
            Self::Skill(_) => FormKind::Skill,
            Self::Project(_) => FormKind::Project,
            Self::Certification(_) => FormKind::Certification,
            Self::Asset(_) => FormKind::Asset,
            Self::ProfessionalEminence(_) => FormKind::Eminence,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Skill(form) => form.validate(),
            Self::Project(form) => form.validate(),
            Self::Certification(entry) => entry.validate(),
            Self::Asset(form) => form.validate(),
            Self::ProfessionalEminence(form) => form.validate(),
        }
    }

    /// One-line description for queue listings.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Skill(form) => format!(
                "{} ({}, {} yrs)",
                form.specialty_display(),
                form.proficiency.as_str(),
                form.years.trim()
            ),
            Self::Project(form) => format!("{} @ {} as {}", form.name, form.client, form.role),
            Self::Certification(entry) => {
                format!("{} issued {}", entry.name, entry.issue_date)
            }
            Self::Asset(form) => form.name.clone(),
            Self::ProfessionalEminence(form) => {
                let headline = if form.description.trim().is_empty() {
                    form.url.as_str()
                } else {
                    form.description.as_str()
                };
                match form.eminence_type {
                    Some(kind) => format!("{}: {headline}", kind.as_str()),
                    None => headline.to_string(),
                }
            }
        }
    }
}

fn require(kind: FormKind, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkpError::ValidationFailed {
            kind,
            message: format!("{field} is required"),
        });
    }
    Ok(())
}

pub(crate) fn name_or_id<'a>(name: Option<&'a str>, id: &'a str) -> &'a str {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => id,
    }
}
