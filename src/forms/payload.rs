//! Mapping from queued drafts to the JSON bodies the backend accepts.
//!
//! Mapping happens at submit time and is pure: the same payload, identity
//! and date always produce the same body.

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    AssetForm, CertificationEntry, PendingPayload, ProfessionalEminenceForm, ProjectForm,
    SkillForm, name_or_id,
};
use crate::backend::routes;

const PENDING: &str = "pending";

/// Who is submitting, resolved from the session and config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitterIdentity {
    pub user_id: String,
    pub manager_id: Option<String>,
}

impl SubmitterIdentity {
    pub fn new(user_id: impl Into<String>, manager_id: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            manager_id: manager_id.filter(|id| !id.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillSubmission {
    pub user_id: String,
    pub proficiency_level: &'static str,
    pub platform: String,
    pub segment: String,
    pub product_portfolio: String,
    pub speciality_area: String,
    pub product_line: &'static str,
    pub manager_id: Option<String>,
    pub status: &'static str,
    pub skill_type: &'static str,
    pub yoe: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSubmission {
    pub user_id: String,
    pub project_name: String,
    pub client_name: String,
    pub tech_used: String,
    pub your_role: String,
    pub project_desc: String,
    pub is_foak: bool,
    pub asset_used: &'static str,
    pub asset_name: String,
    pub manager_id: Option<String>,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificationSubmission {
    pub user_id: String,
    pub cert_name: String,
    pub cert_type: Option<&'static str>,
    pub issue_date: String,
    pub file_name: Option<String>,
    pub manager_id: Option<String>,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSubmission {
    pub user_id: String,
    pub asset_name: String,
    pub asset_desc: String,
    pub used_in_project: Option<&'static str>,
    pub ai_adoption: Option<&'static str>,
    pub your_contribution: String,
    pub manager_id: Option<String>,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EminenceSubmission {
    pub user_id: String,
    pub url: String,
    pub eminence_type: Option<&'static str>,
    pub description: String,
    pub scope: Option<&'static str>,
    pub manager_id: Option<String>,
    pub status: &'static str,
}

/// A backend-ready creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Submission {
    Skill(SkillSubmission),
    Project(ProjectSubmission),
    Certification(CertificationSubmission),
    Asset(AssetSubmission),
    Eminence(EminenceSubmission),
}

impl Submission {
    #[must_use]
    pub fn from_payload(
        payload: &PendingPayload,
        identity: &SubmitterIdentity,
        today: NaiveDate,
    ) -> Self {
        match payload {
            PendingPayload::Skill(form) => Self::Skill(map_skill(form, identity, today)),
            PendingPayload::Project(form) => Self::Project(map_project(form, identity)),
            PendingPayload::Certification(entry) => {
                Self::Certification(map_certification(entry, identity))
            }
            PendingPayload::Asset(form) => Self::Asset(map_asset(form, identity)),
            PendingPayload::ProfessionalEminence(form) => {
                Self::Eminence(map_eminence(form, identity))
            }
        }
    }

    /// Creation endpoint for this body.
    #[must_use]
    pub const fn route(&self) -> &'static str {
        match self {
            Self::Skill(_) => routes::USER_SKILLS,
            Self::Project(_) => routes::PROJECTS,
            Self::Certification(_) => routes::USER_CERTS,
            Self::Asset(_) => routes::ASSETS,
            Self::Eminence(_) => routes::PROFESSIONAL_EMINENCE,
        }
    }
}

fn map_skill(form: &SkillForm, identity: &SubmitterIdentity, today: NaiveDate) -> SkillSubmission {
    SkillSubmission {
        user_id: identity.user_id.clone(),
        proficiency_level: form.proficiency.as_str(),
        platform: name_or_id(form.platform_name.as_deref(), &form.platform_id).to_string(),
        segment: name_or_id(form.segment_name.as_deref(), &form.segment_id).to_string(),
        product_portfolio: name_or_id(form.portfolio_name.as_deref(), &form.portfolio_id)
            .to_string(),
        speciality_area: form.specialty_display().to_string(),
        product_line: "TBD",
        manager_id: identity.manager_id.clone(),
        status: PENDING,
        skill_type: match form.skill_type {
            Some(super::SkillType::Primary) => "primary",
            Some(super::SkillType::Secondary) | None => "secondary",
        },
        yoe: form.years.clone(),
        date: today.format("%Y-%m-%d").to_string(),
    }
}

fn map_project(form: &ProjectForm, identity: &SubmitterIdentity) -> ProjectSubmission {
    ProjectSubmission {
        user_id: identity.user_id.clone(),
        project_name: form.name.clone(),
        client_name: form.client.clone(),
        tech_used: form.technology.clone(),
        your_role: form.role.clone(),
        project_desc: form.description.clone(),
        is_foak: form.is_foak,
        asset_used: form.asset_used.map_or("", |v| v.as_str()),
        asset_name: form.asset_name.clone(),
        manager_id: identity.manager_id.clone(),
        status: PENDING,
    }
}

fn map_certification(
    entry: &CertificationEntry,
    identity: &SubmitterIdentity,
) -> CertificationSubmission {
    CertificationSubmission {
        user_id: identity.user_id.clone(),
        cert_name: entry.name.clone(),
        cert_type: entry.cert_type.map(|t| match t {
            super::CertType::Professional => "professional",
            super::CertType::Product => "product",
        }),
        issue_date: entry.issue_date.clone(),
        file_name: Some(entry.file_name.clone()).filter(|name| !name.is_empty()),
        manager_id: identity.manager_id.clone(),
        status: PENDING,
    }
}

fn map_asset(form: &AssetForm, identity: &SubmitterIdentity) -> AssetSubmission {
    AssetSubmission {
        user_id: identity.user_id.clone(),
        asset_name: form.name.clone(),
        asset_desc: form.description.clone(),
        used_in_project: form.used_in_project.map(|v| v.as_str()),
        ai_adoption: form.ai_adoption.map(|v| v.as_str()),
        your_contribution: form.your_contribution.clone(),
        manager_id: identity.manager_id.clone(),
        status: PENDING,
    }
}

fn map_eminence(form: &ProfessionalEminenceForm, identity: &SubmitterIdentity) -> EminenceSubmission {
    EminenceSubmission {
        user_id: identity.user_id.clone(),
        url: form.url.clone(),
        eminence_type: form.eminence_type.map(|t| t.as_str()),
        description: form.description.clone(),
        scope: form.scope.map(|s| s.as_str()),
        manager_id: identity.manager_id.clone(),
        status: PENDING,
    }
}
