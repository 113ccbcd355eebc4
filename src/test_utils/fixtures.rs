use serde_json::{Value, json};

use crate::forms::{
    AssetForm, CertType, CertificationEntry, EminenceScope, EminenceType, PendingPayload,
    Proficiency, ProfessionalEminenceForm, ProjectForm, SkillForm, YesNo,
};
use crate::taxonomy::SkillRecord;

/// Flat metadata rows covering two platforms and a duplicate leaf.
#[must_use]
pub fn skill_records() -> Vec<SkillRecord> {
    vec![
        SkillRecord::new("Cloud", "Data", "Analytics", "Spark", 1),
        SkillRecord::new("Cloud", "Data", "Analytics", "Kafka", 2),
        SkillRecord::new("Cloud", "Infra", "Kubernetes", "Operators", 3),
        SkillRecord::new("AI", "Assistants", "Agents", "Orchestration", 4),
        SkillRecord::new("Cloud", "Data", "Analytics", "Spark", 5),
    ]
}

#[must_use]
pub fn skill_form(years: &str) -> SkillForm {
    SkillForm {
        platform_id: "Cloud".to_string(),
        segment_id: "Data".to_string(),
        portfolio_id: "Analytics".to_string(),
        specialty_id: "Spark".to_string(),
        skill_id: Some(1),
        proficiency: Proficiency::Intermediate,
        years: years.to_string(),
        ..SkillForm::default()
    }
}

#[must_use]
pub fn project_form(name: &str) -> ProjectForm {
    ProjectForm {
        name: name.to_string(),
        client: "Acme".to_string(),
        technology: "Rust".to_string(),
        role: "Lead".to_string(),
        description: "Platform migration".to_string(),
        asset_used: Some(YesNo::No),
        ..ProjectForm::default()
    }
}

#[must_use]
pub fn certification_entry(name: &str) -> CertificationEntry {
    CertificationEntry {
        cert_type: Some(CertType::Professional),
        name: name.to_string(),
        issue_date: "2024-09-01".to_string(),
        file_name: String::new(),
    }
}

#[must_use]
pub fn asset_form(name: &str) -> AssetForm {
    AssetForm {
        name: name.to_string(),
        description: "Reusable accelerator".to_string(),
        used_in_project: Some(YesNo::Yes),
        ai_adoption: None,
        your_contribution: "Author".to_string(),
    }
}

#[must_use]
pub fn eminence_form(url: &str) -> ProfessionalEminenceForm {
    ProfessionalEminenceForm {
        url: url.to_string(),
        eminence_type: Some(EminenceType::SpeakingEngagements),
        description: "Conference talk".to_string(),
        scope: Some(EminenceScope::External),
    }
}

/// One valid payload of every kind.
#[must_use]
pub fn one_of_each() -> Vec<PendingPayload> {
    vec![
        PendingPayload::Skill(skill_form("3")),
        PendingPayload::Project(project_form("Atlas")),
        PendingPayload::Certification(certification_entry("CKA")),
        PendingPayload::Asset(asset_form("Kit")),
        PendingPayload::ProfessionalEminence(eminence_form("https://example.com/talk")),
    ]
}

/// Drafts file with one skill, two projects and one asset.
pub const DRAFTS_TOML: &str = r#"
[[skill]]
platform_id = "Cloud"
segment_id = "Data"
portfolio_id = "Analytics"
specialty_id = "Spark"
proficiency = "expert"
years = "5"

[[project]]
name = "Atlas"
client = "Acme"
role = "Lead"

[[project]]
name = "Borealis"
client = "Globex"
role = "Architect"

[[asset]]
name = "Kit"
description = "Starter kit"
"#;

/// `/auth/user` body for a session.
#[must_use]
pub fn auth_user_json(user_id: &str, manager: Option<&str>) -> Value {
    json!({
        "user": {
            "user_id": user_id,
            "name": "Test User",
            "email": "test@example.com",
            "role": "Manager",
            "manager": manager,
        }
    })
}

/// Team endpoint body with one reportee holding a pending record of each kind.
#[must_use]
pub fn team_json(reportee_id: &str) -> Value {
    json!({
        "reportees": [{
            "user_id": reportee_id,
            "name": "Dana",
            "email": "dana@example.com",
            "user_type": "Consultant",
            "skills": [{"platform": "Cloud", "proficiency_level": "expert", "status": "pending"}],
            "projects": [{"id": 21, "project_name": "Atlas", "your_role": "Lead", "status": "pending"}],
            "assets": [{"id": 41, "asset_name": "Kit", "asset_desc": "Starter", "status": "approved"}],
            "certifications": [{"id": 31, "cert_name": "CKA", "status": "PENDING"}],
            "professional_eminence": [],
            "skills_count": 1,
            "projects_count": 1,
            "assets_count": 1,
            "certifications_count": 1,
            "eminence_count": 0
        }]
    })
}
