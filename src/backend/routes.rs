//! Backend paths, relative to `backend.base_url`.
//!
//! Collection paths end in `/`; item paths append the record id.

use crate::forms::FormKind;

pub const SKILLS: &str = "/api/skills/";
pub const AUTH_USER: &str = "/auth/user";
pub const USER_SKILLS: &str = "/api/user-skills/";
pub const PROJECTS: &str = "/api/projects/";
pub const USER_CERTS: &str = "/api/user-cert/";
pub const ASSETS: &str = "/api/assets/";
pub const PROFESSIONAL_EMINENCE: &str = "/api/professional-eminence/";

/// Team endpoint for a manager, asking for every record kind.
#[must_use]
pub fn reportees(manager_id: &str, include_eminence: bool) -> String {
    format!(
        "/api/team/manager/{manager_id}/reportees?include_skills=true&include_projects=true\
         &include_assets=true&include_certifications=true&include_eminence={include_eminence}"
    )
}

/// Detailed skill records for one user (these carry the record ids).
#[must_use]
pub fn user_skills(user_id: &str) -> String {
    format!("{USER_SKILLS}{user_id}")
}

/// Totals across a manager's team.
#[must_use]
pub fn team_summary(manager_id: &str) -> String {
    format!("/api/team/manager/{manager_id}/reportees/summary")
}

/// Every record of `kind` that `user_id` submitted.
#[must_use]
pub fn user_records(kind: FormKind, user_id: &str) -> String {
    let collection = match kind {
        FormKind::Skill => USER_SKILLS,
        FormKind::Project => PROJECTS,
        FormKind::Certification => USER_CERTS,
        FormKind::Asset => ASSETS,
        FormKind::Eminence => PROFESSIONAL_EMINENCE,
    };
    format!("{collection}{user_id}")
}
