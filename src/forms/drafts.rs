//! Draft files: TOML (or JSON) documents holding forms to queue.
//!
//! ```toml
//! [[skill]]
//! platform_id = "Cloud"
//! segment_id = "Data"
//! portfolio_id = "Analytics"
//! specialty_id = "Spark"
//! proficiency = "expert"
//! years = "5"
//!
//! [[project]]
//! name = "Atlas"
//! client = "Acme"
//! role = "Lead"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AssetForm, CertificationEntry, FormKind, PendingPayload, ProfessionalEminenceForm,
    ProjectForm, SkillForm,
};
use crate::error::{Result, SkpError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftsFile {
    pub skill: Vec<SkillForm>,
    pub project: Vec<ProjectForm>,
    pub certification: Vec<CertificationEntry>,
    pub asset: Vec<AssetForm>,
    pub eminence: Vec<ProfessionalEminenceForm>,
}

impl DraftsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SkpError::Io(std::io::Error::new(
                err.kind(),
                format!("read drafts {}: {err}", path.display()),
            ))
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Self::parse_toml(&raw)
        }
    }

    pub fn parse_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| SkpError::Config(format!("parse drafts: {err}")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skill.len()
            + self.project.len()
            + self.certification.len()
            + self.asset.len()
            + self.eminence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into queue payloads in file order, keeping only `only` kinds
    /// when it is non-empty.
    #[must_use]
    pub fn into_payloads(self, only: &[FormKind]) -> Vec<PendingPayload> {
        let wanted = |kind: FormKind| only.is_empty() || only.contains(&kind);
        let mut payloads = Vec::with_capacity(self.len());
        if wanted(FormKind::Skill) {
            payloads.extend(self.skill.into_iter().map(PendingPayload::Skill));
        }
        if wanted(FormKind::Project) {
            payloads.extend(self.project.into_iter().map(PendingPayload::Project));
        }
        if wanted(FormKind::Certification) {
            payloads.extend(self.certification.into_iter().map(PendingPayload::Certification));
        }
        if wanted(FormKind::Asset) {
            payloads.extend(self.asset.into_iter().map(PendingPayload::Asset));
        }
        if wanted(FormKind::Eminence) {
            payloads.extend(
                self.eminence
                    .into_iter()
                    .map(PendingPayload::ProfessionalEminence),
            );
        }
        payloads
    }
}
