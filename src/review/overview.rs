//! Team totals for a manager: the backend summary when it answers, reportee
//! counts otherwise.

use serde::{Deserialize, Serialize};

use super::{Reportee, null_as_default};

/// Record counts for one reportee or a whole team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub skills: u64,
    pub projects: u64,
    pub assets: u64,
    pub certifications: u64,
    pub eminence: u64,
}

impl RecordCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.skills + self.projects + self.assets + self.certifications + self.eminence
    }

    fn add(mut self, other: Self) -> Self {
        self.skills += other.skills;
        self.projects += other.projects;
        self.assets += other.assets;
        self.certifications += other.certifications;
        self.eminence += other.eminence;
        self
    }
}

impl Reportee {
    /// The team endpoint's `*_count` fields. A zero count falls back to the
    /// number of records returned inline.
    #[must_use]
    pub fn record_counts(&self) -> RecordCounts {
        let count = |reported: u64, records: usize| {
            if reported == 0 { records as u64 } else { reported }
        };
        RecordCounts {
            skills: count(self.skills_count, self.skills.len()),
            projects: count(self.projects_count, self.projects.len()),
            assets: count(self.assets_count, self.assets.len()),
            certifications: count(self.certifications_count, self.certifications.len()),
            eminence: count(self.eminence_count, self.professional_eminence.len()),
        }
    }
}

/// The `summary` block of `/api/team/manager/{id}/reportees/summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeamSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_reportees: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_skills: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_projects: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_assets: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_certifications: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_eminence_records: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReporteeOverview {
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    pub counts: RecordCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamOverview {
    pub manager_id: String,
    pub team_size: u64,
    pub totals: RecordCounts,
    /// Whether any total came from the backend summary.
    pub from_summary: bool,
    pub reportees: Vec<ReporteeOverview>,
}

impl TeamOverview {
    /// Combine the summary with the reportee list. Each summary figure that
    /// is missing or zero is replaced by the sum over `reportees`.
    #[must_use]
    pub fn build(manager_id: &str, summary: Option<&TeamSummary>, reportees: &[Reportee]) -> Self {
        let rows: Vec<ReporteeOverview> = reportees
            .iter()
            .map(|reportee| ReporteeOverview {
                user_id: reportee.user_id.clone(),
                name: reportee.name.clone(),
                designation: reportee.designation.clone(),
                counts: reportee.record_counts(),
            })
            .collect();
        let summed = rows
            .iter()
            .fold(RecordCounts::default(), |acc, row| acc.add(row.counts));

        let fallback = TeamSummary::default();
        let totals = summary.unwrap_or(&fallback);
        let pick = |reported: u64, summed: u64| if reported == 0 { summed } else { reported };

        Self {
            manager_id: manager_id.to_string(),
            team_size: pick(totals.total_reportees, rows.len() as u64),
            totals: RecordCounts {
                skills: pick(totals.total_skills, summed.skills),
                projects: pick(totals.total_projects, summed.projects),
                assets: pick(totals.total_assets, summed.assets),
                certifications: pick(totals.total_certifications, summed.certifications),
                eminence: pick(totals.total_eminence_records, summed.eminence),
            },
            from_summary: summary.is_some(),
            reportees: rows,
        }
    }
}
