//! Skill taxonomy: flat metadata records folded into the four-level
//! platform / segment / portfolio / specialty tree used by cascading selects.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// One flat row of the skill metadata endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub platform: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub segment: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub product_portfolio: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub speciality_area: String,
    #[serde(default)]
    pub skill_id: Option<i64>,
}

impl SkillRecord {
    pub fn new(
        platform: impl Into<String>,
        segment: impl Into<String>,
        product_portfolio: impl Into<String>,
        speciality_area: impl Into<String>,
        skill_id: i64,
    ) -> Self {
        Self {
            platform: platform.into(),
            segment: segment.into(),
            product_portfolio: product_portfolio.into(),
            speciality_area: speciality_area.into(),
            skill_id: Some(skill_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: String,
    pub name: String,
    pub skill_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub specialties: Vec<Specialty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub name: String,
    pub portfolios: Vec<Portfolio>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub segments: Vec<Segment>,
}

/// The derived tree. Node ids are the raw field values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    pub platforms: Vec<Platform>,
}

/// Build the taxonomy tree from flat records in a single pass.
///
/// Every level keeps first-seen order. Specialty leaves are appended once per
/// record, so repeated (platform, segment, portfolio, specialty) tuples yield
/// repeated leaves.
#[must_use]
pub fn normalize(records: &[SkillRecord]) -> SkillTaxonomy {
    // Index maps sit beside the output vectors so lookups stay O(1) while
    // the vectors keep insertion order.
    let mut platforms: Vec<Platform> = Vec::new();
    let mut platform_index: HashMap<&str, usize> = HashMap::new();
    let mut segment_index: HashMap<(usize, &str), usize> = HashMap::new();
    let mut portfolio_index: HashMap<(usize, usize, &str), usize> = HashMap::new();

    for record in records {
        let p = *platform_index
            .entry(record.platform.as_str())
            .or_insert_with(|| {
                platforms.push(Platform {
                    id: record.platform.clone(),
                    name: record.platform.clone(),
                    segments: Vec::new(),
                });
                platforms.len() - 1
            });
        let platform = &mut platforms[p];

        let s = *segment_index
            .entry((p, record.segment.as_str()))
            .or_insert_with(|| {
                platform.segments.push(Segment {
                    id: record.segment.clone(),
                    name: record.segment.clone(),
                    portfolios: Vec::new(),
                });
                platform.segments.len() - 1
            });
        let segment = &mut platform.segments[s];

        let f = *portfolio_index
            .entry((p, s, record.product_portfolio.as_str()))
            .or_insert_with(|| {
                segment.portfolios.push(Portfolio {
                    id: record.product_portfolio.clone(),
                    name: record.product_portfolio.clone(),
                    specialties: Vec::new(),
                });
                segment.portfolios.len() - 1
            });

        segment.portfolios[f].specialties.push(Specialty {
            id: record.speciality_area.clone(),
            name: record.speciality_area.clone(),
            skill_id: record.skill_id,
        });
    }

    SkillTaxonomy { platforms }
}

impl SkillTaxonomy {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    #[must_use]
    pub fn platform(&self, platform_id: &str) -> Option<&Platform> {
        if platform_id.is_empty() {
            return None;
        }
        self.platforms.iter().find(|p| p.id == platform_id)
    }

    /// Segments under a platform; empty when the id is empty or unknown.
    #[must_use]
    pub fn segments_for_platform(&self, platform_id: &str) -> &[Segment] {
        self.platform(platform_id)
            .map(|platform| platform.segments.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn portfolios_for_segment(&self, platform_id: &str, segment_id: &str) -> &[Portfolio] {
        if segment_id.is_empty() {
            return &[];
        }
        self.segments_for_platform(platform_id)
            .iter()
            .find(|s| s.id == segment_id)
            .map(|segment| segment.portfolios.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn specialties_for_portfolio(
        &self,
        platform_id: &str,
        segment_id: &str,
        portfolio_id: &str,
    ) -> &[Specialty] {
        if portfolio_id.is_empty() {
            return &[];
        }
        self.portfolios_for_segment(platform_id, segment_id)
            .iter()
            .find(|p| p.id == portfolio_id)
            .map(|portfolio| portfolio.specialties.as_slice())
            .unwrap_or_default()
    }

    /// Number of specialty leaves across the whole tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.platforms
            .iter()
            .flat_map(|p| &p.segments)
            .flat_map(|s| &s.portfolios)
            .map(|f| f.specialties.len())
            .sum()
    }
}

/// Anything that can hand out the flat metadata list.
pub trait SkillRecordSource {
    fn fetch_skill_records(&self) -> impl Future<Output = Result<Vec<SkillRecord>>>;
}

/// Result of a taxonomy fetch. Upstream failures degrade to an empty tree
/// with an inline message instead of an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaxonomyLoad {
    pub taxonomy: SkillTaxonomy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn load_taxonomy<S: SkillRecordSource>(source: &S) -> TaxonomyLoad {
    match source.fetch_skill_records().await {
        Ok(records) => {
            tracing::debug!(records = records.len(), "building skill taxonomy");
            TaxonomyLoad {
                taxonomy: normalize(&records),
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "skill metadata unavailable, using empty taxonomy");
            TaxonomyLoad {
                taxonomy: SkillTaxonomy::default(),
                error: Some(format!("Failed to load skill metadata: {err}")),
            }
        }
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
