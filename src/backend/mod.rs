//! HTTP client for the skills-profile backend.
//!
//! Every request forwards the configured session cookie. Non-2xx answers
//! become [`SkpError::Backend`] (401 becomes [`SkpError::Unauthenticated`]),
//! unparseable bodies become [`SkpError::MalformedResponse`].

pub mod identity;
pub mod routes;

use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{BackendConfig, IdentityConfig};
use crate::error::{Result, SkpError};
use crate::forms::FormKind;
use crate::forms::payload::Submission;
use crate::forms::records::{SubmittedRecord, record_list};
use crate::queue::SubmissionSink;
use crate::review::{
    DecisionRequest, DecisionSink, Reportee, TeamOverview, TeamSummary, detailed_skill_record,
};
use crate::taxonomy::{SkillRecord, SkillRecordSource};

pub use identity::SessionIdentity;

pub struct BackendClient {
    base_url: String,
    session_cookie: Option<String>,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|err| SkpError::Config(format!("HTTP client error: {err}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone().filter(|c| !c.is_empty()),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(Method::GET, path, None::<&()>).await?;
        serde_json::from_str(&body)
            .map_err(|err| SkpError::MalformedResponse(format!("GET {path}: {err}")))
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::POST, path, Some(body)).await.map(drop)
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::PUT, path, Some(body)).await.map(drop)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String> {
        let url = format!("{}{path}", self.base_url);
        debug!(method = %method, url = %url, "backend request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(text);
        }
        debug!(method = %method, url = %url, status = status.as_u16(), "backend rejected request");
        if status == StatusCode::UNAUTHORIZED {
            return Err(SkpError::Unauthenticated(format!(
                "{method} {path} returned 401"
            )));
        }
        Err(SkpError::Backend {
            status: status.as_u16(),
            body: text,
        })
    }

    /// The signed-in user behind the session cookie.
    pub async fn fetch_identity(&self, overrides: &IdentityConfig) -> Result<SessionIdentity> {
        let body: Value = self.get_json(routes::AUTH_USER).await?;
        SessionIdentity::from_auth_response(&body, overrides)
    }

    /// Direct reports of `manager_id` as the team endpoint returns them.
    pub async fn fetch_team(
        &self,
        manager_id: &str,
        include_eminence: bool,
    ) -> Result<Vec<Reportee>> {
        #[derive(serde::Deserialize)]
        struct TeamResponse {
            #[serde(default)]
            reportees: Option<Vec<Reportee>>,
        }

        let team: TeamResponse = self
            .get_json(&routes::reportees(manager_id, include_eminence))
            .await?;
        Ok(team.reportees.unwrap_or_default())
    }

    /// Direct reports of `manager_id` with their records.
    ///
    /// Skills are replaced, one reportee at a time, by the detailed records
    /// that carry ids. When that lookup fails the team endpoint's skills
    /// are kept.
    pub async fn fetch_reportees(
        &self,
        manager_id: &str,
        include_eminence: bool,
    ) -> Result<Vec<Reportee>> {
        let mut reportees = self.fetch_team(manager_id, include_eminence).await?;

        for reportee in &mut reportees {
            match self
                .get_json::<Vec<Value>>(&routes::user_skills(&reportee.user_id))
                .await
            {
                Ok(detailed) => {
                    reportee.skills = detailed.iter().map(detailed_skill_record).collect();
                }
                Err(err) => {
                    warn!(user_id = %reportee.user_id, error = %err, "keeping team skill records");
                }
            }
        }
        Ok(reportees)
    }

    /// The backend's team totals, `None` when the body has no summary.
    pub async fn fetch_team_summary(&self, manager_id: &str) -> Result<Option<TeamSummary>> {
        #[derive(serde::Deserialize)]
        struct SummaryResponse {
            #[serde(default)]
            summary: Option<TeamSummary>,
        }

        let body: SummaryResponse = self.get_json(&routes::team_summary(manager_id)).await?;
        Ok(body.summary)
    }

    /// Summary and team list, fetched together. Either one may fail alone;
    /// the overview is built from whichever answered.
    pub async fn fetch_team_overview(
        &self,
        manager_id: &str,
        include_eminence: bool,
    ) -> Result<TeamOverview> {
        let (summary, team) = futures::join!(
            self.fetch_team_summary(manager_id),
            self.fetch_team(manager_id, include_eminence)
        );

        let summary = summary.unwrap_or_else(|err| {
            warn!(manager_id, error = %err, "team summary unavailable, summing reportee counts");
            None
        });
        let reportees = match team {
            Ok(reportees) => reportees,
            Err(err) if summary.is_some() => {
                warn!(manager_id, error = %err, "team list unavailable, using summary only");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        Ok(TeamOverview::build(manager_id, summary.as_ref(), &reportees))
    }

    /// Records of `kind` that `user_id` submitted, with their status.
    pub async fn fetch_user_records(
        &self,
        kind: FormKind,
        user_id: &str,
    ) -> Result<Vec<SubmittedRecord>> {
        let body: Value = self.get_json(&routes::user_records(kind, user_id)).await?;
        Ok(record_list(body)
            .iter()
            .map(|record| SubmittedRecord::from_value(kind, record))
            .collect())
    }
}

impl SkillRecordSource for BackendClient {
    async fn fetch_skill_records(&self) -> Result<Vec<SkillRecord>> {
        self.get_json(routes::SKILLS).await
    }
}

impl SubmissionSink for BackendClient {
    async fn submit(&self, submission: &Submission) -> Result<()> {
        self.post_json(submission.route(), submission).await
    }
}

impl DecisionSink for BackendClient {
    async fn apply_decision(&self, request: &DecisionRequest) -> Result<()> {
        self.put_json(&request.path, &request.body).await
    }
}
