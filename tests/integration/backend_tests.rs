use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use skills_profile::SkpError;
use skills_profile::config::IdentityConfig;
use skills_profile::forms::FormKind;
use skills_profile::forms::payload::SubmitterIdentity;
use skills_profile::queue::PendingQueue;
use skills_profile::review::{Decision, dispatch_decision};
use skills_profile::taxonomy::load_taxonomy;
use skills_profile::test_utils::fixtures::{auth_user_json, one_of_each, team_json};

use crate::fixture::{COOKIE, block_on, client};

#[test]
fn test_identity_sends_session_cookie() {
    let server = MockServer::start();
    let auth = server.mock(|when, then| {
        when.method(GET).path("/auth/user").header("cookie", COOKIE);
        then.status(200).json_body(auth_user_json("U7", Some("M3")));
    });

    let identity = block_on(client(&server).fetch_identity(&IdentityConfig::default())).unwrap();

    auth.assert();
    assert_eq!(identity.user_id, "U7");
    assert_eq!(identity.manager_id.as_deref(), Some("M3"));
    assert!(identity.is_manager());
}

#[test]
fn test_expired_session_is_unauthenticated() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/auth/user");
        then.status(401).body("expired");
    });

    let err = block_on(client(&server).fetch_identity(&IdentityConfig::default())).unwrap_err();
    assert!(matches!(err, SkpError::Unauthenticated(_)));
}

#[test]
fn test_taxonomy_from_backend_records() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/skills/");
        then.status(200).json_body(json!([
            {"platform": "Cloud", "segment": "Data", "product_portfolio": "Analytics", "speciality_area": "Spark", "skill_id": 1},
            {"platform": "Cloud", "segment": "Data", "product_portfolio": "Analytics", "speciality_area": "Kafka", "skill_id": 2}
        ]));
    });

    let load = block_on(load_taxonomy(&client(&server)));
    assert!(load.error.is_none());
    assert_eq!(load.taxonomy.leaf_count(), 2);
    assert_eq!(
        load.taxonomy.specialties_for_portfolio("Cloud", "Data", "Analytics")[1].skill_id,
        Some(2)
    );
}

#[test]
fn test_taxonomy_failure_degrades_to_empty_tree() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/skills/");
        then.status(503).body("maintenance");
    });

    let load = block_on(load_taxonomy(&client(&server)));
    assert!(load.taxonomy.is_empty());
    let error = load.error.unwrap();
    assert!(error.starts_with("Failed to load skill metadata"));
    assert!(error.contains("503"));
}

#[test]
fn test_malformed_taxonomy_body_degrades_to_empty_tree() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/skills/");
        then.status(200).body("<html>login</html>");
    });

    let load = block_on(load_taxonomy(&client(&server)));
    assert!(load.taxonomy.is_empty());
    assert!(load.error.unwrap().contains("Malformed backend response"));
}

#[test]
fn test_submit_selected_mixed_outcomes() {
    let server = MockServer::start();
    let projects = server.mock(|when, then| {
        when.method(POST).path("/api/projects/").header("cookie", COOKIE);
        then.status(500).body("database down");
    });
    let others: Vec<_> = [
        "/api/user-skills/",
        "/api/user-cert/",
        "/api/assets/",
        "/api/professional-eminence/",
    ]
    .into_iter()
    .map(|path| {
        server.mock(|when, then| {
            when.method(POST).path(path);
            then.status(201).json_body(json!({"ok": true}));
        })
    })
    .collect();

    let mut queue = PendingQueue::new();
    for payload in one_of_each() {
        queue.add(payload).unwrap();
    }
    let identity = SubmitterIdentity::new("U1", Some("M1".to_string()));
    let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

    let report = block_on(queue.submit_selected(&client(&server), &identity, today)).unwrap();

    projects.assert();
    for mock in &others {
        mock.assert();
    }
    assert_eq!(report.succeeded_count(), 4);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failed[0].kind, FormKind::Project);
    assert!(report.failed[0].error.contains("database down"));
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.entries()[0].kind(), FormKind::Project);
    assert!(queue.is_selected(&queue.entries()[0].id));
}

#[test]
fn test_skill_submission_body() {
    let server = MockServer::start();
    let skills = server.mock(|when, then| {
        when.method(POST).path("/api/user-skills/").json_body(json!({
            "user_id": "U1",
            "proficiency_level": "intermediate",
            "platform": "Cloud",
            "segment": "Data",
            "product_portfolio": "Analytics",
            "speciality_area": "Spark",
            "product_line": "TBD",
            "manager_id": null,
            "status": "pending",
            "skill_type": "secondary",
            "yoe": "3",
            "date": "2025-01-02"
        }));
        then.status(201);
    });

    let mut queue = PendingQueue::new();
    queue
        .add(skills_profile::forms::PendingPayload::Skill(
            skills_profile::test_utils::fixtures::skill_form("3"),
        ))
        .unwrap();
    let identity = SubmitterIdentity::new("U1", Some(String::new()));
    let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

    let report = block_on(queue.submit_selected(&client(&server), &identity, today)).unwrap();
    skills.assert();
    assert!(report.is_complete());
    assert!(queue.is_empty());
}

#[test]
fn test_decision_is_sent_as_put() {
    let server = MockServer::start();
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/user-skills/7")
            .json_body(json!({"status": "Rejected", "proficiency_level": "expert"}));
        then.status(200).json_body(json!({"id": 7}));
    });

    let recorded = block_on(dispatch_decision(
        &client(&server),
        "skill",
        Decision::Rejected,
        r#"{"id": 7, "proficiency": "expert"}"#,
        None,
    ));

    put.assert();
    assert!(recorded);
}

#[test]
fn test_failed_decision_is_not_recorded() {
    let server = MockServer::start();
    let put = server.mock(|when, then| {
        when.method(PUT).path("/api/assets/41");
        then.status(404).body("gone");
    });

    let recorded = block_on(dispatch_decision(
        &client(&server),
        "asset",
        Decision::Approved,
        r#"{"id": 41}"#,
        Some("Kit"),
    ));

    put.assert();
    assert!(!recorded);
}

#[test]
fn test_reportees_use_detailed_skill_records() {
    let server = MockServer::start();
    let team = server.mock(|when, then| {
        when.method(GET)
            .path("/api/team/manager/M1/reportees")
            .query_param("include_skills", "true")
            .query_param("include_eminence", "false");
        then.status(200).json_body(team_json("R1"));
    });
    let detailed = server.mock(|when, then| {
        when.method(GET).path("/api/user-skills/R1");
        then.status(200).json_body(json!([{
            "id": 11,
            "platform": "Cloud",
            "segment": "Data",
            "proficiency_level": "expert",
            "skill_type": "primary",
            "yoe": "6",
            "status": "pending",
            "date": "2025-02-01"
        }]));
    });

    let reportees = block_on(client(&server).fetch_reportees("M1", false)).unwrap();

    team.assert();
    detailed.assert();
    assert_eq!(reportees.len(), 1);
    let skill = &reportees[0].skills[0];
    assert_eq!(skill["id"], 11);
    assert_eq!(skill["submission_date"], "2025-02-01");
    assert!(skill.get("date").is_none());
}

#[test]
fn test_reportees_keep_team_skills_when_details_fail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/team/manager/M1/reportees");
        then.status(200).json_body(team_json("R1"));
    });
    let detailed = server.mock(|when, then| {
        when.method(GET).path("/api/user-skills/R1");
        then.status(500);
    });

    let reportees = block_on(client(&server).fetch_reportees("M1", false)).unwrap();

    detailed.assert();
    assert_eq!(reportees[0].skills.len(), 1);
    assert_eq!(reportees[0].skills[0]["platform"], "Cloud");
    assert!(reportees[0].skills[0].get("id").is_none());
}

#[test]
fn test_reportees_without_list_is_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/team/manager/M9/reportees");
        then.status(200).json_body(json!({}));
    });

    let reportees = block_on(client(&server).fetch_reportees("M9", true)).unwrap();
    assert!(reportees.is_empty());
}

fn mock_team(server: &MockServer, manager_id: &str) {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/team/manager/{manager_id}/reportees"))
            .query_param("include_eminence", "false");
        then.status(200).json_body(team_json("R1"));
    });
}

#[test]
fn test_team_overview_prefers_summary_totals() {
    let server = MockServer::start();
    mock_team(&server, "M1");
    let summary = server.mock(|when, then| {
        when.method(GET)
            .path("/api/team/manager/M1/reportees/summary")
            .header("cookie", COOKIE);
        then.status(200).json_body(json!({
            "manager": {"user_id": "M1"},
            "summary": {
                "total_reportees": 6,
                "reportees_in_system": 5,
                "total_skills": 40,
                "total_projects": 0,
                "total_assets": null,
                "total_certifications": 12,
                "total_eminence_records": 3,
                "reportee_ids": ["R1"]
            }
        }));
    });

    let overview = block_on(client(&server).fetch_team_overview("M1", false)).unwrap();

    summary.assert();
    assert!(overview.from_summary);
    assert_eq!(overview.team_size, 6);
    assert_eq!(overview.totals.skills, 40);
    assert_eq!(overview.totals.certifications, 12);
    // Zero or null figures fall back to the reportee counts.
    assert_eq!(overview.totals.projects, 1);
    assert_eq!(overview.totals.assets, 1);
    assert_eq!(overview.reportees[0].user_id, "R1");
}

#[test]
fn test_team_overview_sums_reportee_counts_without_summary() {
    let server = MockServer::start();
    mock_team(&server, "M1");
    server.mock(|when, then| {
        when.method(GET).path("/api/team/manager/M1/reportees/summary");
        then.status(404);
    });

    let overview = block_on(client(&server).fetch_team_overview("M1", false)).unwrap();

    assert!(!overview.from_summary);
    assert_eq!(overview.team_size, 1);
    assert_eq!(overview.totals.skills, 1);
    assert_eq!(overview.totals.certifications, 1);
    assert_eq!(overview.totals.eminence, 0);
    assert_eq!(overview.totals.total(), 4);
}

#[test]
fn test_team_overview_fails_when_nothing_answers() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/team/manager/M1/reportees");
        then.status(502).body("gateway down");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/team/manager/M1/reportees/summary");
        then.status(502);
    });

    let err = block_on(client(&server).fetch_team_overview("M1", false)).unwrap_err();
    assert!(matches!(err, SkpError::Backend { status: 502, .. }));
}

#[test]
fn test_user_records_carry_status() {
    let server = MockServer::start();
    let certs = server.mock(|when, then| {
        when.method(GET).path("/api/user-cert/U1").header("cookie", COOKIE);
        then.status(200).json_body(json!([
            {"id": 31, "cert_name": "CKA", "issue_date": "2024-09-01", "status": "Approved"},
            {"id": 32, "cert_name": "CKAD"}
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/assets/U1");
        then.status(200)
            .json_body(json!({"id": 41, "asset_name": "Kit", "asset_desc": "Starter", "status": "pending"}));
    });

    let client = client(&server);
    let cert_records = block_on(client.fetch_user_records(FormKind::Certification, "U1")).unwrap();
    let asset_records = block_on(client.fetch_user_records(FormKind::Asset, "U1")).unwrap();

    certs.assert();
    let statuses: Vec<&str> = cert_records.iter().map(|r| r.status.as_str()).collect();
    assert_eq!(statuses, ["Approved", "Pending"]);
    assert_eq!(cert_records[0].detail.as_deref(), Some("2024-09-01"));
    assert_eq!(asset_records.len(), 1);
    assert_eq!(asset_records[0].name, "Kit");
    assert!(asset_records[0].has_status("Pending"));
}

#[test]
fn test_user_records_unauthenticated() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/projects/U1");
        then.status(401);
    });

    let err = block_on(client(&server).fetch_user_records(FormKind::Project, "U1")).unwrap_err();
    assert!(matches!(err, SkpError::Unauthenticated(_)));
}
