use std::cell::RefCell;

use chrono::NaiveDate;
use serde_json::{Value, json};
use skills_profile::review::{
    Decision, DecisionRequest, DecisionSink, Reportee, SectionType, dispatch_decision,
    pending_items, resolve_decision,
};
use skills_profile::test_utils::fixtures::team_json;
use skills_profile::{Result, SkpError};

#[derive(Default)]
struct RecordingDecisions {
    fail: bool,
    sent: RefCell<Vec<DecisionRequest>>,
}

impl DecisionSink for RecordingDecisions {
    async fn apply_decision(&self, request: &DecisionRequest) -> Result<()> {
        self.sent.borrow_mut().push(request.clone());
        if self.fail {
            return Err(SkpError::Backend {
                status: 404,
                body: "missing".to_string(),
            });
        }
        Ok(())
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn reportee() -> Reportee {
    serde_json::from_value(team_json("R1")["reportees"][0].clone()).unwrap()
}

#[test]
fn test_pending_items_skip_decided_records() {
    let items = pending_items(&reportee(), Some("M1"), false, today());

    let sections: Vec<SectionType> = items.iter().map(|item| item.section).collect();
    assert_eq!(
        sections,
        [SectionType::Skill, SectionType::Project, SectionType::Certification]
    );
    assert!(items.iter().all(|item| item.user_id == "R1"));
    assert!(items.iter().all(|item| item.manager_id.as_deref() == Some("M1")));
}

#[test]
fn test_pending_item_fields() {
    let items = pending_items(&reportee(), None, false, today());

    let skill = &items[0];
    assert_eq!(skill.name, "Cloud - expert");
    assert_eq!(skill.key, "skill-0");
    assert_eq!(skill.submission_date, "2025-03-14");

    let project = &items[1];
    assert_eq!(project.key, "21");
    let data: Value = serde_json::from_str(&project.request_data).unwrap();
    assert_eq!(data, json!({"id": 21, "role": "Lead"}));

    let cert = &items[2];
    let data: Value = serde_json::from_str(&cert.request_data).unwrap();
    assert_eq!(data, json!({"id": 31, "cert_id": 31}));
}

#[test]
fn test_eminence_is_opt_in_and_missing_status_is_pending() {
    let mut reportee = reportee();
    reportee.professional_eminence = vec![
        json!({"id": 51, "eminence_type": "Thought Leadership", "description": "Blog"}),
        json!({"id": 52, "eminence_type": "Awards & Recognitions", "status": "approved"}),
    ];

    let without = pending_items(&reportee, None, false, today());
    assert!(without.iter().all(|item| item.section != SectionType::Eminence));

    let with = pending_items(&reportee, None, true, today());
    let eminence: Vec<_> = with
        .iter()
        .filter(|item| item.section == SectionType::Eminence)
        .collect();
    assert_eq!(eminence.len(), 1);
    assert_eq!(eminence[0].key, "51");
    assert_eq!(eminence[0].detail.as_deref(), Some("Blog"));
}

#[test]
fn test_resolve_decision_per_section() {
    let skill = resolve_decision(
        "Skill",
        Decision::Approved,
        r#"{"id": 7, "proficiency": "expert"}"#,
        None,
    )
    .unwrap();
    assert_eq!(skill.path, "/api/user-skills/7");
    assert_eq!(
        skill.body,
        json!({"status": "Approved", "proficiency_level": "expert"})
    );

    let project =
        resolve_decision("project", Decision::Rejected, r#"{"id": "21"}"#, Some("Atlas")).unwrap();
    assert_eq!(project.path, "/api/projects/21");
    assert_eq!(
        project.body,
        json!({"status": "Rejected", "project_name": "Atlas"})
    );

    let cert = resolve_decision("certification", Decision::Approved, r#"{"id": 31}"#, None).unwrap();
    assert_eq!(cert.path, "/api/user-cert/31");
    assert_eq!(cert.body, json!({"status": "Approved"}));

    let eminence = resolve_decision("eminence", Decision::Approved, r#"{"id": 5}"#, None).unwrap();
    assert_eq!(eminence.path, "/api/professional-eminence/5");
}

#[test]
fn test_resolve_decision_rejects_bad_input() {
    let err = resolve_decision("badge", Decision::Approved, "not json", None).unwrap_err();
    assert!(matches!(err, SkpError::UnknownSection(_)));

    for data in ["not json", "[1]", "{}", r#"{"id": ""}"#, r#"{"id": 0}"#, r#"{"id": null}"#] {
        let err = resolve_decision("asset", Decision::Approved, data, None).unwrap_err();
        assert!(
            matches!(err, SkpError::InvalidRequestData(_)),
            "{data} gave {err}"
        );
    }
}

#[test]
fn test_dispatch_sends_one_put_and_reports_success() {
    let sink = RecordingDecisions::default();
    let recorded = block_on(dispatch_decision(
        &sink,
        "asset",
        Decision::Approved,
        r#"{"id": 41}"#,
        Some("Kit"),
    ));

    assert!(recorded);
    let sent = sink.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/api/assets/41");
    assert_eq!(sent[0].body, json!({"status": "Approved", "asset_name": "Kit"}));
}

#[test]
fn test_dispatch_failures_return_false() {
    let sink = RecordingDecisions {
        fail: true,
        ..RecordingDecisions::default()
    };
    assert!(!block_on(dispatch_decision(
        &sink,
        "project",
        Decision::Rejected,
        r#"{"id": 21}"#,
        None,
    )));
    assert_eq!(sink.sent.borrow().len(), 1);

    let idle = RecordingDecisions::default();
    assert!(!block_on(dispatch_decision(
        &idle,
        "unknown",
        Decision::Approved,
        r#"{"id": 1}"#,
        None,
    )));
    assert!(!block_on(dispatch_decision(
        &idle,
        "skill",
        Decision::Approved,
        "{}",
        None,
    )));
    assert!(idle.sent.borrow().is_empty());
}
