use skills_profile::SkpError;
use skills_profile::forms::drafts::DraftsFile;
use skills_profile::forms::{FormKind, PendingPayload, Proficiency, YesNo};
use skills_profile::test_utils::fixtures::DRAFTS_TOML;
use tempfile::tempdir;

#[test]
fn test_toml_drafts_flatten_in_file_order() {
    let drafts = DraftsFile::parse_toml(DRAFTS_TOML).unwrap();
    assert_eq!(drafts.len(), 4);

    let kinds: Vec<FormKind> = drafts
        .into_payloads(&[])
        .iter()
        .map(PendingPayload::kind)
        .collect();
    assert_eq!(
        kinds,
        [FormKind::Skill, FormKind::Project, FormKind::Project, FormKind::Asset]
    );
}

#[test]
fn test_only_filters_kinds() {
    let drafts = DraftsFile::parse_toml(DRAFTS_TOML).unwrap();
    let payloads = drafts.into_payloads(&[FormKind::Project]);
    assert_eq!(payloads.len(), 2);
    assert!(payloads.iter().all(|p| p.kind() == FormKind::Project));
}

#[test]
fn test_skill_draft_fields_parse() {
    let drafts = DraftsFile::parse_toml(DRAFTS_TOML).unwrap();
    let skill = &drafts.skill[0];
    assert_eq!(skill.specialty_id, "Spark");
    assert_eq!(skill.proficiency, Proficiency::Expert);
    assert_eq!(skill.years, "5");
}

#[test]
fn test_load_reads_json_by_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drafts.json");
    std::fs::write(
        &path,
        r#"{"eminence": [{"url": "https://example.com/post", "eminence_type": "Thought Leadership"}]}"#,
    )
    .unwrap();

    let drafts = DraftsFile::load(&path).unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts.eminence[0].url, "https://example.com/post");
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = DraftsFile::load(&path).unwrap_err();
    assert!(matches!(err, SkpError::Io(_)));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_bad_toml_is_config_error() {
    let err = DraftsFile::parse_toml("[[skill]\nyears = ").unwrap_err();
    assert!(matches!(err, SkpError::Config(_)));
    assert!(err.to_string().contains("parse drafts"));
}

#[test]
fn test_toml_blank_yes_no_answers_are_unset() {
    let drafts = DraftsFile::parse_toml(
        r#"
[[project]]
name = "Atlas"
client = "Acme"
role = "Lead"
asset_used = ""

[[asset]]
name = "Kit"
description = "Starter kit"
used_in_project = ""
ai_adoption = "yes"
"#,
    )
    .unwrap();

    assert_eq!(drafts.project[0].asset_used, None);
    assert!(drafts.project[0].validate().is_ok());
    assert_eq!(drafts.asset[0].used_in_project, None);
    assert_eq!(drafts.asset[0].ai_adoption, Some(YesNo::Yes));
}

#[test]
fn test_json_blank_yes_no_answers_are_unset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drafts.json");
    std::fs::write(
        &path,
        r#"{
            "project": [{"name": "Atlas", "client": "Acme", "role": "Lead", "asset_used": "no"}],
            "asset": [{"name": "Kit", "description": "Starter kit", "used_in_project": "", "ai_adoption": ""}]
        }"#,
    )
    .unwrap();

    let drafts = DraftsFile::load(&path).unwrap();
    assert_eq!(drafts.project[0].asset_used, Some(YesNo::No));
    assert_eq!(drafts.asset[0].used_in_project, None);
    assert_eq!(drafts.asset[0].ai_adoption, None);
}

#[test]
fn test_unknown_yes_no_answer_is_rejected() {
    let err = DraftsFile::parse_toml("[[asset]]\nname = \"Kit\"\nai_adoption = \"perhaps\"\n")
        .unwrap_err();
    assert!(matches!(err, SkpError::Config(_)));
}

#[test]
fn test_blank_cert_type_is_unset_and_fails_validation() {
    let drafts = DraftsFile::parse_toml(
        "[[certification]]\nname = \"CKA\"\ncert_type = \"\"\nissue_date = \"2024-09-01\"\n\n\
         [[eminence]]\nurl = \"https://example.com/post\"\nscope = \"\"\n",
    )
    .unwrap();

    assert_eq!(drafts.certification[0].cert_type, None);
    let err = drafts.certification[0].validate().unwrap_err();
    assert!(err.to_string().contains("cert_type is required"));
    assert_eq!(drafts.eminence[0].scope, None);
    assert!(drafts.eminence[0].validate().is_ok());
}
