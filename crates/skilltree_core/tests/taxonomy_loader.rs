use skilltree_core::{
    load_specializations, load_specializations_or_empty, parse_taxonomy, TaxonomyError,
    TaxonomySource, TaxonomyValidationError, Tier,
};
use std::io::Write;

const TWO_DOMAINS: &str = r#"[
    {
        "id": "tech",
        "name": "Technology",
        "children": [
            {
                "id": "data-science",
                "name": "Data   Science",
                "description": "  Numbers\nand models ",
                "children": [
                    { "id": "a1", "name": "Programming", "children": [
                        { "id": "s1", "name": "Python", "children": [
                            { "id": "k1", "name": "Syntax" }
                        ] }
                    ] }
                ]
            },
            { "id": "web", "name": "Web Development", "children": null }
        ]
    },
    { "id": "biz", "name": "Business", "children": [ { "id": "pm", "name": "Product" } ] }
]"#;

#[test]
fn inline_source_flattens_with_domain_names() {
    let items = load_specializations(&TaxonomySource::Inline(TWO_DOMAINS.to_string()))
        .expect("valid taxonomy");

    let summary: Vec<_> = items
        .iter()
        .map(|item| (item.domain_name.as_str(), item.id(), item.name()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Technology", "data-science", "Data Science"),
            ("Technology", "web", "Web Development"),
            ("Business", "pm", "Product"),
        ]
    );
    assert_eq!(items[0].description(), Some("Numbers and models"));
    assert_eq!(items[0].entry.children[0].children[0].children[0].id, "k1");
}

#[test]
fn file_source_reads_json_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(TWO_DOMAINS.as_bytes()).expect("write taxonomy");

    let items = load_specializations(&TaxonomySource::File(file.path().to_path_buf()))
        .expect("file taxonomy");
    assert_eq!(items.len(), 3);
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = load_specializations(&TaxonomySource::File(path.clone()))
        .expect_err("missing file must fail");
    assert!(matches!(err, TaxonomyError::Io { path: ref failed, .. } if *failed == path));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_json_reports_parse_error() {
    let err = parse_taxonomy(r#"{"id": "not-an-array"}"#).expect_err("object root must fail");
    assert!(matches!(err, TaxonomyError::Parse(_)));
}

#[test]
fn missing_name_is_a_parse_error() {
    let err = parse_taxonomy(r#"[{"id":"tech","children":[]}]"#).expect_err("name required");
    assert!(matches!(err, TaxonomyError::Parse(_)));
}

#[test]
fn duplicate_specialization_ids_across_domains_are_rejected() {
    let err = parse_taxonomy(
        r#"[
            {"id":"d1","name":"One","children":[{"id":"same","name":"A"}]},
            {"id":"d2","name":"Two","children":[{"id":"same","name":"B"}]}
        ]"#,
    )
    .expect_err("duplicate specialization id must fail");
    assert!(matches!(
        err,
        TaxonomyError::Invalid(TaxonomyValidationError::DuplicateId { ref id }) if id == "same"
    ));
}

#[test]
fn blank_ability_id_names_its_parent() {
    let err = parse_taxonomy(
        r#"[{"id":"d","name":"D","children":[{"id":"s","name":"S","children":[{"id":" ","name":"A"}]}]}]"#,
    )
    .expect_err("blank id must fail");
    match err {
        TaxonomyError::Invalid(TaxonomyValidationError::EmptyId { tier, parent_id }) => {
            assert_eq!(tier, Tier::Ability);
            assert_eq!(parent_id.as_deref(), Some("s"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fail_soft_loading_returns_empty_list() {
    let items = load_specializations_or_empty(&TaxonomySource::Inline("not json".to_string()));
    assert!(items.is_empty());

    let dir = tempfile::tempdir().expect("temp dir");
    let items =
        load_specializations_or_empty(&TaxonomySource::File(dir.path().join("missing.json")));
    assert!(items.is_empty());
}

#[test]
fn builtin_taxonomy_has_unique_specializations() {
    let items = load_specializations(&TaxonomySource::Builtin).expect("builtin taxonomy");
    let mut ids: Vec<_> = items.iter().map(|item| item.id().to_string()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert!(items.iter().any(|item| item.name() == "Data Science"));
}
