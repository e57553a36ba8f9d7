use super::*;

#[test]
fn motions_are_named_by_group_and_position() {
    let raw = br#"{
        "Version": 3,
        "FileReferences": {
            "Moc": "Mao.moc3",
            "Motions": {
                "Idle": [
                    { "File": "motions/idle_01.motion3.json" },
                    { "File": "motions/idle_02.motion3.json" }
                ],
                "TapBody": [
                    { "File": "motions/tap_01.motion3.json", "Sound": "sounds/tap_01.wav" },
                    { "File": "motions/tap_02.motion3.json" },
                    { "File": "motions/tap_03.motion3.json" }
                ]
            }
        }
    }"#;

    let descriptor = Descriptor::parse(raw).expect("parse");
    let names: Vec<&str> = descriptor.motions.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        ["Idle_0", "Idle_1", "TapBody_0", "TapBody_1", "TapBody_2"]
    );
    assert_eq!(descriptor.motions[2].group, "TapBody");
    assert_eq!(descriptor.motions[2].file, "motions/tap_01.motion3.json");
    assert_eq!(
        descriptor.motions[2].sound.as_deref(),
        Some("sounds/tap_01.wav")
    );
    assert_eq!(descriptor.motions[3].sound, None);
    assert!(descriptor.expressions.is_empty());
}

#[test]
fn group_order_follows_descriptor_not_alphabet() {
    let raw = br#"{ "FileReferences": { "Motions": {
        "Zeta": [ { "File": "z.motion3.json" } ],
        "Alpha": [ { "File": "a.motion3.json" } ]
    } } }"#;

    let descriptor = Descriptor::parse(raw).expect("parse");
    assert_eq!(descriptor.motions[0].name, "Zeta_0");
    assert_eq!(descriptor.motions[1].name, "Alpha_0");
}

#[test]
fn expressions_are_copied_through() {
    let raw = br#"{ "FileReferences": { "Expressions": [
        { "Name": "exp_01", "File": "expressions/exp_01.exp3.json" },
        { "Name": "Smile", "File": "expressions/smile.exp3.json" }
    ] } }"#;

    let descriptor = Descriptor::parse(raw).expect("parse");
    assert!(descriptor.motions.is_empty());
    assert_eq!(
        descriptor.expressions,
        vec![
            Expression {
                name: "exp_01".into(),
                file: "expressions/exp_01.exp3.json".into(),
            },
            Expression {
                name: "Smile".into(),
                file: "expressions/smile.exp3.json".into(),
            },
        ]
    );
}

#[test]
fn missing_sections_yield_empty_lists() {
    let descriptor = Descriptor::parse(b"{}").expect("parse");
    assert_eq!(descriptor, Descriptor::default());

    let descriptor = Descriptor::parse(br#"{ "FileReferences": { "Moc": "x.moc3" } }"#)
        .expect("parse");
    assert_eq!(descriptor, Descriptor::default());
}

#[test]
fn non_list_motion_group_is_skipped() {
    let raw = br#"{ "FileReferences": { "Motions": {
        "Broken": { "File": "oops.motion3.json" },
        "Idle": [ { "File": "idle.motion3.json" } ]
    } } }"#;

    let descriptor = Descriptor::parse(raw).expect("parse");
    assert_eq!(descriptor.motions.len(), 1);
    assert_eq!(descriptor.motions[0].name, "Idle_0");
}

#[test]
fn motions_of_the_wrong_type_leave_expressions_intact() {
    let raw = br#"{ "FileReferences": {
        "Motions": [],
        "Expressions": [ { "Name": "e", "File": "f" } ]
    } }"#;

    let descriptor = Descriptor::parse(raw).expect("parse");
    assert!(descriptor.motions.is_empty());
    assert_eq!(
        descriptor.expressions,
        vec![Expression {
            name: "e".into(),
            file: "f".into(),
        }]
    );
}

#[test]
fn sections_of_the_wrong_type_read_as_absent() {
    for raw in [
        &br#"{ "FileReferences": "none" }"#[..],
        br#"{ "FileReferences": null }"#,
        br#"{ "FileReferences": { "Motions": "idle", "Expressions": {} } }"#,
    ] {
        let descriptor = Descriptor::parse(raw).expect("parse");
        assert_eq!(descriptor, Descriptor::default());
    }
}

#[test]
fn invalid_json_is_reported() {
    let err = Descriptor::parse(b"{ not json").expect_err("should fail");
    assert!(matches!(err, DescriptorError::Json(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let err = Descriptor::load(&dir.path().join("absent.model3.json")).expect_err("should fail");
    assert!(matches!(err, DescriptorError::Io(_)));
}
