use polyform::{yaml, AnchorMode, SyntaxError, YamlConfig, YamlElement};

const PIPELINE: &str = r#"
name: deploy
on: push

defaults: &defaults
  retries: 3
  timeout: 30

jobs:
  - name: build
    settings: *defaults
    steps:
      - checkout
      - compile
  - name: test
    settings: *defaults
    steps: [unit, integration]

script: |
  set -e
  cargo build
"#;

#[test]
fn test_parse_realistic_pipeline() {
    let doc = yaml::from_str(PIPELINE).unwrap();
    let map = doc.as_mapping().unwrap();

    assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("deploy"));

    let jobs = map.get("jobs").and_then(|v| v.as_sequence()).unwrap();
    assert_eq!(jobs.len(), 2);

    // Aliases resolve to independent copies of the anchored mapping
    let settings = jobs[1]
        .as_mapping()
        .and_then(|m| m.get("settings"))
        .and_then(|v| v.as_mapping())
        .unwrap();
    assert_eq!(settings.get("retries").and_then(|v| v.as_i64()), Some(3));

    assert_eq!(
        jobs[1]
            .as_mapping()
            .and_then(|m| m.get("steps"))
            .and_then(|v| v.as_sequence())
            .map(Vec::len),
        Some(2)
    );

    assert_eq!(
        map.get("script").and_then(|v| v.as_str()),
        Some("set -e\ncargo build\n")
    );
}

#[test]
fn test_round_trip_preserves_tree() {
    let doc = yaml::from_str(PIPELINE).unwrap();
    let text = yaml::to_string(&doc);
    assert_eq!(yaml::from_str(&text).unwrap(), doc);
}

#[test]
fn test_scalar_typing() {
    let doc = yaml::from_str(
        "i: 42\nf: 2.5\nb: true\nn: null\ntilde: ~\ns: plain text\nquoted: \"42\"\nhex: 0x10",
    )
    .unwrap();
    let map = doc.as_mapping().unwrap();

    assert_eq!(map.get("i"), Some(&YamlElement::Integer(42)));
    assert_eq!(map.get("f"), Some(&YamlElement::Float(2.5)));
    assert_eq!(map.get("b"), Some(&YamlElement::Bool(true)));
    assert_eq!(map.get("n"), Some(&YamlElement::Null));
    assert_eq!(map.get("tilde"), Some(&YamlElement::Null));
    assert_eq!(map.get("s").and_then(|v| v.as_str()), Some("plain text"));
    // Quoting suppresses type sniffing
    assert_eq!(map.get("quoted").and_then(|v| v.as_str()), Some("42"));
    assert_eq!(map.get("hex"), Some(&YamlElement::Integer(16)));
}

#[test]
fn test_nested_sequences_and_mappings() {
    let doc = yaml::from_str(
        "matrix:\n  - os: linux\n    arch: [x86_64, aarch64]\n  - os: macos\n    arch: [aarch64]",
    )
    .unwrap();
    let matrix = doc
        .as_mapping()
        .and_then(|m| m.get("matrix"))
        .and_then(|v| v.as_sequence())
        .unwrap();
    assert_eq!(
        matrix[0].as_mapping().and_then(|m| m.get("os")).and_then(|v| v.as_str()),
        Some("linux")
    );
    assert_eq!(
        matrix[0]
            .as_mapping()
            .and_then(|m| m.get("arch"))
            .and_then(|v| v.as_sequence())
            .map(Vec::len),
        Some(2)
    );
}

#[test]
fn test_block_scalars_and_chomping() {
    let doc = yaml::from_str(concat!(
        "clip: |\n  a\n  b\n",
        "strip: |-\n  a\n  b\n",
        "keep: |+\n  a\n  b\n\n",
        "folded: >\n  one\n  two\n",
    ))
    .unwrap();
    let map = doc.as_mapping().unwrap();

    assert_eq!(map.get("clip").and_then(|v| v.as_str()), Some("a\nb\n"));
    assert_eq!(map.get("strip").and_then(|v| v.as_str()), Some("a\nb"));
    assert_eq!(map.get("keep").and_then(|v| v.as_str()), Some("a\nb\n\n"));
    assert_eq!(map.get("folded").and_then(|v| v.as_str()), Some("one two\n"));
}

#[test]
fn test_flow_collections() {
    let doc = yaml::from_str("point: {x: 1, y: 2}\nmixed: [1, {a: true}, [2, 3]]").unwrap();
    let map = doc.as_mapping().unwrap();

    assert_eq!(
        map.get("point")
            .and_then(|v| v.as_mapping())
            .and_then(|m| m.get("y"))
            .and_then(|v| v.as_i64()),
        Some(2)
    );

    let mixed = map.get("mixed").and_then(|v| v.as_sequence()).unwrap();
    assert_eq!(mixed.len(), 3);
    assert!(mixed[1].is_mapping());
    assert_eq!(mixed[2].as_sequence().map(Vec::len), Some(2));
}

#[test]
fn test_preserve_mode_keeps_anchor_structure() {
    let config = YamlConfig::new().with_anchors(AnchorMode::Preserve);
    let doc = yaml::from_str_with("base: &b\n  x: 1\nother: *b", &config).unwrap();
    let map = doc.as_mapping().unwrap();

    let base = map.get("base").unwrap();
    assert!(base.is_anchor());
    assert_eq!(base.anchor_name(), Some("b"));
    assert!(base.unwrapped().is_mapping());
    assert_eq!(map.get("other"), Some(&YamlElement::Alias("b".to_string())));

    // And the writer emits the same text back
    assert_eq!(yaml::to_string(&doc), "base: &b\n  x: 1\nother: *b\n");
}

#[test]
fn test_unknown_alias_is_an_error() {
    assert!(matches!(
        yaml::from_str("a: *nowhere"),
        Err(SyntaxError::UnknownAnchor { .. })
    ));
}

#[test]
fn test_duplicate_keys() {
    assert!(matches!(
        yaml::from_str("a: 1\na: 2"),
        Err(SyntaxError::DuplicateKey { .. })
    ));

    let permissive = YamlConfig::new().with_allow_duplicate_keys(true);
    let doc = yaml::from_str_with("a: 1\na: 2", &permissive).unwrap();
    assert_eq!(
        doc.as_mapping().and_then(|m| m.get("a")).and_then(|v| v.as_i64()),
        Some(2)
    );
}

#[test]
fn test_document_markers() {
    let doc = yaml::from_str("---\na: 1\n...\n").unwrap();
    assert_eq!(
        doc.as_mapping().and_then(|m| m.get("a")).and_then(|v| v.as_i64()),
        Some(1)
    );

    assert!(matches!(
        yaml::from_str("---\na: 1\n...\nb: 2"),
        Err(SyntaxError::TrailingContent { .. })
    ));
    let lenient = YamlConfig::new().with_strict(false);
    assert!(yaml::from_str_with("---\na: 1\n...\nb: 2", &lenient).is_ok());
}

#[test]
fn test_indentation_errors() {
    assert!(matches!(
        yaml::from_str("a:\n\tx: 1"),
        Err(SyntaxError::Indentation { .. })
    ));
}

#[test]
fn test_comments_are_ignored() {
    let doc = yaml::from_str("# top\na: 1 # trailing\n# middle\nb: 2").unwrap();
    let map = doc.as_mapping().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a").and_then(|v| v.as_i64()), Some(1));
}

#[test]
fn test_values_with_colons_and_hashes() {
    let doc = yaml::from_str("url: http://example.com/path\nfragment: a#b").unwrap();
    let map = doc.as_mapping().unwrap();
    assert_eq!(
        map.get("url").and_then(|v| v.as_str()),
        Some("http://example.com/path")
    );
    assert_eq!(map.get("fragment").and_then(|v| v.as_str()), Some("a#b"));
}

#[test]
fn test_flow_simplification_on_output() {
    let doc = yaml::from_str("nums:\n  - 1\n  - 2").unwrap();
    assert_eq!(yaml::to_string(&doc), "nums:\n  - 1\n  - 2\n");

    let config = YamlConfig::new().with_simplify(4);
    assert_eq!(yaml::to_string_with(&doc, &config), "nums: [1, 2]\n");
}

#[test]
fn test_from_reader_and_to_writer() {
    let config = YamlConfig::new();
    let doc = yaml::from_reader(&b"a: 1\n"[..], &config).unwrap();

    let mut out = Vec::new();
    yaml::to_writer(&mut out, &doc, &config).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a: 1\n");
}

#[test]
fn test_top_level_sequence() {
    let doc = yaml::from_str("- alpha\n- beta\n- gamma").unwrap();
    let seq = doc.as_sequence().unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq[2].as_str(), Some("gamma"));

    assert_eq!(yaml::to_string(&doc), "- alpha\n- beta\n- gamma\n");
}
