use std::path::PathBuf;

use inkdraft::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".inkdraftrc");
    let content = r#"
# comment
--no-mouse

--theme light

--storage=notes.json
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_mouse);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.storage, Some(PathBuf::from("notes.json")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".inkdraftrc");
    let content = "--no-mouse\n--theme light\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "inkdraft".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--storage".to_string(),
        "cli.json".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_mouse, "file flags should remain enabled");
    assert_eq!(effective.storage, Some(PathBuf::from("cli.json")), "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "inkdraft".to_string(),
        "--theme=dark".to_string(),
        "--log-file=ink.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::Dark));
    assert_eq!(flags.log_file, Some(PathBuf::from("ink.log")));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_mouse: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&ConfigFlags::default());
    assert!(merged.no_mouse);
    assert!(ConfigFlags::default().union(&file).no_mouse);
}
