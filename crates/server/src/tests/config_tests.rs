use super::*;

use std::collections::HashMap;

#[test]
fn defaults_match_dev_server() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:7788");
    assert_eq!(settings.resources_root, "public/Resources");
}

#[test]
fn file_overrides_accept_strings_and_integers() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
resources_root = "/srv/avatar/Resources"
max_body_bytes = 1024
unrelated = "ignored"
"#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.resources_root, "/srv/avatar/Resources");
    assert_eq!(settings.max_body_bytes, 1024);
}

#[test]
fn unparsable_file_leaves_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "this is = = not toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn prefixed_env_vars_win_over_plain_ones() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SERVER_BIND", "127.0.0.1:1"),
        ("APP__BIND_ADDR", "127.0.0.1:2"),
        ("RESOURCES_ROOT", "assets"),
        ("APP__MAX_BODY_BYTES", "not-a-number"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.resources_root, "assets");
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[test]
fn relative_root_resolves_against_cwd() {
    let cwd = Path::new("/work/avatar");
    assert_eq!(
        resolve_resources_root("public/Resources", cwd),
        cwd.join("public/Resources")
    );
    assert_eq!(
        resolve_resources_root("   ", cwd),
        cwd.join("public/Resources")
    );
}

#[test]
fn absolute_root_is_kept() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let raw = dir.path().to_string_lossy().to_string();
    assert_eq!(resolve_resources_root(&raw, Path::new("/elsewhere")), dir.path());
}
