use indoc::indoc;
use langcache::backends::{BackendKind, CsvBackend, JsonBackend, MemoryBackend, YamlBackend};
use langcache::{Backend, I18n};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn write_locales(dir: &TempDir) {
    fs::write(
        dir.path().join("en-US.yml"),
        indoc! {"
            en-US:
              user:
                name: Name
                greeting: Hello, {0}!
              files: \"{0, plural, one {# file} other {# files}}\"
        "},
    )
    .unwrap();
    fs::write(
        dir.path().join("zh-CN.yaml"),
        indoc! {"
            zh-CN:
              user:
                name: 名字
        "},
    )
    .unwrap();
}

#[test]
fn test_yaml_directory_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_locales(&dir);

    let backends: Vec<Arc<dyn Backend>> = vec![
        Arc::new(MemoryBackend::new()),
        Arc::new(YamlBackend::new(&[dir.path()])),
    ];
    let i18n = I18n::new(backends).unwrap();

    assert_eq!(i18n.translate("zh-CN", "user.name", &[]), "名字");
    assert_eq!(i18n.translate("en-US", "user.greeting", &["Ana".into()]), "Hello, Ana!");
    assert_eq!(i18n.translate("en-US", "files", &[1.into()]), "1 file");
    assert_eq!(i18n.translate("en-US", "files", &[5.into()]), "5 files");
    // zh-CN has no greeting; falls back to the default locale.
    assert_eq!(i18n.translate("zh-CN", "user.greeting", &["李".into()]), "Hello, 李!");
}

#[test]
fn test_unreadable_paths_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_locales(&dir);

    let backend = YamlBackend::new(&[
        dir.path().to_path_buf(),
        dir.path().join("does-not-exist.yml"),
    ]);
    assert_eq!(backend.source_count(), 2);
}

#[test]
fn test_malformed_yaml_fails_index_construction() {
    let dir = TempDir::new().unwrap();
    write_locales(&dir);
    fs::write(dir.path().join("broken.yml"), "fr-FR: [oops").unwrap();

    let backends: Vec<Arc<dyn Backend>> = vec![Arc::new(YamlBackend::new(&[dir.path()]))];
    assert!(I18n::new(backends).is_err());
}

#[test]
fn test_mixed_backends_by_kind() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("base.json");
    let csv = dir.path().join("overrides.csv");
    fs::write(&json, r#"{"en-US": {"title": "Base", "subtitle": "Sub"}}"#).unwrap();
    fs::write(&csv, "en-US,title,Override\n").unwrap();

    let backends = vec![
        BackendKind::from_path(&csv).unwrap().open(&[&csv]).unwrap(),
        BackendKind::from_path(&json).unwrap().open(&[&json]).unwrap(),
    ];
    let i18n = I18n::new(backends).unwrap();

    assert_eq!(i18n.translate("en-US", "title", &[]), "Override");
    assert_eq!(i18n.translate("en-US", "subtitle", &[]), "Sub");

    let dump = i18n.dump_all().unwrap();
    assert_eq!(dump["en-US"]["title"].backend.as_deref(), Some("csv"));
    assert_eq!(dump["en-US"]["subtitle"].backend.as_deref(), Some("json"));
}

#[test]
fn test_auto_created_keys_land_in_csv() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("missing.csv");
    let backends: Vec<Arc<dyn Backend>> = vec![
        Arc::new(CsvBackend::new(&csv_path)),
        Arc::new(JsonBackend::from_sources([r#"{"en-US": {"a": "A"}}"#])),
    ];
    let i18n = I18n::new(backends).unwrap();

    assert_eq!(
        i18n.scope("nav").default("Home").translate("en-US", "home", &[]),
        "Home"
    );
    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.trim(), "en-US,nav.home,Home");
}

#[test]
fn test_packaged_sources() {
    let backend = YamlBackend::from_sources([
        "en-US:\n  a: first\n",
        "en-US:\n  a: second\n  b: B\n",
    ]);
    let i18n = I18n::new(vec![Arc::new(backend)]).unwrap();

    // Within one backend later sources override earlier ones.
    assert_eq!(i18n.translate("en-US", "a", &[]), "second");
    assert_eq!(i18n.translate("en-US", "b", &[]), "B");
}
