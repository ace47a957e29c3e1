use std::fs;
use std::sync::Once;
use std::time::Duration;

use autofill_app::{AppConfig, CONFIG_FILENAME};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(autofill_logging::initialize_for_tests);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AppConfig::load(dir.path());
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.service_settings().base_url, "http://localhost:8080/");
}

#[test]
fn config_file_overrides_the_service_address() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        r#"(service_url: "http://localhost:9999/", request_timeout_ms: 250)"#,
    )
    .expect("write config");

    let config = AppConfig::load(dir.path());
    let settings = config.service_settings();
    assert_eq!(settings.base_url, "http://localhost:9999/");
    assert_eq!(settings.request_timeout, Duration::from_millis(250));
    // Unlisted keys keep their defaults.
    assert_eq!(settings.connect_timeout, Duration::from_millis(2_000));
}

#[test]
fn unparseable_config_falls_back_to_defaults() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(CONFIG_FILENAME), "not ron at all").expect("write config");

    assert_eq!(AppConfig::load(dir.path()), AppConfig::default());
}
