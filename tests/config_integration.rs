mod support;

use riskdesk::app_dirs::APP_DIR_NAME;
use riskdesk::config::{self, AppConfig, CONFIG_FILE_NAME};
use support::riskdesk_env::RiskdeskEnvGuard;
use tempfile::tempdir;

#[test]
fn first_launch_writes_defaults_under_config_home() {
    let dir = tempdir().unwrap();
    let _env = RiskdeskEnvGuard::set_config_home(dir.path().to_path_buf());

    let loaded = config::load_or_default().unwrap();

    assert_eq!(loaded, AppConfig::default());
    let path = dir.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
    assert_eq!(config::config_path().unwrap(), path);
    assert!(path.is_file());
}

#[test]
fn saved_settings_survive_a_restart() {
    let dir = tempdir().unwrap();
    let _env = RiskdeskEnvGuard::set_config_home(dir.path().to_path_buf());

    let mut cfg = AppConfig::default();
    cfg.backend.base_url = "http://127.0.0.1:6123/".into();
    cfg.backend.launch = false;
    cfg.ui.min_budget = 3;
    cfg.ui.max_budget = 9;
    config::save(&cfg).unwrap();

    assert_eq!(config::load_or_default().unwrap(), cfg);
}

#[test]
fn hand_edited_values_are_normalized_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
[backend]
base_url = "http://localhost:7000"

[network]
request_timeout_secs = 0

[ui]
coefficient_samples = 0
min_budget = 12
max_budget = 4
"#,
    )
    .unwrap();

    let cfg = config::load_from_path(&path).unwrap();

    assert_eq!(cfg.backend.base_url, "http://localhost:7000/");
    assert_eq!(cfg.network.request_timeout_secs, 1);
    assert_eq!(cfg.ui.coefficient_samples, 1);
    assert_eq!(cfg.ui.max_budget, 12);
    assert_eq!(cfg.logging, AppConfig::default().logging);
}
