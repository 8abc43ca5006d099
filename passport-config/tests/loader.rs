use std::fs;
use std::time::Duration;

use once_cell::sync::Lazy;
use passport_config::{ConfigLoader, ConfigSource, env_keys};
use passport_core::navigation::EasingKind;
use tempfile::tempdir;
use tokio::sync::Mutex;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn clear_passport_env() {
    for key in env_keys::ALL {
        unsafe { std::env::remove_var(key) };
    }
}

#[tokio::test]
async fn defaults_when_nothing_is_configured() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");

    let load = ConfigLoader::new(dir.path()).load().expect("load");

    assert_eq!(load.source, ConfigSource::Default);
    assert!(load.dotenv.is_none());
    assert!(load.overrides.is_empty());
    assert_eq!(load.config.api.attend_url, "https://pass.contact/api/attend");
    assert_eq!(load.config.api.attend_timeout(), Duration::from_secs(30));
}

#[tokio::test]
async fn default_file_is_discovered_under_base_dir() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("config")).unwrap();
    let path = dir.path().join("config/passport.toml");
    fs::write(
        &path,
        "[navigation]\nsettle_ms = 450\neasing = \"linear\"\n",
    )
    .unwrap();

    let load = ConfigLoader::new(dir.path()).load().expect("load");

    assert_eq!(load.source, ConfigSource::File(path));
    let nav = load.config.navigation.to_navigation_config().unwrap();
    assert_eq!(nav.settle_duration, Duration::from_millis(450));
    assert_eq!(nav.settle_easing, EasingKind::Linear);
}

#[tokio::test]
async fn env_path_wins_over_default_file() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("passport.toml"), "[scan]\nhint_reset_ms = 1\n")
        .unwrap();
    fs::write(
        dir.path().join("custom.json"),
        r#"{"scan":{"hint_reset_ms":7000}}"#,
    )
    .unwrap();
    unsafe { std::env::set_var(env_keys::CONFIG_PATH, "custom.json") };

    let load = ConfigLoader::new(dir.path()).load().expect("load");
    clear_passport_env();

    assert_eq!(
        load.source,
        ConfigSource::EnvPath(dir.path().join("custom.json"))
    );
    assert_eq!(load.config.scan.hint_reset_ms, 7_000);
}

#[tokio::test]
async fn inline_json_is_accepted() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");
    unsafe {
        std::env::set_var(
            env_keys::CONFIG_JSON,
            r#"{"verifier":{"min_white_ratio":0.9}}"#,
        )
    };

    let load = ConfigLoader::new(dir.path()).load().expect("load");
    clear_passport_env();

    assert_eq!(load.source, ConfigSource::EnvInline);
    assert_eq!(load.config.verifier.min_white_ratio, 0.9);
}

#[tokio::test]
async fn env_overrides_apply_on_top_of_file() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("passport.toml"),
        "[api]\nattend_url = \"https://file.example/attend\"\n",
    )
    .unwrap();
    unsafe {
        std::env::set_var(env_keys::API_URL, "http://127.0.0.1:9000/attend");
        std::env::set_var(env_keys::ATTEND_TIMEOUT, "5s");
        std::env::set_var(env_keys::TOUCH_SLOP, "12.5");
        std::env::set_var(env_keys::LOG, "passport=trace");
    }

    let load = ConfigLoader::new(dir.path()).load().expect("load");
    clear_passport_env();

    assert_eq!(load.config.api.attend_url, "http://127.0.0.1:9000/attend");
    assert_eq!(load.config.api.attend_timeout(), Duration::from_secs(5));
    assert_eq!(load.config.navigation.touch_slop_px, 12.5);
    assert_eq!(load.config.logging.filter.as_deref(), Some("passport=trace"));
    assert_eq!(
        load.overrides,
        vec![
            env_keys::API_URL,
            env_keys::ATTEND_TIMEOUT,
            env_keys::TOUCH_SLOP,
            env_keys::LOG,
        ]
    );
}

#[tokio::test]
async fn malformed_overrides_are_errors() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");

    unsafe { std::env::set_var(env_keys::ATTEND_TIMEOUT, "soon") };
    let err = ConfigLoader::new(dir.path()).load().unwrap_err();
    clear_passport_env();
    assert!(err.to_string().contains(env_keys::ATTEND_TIMEOUT));

    unsafe { std::env::set_var(env_keys::EASING, "bounce") };
    let err = ConfigLoader::new(dir.path()).load().unwrap_err();
    clear_passport_env();
    assert!(format!("{err:#}").contains("unknown easing curve 'bounce'"));
}

#[tokio::test]
async fn dotenv_fills_unset_variables_only() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join(".env"),
        "PASSPORT_TOUCH_SLOP=30\nPASSPORT_COMMIT_THRESHOLD=80\n",
    )
    .unwrap();
    unsafe { std::env::set_var(env_keys::COMMIT_THRESHOLD, "120") };

    let load = ConfigLoader::new(dir.path()).load().expect("load");
    clear_passport_env();

    assert_eq!(load.dotenv, Some(dir.path().join(".env")));
    assert_eq!(load.config.navigation.touch_slop_px, 30.0);
    assert_eq!(load.config.navigation.commit_threshold_px, 120.0);

    let skipped = ConfigLoader::new(dir.path())
        .without_dotenv()
        .load()
        .expect("load");
    assert!(skipped.dotenv.is_none());
    assert_eq!(skipped.config.navigation.touch_slop_px, 24.0);
}

#[tokio::test]
async fn no_dotenv_variable_skips_env_file() {
    let _guard = ENV_LOCK.lock().await;
    clear_passport_env();
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join(".env"), "PASSPORT_SETTLE=900ms\n").unwrap();

    unsafe { std::env::set_var(env_keys::NO_DOTENV, "yes") };
    let skipped = ConfigLoader::new(dir.path()).load().expect("load");
    clear_passport_env();
    assert!(skipped.dotenv.is_none());
    assert_eq!(skipped.config.navigation.settle_ms, 300);

    unsafe { std::env::set_var(env_keys::NO_DOTENV, "off") };
    let loaded = ConfigLoader::new(dir.path()).load().expect("load");
    clear_passport_env();
    assert_eq!(loaded.dotenv, Some(dir.path().join(".env")));
    assert_eq!(loaded.config.navigation.settle_ms, 900);
}
