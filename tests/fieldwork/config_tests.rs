//! Configuration loading through the process environment.

use crate::test_helpers::{EnvVarGuard, ScratchDir};
use fieldwatch::config::{ConfigError, FieldwatchConfig};
use rstest::rstest;

#[rstest]
fn environment_overrides_file_values() -> Result<(), eyre::Report> {
    let dir = ScratchDir::new("config");
    std::fs::create_dir_all(dir.path())?;
    let path = dir.path().join("fieldwatch.toml");
    std::fs::write(
        &path,
        "public_url = \"https://files.example.com\"\nsession_ttl_hours = 6\n",
    )?;
    let _guard = EnvVarGuard::set_many(&[
        ("FIELDWATCH_DATABASE_URL", Some("postgres://db/fieldwatch")),
        ("FIELDWATCH_STORAGE_ROOT", None),
        ("FIELDWATCH_PUBLIC_URL", None),
        ("FIELDWATCH_SESSION_TTL_HOURS", Some("36")),
        ("FIELDWATCH_SESSION_DIR", None),
    ]);

    let config = FieldwatchConfig::load(Some(path.as_path()))?;

    eyre::ensure!(config.public_url == "https://files.example.com");
    eyre::ensure!(config.session_ttl_hours == 36);
    eyre::ensure!(config.require_database_url()? == "postgres://db/fieldwatch");
    Ok(())
}

#[rstest]
fn malformed_ttl_in_environment_is_rejected() {
    let _guard = EnvVarGuard::set_many(&[("FIELDWATCH_SESSION_TTL_HOURS", Some("forever"))]);

    let result = FieldwatchConfig::load(None);

    assert!(matches!(result, Err(ConfigError::InvalidOverride { .. })));
}
