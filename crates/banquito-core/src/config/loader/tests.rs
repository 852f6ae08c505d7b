//! Tests for the layered configuration loader

use super::*;
use crate::config::ProvisionMode;
use crate::error::BootstrapError;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_only() {
    let config = ConfigLoader::new().with_defaults().load().unwrap();
    assert_eq!(config.database, "banquito");
    assert_eq!(config.credential.username, "banquito_user");
}

#[test]
fn test_args_override_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("banquito.toml");
    fs::write(
        &path,
        "database = \"from_file\"\nmode = \"if-absent\"\n[credential]\nusername = \"file_user\"\n",
    )
    .unwrap();

    let mut args = HashMap::new();
    args.insert("database".to_string(), "from_args".to_string());

    let config = ConfigLoader::new()
        .with_defaults()
        .with_file(&path)
        .with_args(args)
        .load()
        .unwrap();

    assert_eq!(config.database, "from_args");
    assert_eq!(config.credential.username, "file_user");
    assert_eq!(config.mode, ProvisionMode::IfAbsent);
    assert_eq!(config.role_grant().db, "from_args");
}

#[test]
fn test_invalid_result_fails_validation() {
    let mut args = HashMap::new();
    args.insert("uri".to_string(), "http://localhost:27017".to_string());

    let err = ConfigLoader::new().with_args(args).load().unwrap_err();
    assert!(matches!(err, BootstrapError::Config { .. }));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_file(temp_dir.path().join("banquito.toml"))
        .load()
        .unwrap();
    assert_eq!(config.database, "banquito");
}
