use clap::Parser;
use tempfile::Builder;

use super::*;
use crate::args::Cli;

fn full_raw() -> RawSettings {
    RawSettings {
        tenant_id: Some("tenant".into()),
        service_principal_id: Some("client".into()),
        service_principal_key: Some("secret".into()),
        subscription: Some("sub".into()),
        resource_group: Some("rg".into()),
        search_service_name: Some("svc".into()),
        ..RawSettings::default()
    }
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = full_raw();
    raw.api_version = Some("2019-05-06".into());

    let overrides = ServiceOverrides {
        api_version: Some("2024-07-01".into()),
        search_service_name: Some("other".into()),
        ..ServiceOverrides::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api_version, "2024-07-01");
    assert_eq!(settings.search_service_name, "other");
}

#[test]
fn defaults_fill_unset_values() {
    let settings = Settings::from_raw(full_raw()).expect("valid settings");

    assert_eq!(settings.api_version, DEFAULT_API_VERSION);
    assert_eq!(settings.search_domain, DEFAULT_SEARCH_DOMAIN);
    assert_eq!(settings.authority, DEFAULT_AUTHORITY);
    assert_eq!(settings.management_endpoint, DEFAULT_MANAGEMENT_ENDPOINT);
    assert_eq!(settings.log_level, LevelFilter::WARN);
    assert!(settings.endpoint.is_none());
}

#[test]
fn missing_required_key_is_reported_by_name() {
    let mut raw = full_raw();
    raw.subscription = None;

    let err = Settings::from_raw(raw).expect_err("missing subscription");
    assert!(matches!(err, LoadError::Missing { key: "subscription" }));
}

#[test]
fn empty_value_counts_as_missing() {
    let mut raw = full_raw();
    raw.tenant_id = Some(String::new());

    let err = Settings::from_raw(raw).expect_err("empty tenant");
    assert!(matches!(err, LoadError::Missing { key: "tenant_id" }));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = full_raw();
    raw.log_level = Some("chatty".into());

    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(err, LoadError::Invalid { key: "log_level", .. }));
}

#[test]
fn base_urls_lose_trailing_slashes() {
    let mut raw = full_raw();
    raw.authority = Some("https://login.example/".into());
    raw.management_endpoint = Some("https://mgmt.example//".into());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.authority, "https://login.example");
    assert_eq!(settings.management_endpoint, "https://mgmt.example");
}

#[test]
fn config_file_fills_values_and_flags_still_win() {
    let mut file = Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp config");
    std::io::Write::write_all(
        &mut file,
        concat!(
            "tenant_id = \"file-tenant\"\n",
            "service_principal_id = \"file-client\"\n",
            "service_principal_key = \"file-secret\"\n",
            "subscription = \"file-sub\"\n",
            "resource_group = \"file-rg\"\n",
            "search_service_name = \"file-svc\"\n",
        )
        .as_bytes(),
    )
    .expect("write config");

    let cli = Cli::parse_from([
        "azsearch-config",
        "--config-file",
        file.path().to_str().expect("utf-8 path"),
        "--search-service-name",
        "flag-svc",
        "index",
        "list",
    ]);

    let settings = load(&cli).expect("load settings");
    assert_eq!(settings.tenant_id, "file-tenant");
    assert_eq!(settings.search_service_name, "flag-svc");
}
