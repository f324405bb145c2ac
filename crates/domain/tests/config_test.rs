use zonegate_domain::config::UpstreamAddr;
use zonegate_domain::{CliOverrides, Config, ConfigError, DomainError};

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.upstream.timeout_secs, 5);
    assert_eq!(config.access.rate_limit, 100);
    assert_eq!(config.access.window_secs, 60);
    assert_eq!(config.zone.default_ttl, 300);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml_str(
        r#"
        [upstream]
        address = "1.1.1.1"

        [access]
        allowed_clients = ["10.0.0.0/8", "::1"]
        "#,
    )
    .unwrap();

    assert_eq!(config.upstream.timeout_secs, 5);
    assert_eq!(config.access.rate_limit, 100);
    assert_eq!(config.access.allowed_networks().unwrap().len(), 2);
    assert_eq!(
        config.upstream.upstream_addr().unwrap(),
        UpstreamAddr::Resolved("1.1.1.1:53".parse().unwrap())
    );
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml_str("[server\ndns_port = 53");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_zero_rate_limit_fails_validation() {
    let mut config = Config::default();
    config.access.rate_limit = 0;

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_bad_allow_list_entry_fails_validation() {
    let mut config = Config::default();
    config.access.allowed_clients = vec!["10.0.0.300".to_string()];

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_cli_overrides_win_over_file() {
    let config = Config::load(
        Some("/nonexistent/zonegate.toml"),
        CliOverrides::default(),
    );
    assert!(matches!(config, Err(ConfigError::FileRead(_, _))));

    let dir = std::env::temp_dir().join(format!("zonegate-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("zonegate.toml");
    std::fs::write(&path, "[server]\ndns_port = 5353\n").unwrap();

    let config = Config::load(
        path.to_str(),
        CliOverrides {
            dns_port: Some(8053),
            upstream: Some("9.9.9.9:53".to_string()),
            zone_file: Some("records.json".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(config.server.dns_port, 8053);
    assert_eq!(config.upstream.address, "9.9.9.9:53");
    assert_eq!(config.zone.file.as_deref(), Some("records.json"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_upstream_addr_forms() {
    assert_eq!(
        "8.8.8.8:5353".parse::<UpstreamAddr>().unwrap(),
        UpstreamAddr::Resolved("8.8.8.8:5353".parse().unwrap())
    );
    assert_eq!(
        "::1".parse::<UpstreamAddr>().unwrap().port(),
        53
    );

    let host = "dns.example.net".parse::<UpstreamAddr>().unwrap();
    assert!(host.socket_addr().is_none());
    assert_eq!(host.port(), 53);
    assert_eq!(host.to_string(), "dns.example.net:53");

    assert!(matches!(
        "".parse::<UpstreamAddr>(),
        Err(DomainError::InvalidUpstream(_))
    ));
    assert!(matches!(
        "dns.example.net:notaport".parse::<UpstreamAddr>(),
        Err(DomainError::InvalidUpstream(_))
    ));
}
