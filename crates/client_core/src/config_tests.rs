use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = ClientConfig::parse("").unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.request_timeout(), Duration::from_secs(60));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_config() {
    let config = ClientConfig::parse(
        r#"
        server_url = "https://chess.example.org/app"
        player_color = "black"
        anonymous = false
        mode = "hard"
        "#,
    )
    .unwrap();

    assert_eq!(config.player_color, PlayerColor::Black);
    assert_eq!(config.mode, Mode::Hard);
    assert_eq!(config.variant, Variant::Game);

    let options = config.session_options();
    assert!(!options.anonymous);
    assert_eq!(options.player_color, PlayerColor::Black);
}

#[test]
fn test_unknown_mode_rejected() {
    assert!(ClientConfig::parse(r#"mode = "medium""#).is_err());
}

#[test]
fn test_invalid_url_rejected() {
    let config = ClientConfig {
        server_url: "ftp://example.org".to_string(),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

    let config = ClientConfig {
        server_url: "not a url".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_timeout_rejected() {
    let config = ClientConfig::parse("request_timeout_secs = 0").unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));

    let config = ClientConfig::parse("request_timeout_secs = 1").unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file() {
    let err = ClientConfig::load(Path::new("/nonexistent/client.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
