//! Logging Tests

use authkeys_infrastructure::constants::DEFAULT_LOG_LEVEL;
use authkeys_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_init_logging_rejects_bad_level_and_second_install() {
    let bad = LoggingConfig {
        level: "noisy".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(bad).is_err());

    // The first install may race other tests; a second one must fail cleanly
    let _ = init_logging(LoggingConfig::default());
    assert!(init_logging(LoggingConfig::default()).is_err());
}
