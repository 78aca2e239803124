//! Global initialization. Kept in its own test binary, and in a single test,
//! because the global subscriber can only be installed once per process.

use bindery_log::{Config, Format, LogError};

#[test]
fn global_logger_installs_once() {
    let config = Config::production().with_level("warn").with_format(Format::Compact);
    bindery_log::init_with(config).unwrap();

    tracing::warn!(component = "init-test", "logger installed");

    let err = bindery_log::init().unwrap_err();
    assert!(matches!(err, LogError::Init(_)));
    assert_eq!(err.code(), "LOG_INIT");

    let err = bindery_log::init_with(Config::default().with_level("x=nope")).unwrap_err();
    assert!(matches!(err, LogError::Filter { .. }));
}
