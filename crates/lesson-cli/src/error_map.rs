use lesson_core::TutorError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> TutorError {
    TutorError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: TutorError) -> i32 {
    tracing::debug!(code = %error.code, "command failed");
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!("ERROR_MSG_JSON:{}", json_string(&error.message));
    1
}

/// JSON-quoted form of `value` for `*_JSON:` output lines.
pub(crate) fn json_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

pub(crate) fn map_tui_io(error: std::io::Error) -> TutorError {
    map_error("TUI_IO", error)
}

pub(crate) fn map_cli_state_write(error: impl Display) -> TutorError {
    map_error("CLI_STATE_WRITE", error)
}

pub(crate) fn map_cli_state_read(error: std::io::Error) -> TutorError {
    map_error("CLI_STATE_READ", error)
}

pub(crate) fn map_cli_state_invalid(error: serde_json::Error) -> TutorError {
    map_error("CLI_STATE_INVALID", error)
}

pub(crate) fn map_config_read(error: std::io::Error) -> TutorError {
    map_error("CONFIG_READ", error)
}

pub(crate) fn map_config_invalid(error: toml::de::Error) -> TutorError {
    map_error("CONFIG_INVALID", error)
}
