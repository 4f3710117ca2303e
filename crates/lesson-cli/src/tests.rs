use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};
use lesson_api::ProgressStore;
use lesson_core::LEARNER_PROFILE_SCHEMA;
use lesson_runtime::LessonSession;

use super::*;
use crate::line_tui::{handle_tui_command, run_tui_line_mode_with_io};
use crate::tui_state::{TuiContext, TuiUiState, SIGNUP_HINT};

pub(crate) fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("lesson-cli-{}-{}", nanos, name))
}

pub(crate) fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
        .single()
        .expect("fixed timestamp should be valid")
}

pub(crate) fn test_context() -> AppContext {
    AppContext::new(TutorConfig::default())
}

fn run_line_mode(context: &TuiContext<'_>, skill: &str, input: &str) -> String {
    let ui = TuiUiState::open(context, Some(skill)).expect("lesson opens");
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut writer = Vec::new();
    let code =
        run_tui_line_mode_with_io(context, ui, &mut reader, &mut writer).expect("line mode runs");
    assert_eq!(code, 0);
    String::from_utf8(writer).expect("output should be utf-8")
}

#[test]
fn line_mode_guest_completes_lesson_and_is_asked_to_sign_up() {
    let app = test_context();
    let context = TuiContext {
        app: &app,
        profile_path: temp_path("line-guest-profile.json"),
        state_file: temp_path("line-guest-session.json"),
    };
    let output = run_line_mode(&context, "basics-2", "select\ndelete\n:finish\n:quit\n");
    assert!(output.contains("Lesson TUI"));
    assert!(output.contains("Click on the cube to select it"));
    assert!(output.contains("Lesson Complete!"));
    assert!(output.contains(SIGNUP_HINT));
    assert!(output.contains("bye"));
    assert!(!context.profile_path.exists());
}

#[test]
fn line_mode_signed_in_finish_saves_and_opens_next_skill() {
    let app = test_context();
    let profile_path = temp_path("line-signed-profile.json");
    let mut store = FileProfileStore::new(profile_path.clone());
    store
        .save(&app.tutor.new_profile("grace", now()))
        .expect("profile saves");
    let context = TuiContext {
        app: &app,
        profile_path,
        state_file: temp_path("line-signed-session.json"),
    };

    let output = run_line_mode(&context, "basics-1", "shift\n:finish\n");
    assert!(output.contains("next up: Selection & Deletion"));
    assert!(output.contains("[basics-2]"));

    let saved = store.load().expect("load").expect("profile exists");
    assert_eq!(saved.progress.skill_points, 20);
    assert!(saved.progress.is_skill_completed("basics-1"));
}

#[test]
fn line_mode_reports_bad_events_and_keeps_going() {
    let app = test_context();
    let context = TuiContext {
        app: &app,
        profile_path: temp_path("line-bad-profile.json"),
        state_file: temp_path("line-bad-session.json"),
    };
    let output = run_line_mode(&context, "basics-1", "jump\n:load\n:help\n");
    assert!(output.contains("error: Unknown event \"jump\""));
    assert!(output.contains("error: CLI_STATE_NOT_FOUND"));
    assert!(output.contains("commands: :help"));
}

#[test]
fn line_commands_save_restart_and_load() {
    let app = test_context();
    let context = TuiContext {
        app: &app,
        profile_path: temp_path("cmd-profile.json"),
        state_file: temp_path("cmd-session.json"),
    };
    let mut ui = TuiUiState::open(&context, Some("basics-2")).expect("lesson opens");
    let mut lines = Vec::new();
    let mut emit = |line: String| lines.push(line);

    ui.apply(&context, lesson_core::InteractionEvent::Select);
    let action = handle_tui_command(":save", &context, &mut ui, &mut emit).expect("save");
    assert_eq!(action, TuiCommandAction::Continue);
    let action = handle_tui_command(":restart", &context, &mut ui, &mut emit).expect("restart");
    assert_eq!(action, TuiCommandAction::Continue);
    assert!(!ui.session.snapshot().selected);
    handle_tui_command(":load", &context, &mut ui, &mut emit).expect("load");
    assert!(ui.session.snapshot().selected);
    let action = handle_tui_command("select", &context, &mut ui, &mut emit).expect("event");
    assert_eq!(action, TuiCommandAction::NotHandled);
    let action = handle_tui_command(":quit", &context, &mut ui, &mut emit).expect("quit");
    assert_eq!(action, TuiCommandAction::Quit);
}

#[test]
fn session_state_roundtrip_and_schema_validation() {
    let state_path = temp_path("session-state.json");
    let mut session = LessonSession::new("basics-1");
    session.tick(12);
    save_session_state(&state_path, &SessionState::new(session.clone())).expect("save");
    let loaded = load_session_state(&state_path).expect("load");
    assert_eq!(loaded.schema_version, SESSION_STATE_SCHEMA);
    assert_eq!(loaded.session, session);
    assert!(!loaded.finished);

    let mut bad_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state_path).expect("read state"))
            .expect("state json should parse");
    bad_json["schemaVersion"] = serde_json::Value::String("lesson-session.bad".to_string());
    let bad_path = temp_path("bad-session-state.json");
    write_file(
        &bad_path,
        &serde_json::to_string(&bad_json).expect("json should serialize"),
    );
    let error = load_session_state(&bad_path).expect_err("bad schema should fail");
    assert_eq!(error.code, "CLI_STATE_SCHEMA");

    let error = load_session_state(&temp_path("missing-session.json"))
        .expect_err("missing file should fail");
    assert_eq!(error.code, "CLI_STATE_NOT_FOUND");

    let invalid_path = temp_path("invalid-session.json");
    write_file(&invalid_path, "{ not json");
    let error = load_session_state(&invalid_path).expect_err("invalid json should fail");
    assert_eq!(error.code, "CLI_STATE_INVALID");

    let blocker = temp_path("session-blocker");
    write_file(&blocker, "file, not a directory");
    let error = save_session_state(&blocker.join("state.json"), &SessionState::new(session))
        .expect_err("write under a file should fail");
    assert_eq!(error.code, "CLI_STATE_WRITE");
}

#[test]
fn profile_store_treats_missing_file_as_guest() {
    let path = temp_path("store-profile.json");
    let mut store = FileProfileStore::new(path.clone());
    assert_eq!(store.load().expect("missing profile loads"), None);

    let app = test_context();
    let profile = app.tutor.new_profile("linus", now());
    store.save(&profile).expect("save");
    assert_eq!(store.load().expect("load"), Some(profile.clone()));
    assert_eq!(load_profile(&path).expect("load profile"), profile);

    let mut bad_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read profile"))
            .expect("profile json should parse");
    assert_eq!(bad_json["schemaVersion"], LEARNER_PROFILE_SCHEMA);
    bad_json["schemaVersion"] = serde_json::Value::String("learner-profile.v0".to_string());
    write_file(
        &path,
        &serde_json::to_string(&bad_json).expect("json should serialize"),
    );
    let error = store.load().expect_err("old schema should fail");
    assert_eq!(error.code, "CLI_STATE_SCHEMA");
}

#[test]
fn run_cli_reports_parse_and_runtime_errors() {
    assert_eq!(run_cli_from_args(["lesson-cli", "agent", "bogus"]), 2);

    let profile = temp_path("run-profile.json");
    let code = run_cli_from_args([
        "lesson-cli",
        "agent",
        "lessons",
        "--skill",
        "no-such-skill",
        "--profile",
        profile.to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(code, 1);

    let code = run_cli_from_args([
        "lesson-cli",
        "agent",
        "map",
        "--profile",
        profile.to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(code, 0);

    let missing_config = temp_path("missing.toml");
    let code = run_cli_from_args([
        "lesson-cli",
        "--config",
        missing_config.to_str().expect("path should be utf-8"),
        "agent",
        "map",
    ]);
    assert_eq!(code, 1);
}
