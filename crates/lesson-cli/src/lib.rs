use std::ffi::OsString;

use clap::Parser;
use lesson_core::TutorError;

mod agent;
mod cli_args;
mod config;
mod error_map;
mod line_tui;
mod logging;
mod models;
mod profile_cmd;
mod session_ops;
mod state_store;
mod tui;
mod tui_actions;
mod tui_render;
mod tui_state;

pub(crate) use cli_args::{
    AgentArgs, AgentCommand, Cli, EventArgs, FinishArgs, LessonsArgs, Mode, ProfileArgs,
    ProfileCommand, ProfileInitArgs, StartArgs, TuiArgs, UnlockArgs, ViewArgs,
};
pub(crate) use config::TutorConfig;
pub(crate) use error_map::{
    emit_error, json_string, map_cli_state_invalid, map_cli_state_read, map_cli_state_write,
    map_config_invalid, map_config_read, map_tui_io,
};
pub(crate) use line_tui::run_tui_line_mode;
pub(crate) use models::{AppContext, SessionState, TuiCommandAction, SESSION_STATE_SCHEMA};
pub(crate) use session_ops::{
    finish_into_store, load_open_session, parse_event, start_session,
};
pub(crate) use state_store::{
    load_profile, load_session_state, save_session_state, FileProfileStore,
};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, TutorError> {
    let config = TutorConfig::load(cli.config.as_deref())?;
    logging::init_logging(&config.log.filter);
    let context = AppContext::new(config);

    match cli.command {
        Mode::Agent(args) => agent::run_agent(&context, args),
        Mode::Profile(args) => profile_cmd::run_profile(&context, args),
        Mode::Tui(args) => run_tui(&context, args),
    }
}

fn run_tui(context: &AppContext, args: TuiArgs) -> Result<i32, TutorError> {
    let tui_context = tui_state::TuiContext {
        app: context,
        profile_path: context.config.profile_path(args.profile.as_deref()),
        state_file: context.config.session_path(args.state_file.as_deref()),
    };
    let ui = tui_state::TuiUiState::open(&tui_context, args.skill.as_deref())?;
    tui::run_tui_ratatui_mode(&tui_context, ui)
}

#[cfg(test)]
mod tests;
