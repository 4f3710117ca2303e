use std::io::{self, BufRead, Write};
use std::time::Instant;

use lesson_core::TutorError;

use crate::tui_state::{TuiContext, TuiUiState};
use crate::{map_tui_io, parse_event, TuiCommandAction};

const COMMANDS_TEXT: &str = "commands: :help :save :load :restart :finish :quit";
const EVENTS_TEXT: &str = "events: select deselect delete shift shift-up move:dx,dy,dz";

pub(crate) fn run_tui_line_mode(
    context: &TuiContext<'_>,
    ui: TuiUiState,
) -> Result<i32, TutorError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_tui_line_mode_with_io(context, ui, &mut reader, &mut writer)
}

pub(crate) fn run_tui_line_mode_with_io(
    context: &TuiContext<'_>,
    mut ui: TuiUiState,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, TutorError> {
    writeln!(writer, "Lesson TUI").map_err(map_tui_io)?;
    writeln!(writer, "{}", COMMANDS_TEXT).map_err(map_tui_io)?;
    writeln!(writer, "{}", EVENTS_TEXT).map_err(map_tui_io)?;
    write_screen(&ui, writer)?;

    let mut last_tick = Instant::now();
    loop {
        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            return Ok(0);
        };
        let seconds = last_tick.elapsed().as_secs();
        if seconds > 0 {
            ui.tick(seconds);
            last_tick = Instant::now();
        }

        let mut lines = Vec::new();
        let mut emit = |line: String| lines.push(line);
        let action = handle_tui_command(raw.trim(), context, &mut ui, &mut emit);
        let action = match action {
            Ok(action) => action,
            Err(error) => {
                lines.push(format!("error: {} {}", error.code, error.message));
                TuiCommandAction::Continue
            }
        };
        for line in lines {
            writeln!(writer, "{}", line).map_err(map_tui_io)?;
        }

        match action {
            TuiCommandAction::Quit => return Ok(0),
            TuiCommandAction::Continue => continue,
            TuiCommandAction::NotHandled => {}
        }

        match parse_event(&raw) {
            Ok(event) => {
                ui.apply(context, event);
                write_screen(&ui, writer)?;
            }
            Err(error) => writeln!(writer, "error: {}", error.message).map_err(map_tui_io)?,
        }
    }
}

pub(crate) fn handle_tui_command(
    raw: &str,
    context: &TuiContext<'_>,
    ui: &mut TuiUiState,
    emit: &mut dyn FnMut(String),
) -> Result<TuiCommandAction, TutorError> {
    match raw {
        "" => Ok(TuiCommandAction::Continue),
        ":help" => {
            emit(COMMANDS_TEXT.to_string());
            emit(EVENTS_TEXT.to_string());
            Ok(TuiCommandAction::Continue)
        }
        ":save" => {
            ui.save(context)?;
            emit(format!("saved: {}", context.state_file.display()));
            Ok(TuiCommandAction::Continue)
        }
        ":load" => {
            ui.load(context)?;
            emit(format!("loaded: {}", context.state_file.display()));
            screen_lines(ui).into_iter().for_each(&mut *emit);
            Ok(TuiCommandAction::Continue)
        }
        ":restart" => {
            ui.restart(context)?;
            emit("restarted".to_string());
            screen_lines(ui).into_iter().for_each(&mut *emit);
            Ok(TuiCommandAction::Continue)
        }
        ":finish" => {
            let done = ui.continue_learning(context)?;
            emit(ui.status.clone());
            if done {
                return Ok(TuiCommandAction::Quit);
            }
            screen_lines(ui).into_iter().for_each(&mut *emit);
            Ok(TuiCommandAction::Continue)
        }
        ":quit" => {
            emit("bye".to_string());
            Ok(TuiCommandAction::Quit)
        }
        _ => Ok(TuiCommandAction::NotHandled),
    }
}

fn screen_lines(ui: &TuiUiState) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}] {} | {}",
        ui.session.skill_id(),
        ui.skill_name,
        ui.session.elapsed_label()
    )];
    lines.extend(ui.scene_lines());
    lines.extend(ui.messages().into_iter().map(|message| format!("  {}", message)));
    lines.extend(ui.completion_lines());
    lines
}

fn write_screen(ui: &TuiUiState, writer: &mut dyn Write) -> Result<(), TutorError> {
    writeln!(writer).map_err(map_tui_io)?;
    for line in screen_lines(ui) {
        writeln!(writer, "{}", line).map_err(map_tui_io)?;
    }
    Ok(())
}

/// `None` once the reader is exhausted.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, TutorError> {
    write!(writer, "{}", prefix).map_err(map_tui_io)?;
    writer.flush().map_err(map_tui_io)?;
    let mut input = String::new();
    if reader.read_line(&mut input).map_err(map_tui_io)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
