use lesson_core::TutorError;

use crate::tui_state::{TuiContext, TuiUiState};

#[cfg(coverage)]
pub(super) fn run_tui_ratatui_mode(
    context: &TuiContext<'_>,
    ui: TuiUiState,
) -> Result<i32, TutorError> {
    super::run_tui_line_mode(context, ui)
}

#[cfg(not(coverage))]
mod rich {
    use std::io;
    use std::time::{Duration, Instant};

    use crossterm::event::{
        self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    };
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use lesson_core::TutorError;
    use ratatui::backend::CrosstermBackend;
    use ratatui::Terminal;

    use crate::map_tui_io;
    use crate::tui_actions::handle_key;
    use crate::tui_render::render_tui;
    use crate::tui_state::{TuiContext, TuiUiState};

    const CLOCK_TICK: Duration = Duration::from_secs(1);
    // Bare Shift presses only arrive with the kitty keyboard protocol.
    const KEY_FLAGS: KeyboardEnhancementFlags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        .union(KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES);

    struct TuiTerminal {
        terminal: Terminal<CrosstermBackend<io::Stdout>>,
        enhanced_keys: bool,
    }

    impl TuiTerminal {
        fn new() -> Result<Self, TutorError> {
            enable_raw_mode().map_err(map_tui_io)?;
            io::stdout()
                .execute(EnterAlternateScreen)
                .map_err(map_tui_io)?;
            let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
            if enhanced_keys {
                io::stdout()
                    .execute(PushKeyboardEnhancementFlags(KEY_FLAGS))
                    .map_err(map_tui_io)?;
            }
            tracing::debug!(enhanced_keys, "terminal ready");
            let backend = CrosstermBackend::new(io::stdout());
            let terminal = Terminal::new(backend).map_err(map_tui_io)?;
            Ok(Self {
                terminal,
                enhanced_keys,
            })
        }

        fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
            &mut self.terminal
        }
    }

    impl Drop for TuiTerminal {
        fn drop(&mut self) {
            if self.enhanced_keys {
                let _ = io::stdout().execute(PopKeyboardEnhancementFlags);
            }
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
        }
    }

    pub(super) fn run_tui_ratatui_mode(
        context: &TuiContext<'_>,
        mut ui: TuiUiState,
    ) -> Result<i32, TutorError> {
        let mut terminal = TuiTerminal::new()?;
        let state_file = context.state_file.display().to_string();
        let mut last_tick = Instant::now();

        loop {
            terminal
                .terminal_mut()
                .draw(|frame| render_tui(frame, &ui, &state_file))
                .map_err(map_tui_io)?;

            if last_tick.elapsed() >= CLOCK_TICK {
                ui.tick(last_tick.elapsed().as_secs());
                last_tick = Instant::now();
            }

            let timeout = CLOCK_TICK.saturating_sub(last_tick.elapsed());
            if !event::poll(timeout).map_err(map_tui_io)? {
                continue;
            }

            let evt = event::read().map_err(map_tui_io)?;
            if let Event::Key(key) = evt {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let should_quit = match handle_key(key, context, &mut ui) {
                    Ok(should_quit) => should_quit,
                    Err(error) => {
                        tracing::debug!(code = %error.code, "tui action failed");
                        ui.status = error.message;
                        false
                    }
                };
                if should_quit {
                    break;
                }
            }
        }

        Ok(0)
    }
}

#[cfg(not(coverage))]
pub(super) fn run_tui_ratatui_mode(
    context: &TuiContext<'_>,
    ui: TuiUiState,
) -> Result<i32, TutorError> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return super::run_tui_line_mode(context, ui);
    }
    rich::run_tui_ratatui_mode(context, ui)
}
