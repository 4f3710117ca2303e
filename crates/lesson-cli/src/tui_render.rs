#![cfg(not(coverage))]

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::tui_state::TuiUiState;

const ELLIPSIS: &str = "…";

pub(crate) fn render_tui(frame: &mut Frame<'_>, ui: &TuiUiState, state_file: &str) {
    let terminal_width = frame.area().width as usize;
    let terminal_rows = frame.area().height as usize;
    let content_width = (terminal_width.saturating_sub(2)).max(16);

    let learner = ui
        .learner_name
        .as_deref()
        .map(|name| format!("signed in as {}", name))
        .unwrap_or_else(|| "guest".to_string());
    let header_text = truncate_to_width(
        format!(
            "{} ({}) | {} | {}",
            ui.skill_name,
            ui.session.skill_id(),
            ui.lock.as_str(),
            learner
        )
        .as_str(),
        content_width,
    );
    let state_text = truncate_to_width(format!("state: {}", state_file).as_str(), content_width);
    let status_text = truncate_to_width(
        format!("status: {} | time {}", ui.status, ui.session.elapsed_label()).as_str(),
        content_width,
    );
    let divider_line = "─".repeat(content_width);
    let key_text = truncate_to_width(
        "keys: c/space select | u deselect | x delete | shift or shift+key | g grab | enter continue | s save | l load | r restart | h help | q quit",
        content_width,
    );
    let help_text = truncate_to_width(
        "grab needs a selected cube. arrows move on x/y, pgup/pgdn on z. continue applies the finished lesson to your profile.",
        content_width,
    );

    let scene_rows = ui.scene_lines();
    let completion_rows = ui.completion_lines();
    let message_rows = ui
        .messages()
        .iter()
        .flat_map(|message| wrap_line_to_width(message, content_width))
        .collect::<Vec<_>>();

    let mut reserved_rows = 3 + 1 + scene_rows.len() + 1 + 1;
    if !completion_rows.is_empty() {
        reserved_rows += completion_rows.len() + 1;
    }
    if ui.help_visible {
        reserved_rows += 1;
    }
    let visible_message_rows = terminal_rows.saturating_sub(reserved_rows).max(1);
    let clipped_message_rows = if message_rows.len() <= visible_message_rows {
        message_rows
    } else {
        message_rows[message_rows.len() - visible_message_rows..].to_vec()
    };

    let gray = Style::default().fg(Color::Gray);
    let mut lines_out: Vec<Line<'_>> = Vec::new();
    lines_out.push(Line::from(Span::styled(
        header_text,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines_out.push(Line::from(Span::styled(state_text, gray)));
    lines_out.push(Line::from(Span::styled(status_text, gray)));
    lines_out.push(Line::from(Span::styled(divider_line.clone(), gray)));
    for row in scene_rows {
        let style = if ui.is_holding_selection() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Cyan)
        };
        lines_out.push(Line::from(Span::styled(
            truncate_to_width(&row, content_width),
            style,
        )));
    }
    lines_out.push(Line::from(Span::styled(divider_line.clone(), gray)));
    for row in clipped_message_rows {
        lines_out.push(Line::from(row));
    }
    if !completion_rows.is_empty() {
        lines_out.push(Line::from(Span::styled(divider_line, gray)));
        for row in completion_rows {
            lines_out.push(Line::from(Span::styled(
                truncate_to_width(&row, content_width),
                Style::default().fg(Color::Green),
            )));
        }
    }
    lines_out.push(Line::from(Span::styled(
        key_text,
        Style::default().fg(Color::Yellow),
    )));
    if ui.help_visible {
        lines_out.push(Line::from(Span::styled(
            help_text,
            Style::default().fg(Color::Magenta),
        )));
    }

    let paragraph = Paragraph::new(lines_out).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let chars = value.chars().collect::<Vec<_>>();
    if chars.len() <= width {
        return value.to_string();
    }
    if width == 1 {
        return ELLIPSIS.to_string();
    }
    let mut out = chars.into_iter().take(width - 1).collect::<String>();
    out.push_str(ELLIPSIS);
    out
}

pub(crate) fn wrap_line_to_width(value: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let chars = value.chars().collect::<Vec<_>>();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
