mod play_area;
pub mod screens;

use crate::game::{GameState, Snapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    pub play_area: Rect,
    /// Two lines under the play area.
    pub status_bar: Rect,
    pub info_panel: Rect,
}

/// Outer border, then play area with a status bar beneath, info panel on the right.
///
/// ```text
/// ┌─ Flappy Fingers ────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [play area]                   │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        play_area: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Status message on line 1, `(key, action)` hints on line 2.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Border colour follows the screen flash.
fn border_color(snap: &Snapshot) -> Color {
    if snap.flash > 0.3 {
        Color::Red
    } else if snap.flash > 0.05 {
        Color::White
    } else {
        Color::Cyan
    }
}

/// Draw one full frame.
pub fn draw(frame: &mut Frame, snap: &Snapshot) {
    let size = frame.size();
    let layout = create_game_layout(frame, size, " Flappy Fingers ", border_color(snap));

    play_area::render_play_area(frame, layout.play_area, snap);
    screens::render_status(frame, layout.status_bar, snap);
    screens::render_info_panel(frame, layout.info_panel, snap);

    match snap.state {
        GameState::Menu => screens::render_menu(frame, layout.play_area, snap),
        GameState::Ready => screens::render_ready(frame, layout.play_area, snap),
        GameState::Playing => screens::render_score(frame, layout.play_area, snap.score),
        GameState::GameOver => screens::render_game_over(frame, layout.play_area, snap),
    }

    if let Some(entry) = snap.name_entry {
        screens::render_name_prompt(frame, layout.play_area, entry);
    }
    if let Some(text) = snap.advisory {
        screens::render_advisory(frame, layout.play_area, text);
    }
}
