//! Per-state overlays, the status bar and the info panel.

use super::render_status_bar;
use crate::constants::LEADERBOARD_SHOWN;
use crate::game::{GameState, LeaderboardEntry, Snapshot};
use crate::gesture::GestureStatus;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const NAME_DISPLAY_LEN: usize = 10;

/// One row of the game-over leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub score: u32,
    /// Matches the current player and their last score.
    pub is_you: bool,
}

/// Build the rows shown after a crash: at most five, long names shortened.
pub fn leaderboard_rows(
    entries: &[LeaderboardEntry],
    player_name: Option<&str>,
    score: u32,
) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .take(LEADERBOARD_SHOWN)
        .enumerate()
        .map(|(i, entry)| {
            let name = if !entry.name.is_empty() {
                entry.name.as_str()
            } else {
                player_name.unwrap_or("???")
            };
            let is_you = Some(name) == player_name && entry.score == score;
            let display = if name.chars().count() > NAME_DISPLAY_LEN {
                format!("{}..", name.chars().take(NAME_DISPLAY_LEN).collect::<String>())
            } else {
                name.to_string()
            };
            LeaderboardRow {
                rank: i + 1,
                name: display,
                score: entry.score,
                is_you,
            }
        })
        .collect()
}

fn rank_color(rank: usize) -> Color {
    match rank {
        1 => Color::Yellow,
        2 => Color::Gray,
        3 => Color::Rgb(205, 127, 50),
        _ => Color::DarkGray,
    }
}

/// Centre a box of the given size inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn modal(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line>) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

pub fn render_menu(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let title = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled("Flappy", title)),
        Line::from(Span::styled("Fingers", title)),
        Line::from(""),
        Line::from(Span::styled(
            "Pinch to flap!",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled("Touch thumb and index finger together", dim)),
        Line::from(Span::styled("Space, Up or Click also work", dim)),
        Line::from(""),
    ];
    if let Some(name) = snap.player_name {
        lines.push(Line::from(vec![
            Span::styled("Playing as ", dim),
            Span::styled(name, Style::default().fg(Color::Cyan)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "[Space] Start",
        Style::default().fg(Color::Green),
    )));

    let height = lines.len() as u16 + 2;
    modal(frame, centered(area, 42, height), "", Color::Yellow, lines);
}

pub fn render_ready(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let (headline, hint) = if snap.hand_visible {
        ("Pinch to begin!", "or press Space / Click")
    } else {
        ("Show your hand to the camera", "or press Space / Click to start")
    };
    let lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let y = area.y + area.height / 4;
    let rect = Rect::new(area.x, y, area.width, area.height.min(2));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

/// Large running score at the top of the play area.
pub fn render_score(frame: &mut Frame, area: Rect, score: u32) {
    if area.height < 2 {
        return;
    }
    let line = Line::from(Span::styled(
        score.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    let rect = Rect::new(area.x, area.y + 1, area.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rect);
}

pub fn render_game_over(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            "Game Over",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score ", label),
            Span::styled(
                format!("{:<6}", snap.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("Best ", label),
            Span::styled(format!("{}", snap.best), Style::default().fg(Color::Gray)),
        ]),
    ];
    if snap.new_best {
        lines.push(Line::from(Span::styled(
            "New High Score!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let rows = leaderboard_rows(snap.leaderboard, snap.player_name, snap.score);
    if !rows.is_empty() {
        lines.push(Line::from(""));
        let heading = if snap.leaderboard_is_shared {
            "Leaderboard"
        } else {
            "Leaderboard (local)"
        };
        lines.push(Line::from(Span::styled(
            heading,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for row in &rows {
            let text_style = if row.is_you {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("#{:<3}", row.rank), Style::default().fg(rank_color(row.rank))),
                Span::styled(format!("{:<13}", row.name), text_style),
                Span::styled(format!("{:>5}", row.score), text_style),
            ]));
        }
    }

    lines.push(Line::from(""));
    let retry = if snap.restart_ready {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(
        "Pinch / Click / Space to retry",
        retry,
    )));

    let height = lines.len() as u16 + 2;
    modal(frame, centered(area, 36, height), "", Color::Red, lines);
}

pub fn render_name_prompt(frame: &mut Frame, area: Rect, entry: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Enter your name",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(entry, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] OK  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    modal(frame, centered(area, 30, 7), " Player ", Color::Cyan, lines);
}

/// Short notice pinned to the bottom of the play area.
pub fn render_advisory(frame: &mut Frame, area: Rect, text: &str) {
    if area.height == 0 {
        return;
    }
    let rect = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(Clear, rect);
    let line = Line::from(Span::styled(text, Style::default().fg(Color::Yellow)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rect);
}

pub fn render_status(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    if snap.name_entry.is_some() {
        render_status_bar(
            frame,
            area,
            "Type your name",
            Color::Cyan,
            &[("[Enter]", "Confirm"), ("[Esc]", "Cancel")],
        );
        return;
    }
    match snap.state {
        GameState::Menu => render_status_bar(
            frame,
            area,
            "Welcome!",
            Color::Yellow,
            &[("[Space]", "Start"), ("[N]", "Name"), ("[M]", "Mute"), ("[Q]", "Quit")],
        ),
        GameState::Ready => render_status_bar(
            frame,
            area,
            "Get ready",
            Color::Yellow,
            &[("[Space/Pinch]", "Flap"), ("[M]", "Mute"), ("[Q]", "Quit")],
        ),
        GameState::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", snap.score),
            Color::Green,
            &[("[Space/Pinch]", "Flap"), ("[M]", "Mute"), ("[Q]", "Quit")],
        ),
        GameState::GameOver => render_status_bar(
            frame,
            area,
            &format!("Crashed with {} points", snap.score),
            Color::Red,
            &[("[Space/Pinch]", "Retry"), ("[Q]", "Quit")],
        ),
    }
}

fn gesture_label(status: GestureStatus, hand_visible: bool) -> (&'static str, Color) {
    match status {
        GestureStatus::Off => ("off", Color::DarkGray),
        GestureStatus::Starting => ("starting", Color::Yellow),
        GestureStatus::Ready if hand_visible => ("hand seen", Color::Green),
        GestureStatus::Ready => ("no hand", Color::Yellow),
        GestureStatus::Unavailable => ("unavailable", Color::Red),
    }
}

pub fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let (gesture, gesture_color) = gesture_label(snap.gesture_status, snap.hand_visible);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", snap.state.name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                snap.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", label),
            Span::styled(snap.best.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Speed: ", label),
            Span::styled(format!("{:.2}", snap.speed), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled(" Gap:   ", label),
            Span::styled(format!("{:.0}", snap.gap), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Player: ", label),
            Span::styled(
                snap.player_name.unwrap_or("-").to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Hand:  ", label),
            Span::styled(gesture, Style::default().fg(gesture_color)),
        ]),
        Line::from(vec![
            Span::styled(" Sound: ", label),
            Span::styled(
                if snap.muted { "muted" } else { "on" },
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
