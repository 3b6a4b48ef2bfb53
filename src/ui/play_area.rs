//! Arena rendering: sky, pipes, scrolling ground and the bird.
//!
//! Uses a cell buffer in arena coordinates scaled to the terminal area, so
//! the picture keeps its proportions at any size.

use crate::game::Snapshot;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    style: Style,
}

impl Cell {
    fn new(ch: char, fg: Color) -> Self {
        Self {
            ch,
            style: Style::default().fg(fg),
        }
    }
}

const SKY: Cell = Cell {
    ch: ' ',
    style: Style::new(),
};

/// Map an arena coordinate onto a cell index, or `None` if it lies outside.
fn to_cell(value: f64, logical: f64, cells: usize) -> Option<usize> {
    if value < 0.0 || logical <= 0.0 {
        return None;
    }
    let idx = (value / logical * cells as f64).floor() as usize;
    (idx < cells).then_some(idx)
}

/// Arena coordinate at the centre of a cell.
fn cell_center(idx: usize, logical: f64, cells: usize) -> f64 {
    (idx as f64 + 0.5) * logical / cells as f64
}

/// Head glyph for the bird's pitch.
fn head_glyph(rotation: f64) -> char {
    if rotation < -0.2 {
        '▲'
    } else if rotation > 0.6 {
        '▼'
    } else {
        '►'
    }
}

fn wing_glyph(wing_angle: f64) -> char {
    if wing_angle < 0.0 {
        '^'
    } else {
        'v'
    }
}

pub fn render_play_area(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let ground_y = snap.arena_height - snap.ground_height;
    let mut grid = vec![vec![SKY; width]; height];

    // Pipes
    let half_gap = snap.gap / 2.0;
    for (row, line) in grid.iter_mut().enumerate() {
        let y = cell_center(row, snap.arena_height, height);
        if y >= ground_y {
            continue;
        }
        for (col, cell) in line.iter_mut().enumerate() {
            let x = cell_center(col, snap.arena_width, width);
            for pipe in snap.pipes {
                if x < pipe.x || x >= pipe.x + snap.pipe_width {
                    continue;
                }
                let top = pipe.gap_y - half_gap;
                let bottom = pipe.gap_y + half_gap;
                if y < top || y > bottom {
                    let lip = (y - top).abs() < snap.arena_height / height as f64
                        || (y - bottom).abs() < snap.arena_height / height as f64;
                    *cell = if lip {
                        Cell::new('▓', Color::LightGreen)
                    } else {
                        Cell::new('█', Color::Green)
                    };
                }
                break;
            }
        }
    }

    // Ground: a striped band that scrolls with the pipes.
    if let Some(first_row) = to_cell(ground_y, snap.arena_height, height) {
        for (row, line) in grid.iter_mut().enumerate().skip(first_row) {
            for (col, cell) in line.iter_mut().enumerate() {
                let x = cell_center(col, snap.arena_width, width) + snap.ground_offset;
                *cell = if row == first_row {
                    let stripe = (x / 12.0).floor() as i64 % 2 == 0;
                    Cell::new(if stripe { '▀' } else { '▔' }, Color::LightGreen)
                } else {
                    Cell::new('░', Color::Yellow)
                };
            }
        }
    }

    // Bird
    let bird = snap.bird;
    if let Some(row) = to_cell(bird.y, snap.arena_height, height) {
        let left = to_cell((bird.x - bird.width / 2.0).max(0.0), snap.arena_width, width);
        let right = to_cell(bird.x + bird.width / 2.0, snap.arena_width, width);
        if let (Some(left), Some(right)) = (left, right) {
            let body = Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            for col in left..=right {
                let ch = if col == right {
                    head_glyph(bird.rotation)
                } else if col == left && right > left {
                    wing_glyph(bird.wing_angle)
                } else {
                    '█'
                };
                grid[row][col] = Cell { ch, style: body };
            }
        }
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| Span::styled(cell.ch.to_string(), cell.style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
