#![warn(clippy::all, clippy::pedantic)]

use std::io::{self, Stdout};

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::components::{Tile, TileColor};
use crate::error::{EngineError, EngineResult};
use crate::render::{Renderer, Snapshot};

#[must_use]
pub fn tile_color(color: TileColor) -> Color {
    match color {
        TileColor::Aqua => Color::Cyan,
        TileColor::Blue => Color::Blue,
        TileColor::Green => Color::Green,
        TileColor::Magenta => Color::Magenta,
        TileColor::Orange => Color::LightRed,
        TileColor::Red => Color::Red,
        TileColor::Yellow => Color::Yellow,
        TileColor::Ghost => Color::DarkGray,
    }
}

/// Characters per cell horizontally for a configured scaling factor.
#[must_use]
pub fn cell_width_for(scaling_factor: i16) -> u16 {
    let extra = u16::try_from(scaling_factor.clamp(0, 3)).unwrap_or(0);
    2 * (1 + extra)
}

// Helper function to create a centered rect
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Renders frames into the terminal through ratatui.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    cell_width: u16,
}

impl TerminalRenderer {
    pub fn new(scaling_factor: i16) -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        Ok(Self {
            terminal: Terminal::new(backend)?,
            cell_width: cell_width_for(scaling_factor),
        })
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, frame: &Snapshot) -> EngineResult<()> {
        let cell_width = self.cell_width;
        self.terminal
            .draw(|f| render(f, frame, cell_width))
            .map(|_| ())
            .map_err(|e| EngineError::Render(e.to_string()))
    }
}

pub fn render(f: &mut Frame, snapshot: &Snapshot, cell_width: u16) {
    // +2 for borders
    let board_width = u16::try_from(snapshot.width)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell_width)
        .saturating_add(2);
    let board_height = u16::try_from(snapshot.height)
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let min_info_width = 22u16;

    // Check if the terminal is too small to render the game properly
    let area = f.area();
    if area.width < board_width.saturating_add(min_info_width) || area.height < board_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("tilefall"));
        f.render_widget(warning_text, centered_rect(34, 5, f.area()));
        return;
    }

    let [r, g, b] = snapshot.background;
    let background = Color::Rgb(r, g, b);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(f.area());

    let board_area = Rect {
        height: board_height,
        ..main_layout[0]
    };
    render_board(f, snapshot, board_area, cell_width, background);
    render_info(f, snapshot, main_layout[1], cell_width);
}

// Paints one grid cell; characters falling outside `clip` are dropped
fn paint_cell(
    f: &mut Frame,
    (x, y): (u16, u16),
    clip: Rect,
    cell_width: u16,
    color: TileColor,
    bg: Color,
) {
    let symbol = if color == TileColor::Ghost { "░" } else { "█" };
    for dx in 0..cell_width {
        let position = Position::new(x.saturating_add(dx), y);
        if !clip.contains(position) {
            continue;
        }
        if let Some(cell) = f.buffer_mut().cell_mut(position) {
            cell.set_symbol(symbol);
            cell.set_fg(tile_color(color));
            cell.set_bg(bg);
        }
    }
}

fn render_board(f: &mut Frame, snapshot: &Snapshot, area: Rect, cell_width: u16, bg: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    for y in 0..snapshot.height {
        for x in 0..snapshot.width {
            if let Some(color) = snapshot.color_at(x, y) {
                let cx = u16::try_from(x)
                    .unwrap_or(u16::MAX)
                    .saturating_mul(cell_width)
                    .saturating_add(inner.left());
                let cy = u16::try_from(y).unwrap_or(u16::MAX).saturating_add(inner.top());
                paint_cell(f, (cx, cy), inner, cell_width, color, bg);
            }
        }
    }

    let overlay = if snapshot.game_over {
        Some(("GAME OVER", Color::Red))
    } else if snapshot.flags.paused {
        Some(("PAUSED", Color::Yellow))
    } else {
        None
    };
    if let Some((text, color)) = overlay {
        let message = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(message, centered_rect(inner.width, 1, inner));
    }
}

// Draws a tile's footprint from the top-left of `area`, clipped to it
fn render_preview(f: &mut Frame, tile: &Tile, area: Rect, cell_width: u16) {
    for &(dx, dy) in tile.shape.footprint(tile.rotation) {
        let (Ok(dx), Ok(dy)) = (u16::try_from(dx), u16::try_from(dy)) else {
            continue;
        };
        let origin = (
            area.x.saturating_add(dx.saturating_mul(cell_width)),
            area.y.saturating_add(dy),
        );
        paint_cell(f, origin, area, cell_width, tile.color, Color::Reset);
    }
}

fn render_info(f: &mut Frame, snapshot: &Snapshot, area: Rect, cell_width: u16) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Score, level, lines, combo
            Constraint::Length(5), // Held piece
            Constraint::Min(5),    // Next pieces
        ])
        .split(area);

    let stats = format!(
        "Score: {}\nLevel: {}\nLines: {}\nCombo: {}",
        snapshot.score, snapshot.level, snapshot.lines, snapshot.combo
    );
    let stats = Paragraph::new(stats)
        .block(Block::default().borders(Borders::ALL).title("INFO"))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, info_layout[0]);

    let hold_block = Block::default().borders(Borders::ALL).title("HOLD");
    let hold_inner = hold_block.inner(info_layout[1]);
    f.render_widget(hold_block, info_layout[1]);
    if let Some(held) = &snapshot.held {
        render_preview(f, held, hold_inner, cell_width);
    }

    let next_block = Block::default().borders(Borders::ALL).title("NEXT");
    let next_inner = next_block.inner(info_layout[2]);
    f.render_widget(next_block, info_layout[2]);
    for (i, tile) in snapshot.preview.iter().enumerate() {
        let y = next_inner.y + u16::try_from(i).unwrap_or(0) * 3;
        if y + 2 > next_inner.bottom() {
            break;
        }
        let slot = Rect {
            y,
            height: next_inner.bottom() - y,
            ..next_inner
        };
        render_preview(f, tile, slot, cell_width);
    }
}
