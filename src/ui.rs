#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting board coordinates to terminal coordinates; both are small
    clippy::cast_possible_truncation,
    // Allow sign loss since only visible (non-negative) rows are converted
    clippy::cast_sign_loss
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::catalog;
use crate::components::{Cell, HeldPiece, SettledBlocks, TetrominoType};
use crate::config::KeyConfig;
use crate::engine::DrawMode;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::renderer::Renderer;

// Each cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const BOARD_PIXEL_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2;
const BOARD_PIXEL_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;
const SIDE_PANEL_WIDTH: u16 = 24;
const PIECE_BOX_HEIGHT: u16 = 4;

/// What the terminal currently shows, kept up to date through [`Renderer`].
#[derive(Debug, Clone)]
pub struct Scene {
    controls: String,
    active: Option<([Cell; 4], Color)>,
    last_mode: Option<DrawMode>,
    hold: Option<HeldPiece>,
    preview: Vec<TetrominoType>,
    settled: Vec<(Cell, Color)>,
    just_cleared: bool,
    game_over: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_keys(&KeyConfig::default())
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank scene whose controls panel lists the configured keys.
    #[must_use]
    pub fn with_keys(keys: &KeyConfig) -> Self {
        Self {
            controls: controls_text(keys),
            active: None,
            last_mode: None,
            hold: None,
            preview: Vec::new(),
            settled: Vec::new(),
            just_cleared: false,
            game_over: false,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn last_mode(&self) -> Option<DrawMode> {
        self.last_mode
    }
}

impl Renderer for Scene {
    fn draw_active_piece(&mut self, blocks: &[Cell; 4], color: Color, mode: DrawMode) {
        self.active = Some((*blocks, color));
        self.last_mode = Some(mode);
        if mode == DrawMode::Move {
            self.just_cleared = false;
        }
    }

    fn draw_hold_slot(&mut self, held: Option<HeldPiece>) {
        self.hold = held;
    }

    fn draw_preview(&mut self, upcoming: &[TetrominoType]) {
        self.preview = upcoming.to_vec();
    }

    fn draw_settled_blocks(&mut self, settled: &SettledBlocks, did_clear: bool) {
        self.settled = settled
            .iter()
            .map(|(cell, kind)| (cell, kind.color()))
            .collect();
        self.just_cleared = did_clear;
    }

    fn show_game_over(&mut self) {
        self.active = None;
        self.game_over = true;
    }
}

pub fn render(f: &mut Frame, scene: &Scene) {
    let min_total_width = BOARD_PIXEL_WIDTH + SIDE_PANEL_WIDTH;
    let min_total_height = BOARD_PIXEL_HEIGHT + 2;

    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning_text = Paragraph::new("Terminal too small!\nPlease resize your terminal.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("blockfall"));
        f.render_widget(warning_text, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_PIXEL_WIDTH),
            Constraint::Length(SIDE_PANEL_WIDTH),
            Constraint::Fill(1),
        ])
        .split(f.area());

    let board_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(BOARD_PIXEL_HEIGHT),
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let preview_height = PIECE_BOX_HEIGHT * scene.preview.len().max(1) as u16 + 2;
    let side_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(PIECE_BOX_HEIGHT + 2),
            Constraint::Length(preview_height),
            Constraint::Min(3),
        ])
        .split(main_layout[1]);

    render_board(f, scene, board_layout[1]);
    render_hold(f, scene, side_layout[1]);
    render_preview(f, scene, side_layout[2]);

    let controls = Paragraph::new(scene.controls.as_str())
        .block(Block::default().borders(Borders::TOP).title("Controls"))
        .wrap(Wrap { trim: true });
    f.render_widget(controls, side_layout[3]);
}

fn controls_text(keys: &KeyConfig) -> String {
    let rows = [
        (&keys.left, "Move left"),
        (&keys.right, "Move right"),
        (&keys.down, "Soft drop"),
        (&keys.rotate_clockwise, "Rotate right"),
        (&keys.rotate_counterclockwise, "Rotate left"),
        (&keys.hold, "Hold"),
        (&keys.quit, "Quit"),
    ];
    rows.iter()
        .filter(|(names, _)| !names.is_empty())
        .map(|(names, label)| format!("{}: {label}", names.join("/")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_board(f: &mut Frame, scene: &Scene, area: Rect) {
    let border_style = if scene.just_cleared {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let board = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("blockfall");
    let inner_area = board.inner(area);
    f.render_widget(board, area);

    for (cell, color) in &scene.settled {
        draw_cell(f, inner_area, *cell, *color);
    }
    if let Some((blocks, color)) = &scene.active {
        for cell in blocks {
            draw_cell(f, inner_area, *cell, *color);
        }
    }

    if scene.game_over {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        let game_over_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 1,
        };
        f.render_widget(game_over, game_over_area);
    }
}

fn render_hold(f: &mut Frame, scene: &Scene, area: Rect) {
    let style = if scene.last_mode == Some(DrawMode::Hold) {
        Style::default().fg(Color::LightCyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title("Hold");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if let Some(held) = scene.hold {
        draw_shape(f, inner_area, held.kind, held.color);
    }
}

fn render_preview(f: &mut Frame, scene: &Scene, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    for (index, kind) in scene.preview.iter().enumerate() {
        let slot = Rect {
            x: inner_area.x,
            y: inner_area.y + index as u16 * PIECE_BOX_HEIGHT,
            width: inner_area.width,
            height: PIECE_BOX_HEIGHT,
        };
        draw_shape(f, slot.intersection(inner_area), *kind, kind.color());
    }
}

// Draws a canonical shape in the top-left of `area`, one row of padding above
fn draw_shape(f: &mut Frame, area: Rect, kind: TetrominoType, color: Color) {
    let shape = catalog::shape_of(kind);
    for cell in shape.blocks {
        let x = area.x + 1 + cell.col as u16 * CELL_WIDTH;
        let y = area.y + 1 + cell.row as u16;
        paint(f, area, x, y, color);
    }
}

// Hidden rows (negative) are not shown
fn draw_cell(f: &mut Frame, board_area: Rect, cell: Cell, color: Color) {
    if cell.row < 0 || cell.col < 0 {
        return;
    }
    let x = board_area.x + cell.col as u16 * CELL_WIDTH;
    let y = board_area.y + cell.row as u16;
    paint(f, board_area, x, y, color);
}

fn paint(f: &mut Frame, clip: Rect, x: u16, y: u16, color: Color) {
    for dx in 0..CELL_WIDTH {
        let position = Position::new(x + dx, y);
        if !clip.contains(position) {
            continue;
        }
        if let Some(cell) = f.buffer_mut().cell_mut(position) {
            cell.set_symbol("█");
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
