use ratatui::style::Color;

use crate::components::{Cell, HeldPiece, SettledBlocks, TetrominoType};
use crate::engine::{BoardEngine, DrawMode, Notification};

/// Receives engine state changes. Implementations only read what they are
/// given; nothing flows back into the engine.
pub trait Renderer {
    fn draw_active_piece(&mut self, blocks: &[Cell; 4], color: Color, mode: DrawMode);
    fn draw_hold_slot(&mut self, held: Option<HeldPiece>);
    fn draw_preview(&mut self, upcoming: &[TetrominoType]);
    fn draw_settled_blocks(&mut self, settled: &SettledBlocks, did_clear: bool);
    fn show_game_over(&mut self);
}

/// Forwards every pending notification to `renderer` in the order it was
/// raised. Returns how many were delivered.
pub fn present<R: Renderer + ?Sized>(engine: &mut BoardEngine, renderer: &mut R) -> usize {
    let notifications = engine.drain_notifications();
    for notification in &notifications {
        match notification {
            Notification::PieceMoved {
                blocks,
                color,
                mode,
            } => renderer.draw_active_piece(blocks, *color, *mode),
            Notification::HoldChanged(held) => renderer.draw_hold_slot(*held),
            Notification::PreviewChanged(upcoming) => renderer.draw_preview(upcoming),
            Notification::SettledChanged { did_clear } => {
                renderer.draw_settled_blocks(engine.settled(), *did_clear);
            }
            Notification::GameOver => renderer.show_game_over(),
        }
    }
    notifications.len()
}
