#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{Tile, TileColor, TileShape};
    use crate::render::Snapshot;
    use crate::tests::test_utils::started_session;
    use crate::ui::{self, cell_width_for, centered_rect};
    use ratatui::{backend::TestBackend, layout::Rect, prelude::*};

    // Helper function to create a test terminal
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn bar_snapshot() -> Snapshot {
        Snapshot::capture(&started_session(&[TileShape::Bar, TileShape::T]))
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 40, area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 40);
        assert_eq!(centered.x, 25); // (100 - 50) / 2
        assert_eq!(centered.y, 30); // (100 - 40) / 2

        // Never larger than the area it sits in
        let clipped = centered_rect(200, 10, area);
        assert_eq!(clipped.width, 100);
        assert_eq!(clipped.x, 0);
    }

    #[test]
    fn test_cell_width_for_scaling() {
        assert_eq!(cell_width_for(0), 2);
        assert_eq!(cell_width_for(-3), 2);
        assert_eq!(cell_width_for(1), 4);
        assert_eq!(cell_width_for(50), 8);
    }

    #[test]
    fn test_snapshot_capture() {
        let snapshot = bar_snapshot();

        assert_eq!((snapshot.width, snapshot.height), (10, 20));
        assert_eq!(snapshot.preview.len(), 4);
        assert_eq!(snapshot.preview[0].shape, TileShape::T);
        assert!(snapshot.held.is_none());
        assert_eq!(snapshot.ghost.unwrap().position.y, 18);

        assert_eq!(snapshot.color_at(3, 1), Some(TileColor::Aqua));
        assert_eq!(snapshot.color_at(3, 19), Some(TileColor::Ghost));
        assert_eq!(snapshot.color_at(0, 0), None);
    }

    #[test]
    fn test_locked_cells_win_over_ghost() {
        let mut session = started_session(&[TileShape::Bar]);
        session.grid.set(0, 19, Some(TileColor::Red)).unwrap();
        let snapshot = Snapshot::capture(&session);

        assert_eq!(snapshot.color_at(0, 19), Some(TileColor::Red));
        assert_eq!(snapshot.cells[19][0], Some(TileColor::Red));
    }

    #[test]
    fn test_render_board_and_info() {
        let mut terminal = create_test_terminal(60, 24);
        let snapshot = bar_snapshot();

        terminal.draw(|f| ui::render(f, &snapshot, 2)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("INFO"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("HOLD"));
        assert!(text.contains("NEXT"));
        assert!(!text.contains("PAUSED"));

        // Active bar: column 3 is drawn two characters wide inside the border
        let cell = &terminal.backend().buffer()[(7, 2)];
        assert_eq!(cell.symbol(), "█");
        assert_eq!(cell.fg, Color::Cyan);
    }

    #[test]
    fn test_render_overlays() {
        let mut terminal = create_test_terminal(60, 24);

        let mut snapshot = bar_snapshot();
        snapshot.flags.paused = true;
        terminal.draw(|f| ui::render(f, &snapshot, 2)).unwrap();
        assert!(screen_text(&terminal).contains("PAUSED"));

        snapshot.game_over = true;
        terminal.draw(|f| ui::render(f, &snapshot, 2)).unwrap();
        assert!(screen_text(&terminal).contains("GAME OVER"));
    }

    #[test]
    fn test_wide_previews_stay_inside_their_blocks() {
        // Widest cells with the narrowest info column the layout allows
        let cell_width = cell_width_for(3);
        let mut terminal = create_test_terminal(10 * cell_width + 2 + 22, 24);
        let mut snapshot = bar_snapshot();
        snapshot.held = Some(Tile::new(TileShape::Bar));

        terminal.draw(|f| ui::render(f, &snapshot, cell_width)).unwrap();
        let buffer = terminal.backend().buffer();

        // Held bar starts right inside the HOLD border
        assert_eq!(buffer[(83, 8)].symbol(), "█");
        assert_eq!(buffer[(83, 8)].fg, Color::Cyan);

        let right = buffer.area.right() - 1;
        for y in (7..10).chain(12..23) {
            assert_eq!(buffer[(right, y)].symbol(), "│", "border overwritten at row {y}");
        }
        for y in 0..24 {
            assert_ne!(buffer[(82, y)].symbol(), "█", "left border overwritten at row {y}");
        }
    }

    #[test]
    fn test_game_render_with_small_terminal() {
        let mut terminal = create_test_terminal(40, 10);
        let snapshot = bar_snapshot();

        terminal.draw(|f| ui::render(f, &snapshot, 2)).unwrap();
        assert!(screen_text(&terminal).contains("Terminal too small!"));
    }
}
