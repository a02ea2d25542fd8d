use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions
pub struct AppLayout {
    pub nav_area: Rect,
    pub left_area: Rect,
    pub right_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create layout:
    /// - Nav bar: top 3 rows (logo, search input, result count)
    /// - Left box (results) and right box (detail or watched): 50/50
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Nav bar
                Constraint::Min(3),    // Boxes
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical_chunks[1]);

        Self {
            nav_area: vertical_chunks[0],
            left_area: horizontal_chunks[0],
            right_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }

    /// Split the nav bar into logo, search input and result count
    pub fn nav_sections(&self) -> (Rect, Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(10), Constraint::Length(20)])
            .split(self.nav_area);
        (chunks[0], chunks[1], chunks[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::new(area);

        assert_eq!(layout.nav_area.height, 3);
        assert_eq!(layout.nav_area.y, 0);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.left_area.height, 26);
        assert_eq!(layout.right_area.height, 26);
        assert_eq!(layout.left_area.y, 3);

        assert_eq!(layout.left_area.width, 50);
        assert_eq!(layout.right_area.width, 50);
        assert_eq!(layout.right_area.x, 50);
    }

    #[test]
    fn test_layout_minimum_height() {
        let area = Rect::new(0, 0, 100, 7);
        let layout = AppLayout::new(area);

        assert_eq!(layout.nav_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.left_area.height, 3);
    }

    #[test]
    fn test_nav_sections_cover_nav_bar() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));
        let (logo, search, count) = layout.nav_sections();

        assert_eq!(logo.width, 18);
        assert_eq!(count.width, 20);
        assert_eq!(search.width, 62);
        assert_eq!(logo.width + search.width + count.width, layout.nav_area.width);
    }
}
