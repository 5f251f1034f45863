use serde::{Deserialize, Serialize};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Passable.
    #[default]
    Empty,
    /// Impassable, carvable.
    Wall,
    /// Boundary wall, never carved by the generator.
    Outline,
}

impl CellState {
    pub fn is_passable(self) -> bool {
        matches!(self, CellState::Empty)
    }

    /// Outline counts as a wall too.
    pub fn is_wall(self) -> bool {
        !self.is_passable()
    }

    pub fn is_outline(self) -> bool {
        matches!(self, CellState::Outline)
    }
}

#[cfg(test)]
mod tests {
    use super::CellState::*;

    #[test]
    fn predicates() {
        assert!(Empty.is_passable());
        assert!(Wall.is_wall());
        assert!(Outline.is_wall());
        assert!(Outline.is_outline());
        assert!(!Wall.is_outline());
    }
}
