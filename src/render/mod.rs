use std::io::{self, Write};

use colored::Colorize as _;
use serde::{Deserialize, Serialize};

use crate::maze::{CellState, Grid};

/// Display token for every [`CellState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphTable {
    pub empty: String,
    pub wall: String,
    pub outline: String,
}

impl GlyphTable {
    pub fn glyph(&self, state: CellState) -> &str {
        match state {
            CellState::Empty => &self.empty,
            CellState::Wall => &self.wall,
            CellState::Outline => &self.outline,
        }
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        GlyphTable {
            empty: "  ".to_string(),
            wall: "##".to_string(),
            outline: "##".to_string(),
        }
    }
}

/// Prints grids as text, one line per row.
#[derive(Debug, Clone, Default)]
pub struct ConsolePrinter {
    glyphs: GlyphTable,
    color: bool,
}

impl ConsolePrinter {
    pub fn new(glyphs: GlyphTable) -> Self {
        ConsolePrinter {
            glyphs,
            color: false,
        }
    }

    pub fn color(mut self, value: bool) -> Self {
        self.color = value;
        self
    }

    fn token(&self, state: CellState) -> String {
        let glyph = self.glyphs.glyph(state);
        if !self.color {
            return glyph.to_string();
        }

        match state {
            CellState::Empty => glyph.to_string(),
            CellState::Wall => glyph.white().to_string(),
            CellState::Outline => glyph.bright_black().to_string(),
        }
    }

    pub fn format_line(&self, line: &[CellState]) -> String {
        line.iter().map(|&state| self.token(state)).collect()
    }

    pub fn print_line(&self, line: &[CellState], out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.format_line(line))
    }

    pub fn print(&self, grid: &Grid, out: &mut impl Write) -> io::Result<()> {
        for row in grid.rows() {
            self.print_line(&row, out)?;
        }
        Ok(())
    }
}
