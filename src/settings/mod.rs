use ron::{self, extensions::Extensions, ser::PrettyConfig};
use serde::{Deserialize, Serialize};

use crate::{
    core::Result,
    maze::{Addressing, CellState, ExitMode, MazeSpec},
    render::{ConsolePrinter, GlyphTable},
};

const DEFAULT_ROWS: usize = 21;
const DEFAULT_COLS: usize = 41;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addressing: Option<Addressing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<CellState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<ExitMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_rng: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<GlyphTable>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    /// Parses settings from a RON string, missing fields stay `None`.
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(Self::options().from_str(text)?)
    }

    /// Settings embedded in the binary.
    pub fn load_default() -> Result<Self> {
        Self::from_ron(include_str!("./default_settings.ron"))
    }

    pub fn to_ron(&self) -> Result<String> {
        let config = PrettyConfig::new().extensions(Extensions::IMPLICIT_SOME);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn merge(self, other: Settings) -> Self {
        Settings {
            rows: other.rows.or(self.rows),
            cols: other.cols.or(self.cols),
            addressing: other.addressing.or(self.addressing),
            border: other.border.or(self.border),
            exit: other.exit.or(self.exit),
            seed: other.seed.or(self.seed),
            no_rng: other.no_rng.or(self.no_rng),
            count: other.count.or(self.count),
            color: other.color.or(self.color),
            glyphs: other.glyphs.or(self.glyphs),
        }
    }

    pub fn set_rows(mut self, value: usize) -> Self {
        self.rows = Some(value);
        self
    }

    pub fn get_rows(&self) -> usize {
        self.rows.unwrap_or(DEFAULT_ROWS)
    }

    pub fn set_cols(mut self, value: usize) -> Self {
        self.cols = Some(value);
        self
    }

    pub fn get_cols(&self) -> usize {
        self.cols.unwrap_or(DEFAULT_COLS)
    }

    pub fn set_addressing(mut self, value: Addressing) -> Self {
        self.addressing = Some(value);
        self
    }

    pub fn get_addressing(&self) -> Addressing {
        self.addressing.unwrap_or_default()
    }

    pub fn set_border(mut self, value: CellState) -> Self {
        self.border = Some(value);
        self
    }

    pub fn get_border(&self) -> CellState {
        self.border.unwrap_or(CellState::Outline)
    }

    pub fn set_exit(mut self, value: ExitMode) -> Self {
        self.exit = Some(value);
        self
    }

    pub fn get_exit(&self) -> ExitMode {
        self.exit.unwrap_or_default()
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_no_rng(mut self, value: bool) -> Self {
        self.no_rng = Some(value);
        self
    }

    pub fn get_no_rng(&self) -> bool {
        self.no_rng.unwrap_or_default()
    }

    pub fn set_count(mut self, value: usize) -> Self {
        self.count = Some(value);
        self
    }

    pub fn get_count(&self) -> usize {
        self.count.unwrap_or(1)
    }

    pub fn set_color(mut self, value: bool) -> Self {
        self.color = Some(value);
        self
    }

    pub fn get_color(&self) -> bool {
        self.color.unwrap_or_default()
    }

    pub fn set_glyphs(mut self, value: GlyphTable) -> Self {
        self.glyphs = Some(value);
        self
    }

    pub fn get_glyphs(&self) -> GlyphTable {
        self.glyphs.clone().unwrap_or_default()
    }

    pub fn maze_spec(&self) -> MazeSpec {
        MazeSpec::new(self.get_rows(), self.get_cols())
            .addressing(self.get_addressing())
            .border(self.get_border())
            .exit(self.get_exit())
    }

    pub fn printer(&self) -> ConsolePrinter {
        ConsolePrinter::new(self.get_glyphs()).color(self.get_color())
    }
}
