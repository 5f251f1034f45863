pub mod algorithms;
pub mod builder;
pub mod cell;
pub mod grid;

pub use algorithms::{Chooser, FirstChooser, RandomChooser, RecursiveBacktracker, State, Step};
pub use builder::{ExitMode, MazeSpec};
pub use cell::CellState;
pub use grid::{Addressing, Grid};
