use log::info;
use rand::{thread_rng, Rng as _};
use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};
use serde::{Deserialize, Serialize};

use super::{
    algorithms::{Chooser, FirstChooser, RandomChooser, RecursiveBacktracker},
    Addressing, CellState, Grid,
};
use crate::core::{Dims, Error, Result};

/// How the maze is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExitMode {
    /// Closed maze, only the entrance is open.
    None,
    /// The exit is opened once carving is finished, next to a room that is already
    /// connected.
    #[default]
    AfterCarve,
    /// The exit is carved before the generator runs, see
    /// [`RecursiveBacktracker::carve_exit`]. This can leave the exit disconnected.
    PreSeeded,
}

/// Everything needed to build one maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSpec {
    pub rows: usize,
    pub cols: usize,
    pub addressing: Addressing,
    pub border: CellState,
    pub exit: ExitMode,
}

impl MazeSpec {
    pub fn new(rows: usize, cols: usize) -> Self {
        MazeSpec {
            rows,
            cols,
            addressing: Addressing::default(),
            border: CellState::Outline,
            exit: ExitMode::default(),
        }
    }

    pub fn addressing(mut self, value: Addressing) -> Self {
        self.addressing = value;
        self
    }

    pub fn border(mut self, value: CellState) -> Self {
        self.border = value;
        self
    }

    pub fn exit(mut self, value: ExitMode) -> Self {
        self.exit = value;
        self
    }

    /// Entrance gate in the top border and the room below it.
    pub fn entrance(&self) -> (Dims, Dims) {
        (Dims(0, 1), Dims(1, 1))
    }

    /// The bottom right room.
    pub fn exit_room(&self) -> Dims {
        fn last_odd(len: usize) -> i32 {
            let last = len as i32 - 2;
            if last % 2 == 1 {
                last
            } else {
                last - 1
            }
        }

        Dims(last_odd(self.rows), last_odd(self.cols))
    }

    /// Cells between the exit room and the bottom border, the border cell included.
    ///
    /// One cell on grids with an odd number of rows, two otherwise.
    pub fn exit_gates(&self) -> Vec<Dims> {
        let room = self.exit_room();
        (room.0 + 1..self.rows as i32)
            .map(|row| Dims(row, room.1))
            .collect()
    }

    /// Builds the walled lattice and carves a maze into it.
    pub fn build<C: Chooser>(&self, chooser: C) -> Result<Grid> {
        if self.rows < 3 || self.cols < 3 {
            return Err(Error::InvalidSize(Dims(self.rows as i32, self.cols as i32)));
        }

        let mut grid = Grid::new(self.rows, self.cols)?.with_addressing(self.addressing);
        grid.apply_outline(self.border);
        grid.apply_wall_lattice();

        let (gate, room) = self.entrance();
        let mut generator = RecursiveBacktracker::new(&mut grid, chooser);
        generator.carve_entrance(gate, room)?;
        if self.exit == ExitMode::PreSeeded {
            generator.carve_exit(self.exit_room(), &self.exit_gates())?;
        }
        generator.generate()?;

        if self.exit == ExitMode::AfterCarve {
            for gate in self.exit_gates() {
                grid[gate] = CellState::Empty;
            }
        }

        Ok(grid)
    }

    /// Builds `count` mazes in parallel.
    ///
    /// Maze `i` is carved with seed `seed + i`, a random base seed is picked if none is
    /// given. With `no_rng` every maze takes the first candidate at each step.
    pub fn build_many(&self, count: usize, seed: Option<u64>, no_rng: bool) -> Result<Vec<Grid>> {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        if !no_rng {
            info!("Generating {} maze(s) with seed {}", count, seed);
        }

        (0..count)
            .into_par_iter()
            .map(|i| {
                if no_rng {
                    self.build(FirstChooser)
                } else {
                    self.build(RandomChooser::seeded(seed.wrapping_add(i as u64)))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use hashbrown::HashSet;

    use super::{ExitMode, MazeSpec};
    use crate::{
        core::{Dims, Error},
        maze::{algorithms::RandomChooser, Addressing, CellState::*, Grid},
    };

    fn reachable(grid: &Grid, start: Dims) -> HashSet<Dims> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(pos) = queue.pop_front() {
            for off in Dims::ORTHOGONAL {
                let next = pos + off;
                if grid.get(next).is_ok_and(|cell| cell == Empty) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Pairs of orthogonally adjacent empty cells.
    fn edges(grid: &Grid) -> usize {
        Dims::iter_fill(Dims::ZERO, grid.size())
            .filter(|&pos| grid[pos] == Empty)
            .map(|pos| {
                [Dims::EAST, Dims::SOUTH]
                    .into_iter()
                    .filter(|&off| grid.get(pos + off).is_ok_and(|cell| cell == Empty))
                    .count()
            })
            .sum()
    }

    #[test]
    fn exit_geometry() {
        let odd = MazeSpec::new(5, 7);
        assert_eq!(odd.exit_room(), Dims(3, 5));
        assert_eq!(odd.exit_gates(), vec![Dims(4, 5)]);

        let even = MazeSpec::new(6, 8);
        assert_eq!(even.exit_room(), Dims(3, 5));
        assert_eq!(even.exit_gates(), vec![Dims(4, 5), Dims(5, 5)]);
    }

    #[test]
    fn too_small_is_rejected() {
        assert!(matches!(
            MazeSpec::new(2, 9).build(RandomChooser::seeded(0)),
            Err(Error::InvalidSize(Dims(2, 9)))
        ));
    }

    #[test]
    fn entrance_reaches_exit() {
        for (rows, cols) in [(5, 5), (6, 6), (9, 14), (21, 41)] {
            let spec = MazeSpec::new(rows, cols);
            let grid = spec.build(RandomChooser::seeded(9)).unwrap();

            let gates = spec.exit_gates();
            let exit = *gates.last().unwrap();
            assert!(grid.is_border(exit));
            assert_eq!(grid[exit], Empty);

            let reached = reachable(&grid, spec.entrance().0);
            assert!(reached.contains(&exit), "{rows}x{cols}");
            assert_eq!(reached.len(), grid.count(Empty));
        }
    }

    #[test]
    fn closed_maze() {
        let grid = MazeSpec::new(7, 7)
            .exit(ExitMode::None)
            .build(RandomChooser::seeded(2))
            .unwrap();
        assert_eq!(grid.cell(6, 5), Outline);
        assert_eq!(grid.cell(0, 1), Empty);
    }

    #[test]
    fn pre_seeded_exit_is_disconnected() {
        let spec = MazeSpec::new(9, 9).exit(ExitMode::PreSeeded);
        let grid = spec.build(RandomChooser::seeded(4)).unwrap();

        let exit = *spec.exit_gates().last().unwrap();
        assert_eq!(grid[exit], Empty);
        assert!(!reachable(&grid, spec.entrance().0).contains(&exit));
    }

    #[test]
    fn wall_border() {
        let grid = MazeSpec::new(7, 9)
            .border(Wall)
            .build(RandomChooser::seeded(6))
            .unwrap();
        assert_eq!(grid.cell(0, 0), Wall);
        assert_eq!(grid.count(Outline), 0);
        assert_eq!(reachable(&grid, Dims(0, 1)).len(), grid.count(Empty));
    }

    #[test]
    fn wall_border_stays_closed() {
        let cases = [
            (6, 6, Addressing::Strict),
            (10, 4, Addressing::Strict),
            (9, 9, Addressing::Wrap),
            (6, 8, Addressing::Wrap),
        ];

        for (rows, cols, addressing) in cases {
            for seed in 0..4 {
                let spec = MazeSpec::new(rows, cols).border(Wall).addressing(addressing);
                let grid = spec
                    .build(RandomChooser::seeded(seed))
                    .unwrap()
                    .with_addressing(Addressing::Strict);

                let entrance = spec.entrance().0;
                let exit = *spec.exit_gates().last().unwrap();
                for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
                    if grid.is_border(pos) && pos != entrance && pos != exit {
                        assert_eq!(grid[pos], Wall, "{rows}x{cols} seed {seed} at {pos:?}");
                    }
                }
                assert!(grid.rooms().all(|room| grid[room] == Empty));

                let empty = Dims::iter_fill(Dims::ZERO, grid.size())
                    .filter(|&pos| grid[pos] == Empty)
                    .count();
                assert_eq!(reachable(&grid, entrance).len(), empty);
                assert_eq!(edges(&grid), empty - 1, "{rows}x{cols} seed {seed}");
            }
        }
    }

    #[test]
    fn outlined_wrapping_grid_stays_inside() {
        let spec = MazeSpec::new(9, 9).addressing(Addressing::Wrap);
        let grid = spec.build(RandomChooser::seeded(8)).unwrap();
        assert_eq!(grid.addressing(), Addressing::Wrap);
        assert_eq!(grid.cell(8, 1), Outline);
        assert_eq!(
            reachable(&grid.clone().with_addressing(Addressing::Strict), Dims(0, 1)).len(),
            grid.count(Empty)
        );
    }

    #[test]
    fn build_many_is_seeded() {
        let spec = MazeSpec::new(11, 11);
        let first = spec.build_many(4, Some(100), false).unwrap();
        let second = spec.build_many(4, Some(100), false).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[1], spec.build(RandomChooser::seeded(101)).unwrap());
    }

    #[test]
    fn no_rng_mazes_are_identical() {
        let spec = MazeSpec::new(9, 9);
        let mazes = spec.build_many(3, None, true).unwrap();
        assert_eq!(mazes[0], mazes[1]);
        assert_eq!(mazes[1], mazes[2]);
    }
}
