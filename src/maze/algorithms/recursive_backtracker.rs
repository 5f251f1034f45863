use hashbrown::HashSet;
use log::{debug, info, trace};
use smallvec::SmallVec;

use super::Chooser;
use crate::{
    core::{Dims, Error, Result},
    maze::{CellState, Grid},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Done,
}

/// Outcome of a single [`RecursiveBacktracker::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `wall` was carved and `target` pushed on the frontier.
    Advanced { wall: Dims, target: Dims },
    /// Dead end, the cell was popped off the frontier.
    Backtracked(Dims),
}

/// Depth first carving over a walled lattice, driven by an explicit frontier stack.
///
/// Every cell on the frontier is also in the visited set, and the visited set only grows.
pub struct RecursiveBacktracker<'g, C> {
    grid: &'g mut Grid,
    chooser: C,
    frontier: Vec<Dims>,
    visited: HashSet<Dims>,
}

impl<'g, C: Chooser> RecursiveBacktracker<'g, C> {
    pub fn new(grid: &'g mut Grid, chooser: C) -> Self {
        let rooms = grid.rooms().count();
        RecursiveBacktracker {
            grid,
            chooser,
            frontier: Vec::with_capacity(rooms),
            visited: HashSet::with_capacity(rooms),
        }
    }

    pub fn state(&self) -> State {
        if self.frontier.is_empty() {
            State::Done
        } else {
            State::Running
        }
    }

    pub fn frontier(&self) -> &[Dims] {
        &self.frontier
    }

    pub fn visited(&self) -> &HashSet<Dims> {
        &self.visited
    }

    fn require(&self, pos: Dims) -> Result<Dims> {
        self.grid.resolve(pos).ok_or(Error::OutOfBounds {
            pos,
            size: self.grid.size(),
        })
    }

    fn require_carvable(&self, pos: Dims) -> Result<Dims> {
        let pos = self.require(pos)?;
        if self.grid[pos].is_outline() {
            return Err(Error::OutlineAddress(pos));
        }
        Ok(pos)
    }

    /// Opens `room` and makes it a starting point of the carve.
    pub fn seed(&mut self, room: Dims) -> Result<()> {
        let room = self.require_carvable(room)?;

        self.grid[room] = CellState::Empty;
        self.visited.insert(room);
        self.frontier.push(room);

        debug!("Seeded carve at {:?}", room);
        Ok(())
    }

    /// Opens `gate`, usually a border cell, and seeds the carve at the adjacent `room`.
    pub fn carve_entrance(&mut self, gate: Dims, room: Dims) -> Result<()> {
        let gate = self.require(gate)?;
        self.require_carvable(room)?;

        self.grid[gate] = CellState::Empty;
        self.seed(room)
    }

    /// Opens `room` and the `gates` leading out of it, and marks `room` visited without
    /// putting it on the frontier.
    ///
    /// The carve never tunnels into a visited room, so the exit only gets connected if
    /// the room itself was already reached. Carved before [`generate`](Self::generate),
    /// the exit ends up cut off from the rest of the maze.
    pub fn carve_exit(&mut self, room: Dims, gates: &[Dims]) -> Result<()> {
        let room = self.require_carvable(room)?;
        let gates = gates
            .iter()
            .map(|&gate| self.require(gate))
            .collect::<Result<SmallVec<[Dims; 2]>>>()?;

        for gate in gates {
            self.grid[gate] = CellState::Empty;
        }
        self.grid[room] = CellState::Empty;
        self.visited.insert(room);

        debug!("Pre-seeded exit at {:?}", room);
        Ok(())
    }

    /// Walls around `current` that can be carved, each with the unvisited room behind it.
    ///
    /// Targets are always lattice rooms, so a border that is a plain wall is never
    /// tunneled into.
    pub fn candidates(&self, current: Dims) -> SmallVec<[(Dims, Dims); 4]> {
        self.grid
            .neighbors(current)
            .into_iter()
            .filter(|&wall| self.grid[wall] == CellState::Wall)
            .filter_map(|wall| {
                self.grid
                    .reflect(current, wall)
                    .map(|target| (wall, target))
            })
            .filter(|&(_, target)| self.grid.is_room(target))
            .filter(|(_, target)| !self.visited.contains(target))
            .collect()
    }

    pub fn step(&mut self) -> Result<Step> {
        let current = *self.frontier.last().ok_or(Error::EmptyFrontier)?;
        let candidates = self.candidates(current);

        let Some(&(wall, target)) = self.chooser.choose(&candidates) else {
            self.frontier.pop();
            trace!("Backtracked from {:?}", current);
            return Ok(Step::Backtracked(current));
        };

        self.grid[wall] = CellState::Empty;
        self.grid[target] = CellState::Empty;
        self.visited.insert(target);
        self.frontier.push(target);

        trace!("Carved {:?} towards {:?}", wall, target);
        Ok(Step::Advanced { wall, target })
    }

    /// Steps until the frontier is empty, returns the number of steps taken.
    pub fn generate(&mut self) -> Result<usize> {
        let mut steps = 0;
        loop {
            self.step()?;
            steps += 1;

            if self.state() == State::Done {
                break;
            }
        }

        info!(
            "Carved {} cells in {} steps",
            self.visited.len(),
            steps
        );
        Ok(steps)
    }
}
