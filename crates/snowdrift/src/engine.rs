//! The automaton core: one step gives every movable pixel one chance
//! to advance a single cell along the current direction.
//!
//! Interior cells are visited in a freshly shuffled row/column order
//! every step. Resolving a cell means trying its three candidate
//! targets in order (straight down, then the two diagonals in a
//! per-cell random order) and taking the first one that is empty.
//! Before a target is judged, the pixel occupying it is resolved
//! first, so a whole column of falling pixels advances in one step no
//! matter which of them the scan reaches first. A bottom-up sweep
//! would give the same guarantee only for one fixed fall direction;
//! the dependency-first rule works for any direction the gravity
//! vector picks.
//!
//! The dependency chase runs on an explicit frame stack rather than
//! the call stack: a chain can be as long as a zigzag path through
//! the whole grid.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::direction::Direction;
use crate::grid::{Grid, BACKGROUND, BORDER};

/// One in-progress resolution: the cell, its candidate targets in
/// attempt order, and which attempt to judge next.
#[derive(Debug, Clone, Copy)]
struct Frame {
    cell: usize,
    tries: [isize; 3],
    next: usize,
}

/// Per-step engine state: the shuffled visitation orders, the seeded
/// randomness source and the resolution stack. The pixels themselves
/// live in [`Grid`].
///
/// Everything random (the visitation orders and the per-cell
/// diagonal coin) draws from the one generator seeded at
/// construction, so a seed fully determines a run.
#[derive(Debug)]
pub struct Engine {
    rng: SmallRng,
    xorder: Vec<usize>,
    yorder: Vec<usize>,
    stack: Vec<Frame>,
}

impl Engine {
    #[must_use]
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let mut engine = Self {
            rng: SmallRng::seed_from_u64(seed),
            xorder: Vec::new(),
            yorder: Vec::new(),
            stack: Vec::new(),
        };
        engine.resize(width, height);
        engine
    }

    /// Rebuilds the visitation orders for new grid dimensions.
    pub fn resize(&mut self, width: usize, height: usize) {
        // The outermost ring is border and never scanned.
        self.xorder = (1..width.saturating_sub(1)).collect();
        self.yorder = (1..height.saturating_sub(1)).collect();
    }

    /// Advances the grid by one step.
    pub fn tick(&mut self, grid: &mut Grid, dir: Direction) {
        debug_assert_eq!(self.xorder.len(), grid.width.saturating_sub(2));
        debug_assert_eq!(self.yorder.len(), grid.height.saturating_sub(2));

        grid.clear_visited();

        // Fresh order every step; a fixed order leaves visible sweep
        // artifacts in the flow.
        self.xorder.shuffle(&mut self.rng);
        self.yorder.shuffle(&mut self.rng);

        let mut resolver = Resolver {
            grid,
            dir,
            rng: &mut self.rng,
            stack: &mut self.stack,
        };

        for &y in &self.yorder {
            let row = y * resolver.grid.width;
            for &x in &self.xorder {
                let from = row + x;
                if resolver.grid.visited[from] == 0 {
                    resolver.resolve(from);
                }
            }
        }
    }
}

/// Borrowed working set for one step: the grid being mutated plus the
/// engine's randomness and frame stack.
struct Resolver<'a> {
    grid: &'a mut Grid,
    dir: Direction,
    rng: &'a mut SmallRng,
    stack: &'a mut Vec<Frame>,
}

impl Resolver<'_> {
    /// Resolves `start` and, transitively, every cell it is blocked by.
    fn resolve(&mut self, start: usize) {
        self.enter(start);

        while let Some(top) = self.stack.len().checked_sub(1) {
            let frame = self.stack[top];

            if frame.next == frame.tries.len() {
                // Every target occupied; the pixel stays put this step.
                self.stack.pop();
                continue;
            }

            let to = (frame.cell as isize + frame.tries[frame.next]) as usize;

            if self.grid.visited[to] == 0 {
                // An unresolved pixel is in the way. Resolve it before
                // judging the spot, so pixels below fall clear for the
                // pixels above them.
                self.enter(to);
            } else if self.grid.colors[to] == BACKGROUND {
                self.grid.colors[to] = self.grid.colors[frame.cell];
                self.grid.colors[frame.cell] = BACKGROUND;
                self.stack.pop();
            } else {
                self.stack[top].next += 1;
            }
        }
    }

    /// Marks `cell` visited and, if it holds a movable pixel, pushes a
    /// resolution frame for it.
    fn enter(&mut self, cell: usize) {
        debug_assert_eq!(self.grid.visited[cell], 0, "cell resolved twice in one step");
        self.grid.visited[cell] = 1;

        let color = self.grid.colors[cell];
        if color == BACKGROUND || color == BORDER {
            return;
        }

        // Half the time swap the diagonals so neither side is favored.
        let (first, second) = if self.rng.gen_bool(0.5) {
            (self.dir.right, self.dir.left)
        } else {
            (self.dir.left, self.dir.right)
        };

        self.stack.push(Frame {
            cell,
            tries: [self.dir.down, first, second],
            next: 0,
        });
    }
}
