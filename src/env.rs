use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::error::{MazeError, Result};
use crate::maze::{CellId, Direction, Grid};

/// Number of actions an agent can take.
pub const ACTIONS: usize = 4;

/// Glyph drawn on the agent's cell.
const AGENT_GLYPH: &str = "x";
/// Glyph drawn on the goal cell.
const GOAL_GLYPH: &str = "🏳";

/// A move of the agent. The numeric codes are the ones accepted by [`Environment::step_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    North = 0,
    South = 1,
    West = 2,
    East = 3,
}

impl Action {
    pub fn direction(self) -> Direction {
        match self {
            Action::North => Direction::North,
            Action::South => Direction::South,
            Action::West => Direction::West,
            Action::East => Direction::East,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = MazeError;

    fn try_from(code: usize) -> Result<Self> {
        match code {
            0 => Ok(Action::North),
            1 => Ok(Action::South),
            2 => Ok(Action::West),
            3 => Ok(Action::East),
            _ => Err(MazeError::InvalidAction {
                action: code,
                count: ACTIONS,
            }),
        }
    }
}

/// Environment settings. Coordinates are `(col, row)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Starting cell, top left when `None`
    pub start: Option<(usize, usize)>,
    /// Goal cell, bottom right when `None`
    pub goal: Option<(usize, usize)>,
    /// Report observations as a one-hot vector over all cells instead of `[col, row]`
    pub one_hot: bool,
}

/// Result of a single [`Environment::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Vec<f64>,
    /// -1 for every move, 0 once the goal is reached
    pub reward: f64,
    pub done: bool,
}

/// A generated maze with an agent walking from a start cell to a goal cell.
pub struct Environment {
    grid: Grid,
    start: CellId,
    goal: CellId,
    agent: CellId,
    one_hot: bool,
}

impl Environment {
    /// Wrap a carved grid. Fails with [`MazeError::OutOfRange`] if the configured start or goal
    /// lies outside the grid.
    pub fn new(grid: Grid, config: EnvConfig) -> Result<Self> {
        let (start_col, start_row) = config.start.unwrap_or((0, 0));
        let (goal_col, goal_row) = config
            .goal
            .unwrap_or((grid.cols() - 1, grid.rows() - 1));
        let start = grid.id_at(start_col, start_row)?;
        let goal = grid.id_at(goal_col, goal_row)?;

        tracing::debug!(
            "[env] start at ({}, {}), goal at ({}, {})",
            start_col,
            start_row,
            goal_col,
            goal_row
        );

        Ok(Environment {
            grid,
            start,
            goal,
            agent: start,
            one_hot: config.one_hot,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// `(col, row)` of the starting cell.
    pub fn start(&self) -> (usize, usize) {
        self.coords(self.start)
    }

    /// `(col, row)` of the goal cell.
    pub fn goal(&self) -> (usize, usize) {
        self.coords(self.goal)
    }

    /// `(col, row)` of the agent.
    pub fn position(&self) -> (usize, usize) {
        self.coords(self.agent)
    }

    pub fn at_goal(&self) -> bool {
        self.agent == self.goal
    }

    fn coords(&self, id: CellId) -> (usize, usize) {
        let cell = &self.grid[id];
        (cell.col(), cell.row())
    }

    /// Place the agent on the given cell.
    pub fn set_cell(&mut self, col: usize, row: usize) -> Result<()> {
        self.agent = self.grid.id_at(col, row)?;
        Ok(())
    }

    /// Move the agent if the passage in that direction is open. Returns whether it moved.
    pub fn move_agent(&mut self, action: Action) -> bool {
        let cell = &self.grid[self.agent];
        let direction = action.direction();
        match cell.neighbor(direction) {
            Some(next) if cell.can_move(direction) => {
                self.agent = next;
                true
            }
            _ => false,
        }
    }

    /// Take one environment step.
    pub fn step(&mut self, action: Action) -> Step {
        let moved = self.move_agent(action);
        let done = self.at_goal();
        if !moved {
            tracing::debug!("[env] {:?} blocked at {:?}", action, self.position());
        }
        if done {
            tracing::info!("[env] goal reached");
        }
        Step {
            observation: self.observation(),
            reward: if done { 0.0 } else { -1.0 },
            done,
        }
    }

    /// Take one environment step from a numeric action code.
    pub fn step_code(&mut self, action: usize) -> Result<Step> {
        Ok(self.step(Action::try_from(action)?))
    }

    /// Put the agent back on the start cell and return the observation there.
    pub fn reset(&mut self) -> Vec<f64> {
        self.agent = self.start;
        self.observation()
    }

    /// The current state observation.
    pub fn observation(&self) -> Vec<f64> {
        if self.one_hot {
            self.one_hot()
        } else {
            let (col, row) = self.position();
            vec![col as f64, row as f64]
        }
    }

    /// One-hot vector over all cells with a 1 at the agent's row-major index.
    pub fn one_hot(&self) -> Vec<f64> {
        let mut encoded = vec![0.0; self.grid.len()];
        encoded[self.agent.index()] = 1.0;
        encoded
    }
}

/// Center `glyph` in the three columns of a cell body.
fn cell_body(glyph: &str) -> String {
    let width = glyph.width();
    let left = usize::from(width < 3);
    let right = 3usize.saturating_sub(width + left);
    format!("{}{}{}", " ".repeat(left), glyph, " ".repeat(right))
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagram = self.grid.diagram(|id, _| {
            if id == self.goal {
                cell_body(GOAL_GLYPH)
            } else if id == self.agent {
                cell_body(AGENT_GLYPH)
            } else {
                String::from("   ")
            }
        });
        f.write_str(&diagram)
    }
}
