use std::ops::Add;

use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit offset on screen axes, y grows downwards.
    fn unit(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// Per-tick displacement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Velocity { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        *self == Velocity::ZERO
    }
}

impl Add<Velocity> for Position {
    type Output = Position;

    // Saturates: a pinned coordinate is still outside any field.
    fn add(self, v: Velocity) -> Position {
        Position::new(self.x.saturating_add(v.dx), self.y.saturating_add(v.dy))
    }
}

/// The controlled entity: a single point with a velocity of fixed magnitude.
pub struct Snake {
    position: Position,
    velocity: Velocity,
    step: i32,
}

impl Snake {
    /// Starts at `pos`, standing still.
    pub fn new(pos: Position, step: i32) -> Self {
        Snake { position: pos, velocity: Velocity::ZERO, step }
    }

    #[cfg(test)]
    pub fn with_velocity(pos: Position, velocity: Velocity, step: i32) -> Self {
        Snake { position: pos, velocity, step }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    #[cfg(test)]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Moves by the current velocity. Bounds are the caller's business.
    pub fn advance(&mut self) {
        self.position = self.position + self.velocity;
    }

    // Reversal is allowed: there is no body to run into.
    pub fn apply_direction(&mut self, direction: Direction) {
        let (ux, uy) = direction.unit();
        self.velocity = Velocity::new(ux * self.step, uy * self.step);
    }

    pub fn direction(&self) -> Option<Direction> {
        if self.velocity.is_zero() {
            return None;
        }
        match (self.velocity.dx.signum(), self.velocity.dy.signum()) {
            (0, -1) => Some(Up),
            (0, 1) => Some(Down),
            (-1, 0) => Some(Left),
            (1, 0) => Some(Right),
            _ => None,
        }
    }
}
