//! Turtle state and operations for 2D curve interpretation.

use glam::DVec2;
use turtle_art_core::{EngineError, Rgba, Segment};

/// Default distance advanced per forward command, in normalized units.
pub const DEFAULT_STEP_LENGTH: f64 = 0.02;

/// Stroke width as a fraction of the step length.
const STROKE_WIDTH_RATIO: f64 = 1.0 / 6.0;

/// The drawing cursor.
///
/// Tracks position, a unit heading vector, pen state and step length. The
/// type is a plain value: `clone()` yields a fully independent snapshot,
/// which is what the interpreter pushes on `[`.
#[derive(Clone, Debug, PartialEq)]
pub struct Turtle {
    position: DVec2,
    heading: DVec2,
    pen_down: bool,
    step_length: f64,
}

impl Default for Turtle {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            heading: DVec2::X,
            pen_down: true,
            step_length: DEFAULT_STEP_LENGTH,
        }
    }
}

impl Turtle {
    /// Creates a turtle at the origin facing `+x` with the pen down.
    ///
    /// Returns `EngineError::InvalidStepLength` unless `step_length` is finite and positive.
    pub fn new(step_length: f64) -> Result<Self, EngineError> {
        let mut turtle = Self::default();
        turtle.set_step_length(step_length)?;
        Ok(turtle)
    }

    /// Returns the current position in normalized units.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Current unit heading.
    pub fn heading(&self) -> DVec2 {
        self.heading
    }

    /// Returns the distance covered by one forward step.
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Returns `true` when forward steps stroke segments.
    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Sets the distance advanced by each forward move.
    pub fn set_step_length(&mut self, length: f64) -> Result<(), EngineError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(EngineError::InvalidStepLength(length));
        }
        self.step_length = length;
        Ok(())
    }

    /// Applies the rotation matrix `[[c, s], [-s, c]]` to the heading.
    ///
    /// Positive angles turn right, negative angles turn left. The heading is
    /// renormalized afterwards so long curves do not drift off unit length.
    pub fn rotate(&mut self, radians: f64) {
        let (s, c) = radians.sin_cos();
        let h = self.heading;
        let rotated = DVec2::new(c * h.x + s * h.y, -s * h.x + c * h.y);
        self.heading = rotated.normalize_or(DVec2::X);
    }

    /// Turns left by `degrees`; a turtle facing `+x` ends up facing `+y`.
    pub fn turn_left(&mut self, degrees: f64) {
        self.rotate(-degrees.to_radians());
    }

    /// Turns right by `degrees`; a turtle facing `+x` ends up facing `-y`.
    pub fn turn_right(&mut self, degrees: f64) {
        self.rotate(degrees.to_radians());
    }

    /// Lifts the pen; later forward steps only move.
    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    /// Lowers the pen; later forward steps stroke.
    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    /// Moves one step along the heading.
    ///
    /// Returns the stroked segment when the pen is down. The position is
    /// updated either way; whether the segment reaches a canvas is the
    /// caller's decision.
    pub fn forward(&mut self) -> Option<Segment> {
        let from = self.position;
        self.advance();
        self.pen_down.then(|| Segment {
            from,
            to: self.position,
            width: self.step_length * STROKE_WIDTH_RATIO,
            color: Rgba::BLACK,
        })
    }

    /// Moves one step along the heading without stroking.
    pub fn advance(&mut self) {
        self.position += self.heading * self.step_length;
    }
}
