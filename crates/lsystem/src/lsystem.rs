//! The grammar engine: parallel string rewriting plus the turtle interpreter.
//!
//! Rewriting ([`LSystem::step`], [`LSystem::expand`]) is pure string work and
//! never touches a canvas. Interpretation ([`LSystem::interpret`]) walks the
//! current string once and drives a [`Turtle`] that strokes segments onto a
//! [`Canvas`]. The usual run expands `iterations - 1` times and then
//! interprets, so the last requested iteration is the drawing pass.

use std::collections::HashMap;

use turtle_art_core::{Canvas, EngineError};

use crate::action::Action;
use crate::turtle::{Turtle, DEFAULT_STEP_LENGTH};

/// Saves a copy of the active turtle.
pub const PUSH: char = '[';
/// Restores the most recently saved turtle.
pub const POP: char = ']';
/// Turns left by the system angle.
pub const TURN_LEFT: char = '+';
/// Turns right by the system angle.
pub const TURN_RIGHT: char = '-';

/// Default turn increment in degrees.
pub const DEFAULT_ANGLE: f64 = 90.0;
/// Default cap on the expanded string length.
pub const DEFAULT_MAX_SYMBOLS: usize = 100_000_000;
/// Strings longer than this get a warning in the log.
const LARGE_EXPANSION: usize = 10_000_000;

/// Counters collected during one interpretation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Symbols walked.
    pub symbols: usize,
    /// Segments handed to the canvas.
    pub segments: usize,
    /// Steps taken without stroking (pen up or `move` bindings).
    pub moves: usize,
    /// Deepest snapshot stack reached.
    pub max_depth: usize,
}

/// An L-system with its rule table, symbol bindings and current string.
#[derive(Clone, Debug)]
pub struct LSystem {
    axiom: String,
    current: String,
    generation: usize,
    rules: HashMap<char, String>,
    bindings: HashMap<char, Action>,
    angle: f64,
    step_length: f64,
    max_symbols: usize,
}

impl LSystem {
    /// Creates a system whose current string is `axiom`, with no rules or bindings.
    pub fn new(axiom: impl Into<String>) -> Self {
        let axiom = axiom.into();
        Self {
            current: axiom.clone(),
            axiom,
            generation: 0,
            rules: HashMap::new(),
            bindings: HashMap::new(),
            angle: DEFAULT_ANGLE,
            step_length: DEFAULT_STEP_LENGTH,
            max_symbols: DEFAULT_MAX_SYMBOLS,
        }
    }

    /// Sets the turn increment in degrees.
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Sets the turtle step length, rejecting non-finite or non-positive values.
    pub fn with_step_length(mut self, length: f64) -> Result<Self, EngineError> {
        self.set_step_length(length)?;
        Ok(self)
    }

    /// Adds or replaces the rule for `symbol`.
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.add_rule(symbol, replacement);
        self
    }

    /// Binds `symbol` to a drawing action.
    pub fn with_binding(mut self, symbol: char, action: Action) -> Self {
        self.bind(symbol, action);
        self
    }

    /// Sets the longest string a rewriting step may produce.
    pub fn with_max_symbols(mut self, limit: usize) -> Self {
        self.max_symbols = limit;
        self
    }

    /// Sets the turn increment used by `+` and `-`.
    pub fn set_angle(&mut self, degrees: f64) {
        self.angle = degrees;
    }

    /// Sets the step length of the turtles created for interpretation.
    ///
    /// Returns `EngineError::InvalidStepLength` unless `length` is finite and positive.
    pub fn set_step_length(&mut self, length: f64) -> Result<(), EngineError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(EngineError::InvalidStepLength(length));
        }
        self.step_length = length;
        Ok(())
    }

    /// Adds or replaces the rule for `symbol`.
    pub fn add_rule(&mut self, symbol: char, replacement: impl Into<String>) {
        self.rules.insert(symbol, replacement.into());
    }

    /// Binds `symbol` to a drawing action, replacing any previous binding.
    pub fn bind(&mut self, symbol: char, action: Action) {
        self.bindings.insert(symbol, action);
    }

    /// Replaces the axiom and resets the current string to it.
    pub fn set_axiom(&mut self, axiom: impl Into<String>) {
        self.axiom = axiom.into();
        self.reset();
    }

    /// Sets the longest string a rewriting step may produce.
    pub fn set_max_symbols(&mut self, limit: usize) {
        self.max_symbols = limit;
    }

    /// Returns the starting string.
    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// The string produced by the rewriting steps so far.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Number of rewriting steps applied since the last reset.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the turn increment in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns the step length given to each interpretation turtle.
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Returns the expansion cap in symbols.
    pub fn max_symbols(&self) -> usize {
        self.max_symbols
    }

    /// Returns the replacement for `symbol`, if it has a rule.
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Returns the action bound to `symbol`, if any.
    pub fn binding(&self, symbol: char) -> Option<Action> {
        self.bindings.get(&symbol).copied()
    }

    /// True when no axiom symbol has a rule, a binding, or a built-in meaning.
    ///
    /// Such a system is valid but will never draw anything.
    pub fn axiom_is_inert(&self) -> bool {
        !self.axiom.chars().any(|c| {
            self.rules.contains_key(&c)
                || self.bindings.contains_key(&c)
                || matches!(c, PUSH | POP | TURN_LEFT | TURN_RIGHT)
        })
    }

    /// Rewrites `input` once: every symbol is replaced by its rule, or by
    /// itself when it has none.
    ///
    /// The output length (in bytes, which equals symbols for ASCII grammars)
    /// is computed first; `EngineError::ExpansionLimit` is returned without
    /// allocating when it would exceed [`max_symbols`](Self::max_symbols).
    pub fn rewrite(&self, input: &str) -> Result<String, EngineError> {
        let len = input
            .chars()
            .map(|c| self.rules.get(&c).map_or(c.len_utf8(), String::len))
            .fold(0usize, usize::saturating_add);
        if len > self.max_symbols {
            return Err(EngineError::ExpansionLimit {
                len,
                limit: self.max_symbols,
            });
        }

        let mut out = String::with_capacity(len);
        for c in input.chars() {
            match self.rules.get(&c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        Ok(out)
    }

    /// Applies one rewriting step to the current string.
    ///
    /// On error the current string and generation are left untouched.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let next = self.rewrite(&self.current)?;
        self.generation += 1;
        log::debug!(
            "generation {}: {} -> {} symbols",
            self.generation,
            self.current.len(),
            next.len()
        );
        if next.len() > LARGE_EXPANSION && self.current.len() <= LARGE_EXPANSION {
            log::warn!(
                "expanded string passed {LARGE_EXPANSION} symbols at generation {}",
                self.generation
            );
        }
        self.current = next;
        Ok(())
    }

    /// Applies `steps` rewriting steps.
    pub fn expand(&mut self, steps: usize) -> Result<(), EngineError> {
        (0..steps).try_for_each(|_| self.step())
    }

    /// Restores the current string to the axiom.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.axiom);
        self.generation = 0;
    }

    /// A fresh turtle at the origin facing `+x`, pen down, with this system's step length.
    pub fn new_turtle(&self) -> Result<Turtle, EngineError> {
        Turtle::new(self.step_length)
    }

    /// Interprets the current string onto `canvas`.
    pub fn interpret(&self, canvas: &mut dyn Canvas) -> Result<RenderStats, EngineError> {
        self.interpret_string(&self.current, canvas)
    }

    /// Interprets `input` onto `canvas` with this system's angle and bindings.
    ///
    /// Per symbol: `[` pushes a copy of the active turtle, `]` pops one back,
    /// `+` turns left and `-` turns right by the angle. Independently of that,
    /// a bound symbol then performs its [`Action`]. Everything else is a no-op.
    ///
    /// Brackets are checked before anything is drawn, so a malformed string
    /// fails with `StackUnderflow` or `UnclosedBranch` and leaves the canvas
    /// untouched.
    pub fn interpret_string(
        &self,
        input: &str,
        canvas: &mut dyn Canvas,
    ) -> Result<RenderStats, EngineError> {
        let max_depth = check_brackets(input)?;
        let mut turtle = self.new_turtle()?;
        let mut stack: Vec<Turtle> = Vec::with_capacity(max_depth);
        let mut stats = RenderStats {
            max_depth,
            ..RenderStats::default()
        };

        for (index, c) in input.chars().enumerate() {
            stats.symbols += 1;
            match c {
                PUSH => stack.push(turtle.clone()),
                POP => turtle = stack.pop().ok_or(EngineError::StackUnderflow { index })?,
                TURN_LEFT => turtle.turn_left(self.angle),
                TURN_RIGHT => turtle.turn_right(self.angle),
                _ => {}
            }

            match self.bindings.get(&c) {
                Some(Action::Forward) => match turtle.forward() {
                    Some(segment) => {
                        canvas.draw_segment(&segment);
                        stats.segments += 1;
                    }
                    None => stats.moves += 1,
                },
                Some(Action::Move) => {
                    turtle.advance();
                    stats.moves += 1;
                }
                Some(Action::PenUp) => turtle.pen_up(),
                Some(Action::PenDown) => turtle.pen_down(),
                None => {}
            }
        }

        debug_assert!(stack.is_empty(), "bracket check let an open branch through");
        log::debug!(
            "interpreted {} symbols: {} segments, {} moves, depth {}",
            stats.symbols,
            stats.segments,
            stats.moves,
            stats.max_depth
        );
        Ok(stats)
    }
}

/// Verifies that `[` and `]` are balanced and returns the maximum nesting depth.
///
/// A `]` with nothing open yields `StackUnderflow` carrying its symbol index;
/// branches still open at the end yield `UnclosedBranch`.
pub fn check_brackets(input: &str) -> Result<usize, EngineError> {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for (index, c) in input.chars().enumerate() {
        match c {
            PUSH => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            POP => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(EngineError::StackUnderflow { index })?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(EngineError::UnclosedBranch { depth });
    }
    Ok(max_depth)
}
