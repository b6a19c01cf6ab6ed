//! Interpreter that converts a rewritten [`Sentence`] into [`LineSegment`]s.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a
//! [`TurtleConfig`], register symbol-to-operation mappings via
//! [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`].

use crate::error::TurtleError;
use crate::geometry::LineSegment;
use crate::grammar::Sentence;
use crate::symbol::{SymbolId, SymbolRegistry};
use crate::turtle::{TurtleOp, TurtleState};
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Letters understood by [`TurtleInterpreter::populate_standard_symbols`].
pub const STANDARD_SYMBOLS: [(char, TurtleOp); 9] = [
    ('F', TurtleOp::Move),
    ('+', TurtleOp::RotatePrimary(1.0)),
    ('-', TurtleOp::RotatePrimary(-1.0)),
    ('&', TurtleOp::RotateSecondary(1.0)),
    ('^', TurtleOp::RotateSecondary(-1.0)),
    ('\\', TurtleOp::RotatePrimary(1.0)),
    ('/', TurtleOp::RotatePrimary(-1.0)),
    ('[', TurtleOp::Push),
    (']', TurtleOp::Pop),
];

/// Configuration for turtle interpretation.
#[derive(Clone, Debug)]
pub struct TurtleConfig {
    /// Heading of the turtle before the first symbol.
    pub initial_heading: Vec3,
    /// Fixed world axis for [`TurtleOp::RotatePrimary`].
    pub primary_axis: Vec3,
    /// Fixed world axis for [`TurtleOp::RotateSecondary`].
    pub secondary_axis: Vec3,
    /// Step length for a move symbol with no parameters.
    pub default_length: f32,
    /// Rotation (radians) for a rotate symbol with no parameters.
    pub default_angle: f32,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            initial_heading: Vec3::Z,
            primary_axis: Vec3::X,
            secondary_axis: Vec3::Y,
            default_length: 1.0,
            default_angle: FRAC_PI_2,
        }
    }
}

/// Interprets a sentence to produce line geometry.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: Vec<TurtleOp>,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: Vec::new(),
            config,
        }
    }

    /// Interpreter for `registry` with the standard symbol table installed.
    pub fn standard(config: TurtleConfig, registry: &SymbolRegistry) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.populate_standard_symbols(registry);
        interpreter
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    ///
    /// `map` is indexed by [`SymbolId`]. Any id outside the slice is treated
    /// as [`TurtleOp::Ignore`].
    pub fn with_map(mut self, map: Vec<TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Assigns a single [`TurtleOp`] to a symbol id, growing the map with
    /// [`TurtleOp::Ignore`] as needed.
    pub fn set_op(&mut self, id: SymbolId, op: TurtleOp) {
        let idx = id.index();
        if idx >= self.op_map.len() {
            self.op_map.resize(idx + 1, TurtleOp::Ignore);
        }
        self.op_map[idx] = op;
    }

    /// Assigns `op` to every definition in `registry` spelled `letter`.
    pub fn set_letter_op(&mut self, registry: &SymbolRegistry, letter: char, op: TurtleOp) {
        let ids: Vec<SymbolId> = registry
            .iter()
            .filter(|(_, def)| def.letter == letter)
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            self.set_op(id, op);
        }
    }

    /// Maps every definition whose letter appears in [`STANDARD_SYMBOLS`].
    ///
    /// Letters the registry does not define are skipped.
    pub fn populate_standard_symbols(&mut self, registry: &SymbolRegistry) {
        for (letter, op) in STANDARD_SYMBOLS {
            self.set_letter_op(registry, letter, op);
        }
    }

    /// Walks `sentence` and returns the segments drawn, in visitation order.
    ///
    /// Each move draws from the old position to the new one with width
    /// `1 / (stack depth + 2)`. `[` saves position and heading and `]`
    /// restores them; segments already drawn are never touched. A `]` with
    /// nothing saved is a [`TurtleError::StackUnderflow`].
    pub fn interpret(&self, sentence: &Sentence) -> Result<Vec<LineSegment>, TurtleError> {
        let mut segments = Vec::new();
        let mut turtle = TurtleState::new(self.config.initial_heading);
        let mut stack: Vec<TurtleState> = Vec::new();

        for (index, bound) in sentence.iter().enumerate() {
            let op = self
                .op_map
                .get(bound.symbol.index())
                .unwrap_or(&TurtleOp::Ignore);
            let p0 = |def: f32| bound.values.first().map(|&x| x as f32).unwrap_or(def);

            match *op {
                TurtleOp::Move => {
                    let start = turtle.advance(p0(self.config.default_length));
                    segments.push(LineSegment {
                        start,
                        end: turtle.position,
                        width: 1.0 / (stack.len() as f32 + 2.0),
                    });
                }
                TurtleOp::RotatePrimary(s) => turtle.rotate(
                    self.config.primary_axis,
                    p0(self.config.default_angle) * s,
                ),
                TurtleOp::RotateSecondary(s) => turtle.rotate(
                    self.config.secondary_axis,
                    p0(self.config.default_angle) * s,
                ),
                TurtleOp::Push => stack.push(turtle),
                TurtleOp::Pop => {
                    turtle = stack.pop().ok_or(TurtleError::StackUnderflow { index })?;
                }
                TurtleOp::Ignore => {}
            }
        }

        tracing::debug!(
            symbols = sentence.len(),
            segments = segments.len(),
            open_branches = stack.len(),
            "interpreted sentence"
        );
        Ok(segments)
    }
}
