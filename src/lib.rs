//! # tortuga
//!
//! Parametric L-System rewriting and 3D turtle interpretation.
//!
//! A run goes through three stages:
//!
//! 1. A [`SymbolRegistry`] and a list of [`Production`]s form a [`Grammar`].
//! 2. [`Grammar::apply`] rewrites a [`Sentence`] once; [`Grammar::derive`]
//!    repeats it. Conditions and successor parameters are postfix
//!    expressions evaluated by [`expr`].
//! 3. [`TurtleInterpreter::interpret`] walks the final sentence and returns
//!    the [`LineSegment`]s it draws, ready for an external renderer.
//!
//! [`LSystemDocument`] loads all of the above from JSON.

pub mod document;
pub mod error;
pub mod expr;
pub mod geometry;
pub mod grammar;
pub mod interpreter;
pub mod lsystem;
pub mod symbol;
pub mod turtle;

pub use document::*;
pub use error::*;
pub use expr::{evaluate_arithmetic, evaluate_conditional};
pub use geometry::*;
pub use grammar::*;
pub use interpreter::*;
pub use lsystem::*;
pub use symbol::*;
pub use turtle::*;
