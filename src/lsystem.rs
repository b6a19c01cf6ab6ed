//! A complete run: grammar, axiom and derivation depth.

use crate::error::{GrammarError, PipelineError};
use crate::geometry::LineSegment;
use crate::grammar::{Grammar, Sentence};
use crate::interpreter::{TurtleConfig, TurtleInterpreter};
use serde::{Deserialize, Serialize};

/// Everything one generation run owns.
///
/// Runs share nothing; independent runs (parameter sweeps, say) can be
/// derived on separate threads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LSystem {
    pub grammar: Grammar,
    pub axiom: Sentence,
    /// Number of rewrite applications.
    pub iterations: usize,
    /// Voxel resolution from the document. Nothing here reads it; it is
    /// carried through for downstream renderers.
    pub resolution: u32,
}

impl LSystem {
    /// Derives the final sentence.
    pub fn run(&self) -> Result<Sentence, GrammarError> {
        self.grammar.derive(&self.axiom, self.iterations)
    }

    /// Derives the final sentence and interprets it with the standard symbols.
    pub fn segments(&self, config: TurtleConfig) -> Result<Vec<LineSegment>, PipelineError> {
        let sentence = self.run()?;
        let interpreter = TurtleInterpreter::standard(config, &self.grammar.registry);
        Ok(interpreter.interpret(&sentence)?)
    }
}
