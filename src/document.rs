//! JSON input documents.
//!
//! The document names its symbols, the axiom, the productions and the number
//! of applications:
//!
//! ```json
//! {
//!   "iter": "5",
//!   "modules": [{ "symbol": "A", "parameters": ["x"] }],
//!   "axiom":   [{ "symbol": "A", "parameters": ["5"] }],
//!   "rules":   [{ "symbol": "A", "conditions": ["x 1 >="],
//!                "word": [{ "symbol": "A", "parameters": ["x 1 -"] }] }]
//! }
//! ```
//!
//! Letters and parameter names are the first character of their string.
//! Numbers may be written as JSON numbers or as strings.

use crate::error::DocumentError;
use crate::grammar::{Blueprint, BoundSymbol, Grammar, Production, Sentence};
use crate::lsystem::LSystem;
use crate::symbol::SymbolRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Voxel sampling resolution used when a document does not set one.
pub const DEFAULT_RESOLUTION: u32 = 64;

/// A number that may be spelled as a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn to_f64(&self, field: &'static str) -> Result<f64, DocumentError> {
        match self {
            Numeric::Number(v) => Ok(*v),
            Numeric::Text(s) => s.trim().parse().map_err(|_| DocumentError::InvalidNumber {
                field,
                value: s.clone(),
            }),
        }
    }

    fn to_count(&self, field: &'static str) -> Result<u32, DocumentError> {
        let invalid = || DocumentError::InvalidNumber {
            field,
            value: match self {
                Numeric::Number(v) => v.to_string(),
                Numeric::Text(s) => s.clone(),
            },
        };
        // "5" and "5.0" both count as five.
        let v = self.to_f64(field)?;
        if v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 {
            Ok(v as u32)
        } else {
            Err(invalid())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub symbol: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxiomEntry {
    pub symbol: String,
    #[serde(default)]
    pub parameters: Vec<Numeric>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub symbol: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub symbol: String,
    #[serde(default)]
    pub conditions: Vec<String>,
    pub word: Vec<WordEntry>,
}

/// Raw input document, as deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystemDocument {
    #[serde(rename = "iter")]
    pub iterations: Numeric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Numeric>,
    pub modules: Vec<ModuleEntry>,
    pub axiom: Vec<AxiomEntry>,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

fn first_char(s: &str, field: &'static str) -> Result<char, DocumentError> {
    s.chars().next().ok_or(DocumentError::EmptyField(field))
}

impl LSystemDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Resolves every letter against the module list and builds the run.
    pub fn build(&self) -> Result<LSystem, DocumentError> {
        let mut registry = SymbolRegistry::new();
        for module in &self.modules {
            let letter = first_char(&module.symbol, "modules.symbol")?;
            let params = module
                .parameters
                .iter()
                .map(|p| first_char(p, "modules.parameters"))
                .collect::<Result<Vec<_>, _>>()?;
            registry.define(letter, params);
        }

        let mut axiom = Sentence::new();
        for entry in &self.axiom {
            let letter = first_char(&entry.symbol, "axiom.symbol")?;
            let values = entry
                .parameters
                .iter()
                .map(|v| v.to_f64("axiom.parameters"))
                .collect::<Result<Vec<_>, _>>()?;
            axiom.push(BoundSymbol::from_letter(&registry, letter, values)?);
        }

        let mut productions = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let matcher = first_char(&rule.symbol, "rules.symbol")?;
            let mut successor = Vec::with_capacity(rule.word.len());
            for word in &rule.word {
                let letter = first_char(&word.symbol, "rules.word.symbol")?;
                successor.push(Blueprint::from_letter(
                    &registry,
                    letter,
                    word.parameters.clone(),
                )?);
            }
            productions.push(Production::new(
                &registry,
                matcher,
                rule.conditions.clone(),
                successor,
            )?);
        }

        let iterations = self.iterations.to_count("iter")?;
        let resolution = match &self.resolution {
            Some(r) => r.to_count("resolution")?,
            None => DEFAULT_RESOLUTION,
        };

        tracing::debug!(
            symbols = registry.len(),
            axiom = axiom.len(),
            productions = productions.len(),
            iterations,
            "loaded document"
        );

        Ok(LSystem {
            grammar: Grammar::new(registry, productions),
            axiom,
            iterations: iterations as usize,
            resolution,
        })
    }
}
