//! Parametric grammar: sentences, productions and the rewrite pass.
//!
//! ## Rewrite protocol
//!
//! [`Grammar::apply`] performs one application over a [`Sentence`]:
//!
//! 1. **Scan**: walk the input symbols left to right.
//! 2. **Match**: for each symbol, test productions in registration order. A
//!    production fires when its matcher letter equals the symbol's letter and
//!    every condition holds. The first one that fires wins.
//! 3. **Bind**: each blueprint of the winning production seeds its target's
//!    parameters by name from the predecessor (unmatched names start at zero),
//!    then evaluates its expressions against those seeded values.
//! 4. **Emit**: the produced symbols go to the output; unmatched symbols are
//!    copied through. Output symbols are never rescanned within the pass.
//!
//! The pass writes into a fresh buffer, so a failing expression leaves the
//! caller's sentence untouched.

use crate::error::{ExprError, GrammarError};
use crate::expr::{evaluate_arithmetic, evaluate_conditional};
use crate::symbol::{SymbolDef, SymbolId, SymbolRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbol with concrete values for each of its formal parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundSymbol {
    pub symbol: SymbolId,
    pub values: Vec<f64>,
}

impl BoundSymbol {
    /// Binds `values` to `symbol`, checking the arity.
    pub fn new(
        registry: &SymbolRegistry,
        symbol: SymbolId,
        values: Vec<f64>,
    ) -> Result<Self, GrammarError> {
        let def = registry.try_get(symbol)?;
        if def.arity() != values.len() {
            return Err(GrammarError::ArityMismatch {
                letter: def.letter,
                expected: def.arity(),
                found: values.len(),
            });
        }
        Ok(Self { symbol, values })
    }

    /// Looks up `letter` and binds `values` to it.
    pub fn from_letter(
        registry: &SymbolRegistry,
        letter: char,
        values: Vec<f64>,
    ) -> Result<Self, GrammarError> {
        Self::new(registry, registry.lookup(letter)?, values)
    }
}

/// The ordered word being rewritten.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence(pub Vec<BoundSymbol>);

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: BoundSymbol) {
        self.0.push(symbol);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundSymbol> {
        self.0.iter()
    }

    /// Diagnostic rendering such as `A(5)F(1,0.5)[]`.
    pub fn display<'a>(&'a self, registry: &'a SymbolRegistry) -> SentenceDisplay<'a> {
        SentenceDisplay {
            sentence: self,
            registry,
        }
    }
}

impl From<Vec<BoundSymbol>> for Sentence {
    fn from(symbols: Vec<BoundSymbol>) -> Self {
        Self(symbols)
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a BoundSymbol;
    type IntoIter = std::slice::Iter<'a, BoundSymbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Formats a [`Sentence`] with letters resolved through its registry.
pub struct SentenceDisplay<'a> {
    sentence: &'a Sentence,
    registry: &'a SymbolRegistry,
}

impl fmt::Display for SentenceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bound in self.sentence {
            match self.registry.try_get(bound.symbol) {
                Ok(def) => write!(f, "{}", def.letter)?,
                Err(_) => write!(f, "?")?,
            }
            if let Some((first, rest)) = bound.values.split_first() {
                write!(f, "({first}")?;
                for v in rest {
                    write!(f, ",{v}")?;
                }
                write!(f, ")")?;
            }
        }
        Ok(())
    }
}

/// Template for one successor symbol: a target plus one postfix expression
/// per target parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub target: SymbolId,
    pub exprs: Vec<String>,
}

impl Blueprint {
    pub fn new(
        registry: &SymbolRegistry,
        target: SymbolId,
        exprs: Vec<String>,
    ) -> Result<Self, GrammarError> {
        let def = registry.try_get(target)?;
        if def.arity() != exprs.len() {
            return Err(GrammarError::ArityMismatch {
                letter: def.letter,
                expected: def.arity(),
                found: exprs.len(),
            });
        }
        Ok(Self { target, exprs })
    }

    pub fn from_letter(
        registry: &SymbolRegistry,
        letter: char,
        exprs: Vec<String>,
    ) -> Result<Self, GrammarError> {
        Self::new(registry, registry.lookup(letter)?, exprs)
    }

    /// Builds the successor for `predecessor`.
    fn instantiate(
        &self,
        registry: &SymbolRegistry,
        source: &SymbolDef,
        predecessor: &BoundSymbol,
    ) -> Result<BoundSymbol, GrammarError> {
        let target = registry.try_get(self.target)?;

        // Seed by parameter name; names the predecessor lacks start at zero.
        let seeded: Vec<f64> = target
            .params
            .iter()
            .map(|name| {
                source
                    .params
                    .iter()
                    .position(|p| p == name)
                    .and_then(|i| predecessor.values.get(i).copied())
                    .unwrap_or(0.0)
            })
            .collect();

        let values = self
            .exprs
            .iter()
            .map(|expr| evaluate_arithmetic(expr, &target.params, &seeded))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source_err| GrammarError::Expression {
                letter: source.letter,
                source: source_err,
            })?;

        Ok(BoundSymbol {
            symbol: self.target,
            values,
        })
    }
}

/// A single rewrite rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Production {
    /// Letter of the symbols this rule rewrites.
    pub matcher: char,
    /// Guards; all must hold. Empty means always.
    pub conditions: Vec<String>,
    /// Replacement, in output order.
    pub successor: Vec<Blueprint>,
}

impl Production {
    /// Creates a production, checking that `matcher` names a defined symbol.
    pub fn new(
        registry: &SymbolRegistry,
        matcher: char,
        conditions: Vec<String>,
        successor: Vec<Blueprint>,
    ) -> Result<Self, GrammarError> {
        registry.lookup(matcher)?;
        Ok(Self {
            matcher,
            conditions,
            successor,
        })
    }

    fn is_satisfied(&self, params: &[char], values: &[f64]) -> Result<bool, ExprError> {
        for condition in &self.conditions {
            match evaluate_conditional(condition, params, values) {
                Ok(true) => {}
                Ok(false) => return Ok(false),
                Err(ExprError::MissingRelational { expr }) => {
                    tracing::warn!(
                        matcher = %self.matcher,
                        condition = %expr,
                        "condition has no relational operator; treating as false"
                    );
                    return Ok(false);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

/// Symbol registry plus the ordered production list for one run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Grammar {
    pub registry: SymbolRegistry,
    pub productions: Vec<Production>,
}

impl Grammar {
    pub fn new(registry: SymbolRegistry, productions: Vec<Production>) -> Self {
        Self {
            registry,
            productions,
        }
    }

    /// Runs one rewrite pass over `sentence`.
    ///
    /// On error `sentence` is left as it was.
    pub fn apply(&self, sentence: &mut Sentence) -> Result<(), GrammarError> {
        let mut output = Vec::with_capacity(sentence.len());

        for bound in sentence.iter() {
            let def = self.registry.try_get(bound.symbol)?;
            let wrap = |source| GrammarError::Expression {
                letter: def.letter,
                source,
            };

            let mut fired = None;
            for production in self.productions.iter().filter(|p| p.matcher == def.letter) {
                if production
                    .is_satisfied(&def.params, &bound.values)
                    .map_err(wrap)?
                {
                    fired = Some(production);
                    break;
                }
            }

            match fired {
                Some(production) => {
                    for blueprint in &production.successor {
                        output.push(blueprint.instantiate(&self.registry, def, bound)?);
                    }
                }
                None => output.push(bound.clone()),
            }
        }

        sentence.0 = output;
        Ok(())
    }

    /// Applies `iterations` passes to a copy of `axiom`.
    pub fn derive(&self, axiom: &Sentence, iterations: usize) -> Result<Sentence, GrammarError> {
        let mut sentence = axiom.clone();
        tracing::debug!(sentence = %sentence.display(&self.registry), "axiom");
        for i in 1..=iterations {
            self.apply(&mut sentence)?;
            tracing::debug!(
                iteration = i,
                len = sentence.len(),
                sentence = %sentence.display(&self.registry),
                "applied productions"
            );
        }
        Ok(sentence)
    }

    pub fn to_display_string(&self, sentence: &Sentence) -> String {
        sentence.display(&self.registry).to_string()
    }
}
