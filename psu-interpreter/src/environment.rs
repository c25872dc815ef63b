use fxhash::FxHashMap;
use log::trace;
use psu_syntax::ast::Identifier;
use psu_syntax::position::WithSpan;

use crate::error::RuntimeError;
use crate::value::Value;

/// How far name resolution looks past the innermost scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeResolution {
    /// The innermost scope and the one directly enclosing it.
    #[default]
    TwoLevel,
    /// Every enclosing scope up to the global one.
    Lexical,
}

/// Scopes stored innermost-last; the scope at index `i - 1` encloses scope `i`.
/// The global scope at index 0 is never removed.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<FxHashMap<Identifier, Value>>,
    resolution: ScopeResolution,
}

impl Environment {
    pub fn new(resolution: ScopeResolution) -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
            resolution,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
        trace!("entered scope {}", self.scopes.len());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            trace!("left scope {}", self.scopes.len());
            self.scopes.pop();
        }
    }

    // Number of scopes, innermost first, that resolution may inspect.
    fn reach(&self) -> usize {
        match self.resolution {
            ScopeResolution::TwoLevel => 2,
            ScopeResolution::Lexical => self.scopes.len(),
        }
    }

    fn visible(&self) -> impl Iterator<Item = &FxHashMap<Identifier, Value>> + '_ {
        self.scopes.iter().rev().take(self.reach())
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.visible().find_map(|scope| scope.get(name))
    }

    pub fn get(&self, name: &WithSpan<Identifier>) -> Result<&Value, RuntimeError> {
        self.lookup(&name.value)
            .ok_or_else(|| RuntimeError::undefined_variable(name.span, &name.value))
    }

    /// Rebind `name` in the nearest visible scope that has it, otherwise bind
    /// it in the innermost scope.
    pub fn set(&mut self, name: &str, value: Value) {
        let reach = self.reach();
        let innermost = self.scopes.len() - 1;
        let target = self
            .scopes
            .iter()
            .enumerate()
            .rev()
            .take(reach)
            .find(|(_, scope)| scope.contains_key(name))
            .map(|(index, _)| index)
            .unwrap_or(innermost);
        self.scopes[target].insert(name.to_string(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(ScopeResolution::default())
    }
}
