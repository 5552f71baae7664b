//! Symbol table entities built during semantic analysis
//!
//! Symbols live in a flat arena owned by the analysis result; scopes and
//! tables refer to them by [`SymbolId`]. Addresses are a diagnostic-only
//! numbering scheme (they make symbol-table listings readable) and carry no
//! runtime memory meaning.

use crate::parser::ast::Type;
use rustc_hash::FxHashMap;

/// Index into the symbol arena held by the analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub usize);

/// What a declared name is.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// Function parameter.
    Param,
    /// Local variable.
    Local,
    /// Top-level function, with its recorded signature.
    Function {
        return_type: Type,
        param_types: Vec<Type>,
    },
}

impl SymbolKind {
    /// Short lowercase label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Param => "param",
            SymbolKind::Local => "local",
            SymbolKind::Function { .. } => "function",
        }
    }
}

/// One declared name.
///
/// `ty` is the declared type (for functions, the return type; the full
/// signature lives in the kind). `initialized` and `init_value` describe the
/// declaration's initializer in source, not any runtime state.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: Type,
    pub kind: SymbolKind,
    pub address: u32,
    pub initialized: bool,
    pub init_value: Option<String>,
}

/// A recorded lexical scope: its label and the symbols declared in it, in
/// declaration order. Records outlive the live scope stack so the driver
/// can list every scope a function ever opened.
#[derive(Debug, Clone)]
pub struct ScopeRecord {
    pub label: &'static str,
    pub symbols: Vec<SymbolId>,
}

/// The ordered list of scopes recorded while analyzing one function.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    pub name: String,
    pub scopes: Vec<ScopeRecord>,
}

/// Top-level symbols (functions), in declaration order with a name index.
#[derive(Debug, Clone, Default)]
pub struct GlobalTable {
    order: Vec<SymbolId>,
    by_name: FxHashMap<String, SymbolId>,
}

impl GlobalTable {
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Record a new global symbol. Callers check for duplicates first.
    pub fn insert(&mut self, name: String, id: SymbolId) {
        self.order.push(id);
        self.by_name.insert(name, id);
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
