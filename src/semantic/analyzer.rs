//! Two-pass semantic analyzer
//!
//! Pass one records every function signature in the global table, so bodies
//! may call functions declared later in the file. Pass two walks each body
//! with a stack of lexical scopes, declaring symbols, resolving identifier
//! uses (innermost scope wins), and checking the type rules.
//!
//! # Type rules
//!
//! - Assignability: equal types, plus the single int→float widening. No
//!   narrowing, no bool↔numeric coercion.
//! - Conditions accept `bool`, `int`, and `float`.
//! - Arithmetic requires numeric operands; the result is `float` if either
//!   operand is `float` or the operator is `/`, else `int`.
//! - Comparisons and logical operators yield `bool`.
//! - Unary `!` needs a boolean-compatible operand and yields `bool`; `~`
//!   needs `int`; `-` needs a numeric operand and keeps its type.

use crate::parser::ast::*;
use crate::semantic::errors::SemanticError;
use crate::semantic::symbols::{
    FunctionTable, GlobalTable, ScopeRecord, SymbolEntry, SymbolId, SymbolKind,
};
use rustc_hash::FxHashMap;

/// First diagnostic address handed out; each declaration advances by 4.
const ADDR_BASE: u32 = 0x1000;
const ADDR_STEP: u32 = 4;

/// Everything a successful analysis produces.
///
/// The AST itself is left untouched; identifier uses are resolved through
/// `resolutions`, keyed by each [`Identifier`]'s [`NodeId`].
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Arena of every declared symbol, indexed by [`SymbolId`].
    pub symbols: Vec<SymbolEntry>,
    /// Top-level functions.
    pub globals: GlobalTable,
    /// Per-function recorded scope lists, in source order.
    pub functions: Vec<FunctionTable>,
    /// Identifier node → declared symbol.
    pub resolutions: FxHashMap<NodeId, SymbolId>,
}

impl Analysis {
    pub fn symbol(&self, id: SymbolId) -> &SymbolEntry {
        &self.symbols[id.0]
    }

    /// The symbol an identifier node resolved to, if analysis reached it.
    pub fn resolve(&self, node: NodeId) -> Option<&SymbolEntry> {
        self.resolutions.get(&node).map(|id| self.symbol(*id))
    }
}

/// `source` may be stored into a location of type `target`.
pub fn assignable(target: Type, source: Type) -> bool {
    target == source || (target == Type::Float && source == Type::Int)
}

/// Types usable directly as a condition.
pub fn boolean_compatible(ty: Type) -> bool {
    matches!(ty, Type::Bool | Type::Int | Type::Float)
}

fn is_numeric(ty: Type) -> bool {
    matches!(ty, Type::Int | Type::Float)
}

/// One live lexical scope: its name map plus the index of the record that
/// outlives it in the current function's scope list.
struct LiveScope {
    names: FxHashMap<String, SymbolId>,
    record: usize,
}

struct CurrentFunction {
    name: String,
    return_type: Type,
}

/// Two-pass semantic analyzer. One-shot: `analyze` consumes the analyzer,
/// so every run starts from fresh state.
pub struct Analyzer {
    symbols: Vec<SymbolEntry>,
    globals: GlobalTable,
    functions: Vec<FunctionTable>,
    resolutions: FxHashMap<NodeId, SymbolId>,
    scopes: Vec<LiveScope>,
    recorded: Vec<ScopeRecord>,
    current: Option<CurrentFunction>,
    next_addr: u32,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            globals: GlobalTable::default(),
            functions: Vec::new(),
            resolutions: FxHashMap::default(),
            scopes: Vec::new(),
            recorded: Vec::new(),
            current: None,
            next_addr: ADDR_BASE,
        }
    }

    /// Validate the program, producing its symbol tables or the first error.
    pub fn analyze(mut self, program: &Program) -> Result<Analysis, SemanticError> {
        // First pass: collect signatures so bodies may forward-reference.
        for function in &program.functions {
            self.declare_function(function)?;
        }

        // Second pass: analyze each body.
        for function in &program.functions {
            self.analyze_function(function)?;
        }

        Ok(Analysis {
            symbols: self.symbols,
            globals: self.globals,
            functions: self.functions,
            resolutions: self.resolutions,
        })
    }

    fn declare_function(&mut self, function: &Function) -> Result<(), SemanticError> {
        if self.globals.contains(&function.name) {
            return Err(SemanticError::DuplicateDeclaration {
                name: function.name.clone(),
                line: function.line,
            });
        }

        let param_types = function.params.iter().map(|p| p.ty).collect();
        let address = self.alloc_addr();
        let id = SymbolId(self.symbols.len());
        self.symbols.push(SymbolEntry {
            name: function.name.clone(),
            ty: function.return_type,
            kind: SymbolKind::Function {
                return_type: function.return_type,
                param_types,
            },
            address,
            initialized: true,
            init_value: None,
        });
        self.globals.insert(function.name.clone(), id);
        Ok(())
    }

    fn analyze_function(&mut self, function: &Function) -> Result<(), SemanticError> {
        self.current = Some(CurrentFunction {
            name: function.name.clone(),
            return_type: function.return_type,
        });
        self.recorded = Vec::new();

        // Entry scope holds the parameters; the body block gets its own.
        self.push_scope("function");
        for param in &function.params {
            self.declare(&param.name, param.ty, SymbolKind::Param, None, function.line)?;
        }
        self.analyze_block(&function.body)?;
        self.pop_scope();

        self.functions.push(FunctionTable {
            name: function.name.clone(),
            scopes: std::mem::take(&mut self.recorded),
        });
        self.current = None;
        Ok(())
    }

    fn analyze_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        self.push_scope("block");
        for stmt in &block.statements {
            self.analyze_stmt(stmt)?;
        }
        self.pop_scope();
        Ok(())
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::VarDecl {
                ty,
                name,
                init,
                line,
            } => {
                let init_value = init.as_ref().map(describe_expr);
                self.declare(name, *ty, SymbolKind::Local, init_value, *line)?;
                if let Some(init) = init {
                    let init_ty = self.type_of(init)?;
                    if !assignable(*ty, init_ty) {
                        return Err(SemanticError::TypeMismatch {
                            message: format!(
                                "Cannot initialize variable '{}' of type {} with {}",
                                name, ty, init_ty
                            ),
                            line: *line,
                        });
                    }
                }
                Ok(())
            }

            Stmt::Assign {
                target,
                value,
                line,
            } => {
                let target_ty = self.resolve_variable(target)?;
                let value_ty = self.type_of(value)?;
                if !assignable(target_ty, value_ty) {
                    return Err(SemanticError::TypeMismatch {
                        message: format!(
                            "Cannot assign {} to variable '{}' of type {}",
                            value_ty, target.name, target_ty
                        ),
                        line: *line,
                    });
                }
                Ok(())
            }

            Stmt::If {
                cond,
                then_block,
                else_block,
                ..
            } => {
                self.check_condition(cond, "if")?;
                self.analyze_block(then_block)?;
                if let Some(else_block) = else_block {
                    self.analyze_block(else_block)?;
                }
                Ok(())
            }

            Stmt::While { cond, body, .. } => {
                self.check_condition(cond, "while")?;
                self.analyze_block(body)
            }

            Stmt::For {
                init,
                cond,
                step,
                body,
                ..
            } => {
                // One merged scope covers init, cond, step and the body, so
                // a loop variable declared in the header is visible
                // throughout and gone right after the loop.
                self.push_scope("for");
                if let Some(init) = init {
                    self.analyze_stmt(init)?;
                }
                if let Some(cond) = cond {
                    self.check_condition(cond, "for")?;
                }
                if let Some(step) = step {
                    self.analyze_stmt(step)?;
                }
                for stmt in &body.statements {
                    self.analyze_stmt(stmt)?;
                }
                self.pop_scope();
                Ok(())
            }

            Stmt::Return { value, line } => {
                let value_ty = self.type_of(value)?;
                let (name, expected) = match &self.current {
                    Some(current) => (current.name.clone(), current.return_type),
                    None => unreachable!("return statement outside a function"),
                };
                if !assignable(expected, value_ty) {
                    return Err(SemanticError::TypeMismatch {
                        message: format!(
                            "Return type mismatch in function '{}': expected {}, got {}",
                            name, expected, value_ty
                        ),
                        line: *line,
                    });
                }
                Ok(())
            }

            // Any typable expression may be printed.
            Stmt::Print { value, .. } => {
                self.type_of(value)?;
                Ok(())
            }

            Stmt::Read { target, .. } => {
                self.resolve_variable(target)?;
                Ok(())
            }

            Stmt::Call(call) => {
                self.check_call(call)?;
                Ok(())
            }

            Stmt::Expr(expr) => {
                self.type_of(expr)?;
                Ok(())
            }
        }
    }

    /// Check a condition expression for boolean compatibility.
    fn check_condition(&mut self, cond: &Expr, construct: &str) -> Result<(), SemanticError> {
        let ty = self.type_of(cond)?;
        if !boolean_compatible(ty) {
            return Err(SemanticError::TypeMismatch {
                message: format!(
                    "Condition of '{}' has type {}, which is not boolean-compatible",
                    construct, ty
                ),
                line: cond.line(),
            });
        }
        Ok(())
    }

    /// Infer the type of an expression, checking operand rules on the way.
    fn type_of(&mut self, expr: &Expr) -> Result<Type, SemanticError> {
        match expr {
            Expr::Constant { value, .. } => Ok(match value {
                Constant::Int(_) => Type::Int,
                Constant::Float(_) => Type::Float,
                Constant::Bool(_) => Type::Bool,
            }),

            Expr::Identifier(ident) => self.resolve_variable(ident),

            Expr::Unary { op, operand, line } => {
                let ty = self.type_of(operand)?;
                match op {
                    UnOp::Not => {
                        if !boolean_compatible(ty) {
                            return Err(SemanticError::TypeMismatch {
                                message: format!(
                                    "Operator '!' requires a boolean-compatible operand, got {}",
                                    ty
                                ),
                                line: *line,
                            });
                        }
                        Ok(Type::Bool)
                    }
                    UnOp::BitNot => {
                        if ty != Type::Int {
                            return Err(SemanticError::TypeMismatch {
                                message: format!("Operator '~' requires an int operand, got {}", ty),
                                line: *line,
                            });
                        }
                        Ok(Type::Int)
                    }
                    UnOp::Neg => {
                        if !is_numeric(ty) {
                            return Err(SemanticError::TypeMismatch {
                                message: format!(
                                    "Unary '-' requires a numeric operand, got {}",
                                    ty
                                ),
                                line: *line,
                            });
                        }
                        Ok(ty)
                    }
                }
            }

            Expr::Binary {
                op,
                left,
                right,
                line,
            } => {
                let left_ty = self.type_of(left)?;
                let right_ty = self.type_of(right)?;

                if op.is_arithmetic() {
                    if !is_numeric(left_ty) || !is_numeric(right_ty) {
                        return Err(SemanticError::TypeMismatch {
                            message: format!(
                                "Operator '{}' requires numeric operands, got {} and {}",
                                op, left_ty, right_ty
                            ),
                            line: *line,
                        });
                    }
                    // Division always widens; so does any float operand.
                    if left_ty == Type::Float || right_ty == Type::Float || *op == BinOp::Div {
                        Ok(Type::Float)
                    } else {
                        Ok(Type::Int)
                    }
                } else {
                    // Comparisons and logical operators yield bool; their
                    // operands only need to be typable.
                    Ok(Type::Bool)
                }
            }

            Expr::Call(call) => self.check_call(call),
        }
    }

    /// Validate a call against the recorded signature; yields the declared
    /// return type.
    fn check_call(&mut self, call: &FuncCall) -> Result<Type, SemanticError> {
        let id = match self.globals.get(&call.name) {
            Some(id) => id,
            None => {
                return Err(SemanticError::UndefinedFunctionCall {
                    name: call.name.clone(),
                    line: call.line,
                });
            }
        };

        let (return_type, param_types) = match &self.symbols[id.0].kind {
            SymbolKind::Function {
                return_type,
                param_types,
            } => (*return_type, param_types.clone()),
            _ => {
                return Err(SemanticError::UndefinedFunctionCall {
                    name: call.name.clone(),
                    line: call.line,
                });
            }
        };

        if call.args.len() != param_types.len() {
            return Err(SemanticError::ArityMismatch {
                name: call.name.clone(),
                expected: param_types.len(),
                found: call.args.len(),
                line: call.line,
            });
        }

        for (index, (arg, expected)) in call.args.iter().zip(&param_types).enumerate() {
            let actual = self.type_of(arg)?;
            if !assignable(*expected, actual) {
                return Err(SemanticError::TypeMismatch {
                    message: format!(
                        "Argument {} of function '{}' expects {}, got {}",
                        index + 1,
                        call.name,
                        expected,
                        actual
                    ),
                    line: call.line,
                });
            }
        }

        Ok(return_type)
    }

    /// Look an identifier up through the scope stack, innermost first, and
    /// record the resolution under the identifier's node id.
    fn resolve_variable(&mut self, ident: &Identifier) -> Result<Type, SemanticError> {
        let found = self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.names.get(&ident.name).copied());

        match found {
            Some(id) => {
                self.resolutions.insert(ident.id, id);
                Ok(self.symbols[id.0].ty)
            }
            None => Err(SemanticError::UndeclaredUse {
                name: ident.name.clone(),
                line: ident.line,
            }),
        }
    }

    /// Declare a name in the current scope; duplicate names within one
    /// scope are an error.
    fn declare(
        &mut self,
        name: &str,
        ty: Type,
        kind: SymbolKind,
        init_value: Option<String>,
        line: usize,
    ) -> Result<SymbolId, SemanticError> {
        let address = self.alloc_addr();
        let id = SymbolId(self.symbols.len());

        let scope = match self.scopes.last_mut() {
            Some(scope) => scope,
            None => unreachable!("declaration outside any scope"),
        };
        if scope.names.contains_key(name) {
            return Err(SemanticError::DuplicateDeclaration {
                name: name.to_string(),
                line,
            });
        }
        scope.names.insert(name.to_string(), id);
        let record = scope.record;

        self.symbols.push(SymbolEntry {
            name: name.to_string(),
            ty,
            kind,
            address,
            initialized: init_value.is_some(),
            init_value,
        });
        self.recorded[record].symbols.push(id);
        Ok(id)
    }

    fn push_scope(&mut self, label: &'static str) {
        self.recorded.push(ScopeRecord {
            label,
            symbols: Vec::new(),
        });
        self.scopes.push(LiveScope {
            names: FxHashMap::default(),
            record: self.recorded.len() - 1,
        });
    }

    /// Pop the live scope; its record stays for reporting.
    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn alloc_addr(&mut self) -> u32 {
        let address = self.next_addr;
        self.next_addr += ADDR_STEP;
        address
    }
}

/// Compact one-line rendering of an initializer for symbol listings.
fn describe_expr(expr: &Expr) -> String {
    match expr {
        Expr::Constant { value, .. } => value.to_string(),
        Expr::Identifier(ident) => ident.name.clone(),
        Expr::Unary { op, operand, .. } => format!("{}{}", op, describe_expr(operand)),
        Expr::Binary {
            op, left, right, ..
        } => format!("{} {} {}", describe_expr(left), op, describe_expr(right)),
        Expr::Call(call) => {
            let args = call
                .args
                .iter()
                .map(describe_expr)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({})", call.name, args)
        }
    }
}
