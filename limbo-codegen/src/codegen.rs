//! Lowers an AST into game command strings.

use limbo_mappings::{Profile, ResolveError};
use limbo_parser::ast::{Expr, Stmt};
use limbo_parser::visitor::Visitor;
use limbo_passes::const_prop::ResolvedArgTable;
use limbo_source::{CompileError, Source};

/// Generate command strings from an abstract syntax tree.
///
/// Call sites are processed in source order. The first call that cannot be
/// resolved halts generation for the remainder of the function: already
/// generated commands are kept, and the failure is reported into the
/// `Source`'s error sink instead of being silently dropped.
pub struct Codegen<'a> {
    /// Name of the function being generated, for diagnostics.
    function: String,
    commands: Vec<String>,
    profile: &'a Profile,
    resolved_args: &'a ResolvedArgTable,
    source: &'a Source<'a>,
    halted: bool,
}

impl<'a> Codegen<'a> {
    pub fn new(
        function: String,
        profile: &'a Profile,
        resolved_args: &'a ResolvedArgTable,
        source: &'a Source<'a>,
    ) -> Self {
        Self {
            function,
            commands: Vec::new(),
            profile,
            resolved_args,
            source,
            halted: false,
        }
    }

    /// Generates commands for a whole function body.
    /// To get the generated commands, call [`Codegen::into_commands`].
    pub fn gen_function(&mut self, body: &'a [Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    /// Returns `false` once an unresolved call has halted generation.
    pub fn is_complete(&self) -> bool {
        !self.halted
    }

    /// Consumes `self` and returns the generated commands.
    #[must_use]
    pub fn into_commands(self) -> Vec<String> {
        self.commands
    }

    fn emit_call(&mut self, call: &Expr, ident: &str) {
        let args = match self.resolved_args.get(&(call as *const Expr)) {
            Some(args) => args,
            None => {
                self.halt(CompileError::unresolved_call(format!(
                    "in `{}`: arguments of call to `{}` are not compile-time values",
                    self.function, ident
                )));
                return;
            }
        };

        match self.profile.resolve_global(ident, args) {
            Ok(command) => self.commands.push(command),
            Err(err) => {
                let message = format!("in `{}`: {}", self.function, err);
                let error = match err {
                    ResolveError::UnknownFunction { .. } => CompileError::unresolved_call(message),
                    ResolveError::SignatureMismatch { .. } => CompileError::mismatch(message),
                };
                self.halt(error);
            }
        }
    }

    fn halt(&mut self, error: CompileError) {
        self.source.errors.add_error(error);
        self.halted = true;
    }
}

impl<'a> Visitor<'a> for Codegen<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        // Do not use default walking logic.

        if self.halted {
            return;
        }

        match stmt {
            // Declarations and assignments have no runtime counterpart here;
            // the constant pass already folded their effect into call sites.
            Stmt::VariableDeclaration { .. } | Stmt::Assignment { .. } => {}
            Stmt::ExprStmt(expr) => {
                // Crement statements emit nothing.
                if let Expr::FnCall { ident, .. } = expr {
                    self.emit_call(expr, ident);
                }
            }
            // Conditions are not evaluated (there is no interpreter); nested
            // calls are emitted flattened, in source order.
            Stmt::IfStatement {
                then_block,
                else_ifs,
                else_block,
                ..
            } => {
                for stmt in then_block {
                    self.visit_stmt(stmt);
                }
                for (_, block) in else_ifs {
                    for stmt in block {
                        self.visit_stmt(stmt);
                    }
                }
                if let Some(block) = else_block {
                    for stmt in block {
                        self.visit_stmt(stmt);
                    }
                }
            }
            Stmt::WhileLoop { body, .. } => {
                for stmt in body {
                    self.visit_stmt(stmt);
                }
            }
        }
    }
}
