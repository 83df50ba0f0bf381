//! Constant-propagation pass.
//!
//! Walks one function body in source order, tracking the literal-only `let`
//! bindings, and evaluates the arguments of every call site whose arguments
//! can be materialized before generation. The generator consumes the result
//! without re-walking initializers.

use std::collections::HashMap;

use limbo_mappings::Value;
use limbo_parser::ast::{Expr, Stmt};
use limbo_parser::lexer::TokenKind;
use limbo_parser::visitor::{walk_stmt, Visitor};

/// A [`HashMap`] mapping call-site [`Expr::FnCall`] nodes to their evaluated
/// argument values. Calls with a non-materializable argument have no entry.
pub type ResolvedArgTable = HashMap<*const Expr, Vec<Value>>;

/// Constant-propagation pass.
pub struct ConstProp {
    /// Variables currently bound to a literal value. The dialect has no
    /// shadowing scopes, so one flat table per function is enough.
    bindings: HashMap<String, Value>,
    resolved_args: ResolvedArgTable,
}

impl ConstProp {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            resolved_args: ResolvedArgTable::new(),
        }
    }

    /// Runs the pass over a function body.
    pub fn run(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    /// Returns the [`HashMap`] mapping call sites to evaluated arguments.
    pub fn resolved_args(&self) -> &ResolvedArgTable {
        &self.resolved_args
    }

    /// Evaluates a literal initializer: a number or string literal,
    /// optionally behind prefix `-`/`+` signs for numbers. Anything else is
    /// not a compile-time value.
    fn const_value(&self, expr: &Expr) -> Option<Value> {
        match expr {
            Expr::NumberLit(val) => Some(Value::Number(*val)),
            Expr::StringLit(val) => Some(Value::Str(val.clone())),
            Expr::Unary { op, arg } => match (op, self.const_value(arg)?) {
                (TokenKind::Minus, Value::Number(val)) => Some(Value::Number(-val)),
                (TokenKind::Plus, Value::Number(val)) => Some(Value::Number(val)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Evaluates one call argument. Bound identifiers substitute their
    /// value; unbound ones pass through as opaque text equal to their name.
    fn eval_arg(&self, expr: &Expr) -> Option<Value> {
        match expr {
            Expr::Identifier(ident) => Some(
                self.bindings
                    .get(ident)
                    .cloned()
                    .unwrap_or_else(|| Value::Str(ident.clone())),
            ),
            _ => self.const_value(expr),
        }
    }
}

impl Default for ConstProp {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ast> Visitor<'ast> for ConstProp {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            Stmt::VariableDeclaration { ident, initializer } => {
                match self.const_value(initializer) {
                    Some(value) => {
                        // A later `let` overwrites an earlier binding.
                        self.bindings.insert(ident.clone(), value);
                    }
                    None => {
                        // Bound to a non-literal: the variable is opaque from
                        // here on, a stale constant must not leak through.
                        self.bindings.remove(ident);
                    }
                }
            }
            Stmt::ExprStmt(expr) => {
                if let Expr::FnCall { args, .. } = expr {
                    let values: Option<Vec<Value>> =
                        args.iter().map(|arg| self.eval_arg(arg)).collect();
                    if let Some(values) = values {
                        self.resolved_args.insert(expr as *const Expr, values);
                    }
                }
            }
            // If/while bodies are walked in source order; assignments do not
            // touch the binding table (only `let` is tracked).
            _ => walk_stmt(self, stmt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limbo_parser::lexer::tokenize;
    use limbo_parser::parser::Parser;

    fn parse(source: &str) -> Vec<Stmt> {
        let source = source.into();
        let tokens = tokenize(&source).unwrap();
        Parser::new(&tokens).parse_program().unwrap()
    }

    /// Collects the evaluated argument vectors of every call in the program,
    /// in source order. `None` marks a call the pass could not materialize.
    fn call_args(program: &[Stmt]) -> Vec<Option<Vec<Value>>> {
        fn collect<'a>(
            stmts: &'a [Stmt],
            table: &ResolvedArgTable,
            out: &mut Vec<Option<Vec<Value>>>,
        ) {
            for stmt in stmts {
                match stmt {
                    Stmt::ExprStmt(expr) => {
                        if let Expr::FnCall { .. } = expr {
                            out.push(table.get(&(expr as *const Expr)).cloned());
                        }
                    }
                    Stmt::IfStatement {
                        then_block,
                        else_ifs,
                        else_block,
                        ..
                    } => {
                        collect(then_block, table, out);
                        for (_, block) in else_ifs {
                            collect(block, table, out);
                        }
                        if let Some(block) = else_block {
                            collect(block, table, out);
                        }
                    }
                    Stmt::WhileLoop { body, .. } => collect(body, table, out),
                    _ => {}
                }
            }
        }

        let mut pass = ConstProp::new();
        pass.run(program);
        let mut out = Vec::new();
        collect(program, pass.resolved_args(), &mut out);
        out
    }

    #[test]
    fn literals_and_bound_identifiers_substitute() {
        let program = parse(
            r#"
            let y = 64;
            let block = "minecraft:stone";
            setblock(0, y, -2, block);
        "#,
        );
        assert_eq!(
            call_args(&program),
            vec![Some(vec![
                Value::Number(0.0),
                Value::Number(64.0),
                Value::Number(-2.0),
                Value::Str("minecraft:stone".to_string()),
            ])]
        );
    }

    #[test]
    fn unbound_identifiers_pass_through_as_text() {
        let program = parse("say(greeting);");
        assert_eq!(
            call_args(&program),
            vec![Some(vec![Value::Str("greeting".to_string())])]
        );
    }

    #[test]
    fn rebinding_overwrites_in_source_order() {
        let program = parse(
            r#"
            let y = 1;
            foo(y);
            let y = 2;
            foo(y);
        "#,
        );
        assert_eq!(
            call_args(&program),
            vec![
                Some(vec![Value::Number(1.0)]),
                Some(vec![Value::Number(2.0)]),
            ]
        );
    }

    #[test]
    fn non_literal_rebinding_unbinds() {
        let program = parse(
            r#"
            let y = 1;
            let y = y + 1;
            foo(y);
        "#,
        );
        assert_eq!(
            call_args(&program),
            vec![Some(vec![Value::Str("y".to_string())])]
        );
    }

    #[test]
    fn signed_literal_initializers() {
        let program = parse(
            r#"
            let depth = -12;
            foo(depth, +3);
        "#,
        );
        assert_eq!(
            call_args(&program),
            vec![Some(vec![Value::Number(-12.0), Value::Number(3.0)])]
        );
    }

    #[test]
    fn non_materializable_arguments_get_no_entry() {
        let program = parse("foo(1 + 2);");
        assert_eq!(call_args(&program), vec![None]);
    }

    #[test]
    fn lets_inside_blocks_are_seen() {
        let program = parse(
            r#"
            if (mode == 1) {
                let block = "minecraft:air";
                setblock(0, 0, 0, block);
            }
        "#,
        );
        assert_eq!(
            call_args(&program),
            vec![Some(vec![
                Value::Number(0.0),
                Value::Number(0.0),
                Value::Number(0.0),
                Value::Str("minecraft:air".to_string()),
            ])]
        );
    }
}
