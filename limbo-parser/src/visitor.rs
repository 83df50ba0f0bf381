//! Visitor pattern for AST nodes.

use crate::ast::{Condition, Expr, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
    fn visit_condition(&mut self, condition: &'ast Condition) {
        walk_condition(self, condition);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::NumberLit(_) => {}
        Expr::StringLit(_) => {}
        Expr::Identifier(_) => {}
        Expr::FnCall { ident: _, args } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Binary { lhs, op: _, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Unary { op: _, arg } => visitor.visit_expr(arg),
    }
}

pub fn walk_condition<'ast>(visitor: &mut impl Visitor<'ast>, condition: &'ast Condition) {
    match condition {
        Condition::Comparison { lhs, op: _, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Condition::Truthy(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    /// Iteratively visit all statements in a `Vec<Stmt>`.
    macro_rules! visit_stmt_list {
        ($visitor: expr, $body: expr) => {
            for stmt in $body {
                Visitor::visit_stmt($visitor, stmt);
            }
        };
    }

    match stmt {
        Stmt::VariableDeclaration {
            ident: _,
            initializer,
        } => visitor.visit_expr(initializer),
        Stmt::Assignment { ident: _, value } => visitor.visit_expr(value),
        Stmt::IfStatement {
            condition,
            then_block,
            else_ifs,
            else_block,
        } => {
            visitor.visit_condition(condition);
            visit_stmt_list!(visitor, then_block);
            for (condition, block) in else_ifs {
                visitor.visit_condition(condition);
                visit_stmt_list!(visitor, block);
            }
            if let Some(block) = else_block {
                visit_stmt_list!(visitor, block);
            }
        }
        Stmt::WhileLoop { condition, body } => {
            visitor.visit_condition(condition);
            visit_stmt_list!(visitor, body);
        }
        Stmt::ExprStmt(expr) => visitor.visit_expr(expr),
    }
}
