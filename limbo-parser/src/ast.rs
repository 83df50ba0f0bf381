use crate::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(f64),
    StringLit(String),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: TokenKind,
        rhs: Box<Expr>,
    },
    /// A unary expression: prefix `-`/`+` on a factor, or a postfix
    /// crement (`++`/`--`) on an identifier in statement position.
    Unary {
        op: TokenKind,
        arg: Box<Expr>,
    },
    /// A call (e.g. `setblock(1, 2, 3, "minecraft:air")`).
    /// Calls only occur in statement position.
    FnCall {
        ident: String,
        args: Vec<Expr>,
    },
}

/// The header test of an `if` or `while` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Two expressions joined by exactly one comparison operator.
    Comparison {
        lhs: Expr,
        op: TokenKind,
        rhs: Expr,
    },
    /// A bare expression used as a truthiness test.
    Truthy(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let x = <expr>;`
    VariableDeclaration {
        ident: String,
        initializer: Expr,
    },
    /// `x = <expr>;`. Compound forms (`+=` etc.) are desugared at parse
    /// time into an assignment of a `Binary` over the identifier.
    Assignment {
        ident: String,
        value: Expr,
    },
    IfStatement {
        condition: Condition,
        then_block: Vec<Stmt>,
        /// Ordered `else if` branches.
        else_ifs: Vec<(Condition, Vec<Stmt>)>,
        /// The trailing bare `else` branch, if any.
        else_block: Option<Vec<Stmt>>,
    },
    WhileLoop {
        condition: Condition,
        body: Vec<Stmt>,
    },
    /// A call or crement statement.
    ExprStmt(Expr),
}
