use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> Result<Expr, CompileError> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr, CompileError> {
        // NOTE: prefix operators and grouping are handled here
        match self.current().kind {
            TokenKind::NumberLit(_) | TokenKind::StringLit(_) => self.parse_literal_expr(),
            TokenKind::Identifier(_) => self.parse_identifier_expr(),
            TokenKind::OpenParen => {
                self.next();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            }
            TokenKind::Minus => {
                self.next();
                Ok(Expr::Unary {
                    op: TokenKind::Minus,
                    arg: Box::new(self.parse_primary_expr()?),
                })
            }
            TokenKind::Plus => {
                self.next();
                Ok(Expr::Unary {
                    op: TokenKind::Plus,
                    arg: Box::new(self.parse_primary_expr()?),
                })
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression, use [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, CompileError> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current().kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // the current token is a valid binop
            let binop = self.current().kind.clone();
            self.next();

            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op: binop,
                rhs: Box::new(rhs),
            }
        }

        Ok(lhs)
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be either a number literal or a string literal.
    fn parse_literal_expr(&mut self) -> Result<Expr, CompileError> {
        let val = match self.current().kind {
            TokenKind::NumberLit(val) => Expr::NumberLit(val),
            TokenKind::StringLit(ref val) => Expr::StringLit(val.clone()),
            _ => return Err(self.unexpected("literal")),
        };
        self.next(); // eat parsed token
        Ok(val)
    }

    /* Expressions.Identifier */
    /// Parses an identifier expression. Calls never occur here; they are
    /// dispatched in statement position with one token of lookahead.
    fn parse_identifier_expr(&mut self) -> Result<Expr, CompileError> {
        let ident = self.expect_identifier()?;
        Ok(Expr::Identifier(ident))
    }

    /* Conditions */
    /// Parses the header test of an `if` or `while` statement: an expression
    /// optionally followed by one comparison operator and a second
    /// expression. Without a comparison the condition degrades to a
    /// truthiness test over the bare expression.
    pub fn parse_condition(&mut self) -> Result<Condition, CompileError> {
        let lhs = self.parse_expr()?;

        if self.current().kind.is_comparison() {
            let op = self.current().kind.clone();
            self.next();
            let rhs = self.parse_expr()?;
            Ok(Condition::Comparison { lhs, op, rhs })
        } else {
            Ok(Condition::Truthy(lhs))
        }
    }
}
