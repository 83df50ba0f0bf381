use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> Result<Stmt, CompileError> {
        match self.current().kind {
            TokenKind::Let => self.parse_variable_declaration(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_loop(),
            // One token of lookahead: `IDENT (` starts a call, anything else
            // an assignment or crement statement.
            TokenKind::Identifier(_) => {
                if self.peek().kind == TokenKind::OpenParen {
                    self.parse_fn_call_stmt()
                } else {
                    self.parse_assignment()
                }
            }
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Parses a braced, possibly empty block of statements.
    pub fn parse_block(&mut self) -> Result<Vec<Stmt>, CompileError> {
        self.expect(TokenKind::OpenBrace)?;

        let mut body = Vec::new();
        while !self.eat(TokenKind::CloseBrace) {
            body.push(self.parse_stmt()?);
        }

        Ok(body)
    }

    fn parse_variable_declaration(&mut self) -> Result<Stmt, CompileError> {
        self.expect(TokenKind::Let)?;
        let ident = self.expect_identifier()?;
        self.expect(TokenKind::Equals)?;
        let initializer = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::VariableDeclaration { ident, initializer })
    }

    /// Parses the statements starting with a bare identifier: plain and
    /// compound assignments and the postfix crements.
    fn parse_assignment(&mut self) -> Result<Stmt, CompileError> {
        let ident = self.expect_identifier()?;

        match self.current().kind {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = self.current().kind.clone();
                self.next();
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::ExprStmt(Expr::Unary {
                    op,
                    arg: Box::new(Expr::Identifier(ident)),
                }))
            }
            TokenKind::PlusEquals
            | TokenKind::MinusEquals
            | TokenKind::AsteriskEquals
            | TokenKind::SlashEquals => {
                // Desugared here, not deferred to generation:
                // `x += e` becomes `x = x + e`.
                let op = match self.current().kind {
                    TokenKind::PlusEquals => TokenKind::Plus,
                    TokenKind::MinusEquals => TokenKind::Minus,
                    TokenKind::AsteriskEquals => TokenKind::Asterisk,
                    TokenKind::SlashEquals => TokenKind::Slash,
                    _ => unreachable!(),
                };
                self.next();
                let rhs = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::Assignment {
                    ident: ident.clone(),
                    value: Expr::Binary {
                        lhs: Box::new(Expr::Identifier(ident)),
                        op,
                        rhs: Box::new(rhs),
                    },
                })
            }
            _ => {
                self.expect(TokenKind::Equals)?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::Assignment { ident, value })
            }
        }
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::OpenParen)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::CloseParen)?;
        let then_block = self.parse_block()?;

        let mut else_ifs = Vec::new();
        let mut else_block = None;
        while self.eat(TokenKind::Else) {
            if self.eat(TokenKind::If) {
                self.expect(TokenKind::OpenParen)?;
                let condition = self.parse_condition()?;
                self.expect(TokenKind::CloseParen)?;
                let block = self.parse_block()?;
                else_ifs.push((condition, block));
            } else {
                // a trailing bare `else` terminates the chain
                else_block = Some(self.parse_block()?);
                break;
            }
        }

        Ok(Stmt::IfStatement {
            condition,
            then_block,
            else_ifs,
            else_block,
        })
    }

    fn parse_while_loop(&mut self) -> Result<Stmt, CompileError> {
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::OpenParen)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::WhileLoop { condition, body })
    }

    fn parse_fn_call_stmt(&mut self) -> Result<Stmt, CompileError> {
        let ident = self.expect_identifier()?;
        self.expect(TokenKind::OpenParen)?;

        let mut args = Vec::new();
        if !self.eat(TokenKind::CloseParen) {
            loop {
                args.push(self.parse_expr()?);

                if self.eat(TokenKind::CloseParen) {
                    break;
                }
                self.expect(TokenKind::Comma)?;
            }
        }

        self.expect(TokenKind::Semi)?;
        Ok(Stmt::ExprStmt(Expr::FnCall { ident, args }))
    }
}
