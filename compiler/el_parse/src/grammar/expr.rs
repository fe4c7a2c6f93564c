//! Operator precedence levels.

use el_ir::{BinaryOp, Node, TokenKind, UnaryOp};
use el_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a full expression, including `;` sequencing.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow
    /// on deeply nested expressions.
    pub(crate) fn parse_expr(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| self.parse_semicolon())
    }

    fn parse_semicolon(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_assignment()?;
        while self.cursor.eat(&TokenKind::Semicolon) {
            let right = self.parse_assignment()?;
            left = Node::Semicolon {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Lambda or right-associative assignment.
    ///
    /// The assignment target is parsed as a choice expression; whether it is
    /// actually assignable is decided at evaluation time.
    pub(crate) fn parse_assignment(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| {
            if let Some(params) = self.lambda_params_ahead() {
                return self.parse_lambda(params);
            }

            let target = self.parse_choice()?;
            if self.cursor.eat(&TokenKind::Eq) {
                let value = self.parse_assignment()?;
                return Ok(Node::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                });
            }
            Ok(target)
        })
    }

    /// `cond ? a : b`, right-associative.
    fn parse_choice(&mut self) -> Result<Node, ParseError> {
        let cond = self.parse_binary_or()?;
        if !self.cursor.eat(&TokenKind::Question) {
            return Ok(cond);
        }
        let then_branch = self.parse_choice()?;
        self.cursor.expect(&TokenKind::Colon)?;
        let else_branch = self.parse_choice()?;
        Ok(Node::Ternary {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    /// Parse `||` / `or`.
    fn parse_binary_or(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_binary_and()?;
        while self.cursor.eat(&TokenKind::OrOr) {
            let right = self.parse_binary_and()?;
            left = Node::binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    /// Parse `&&` / `and`.
    fn parse_binary_and(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_equality()?;
        while self.cursor.eat(&TokenKind::AndAnd) {
            let right = self.parse_equality()?;
            left = Node::binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_comparison()?;
        while let Some(op) = self.match_equality_op() {
            self.cursor.advance();
            let right = self.parse_comparison()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_concat()?;
        while let Some(op) = self.match_comparison_op() {
            self.cursor.advance();
            let right = self.parse_concat()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    /// Parse `+=`, which concatenates strings.
    fn parse_concat(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_additive()?;
        while self.cursor.eat(&TokenKind::PlusEq) {
            let right = self.parse_additive()?;
            left = Node::concat(left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.cursor.advance();
            let right = self.parse_unary()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Empty => UnaryOp::Empty,
            _ => return self.parse_value(),
        };
        self.cursor.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Node::unary(op, operand))
    }

    fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        }
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }
}
