//! Expression parsing with operator precedence
//! 
//! `*` and `/` bind tighter than `+` and `-`; all four are
//! left-associative. There is no unary minus.
//! 
//! A run of opening parentheses is consumed in one loop and closed group by
//! group, so `((((x))))` costs no recursion. Parentheses nested inside an
//! operand or argument list do recurse and count against
//! [`crate::parser::MAX_NESTING_DEPTH`]. Every parsed expression carries the
//! height of its tree, capped at [`MAX_EXPRESSION_DEPTH`].

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser, MAX_EXPRESSION_DEPTH};
use mcc_common::SourceLocation;

/// An expression and the height of its tree
type Measured = (Expression, usize);

impl Parser {
    /// Parse a full arithmetic expression
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_measured_expression().map(|(expr, _)| expr)
    }

    fn parse_measured_expression(&mut self) -> Result<Measured, ParseError> {
        self.parse_binary_expression(1)
    }

    /// Binary operator at the current token, if any
    fn peek_binary_op(&self) -> Option<BinaryOp> {
        match self.peek().map(|t| &t.token_type) {
            Some(TokenType::Plus) => Some(BinaryOp::Add),
            Some(TokenType::Minus) => Some(BinaryOp::Sub),
            Some(TokenType::Star) => Some(BinaryOp::Mul),
            Some(TokenType::Slash) => Some(BinaryOp::Div),
            _ => None,
        }
    }

    /// Precedence climbing over operators binding at least `min_precedence`
    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<Measured, ParseError> {
        let left = self.parse_primary_expression()?;
        self.parse_binary_operators(left, min_precedence)
    }

    /// Fold operators binding at least `min_precedence` onto `left`
    fn parse_binary_operators(
        &mut self,
        (mut left, mut height): Measured,
        min_precedence: u8,
    ) -> Result<Measured, ParseError> {
        while let Some(op) = self.peek_binary_op() {
            if op.precedence() < min_precedence {
                break;
            }
            let op_location = self.current_location();
            self.advance();

            let (right, right_height) = self.parse_binary_expression(op.precedence() + 1)?;
            height = 1 + height.max(right_height);
            if height > MAX_EXPRESSION_DEPTH {
                return Err(ParseError::NestingTooDeep {
                    construct: "expression".to_string(),
                    limit: MAX_EXPRESSION_DEPTH,
                    location: op_location,
                });
            }

            let span = left.span.extend(&right.span);
            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok((left, height))
    }

    /// '(' expr ')' | NUMBER | ID | ID '(' args ')'
    fn parse_primary_expression(&mut self) -> Result<Measured, ParseError> {
        let start = self.current_location();

        match self.peek().map(|t| t.token_type.clone()) {
            Some(TokenType::IntLiteral(value)) => {
                self.advance();
                Ok((Expression::new(ExpressionKind::Number(value), self.span_from(start)), 1))
            }

            Some(TokenType::Identifier(name)) => {
                self.advance();
                if self.check(&TokenType::LeftParen) {
                    self.parse_call(name, start)
                } else {
                    Ok((Expression::new(ExpressionKind::Identifier(name), self.span_from(start)), 1))
                }
            }

            Some(TokenType::LeftParen) => self.parse_parenthesized(),

            _ => Err(self.error_here("expression")),
        }
    }

    /// One or more parenthesis groups opened back to back
    /// 
    /// Groups only group: each closed group is the inner expression with its
    /// span widened to cover the parentheses.
    fn parse_parenthesized(&mut self) -> Result<Measured, ParseError> {
        self.enter_nested("parenthesized expression")?;

        let mut opened: Vec<SourceLocation> = Vec::new();
        while self.check(&TokenType::LeftParen) {
            opened.push(self.current_location());
            self.advance();
        }

        let mut group = self.parse_measured_expression()?;
        while let Some(open) = opened.pop() {
            self.expect(TokenType::RightParen, "parenthesized expression")?;
            group.0.span = self.span_from(open);
            if !opened.is_empty() {
                group = self.parse_binary_operators(group, 1)?;
            }
        }

        self.exit_nested();
        Ok(group)
    }

    /// Call arguments after the callee name: '(' (expr (',' expr)*)? ')'
    fn parse_call(
        &mut self,
        name: String,
        start: SourceLocation,
    ) -> Result<Measured, ParseError> {
        self.enter_nested("argument list")?;
        self.expect(TokenType::LeftParen, "call")?;

        let mut arguments = Vec::new();
        let mut height = 0;
        if !self.check(&TokenType::RightParen) {
            loop {
                let (arg, arg_height) = self.parse_measured_expression()?;
                height = height.max(arg_height);
                arguments.push(arg);
                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenType::RightParen, "argument list")?;
        self.exit_nested();

        let height = height + 1;
        if height > MAX_EXPRESSION_DEPTH {
            return Err(ParseError::NestingTooDeep {
                construct: "expression".to_string(),
                limit: MAX_EXPRESSION_DEPTH,
                location: start,
            });
        }

        Ok((
            Expression::new(ExpressionKind::Call { name, arguments }, self.span_from(start)),
            height,
        ))
    }
}
