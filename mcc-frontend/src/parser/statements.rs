//! Statement and function definition parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Whether the current token can begin a statement
    pub(crate) fn starts_statement(&self) -> bool {
        self.check_identifier() || self.check(&TokenType::If) || self.check(&TokenType::While)
    }

    /// statement := assign | if_stmt | if_else_stmt | while_stmt
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek().map(|t| &t.token_type) {
            Some(TokenType::Identifier(_)) => self.parse_assignment(),
            Some(TokenType::If) => self.parse_if_statement(),
            Some(TokenType::While) => self.parse_while_statement(),
            _ => Err(self.error_here("statement")),
        }
    }

    /// assign := ID '=' expr ';'
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_location();
        let target = self.expect_identifier("assignment")?;
        self.expect(TokenType::Equal, "assignment")?;
        let value = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "assignment")?;

        Ok(Statement::new(
            StatementKind::Assign { target, value },
            self.span_from(start),
        ))
    }

    /// if_stmt | if_else_stmt, told apart by an `else` after the block
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_location();
        self.expect(TokenType::If, "if statement")?;
        let condition = self.parse_condition("if condition")?;
        let then_body = self.parse_block()?;

        let kind = if self.match_token(&TokenType::Else) {
            let else_body = self.parse_block()?;
            StatementKind::IfElse { condition, then_body, else_body }
        } else {
            StatementKind::If { condition, then_body }
        };

        Ok(Statement::new(kind, self.span_from(start)))
    }

    /// while_stmt := 'while' '(' expr '>' expr ')' '{' statement* '}'
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_location();
        self.expect(TokenType::While, "while statement")?;
        let condition = self.parse_condition("while condition")?;
        let body = self.parse_block()?;

        Ok(Statement::new(
            StatementKind::While { condition, body },
            self.span_from(start),
        ))
    }

    /// '(' expr '>' expr ')'
    fn parse_condition(&mut self, context: &str) -> Result<Condition, ParseError> {
        self.expect(TokenType::LeftParen, context)?;
        let left = self.parse_expression()?;
        self.expect(TokenType::Greater, context)?;
        let right = self.parse_expression()?;
        self.expect(TokenType::RightParen, context)?;

        Ok(Condition { left, right })
    }

    /// '{' statement* '}'
    fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.enter_nested("block")?;
        self.expect(TokenType::LeftBrace, "block")?;
        let mut statements = Vec::new();
        while self.starts_statement() {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenType::RightBrace, "block")?;
        self.exit_nested();

        Ok(statements)
    }

    /// func_def := 'function' ID '(' params ')' '{' statement* 'return' expr ';' '}'
    pub fn parse_function_definition(&mut self) -> Result<FunctionDefinition, ParseError> {
        let start = self.current_location();
        self.expect(TokenType::Function, "function definition")?;
        let name = self.expect_identifier("function definition")?;

        self.expect(TokenType::LeftParen, "parameter list")?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenType::RightParen, "parameter list")?;

        self.expect(TokenType::LeftBrace, "function body")?;
        let mut body = Vec::new();
        while self.starts_statement() {
            body.push(self.parse_statement()?);
        }
        self.expect(TokenType::Return, "function body")?;
        let return_expr = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "return statement")?;
        self.expect(TokenType::RightBrace, "function body")?;

        Ok(FunctionDefinition {
            name,
            params,
            body,
            return_expr,
            span: self.span_from(start),
        })
    }

    /// params := (ID (',' ID)*)?
    fn parse_parameter_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut params = Vec::new();
        if self.check_identifier() {
            params.push(self.expect_identifier("parameter list")?);
            while self.match_token(&TokenType::Comma) {
                params.push(self.expect_identifier("parameter list")?);
            }
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::tokenize;
    use crate::parser::{ParseError, Parser, MAX_NESTING_DEPTH};
    use mcc_common::CompilerError;
    use pretty_assertions::assert_eq;

    fn parse_statement_from_str(input: &str) -> Result<Statement, ParseError> {
        Parser::new(tokenize(input)).parse_statement()
    }

    fn parse_function_from_str(input: &str) -> Result<FunctionDefinition, ParseError> {
        Parser::new(tokenize(input)).parse_function_definition()
    }

    fn message(err: ParseError) -> String {
        match CompilerError::from(err) {
            CompilerError::ParseError { message, .. } => message,
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_statement() {
        let stmt = parse_statement_from_str("if (a > b) { x = 1; }").unwrap();
        match stmt.kind {
            StatementKind::If { condition, then_body } => {
                assert!(matches!(condition.left.kind, ExpressionKind::Identifier(ref n) if n == "a"));
                assert!(matches!(condition.right.kind, ExpressionKind::Identifier(ref n) if n == "b"));
                assert_eq!(then_body.len(), 1);
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_else_statement() {
        let stmt = parse_statement_from_str("if (a > 0) { x = 1; } else { x = 2; y = 3; }").unwrap();
        match stmt.kind {
            StatementKind::IfElse { then_body, else_body, .. } => {
                assert_eq!(then_body.len(), 1);
                assert_eq!(else_body.len(), 2);
            }
            other => panic!("Expected if-else statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_while_with_empty_body() {
        let stmt = parse_statement_from_str("while (n > 0) { }").unwrap();
        match stmt.kind {
            StatementKind::While { body, .. } => assert!(body.is_empty()),
            other => panic!("Expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_control_flow() {
        let stmt = parse_statement_from_str(
            "while (n > 0) { if (n > 5) { n = n - 2; } else { n = n - 1; } }",
        )
        .unwrap();
        match stmt.kind {
            StatementKind::While { body, .. } => {
                assert!(matches!(body[0].kind, StatementKind::IfElse { .. }));
            }
            other => panic!("Expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_less_than_is_not_a_condition() {
        let err = parse_statement_from_str("if (a < b) { x = 1; }").unwrap_err();
        assert_eq!(message(err), "Syntax error at '<': expected '>' in if condition");
    }

    #[test]
    fn test_call_is_not_a_statement() {
        let err = parse_statement_from_str("f(1);").unwrap_err();
        assert_eq!(message(err), "Syntax error at '(': expected '=' in assignment");
    }

    #[test]
    fn test_parse_function_definition() {
        let func = parse_function_from_str("function add(x, y) { z = x + y; return z; }").unwrap();
        assert_eq!(func.name, "add");
        assert_eq!(func.params, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(func.body.len(), 1);
        assert!(matches!(func.return_expr.kind, ExpressionKind::Identifier(ref n) if n == "z"));
    }

    #[test]
    fn test_parse_function_without_params_or_body() {
        let func = parse_function_from_str("function seven() { return 7; }").unwrap();
        assert!(func.params.is_empty());
        assert!(func.body.is_empty());
        assert_eq!(func.return_expr.kind, ExpressionKind::Number(7));
    }

    #[test]
    fn test_function_requires_return() {
        let err = parse_function_from_str("function f(x) { y = x; }").unwrap_err();
        assert_eq!(message(err), "Syntax error at '}': expected 'return' in function body");
    }

    #[test]
    fn test_trailing_comma_in_params() {
        let err = parse_function_from_str("function f(a,) { return a; }").unwrap_err();
        assert_eq!(message(err), "Syntax error at ')': expected identifier in parameter list");
    }

    #[test]
    fn test_statement_span() {
        let stmt = parse_statement_from_str("if (a > b) {\n  x = 1;\n}").unwrap();
        assert_eq!((stmt.span.start.line, stmt.span.start.column), (1, 1));
        assert_eq!((stmt.span.end.line, stmt.span.end.column), (3, 2));
    }

    fn nested_whiles(levels: usize) -> String {
        "while (n > 0) { ".repeat(levels) + "n = 0;" + &" }".repeat(levels)
    }

    #[test]
    fn test_blocks_nest_up_to_limit() {
        assert!(parse_statement_from_str(&nested_whiles(MAX_NESTING_DEPTH)).is_ok());
    }

    #[test]
    fn test_block_nesting_limit_is_reported() {
        let err = parse_statement_from_str(&nested_whiles(10_000)).unwrap_err();
        match CompilerError::from(err) {
            CompilerError::ParseError { message, location } => {
                assert_eq!(
                    message,
                    format!("Nesting too deep in block: more than {} levels", MAX_NESTING_DEPTH)
                );
                // '{' of the first block past the limit
                assert_eq!((location.line, location.column), (1, 16 * MAX_NESTING_DEPTH as u32 + 15));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }
}
