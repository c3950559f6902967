//! Binary expression parsing with operator precedence

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use x64cc_common::CompilerError;

type OperandParser = fn(&mut Parser) -> Result<Expr, CompilerError>;

impl Parser {
    /// Parse one left-associative precedence level
    fn parse_left_associative(
        &mut self,
        operand: OperandParser,
        operator: fn(&TokenType) -> Option<BinaryOp>,
    ) -> Result<Expr, CompilerError> {
        let mut left = operand(self)?;

        while let Some(op) = operator(self.peek_type()) {
            self.advance();
            let right = operand(self)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse logical OR expression
    pub fn parse_logical_or_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_logical_and_expression, |t| match t {
            TokenType::PipePipe => Some(BinaryOp::LogicalOr),
            _ => None,
        })
    }

    /// Parse logical AND expression
    pub fn parse_logical_and_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_bitwise_or_expression, |t| match t {
            TokenType::AmpersandAmpersand => Some(BinaryOp::LogicalAnd),
            _ => None,
        })
    }

    /// Parse bitwise OR expression
    pub fn parse_bitwise_or_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_bitwise_xor_expression, |t| match t {
            TokenType::Pipe => Some(BinaryOp::BitOr),
            _ => None,
        })
    }

    /// Parse bitwise XOR expression
    pub fn parse_bitwise_xor_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_bitwise_and_expression, |t| match t {
            TokenType::Caret => Some(BinaryOp::BitXor),
            _ => None,
        })
    }

    /// Parse bitwise AND expression
    pub fn parse_bitwise_and_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_equality_expression, |t| match t {
            TokenType::Ampersand => Some(BinaryOp::BitAnd),
            _ => None,
        })
    }

    /// Parse equality expression
    pub fn parse_equality_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_relational_expression, |t| match t {
            TokenType::EqualEqual => Some(BinaryOp::Equal),
            TokenType::BangEqual => Some(BinaryOp::NotEqual),
            _ => None,
        })
    }

    /// Parse relational expression
    pub fn parse_relational_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_shift_expression, |t| match t {
            TokenType::Less => Some(BinaryOp::Less),
            TokenType::Greater => Some(BinaryOp::Greater),
            TokenType::LessEqual => Some(BinaryOp::LessEqual),
            TokenType::GreaterEqual => Some(BinaryOp::GreaterEqual),
            _ => None,
        })
    }

    /// Parse shift expression
    pub fn parse_shift_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_additive_expression, |t| match t {
            TokenType::LeftShift => Some(BinaryOp::LeftShift),
            TokenType::RightShift => Some(BinaryOp::RightShift),
            _ => None,
        })
    }

    /// Parse additive expression
    pub fn parse_additive_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_multiplicative_expression, |t| match t {
            TokenType::Plus => Some(BinaryOp::Add),
            TokenType::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    /// Parse multiplicative expression
    pub fn parse_multiplicative_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_left_associative(Self::parse_unary_expression, |t| match t {
            TokenType::Star => Some(BinaryOp::Mul),
            TokenType::Slash => Some(BinaryOp::Div),
            TokenType::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn returned(input: &str) -> Expr {
        let source = format!("return {};", input);
        match parse(tokenize(&source).unwrap()).unwrap().functions.remove(0).body.remove(0) {
            Stmt::Return(expr) => expr,
            other => panic!("Expected return, got {other:?}"),
        }
    }

    fn num(n: i64) -> Expr {
        Expr::Number(n)
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(
            returned("10 - 4 - 3"),
            Expr::binary(
                BinaryOp::Sub,
                Expr::binary(BinaryOp::Sub, num(10), num(4)),
                num(3)
            )
        );
    }

    #[test]
    fn test_precedence_ladder() {
        // 1 || 2 && 3 | 4 ^ 5 & 6 == 7 < 8 << 9 + 10 * 11
        let expr = returned("1 || 2 && 3 | 4 ^ 5 & 6 == 7 < 8 << 9 + 10 * 11");
        let expected = Expr::binary(
            BinaryOp::LogicalOr,
            num(1),
            Expr::binary(
                BinaryOp::LogicalAnd,
                num(2),
                Expr::binary(
                    BinaryOp::BitOr,
                    num(3),
                    Expr::binary(
                        BinaryOp::BitXor,
                        num(4),
                        Expr::binary(
                            BinaryOp::BitAnd,
                            num(5),
                            Expr::binary(
                                BinaryOp::Equal,
                                num(6),
                                Expr::binary(
                                    BinaryOp::Less,
                                    num(7),
                                    Expr::binary(
                                        BinaryOp::LeftShift,
                                        num(8),
                                        Expr::binary(
                                            BinaryOp::Add,
                                            num(9),
                                            Expr::binary(BinaryOp::Mul, num(10), num(11)),
                                        ),
                                    ),
                                ),
                            ),
                        ),
                    ),
                ),
            ),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_relational_variants() {
        assert!(matches!(returned("1 <= 2"), Expr::Binary { op: BinaryOp::LessEqual, .. }));
        assert!(matches!(returned("1 >= 2"), Expr::Binary { op: BinaryOp::GreaterEqual, .. }));
        assert!(matches!(returned("1 != 2"), Expr::Binary { op: BinaryOp::NotEqual, .. }));
        assert!(matches!(returned("7 % 2"), Expr::Binary { op: BinaryOp::Mod, .. }));
    }
}
