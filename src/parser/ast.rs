use std::fmt;

use serde_json::Value;

/// Binary operators of a condition
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operator {
    /// ||
    Or,
    /// &&
    And,
    /// ==
    Eq,
    /// !=
    NotEq,
    /// ===
    Identical,
    /// !==
    NotIdentical,
    /// <
    Lt,
    /// <=
    Lte,
    /// >
    Gt,
    /// >=
    Gte,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Operator::Or => "||",
                Operator::And => "&&",
                Operator::Eq => "==",
                Operator::NotEq => "!=",
                Operator::Identical => "===",
                Operator::NotIdentical => "!==",
                Operator::Lt => "<",
                Operator::Lte => "<=",
                Operator::Gt => ">",
                Operator::Gte => ">=",
            }
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub operator: Operator,
}

/// A parsed `@if` condition
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A number, string, boolean or null written in the template
    Literal(Value),
    /// `$name`, looked up in the context when evaluated
    Variable(String),
    /// `!expr`
    Not(Box<Expr>),
    Binary(BinaryExpr),
}

impl Expr {
    pub fn binary(lhs: Expr, operator: Operator, rhs: Expr) -> Expr {
        Expr::Binary(BinaryExpr { lhs: Box::new(lhs), rhs: Box::new(rhs), operator })
    }
}
