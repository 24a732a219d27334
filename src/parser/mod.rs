use lazy_static::lazy_static;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;
use serde_json::{Number, Value};

use crate::errors::{Error, Result as VistaResult};

// Forces recompiling this file when the grammar changes
const _GRAMMAR: &str = include_str!("condition.pest");

#[derive(Parser)]
#[grammar = "parser/condition.pest"]
pub struct ConditionParser;

/// The AST of `@if` conditions
pub mod ast;

#[cfg(test)]
mod tests;

use self::ast::*;

lazy_static! {
    static ref CONDITION_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::op_or, Assoc::Left)) // ||
        .op(Op::infix(Rule::op_and, Assoc::Left)) // &&
        .op(Op::infix(Rule::op_eq, Assoc::Left)
            | Op::infix(Rule::op_ineq, Assoc::Left)
            | Op::infix(Rule::op_identical, Assoc::Left)
            | Op::infix(Rule::op_not_identical, Assoc::Left)) // ==, !=, ===, !==
        .op(Op::infix(Rule::op_lt, Assoc::Left)
            | Op::infix(Rule::op_lte, Assoc::Left)
            | Op::infix(Rule::op_gt, Assoc::Left)
            | Op::infix(Rule::op_gte, Assoc::Left)) // <, <=, >, >=
        .op(Op::prefix(Rule::op_not)); // !
}

/// Strings are delimited by double quotes or single quotes
/// We need to remove those before putting them in the AST
fn replace_string_markers(input: &str) -> String {
    input[1..input.len() - 1].to_string()
}

fn parse_literal(pair: Pair<Rule>) -> VistaResult<Expr> {
    let value = match pair.as_rule() {
        Rule::int => Value::Number(
            pair.as_str()
                .parse::<i64>()
                .map_err(|_| Error::expression(format!("Integer out of bounds: `{}`", pair.as_str())))?
                .into(),
        ),
        Rule::float => {
            let f = pair
                .as_str()
                .parse::<f64>()
                .map_err(|_| Error::expression(format!("Float out of bounds: `{}`", pair.as_str())))?;
            match Number::from_f64(f) {
                Some(n) => Value::Number(n),
                None => return Err(Error::expression(format!("Invalid float: `{}`", pair.as_str()))),
            }
        }
        Rule::string => Value::String(replace_string_markers(pair.as_str())),
        Rule::boolean => Value::Bool(pair.as_str().eq_ignore_ascii_case("true")),
        Rule::null => Value::Null,
        Rule::bareword => Value::String(pair.as_str().to_string()),
        _ => unreachable!("Got {:?} in parse_literal: {}", pair.as_rule(), pair.as_str()),
    };

    Ok(Expr::Literal(value))
}

fn parse_expr(pair: Pair<Rule>) -> VistaResult<Expr> {
    let primary = |p: Pair<Rule>| match p.as_rule() {
        Rule::expr => parse_expr(p),
        Rule::variable => Ok(Expr::Variable(p.as_str()[1..].to_string())),
        _ => parse_literal(p),
    };

    let prefix = |op: Pair<Rule>, rhs: VistaResult<Expr>| match op.as_rule() {
        Rule::op_not => Ok(Expr::Not(Box::new(rhs?))),
        _ => unreachable!("{:?} not supposed to get there (prefix of condition)!", op.as_rule()),
    };

    let infix = |lhs: VistaResult<Expr>, op: Pair<Rule>, rhs: VistaResult<Expr>| {
        let operator = match op.as_rule() {
            Rule::op_or => Operator::Or,
            Rule::op_and => Operator::And,
            Rule::op_eq => Operator::Eq,
            Rule::op_ineq => Operator::NotEq,
            Rule::op_identical => Operator::Identical,
            Rule::op_not_identical => Operator::NotIdentical,
            Rule::op_lt => Operator::Lt,
            Rule::op_lte => Operator::Lte,
            Rule::op_gt => Operator::Gt,
            Rule::op_gte => Operator::Gte,
            _ => unreachable!("{:?} not supposed to get there (infix of condition)!", op.as_rule()),
        };
        Ok(Expr::binary(lhs?, operator, rhs?))
    };

    CONDITION_PARSER.map_primary(primary).map_prefix(prefix).map_infix(infix).parse(pair.into_inner())
}

/// Parses the text between the parentheses of `@if(...)`
pub fn parse_condition(input: &str) -> VistaResult<Expr> {
    let mut pairs = match ConditionParser::parse(Rule::condition, input) {
        Ok(p) => p,
        Err(e) => {
            let fancy_e = e.renamed_rules(|rule| match *rule {
                Rule::EOI => "end of input".to_string(),
                Rule::int => "an integer".to_string(),
                Rule::float => "a float".to_string(),
                Rule::string | Rule::double_quoted_string | Rule::single_quoted_string => {
                    "a string".to_string()
                }
                Rule::boolean => "`true` or `false`".to_string(),
                Rule::null => "`null`".to_string(),
                Rule::variable => "a variable (`$name`)".to_string(),
                Rule::bareword => "a word".to_string(),
                Rule::expr => "an expression".to_string(),
                Rule::op_or => "`||`".to_string(),
                Rule::op_and => "`&&`".to_string(),
                Rule::op_not => "`!`".to_string(),
                Rule::op_identical => "`===`".to_string(),
                Rule::op_not_identical => "`!==`".to_string(),
                Rule::op_eq => "`==`".to_string(),
                Rule::op_ineq => "`!=`".to_string(),
                Rule::op_lte => "`<=`".to_string(),
                Rule::op_gte => "`>=`".to_string(),
                Rule::op_lt => "`<`".to_string(),
                Rule::op_gt => "`>`".to_string(),
                _ => format!("{:?}", rule),
            });
            return Err(Error::expression(fancy_e));
        }
    };

    // We must have at least an `expr` pair if we got there
    match pairs.next() {
        Some(p) if p.as_rule() == Rule::expr => parse_expr(p),
        _ => Err(Error::expression(format!("`{}` is not a condition", input))),
    }
}
