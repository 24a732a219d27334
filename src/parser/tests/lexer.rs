use pest::Parser;

use crate::parser::{ConditionParser, Rule};

macro_rules! assert_lex_rule {
    ($rule: expr, $input: expr) => {
        let res = ConditionParser::parse($rule, $input);
        println!("{:?}", $input);
        println!("{:#?}", res);
        if res.is_err() {
            println!("{}", res.unwrap_err());
            panic!();
        }
        assert!(res.is_ok());
        assert_eq!(res.unwrap().last().unwrap().as_span().end(), $input.len());
    };
}

#[test]
fn lex_boolean() {
    let inputs = vec!["true", "false", "True", "False", "TRUE", "FALSE"];
    for i in inputs {
        assert_lex_rule!(Rule::boolean, i);
    }
}

#[test]
fn lex_int() {
    let inputs = vec!["-10", "0", "100", "250000"];
    for i in inputs {
        assert_lex_rule!(Rule::int, i);
    }
}

#[test]
fn lex_float() {
    let inputs = vec!["123.5", "0.1", "-1.1"];
    for i in inputs {
        assert_lex_rule!(Rule::float, i);
    }
}

#[test]
fn lex_string() {
    let inputs = vec!["\"Blabla\"", "\"123\"", "\'123\'", "\'This is still a string\'", "''"];
    for i in inputs {
        assert_lex_rule!(Rule::string, i);
    }
}

#[test]
fn lex_variable() {
    let inputs = vec!["$flag", "$user_name", "$_private", "$a1"];
    for i in inputs {
        assert_lex_rule!(Rule::variable, i);
    }
}

#[test]
fn lex_bareword() {
    let inputs = vec!["admin", "trueish", "null_value", "_x"];
    for i in inputs {
        assert_lex_rule!(Rule::bareword, i);
    }
}

#[test]
fn keywords_need_a_word_boundary() {
    assert!(ConditionParser::parse(Rule::boolean, "trueish").is_err());
    assert!(ConditionParser::parse(Rule::null, "nullable").is_err());
}

#[test]
fn lex_expr() {
    let inputs = vec![
        "$flag == true",
        "$a != 'b' && ($c || !$d)",
        "1 < 2 || 2 >= 3",
        "$role === \"admin\"",
        "!($count <= 0)",
        "!!$a",
    ];
    for i in inputs {
        assert_lex_rule!(Rule::expr, i);
    }
}
