use crate::errors::ErrorKind;
use crate::parser::parse_condition;

fn assert_err_msg(input: &str, needles: &[&str]) {
    let res = parse_condition(input);
    assert!(res.is_err());
    let err = res.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ExpressionEvaluation(_)));
    let err_msg = err.to_string();
    println!("{}", err_msg);
    println!("Looking for:");
    for needle in needles {
        println!("{}", needle);
        assert!(err_msg.contains(needle));
    }
}

#[test]
fn empty_condition() {
    assert_err_msg("", &["1:1"]);
}

#[test]
fn dangling_operator() {
    assert_err_msg("$a ==", &["1:6"]);
}

#[test]
fn unterminated_string() {
    assert_err_msg("$a == 'abc", &["$a == 'abc"]);
}

#[test]
fn unbalanced_parentheses() {
    assert_err_msg("($a == 1", &["1:9"]);
}

#[test]
fn host_code_is_rejected() {
    assert_err_msg("system('ls')", &["1:7"]);
    assert_err_msg("$a; exit", &["1:3"]);
}

#[test]
fn arithmetic_is_not_part_of_conditions() {
    assert_err_msg("$a + 1 > 2", &["1:4"]);
    assert_err_msg("$count % 2 == 0", &["1:8"]);
    assert_err_msg("2*3", &["1:2"]);
}
