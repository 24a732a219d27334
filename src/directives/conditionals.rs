use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::context::Context;
use crate::errors::Error;
use crate::renderer::eval::eval_condition;
use crate::utils::find_closing_paren;

const DIRECTIVE: &str = "@if(";
const ELSE: &str = "@else";

lazy_static! {
    static ref BLOCK_TOKEN_RE: Regex = Regex::new(r"@if\(|@endif|@else\b").unwrap();
}

/// Positions of the `@else` and `@endif` closing a block, relative to its body
#[derive(Debug, PartialEq)]
struct Block {
    else_at: Option<usize>,
    endif_at: usize,
}

impl Block {
    fn end(&self) -> usize {
        self.endif_at + "@endif".len()
    }
}

/// Finds the `@endif` matching a block whose body starts `body`, skipping
/// over nested `@if` blocks.
fn find_block(body: &str) -> Option<Block> {
    let mut depth = 0usize;
    let mut else_at = None;

    for token in BLOCK_TOKEN_RE.find_iter(body) {
        match token.as_str() {
            "@if(" => depth += 1,
            "@endif" if depth == 0 => return Some(Block { else_at, endif_at: token.start() }),
            "@endif" => depth -= 1,
            _ if depth == 0 && else_at.is_none() => else_at = Some(token.start()),
            _ => (),
        }
    }

    None
}

fn is_true(condition: &str, context: &Context) -> bool {
    match eval_condition(condition, context) {
        Ok(res) => res,
        Err(e) => {
            warn!("Condition `{}` treated as false: {}", condition, e);
            false
        }
    }
}

/// Replaces every `@if(condition) ... [@else ...] @endif` block by the branch
/// selected by its condition.
///
/// A condition that fails to parse or evaluate selects the `@else` branch, or
/// nothing. Blocks nest; the kept branch is expanded again.
pub fn expand(content: &str, context: &Context) -> String {
    let mut output = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find(DIRECTIVE) {
        let open = start + DIRECTIVE.len() - 1;
        output.push_str(&rest[..start]);

        let close = match find_closing_paren(rest, open) {
            Some(close) => close,
            None => {
                warn!("{}", Error::malformed_directive("if", "unbalanced parentheses"));
                output.push_str(DIRECTIVE);
                rest = &rest[open + 1..];
                continue;
            }
        };

        let body = &rest[close + 1..];
        let block = match find_block(body) {
            Some(block) => block,
            None => {
                warn!("{}", Error::malformed_directive("if", "missing @endif"));
                output.push_str(&rest[start..=close]);
                rest = body;
                continue;
            }
        };

        let condition = &rest[open + 1..close];
        let branch = match (is_true(condition, context), block.else_at) {
            (true, Some(else_at)) => &body[..else_at],
            (true, None) => &body[..block.endif_at],
            (false, Some(else_at)) => &body[else_at + ELSE.len()..block.endif_at],
            (false, None) => "",
        };
        output.push_str(&expand(branch, context));
        rest = &body[block.end()..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Context {
        Context::from_value(json!({"flag": true, "off": false, "role": "admin", "count": 2}))
            .unwrap()
    }

    #[test]
    fn keeps_body_when_true() {
        assert_eq!(expand("@if($flag == true)Yes@endif", &context()), "Yes");
        assert_eq!(expand("a @if($flag)b@endif c", &context()), "a b c");
    }

    #[test]
    fn removes_body_when_false() {
        assert_eq!(expand("@if($off == true)Yes@endif", &context()), "");
        assert_eq!(expand("a @if($off)b@endif c", &context()), "a  c");
    }

    #[test]
    fn else_branch() {
        let tpl = "@if($role == 'admin')Admin@else Guest@endif";
        assert_eq!(expand(tpl, &context()), "Admin");
        let tpl = "@if($role == 'user')Admin@else Guest@endif";
        assert_eq!(expand(tpl, &context()), " Guest");
    }

    #[test]
    fn nested_blocks() {
        let tpl = "@if($flag)A@if($off)B@else<b>C</b>@endifD@else E@endif";
        assert_eq!(expand(tpl, &context()), "A<b>C</b>D");
        let tpl = "@if($off)A@if($flag)B@endif@else E@endif";
        assert_eq!(expand(tpl, &context()), " E");
    }

    #[test]
    fn several_blocks() {
        let tpl = "@if($count > 1)many@endif/@if($count < 1)none@endif";
        assert_eq!(expand(tpl, &context()), "many/");
    }

    #[test]
    fn parentheses_in_condition() {
        let tpl = "@if(($role == 'admin') && ($count == 2))ok@endif";
        assert_eq!(expand(tpl, &context()), "ok");
    }

    #[test]
    fn invalid_condition_is_false() {
        assert_eq!(expand("@if($flag ==)Yes@else No@endif", &context()), " No");
        assert_eq!(expand("@if(system('ls'))Yes@endif", &context()), "");
    }

    #[test]
    fn else_inside_a_word_is_text() {
        let tpl = "@if($flag)Mail admin@elsewhere.org@endif";
        assert_eq!(expand(tpl, &context()), "Mail admin@elsewhere.org");
        let tpl = "@if($off)Mail admin@elsewhere.org@else none@endif";
        assert_eq!(expand(tpl, &context()), " none");
        assert_eq!(find_block("x@elseGuest@endif"), Some(Block { else_at: None, endif_at: 11 }));
    }

    #[test]
    fn unclosed_block_is_left_as_is() {
        assert_eq!(expand("@if($flag)Yes", &context()), "@if($flag)Yes");
        assert_eq!(expand("@if($flag Yes", &context()), "@if($flag Yes");
    }

    #[test]
    fn finds_matching_endif() {
        assert_eq!(find_block("a@endif"), Some(Block { else_at: None, endif_at: 1 }));
        assert_eq!(
            find_block("a@if(x)b@else c@endif@else d@endif"),
            Some(Block { else_at: Some(21), endif_at: 28 })
        );
        assert_eq!(find_block("a@if(x)@endif"), None);
    }
}
