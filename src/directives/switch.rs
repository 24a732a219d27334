use log::warn;

use super::variables::substitute_sigils;
use crate::context::Context;
use crate::errors::Error;
use crate::utils::{find_closing_paren, strip_quotes};

const DIRECTIVE: &str = "@switch(";
const CASE: &str = "@case(";
const BREAK: &str = "@break";
const DEFAULT: &str = "@default";
const END: &str = "@endswitch";

/// `$name` substitution followed by whitespace and quote trimming
fn normalize(expression: &str, context: &Context) -> String {
    strip_quotes(&substitute_sigils(expression, context)).to_string()
}

/// Picks the content of the first case whose value equals `subject`,
/// falling back to the `@default` content.
fn select<'a>(subject: &str, body: &'a str, context: &Context) -> &'a str {
    let mut rest = body;

    while let Some(start) = rest.find(CASE) {
        let open = start + CASE.len() - 1;
        let close = match find_closing_paren(rest, open) {
            Some(close) => close,
            None => {
                warn!("{}", Error::malformed_directive("case", "unbalanced parentheses"));
                break;
            }
        };
        let content = &rest[close + 1..];
        let brk = match content.find(BREAK) {
            Some(brk) => brk,
            None => {
                warn!("{}", Error::malformed_directive("case", "missing @break"));
                break;
            }
        };

        if normalize(&rest[open + 1..close], context) == subject {
            return &content[..brk];
        }
        rest = &content[brk + BREAK.len()..];
    }

    match body.find(DEFAULT) {
        Some(start) => {
            let content = &body[start + DEFAULT.len()..];
            let trimmed = content.trim_end();
            trimmed.strip_suffix(BREAK).unwrap_or(content)
        }
        None => "",
    }
}

/// Replaces `@switch(subject) @case(value) ... @break ... @default ... @endswitch`
/// blocks with the content of the matching case.
///
/// Subject and values go through `$name` substitution and quote stripping before
/// being compared as strings.
pub fn expand(content: &str, context: &Context) -> String {
    let mut output = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find(DIRECTIVE) {
        let open = start + DIRECTIVE.len() - 1;
        output.push_str(&rest[..start]);

        let close = match find_closing_paren(rest, open) {
            Some(close) => close,
            None => {
                warn!("{}", Error::malformed_directive("switch", "unbalanced parentheses"));
                output.push_str(DIRECTIVE);
                rest = &rest[open + 1..];
                continue;
            }
        };

        let after = &rest[close + 1..];
        let end = match after.find(END) {
            Some(end) => end,
            None => {
                warn!("{}", Error::malformed_directive("switch", "missing @endswitch"));
                output.push_str(&rest[start..=close]);
                rest = after;
                continue;
            }
        };

        let subject = normalize(&rest[open + 1..close], context);
        output.push_str(select(&subject, &after[..end], context));
        rest = &after[end + END.len()..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROLES: &str = "@switch($role)@case('admin')Admin@break@case(\"user\")User@break@defaultGuest@endswitch";

    fn context(role: &str) -> Context {
        Context::from_value(json!({ "role": role, "count": 2 })).unwrap()
    }

    #[test]
    fn first_matching_case_wins() {
        assert_eq!(expand(ROLES, &context("admin")), "Admin");
        assert_eq!(expand(ROLES, &context("user")), "User");
        let tpl = "@switch($role)@case('a')one@break@case('a')two@break@endswitch";
        assert_eq!(expand(tpl, &context("a")), "one");
    }

    #[test]
    fn default_when_nothing_matches() {
        assert_eq!(expand(ROLES, &context("bot")), "Guest");
        let tpl = "@switch($role) @case('a')A@break @default Nobody @break @endswitch";
        assert_eq!(expand(tpl, &context("b")), " Nobody ");
    }

    #[test]
    fn empty_without_default() {
        let tpl = "<p>@switch($role)@case('a')A@break@endswitch</p>";
        assert_eq!(expand(tpl, &context("b")), "<p></p>");
    }

    #[test]
    fn values_are_trimmed_and_unquoted() {
        let tpl = "@switch( ' admin ' )@case( admin )yes@break@endswitch";
        assert_eq!(expand(tpl, &context("x")), "yes");
        let tpl = "@switch($count)@case(2)two@break@endswitch";
        assert_eq!(expand(tpl, &context("x")), "two");
    }

    #[test]
    fn missing_variable_is_null() {
        let tpl = "@switch($nope)@case('null')none@break@endswitch";
        assert_eq!(expand(tpl, &context("x")), "none");
    }

    #[test]
    fn several_blocks() {
        let tpl = format!("{}|{}", ROLES, ROLES);
        assert_eq!(expand(&tpl, &context("user")), "User|User");
    }

    #[test]
    fn unclosed_switch_is_left_as_is() {
        let tpl = "@switch($role)@case('admin')Admin@break";
        assert_eq!(expand(tpl, &context("admin")), tpl);
    }
}
