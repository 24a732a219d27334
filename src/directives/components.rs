use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use serde_json::Value;

use crate::context::Context;
use crate::errors::{Error, Result};
use crate::utils::find_closing_paren;

const DIRECTIVE: &str = "@component(";

lazy_static! {
    static ref CALL_RE: Regex =
        Regex::new(r#"(?s)^\s*['"]([\w./-]+)['"]\s*(?:,\s*(.*?))?\s*$"#).unwrap();
    static ref PARAM_RE: Regex = Regex::new(
        r#"['"](\w+)['"]\s*:\s*(\[[^\]]*\]|'[^']*'|"[^"]*"|[^,}]*)"#
    )
    .unwrap();
}

/// Parses the parameter list of a `@component`: `{'title': 'Hi', 'items': ['a', 'b']}`.
///
/// Values other than quoted strings and lists of strings become empty strings.
pub fn parse_params(input: &str) -> Context {
    let mut params = Context::new();

    for caps in PARAM_RE.captures_iter(input) {
        let key = &caps[1];
        let raw = caps[2].trim();

        let value = if raw.starts_with('[') && raw.ends_with(']') {
            Value::Array(
                raw[1..raw.len() - 1]
                    .split(',')
                    .map(|item| item.trim_matches(|c| c == ' ' || c == '\'' || c == '"'))
                    .filter(|item| !item.is_empty())
                    .map(|item| Value::String(item.to_string()))
                    .collect(),
            )
        } else if raw.len() >= 2
            && ((raw.starts_with('\'') && raw.ends_with('\''))
                || (raw.starts_with('"') && raw.ends_with('"')))
        {
            Value::String(raw[1..raw.len() - 1].to_string())
        } else {
            Value::String(String::new())
        };

        params.insert(key, &value);
    }

    params
}

/// Finds every `@component('name', {...})` and replaces it with the output of `render`.
///
/// `render` receives the component name and its parsed parameters. Directives that
/// can't be parsed are left untouched; an error from `render` stops the expansion.
pub fn expand<F>(content: &str, mut render: F) -> Result<String>
where
    F: FnMut(&str, Context) -> Result<String>,
{
    let mut output = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find(DIRECTIVE) {
        let open = start + DIRECTIVE.len() - 1;
        output.push_str(&rest[..start]);

        let close = match find_closing_paren(rest, open) {
            Some(close) => close,
            None => {
                let err = Error::malformed_directive("component", "unbalanced parentheses");
                warn!("{}", err);
                output.push_str(DIRECTIVE);
                rest = &rest[open + 1..];
                continue;
            }
        };

        let args = &rest[open + 1..close];
        match CALL_RE.captures(args) {
            Some(caps) => {
                let params = caps.get(2).map(|m| parse_params(m.as_str())).unwrap_or_default();
                output.push_str(&render(&caps[1], params)?);
            }
            None => {
                let err = Error::malformed_directive(
                    "component",
                    format!("`{}` does not start with a quoted component name", args.trim()),
                );
                warn!("{}", err);
                output.push_str(&rest[start..=close]);
            }
        }
        rest = &rest[close + 1..];
    }
    output.push_str(rest);

    Ok(output)
}
