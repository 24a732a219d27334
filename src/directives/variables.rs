use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::context::{Context, ValueRender};

lazy_static! {
    static ref VARIABLE_RE: Regex = Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap();
    static ref SIGIL_RE: Regex = Regex::new(r"\$(\w+)").unwrap();
}

/// Replaces every `{{ name }}` with the value of `name`, or nothing if it isn't set.
///
/// Values are inserted as is: they are neither escaped nor scanned again.
pub fn substitute(content: &str, context: &Context) -> String {
    VARIABLE_RE
        .replace_all(content, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.render().into_owned(),
            None => String::new(),
        })
        .into_owned()
}

/// Replaces every `$name` with the value of `name`, or `null` if it isn't set.
///
/// Used on the arguments of `@switch`/`@case`.
pub fn substitute_sigils(expression: &str, context: &Context) -> String {
    SIGIL_RE
        .replace_all(expression, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.render().into_owned(),
            None => "null".to_string(),
        })
        .into_owned()
}
