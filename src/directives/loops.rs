use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::context::{Context, ValueRender};

lazy_static! {
    static ref FOREACH_RE: Regex =
        Regex::new(r"(?s)@foreach\s+(\w+)\s+as\s+(\w+)(.*?)@endforeach").unwrap();
}

/// Renders the body of a loop once for `item`, replacing `{{ name.key }}` for each key
fn render_item(body: &str, item_name: &str, item: &Value) -> String {
    let mut output = body.to_string();

    match *item {
        Value::Object(ref fields) => {
            for (key, value) in fields {
                output = output.replace(&format!("{{{{ {}.{} }}}}", item_name, key), &value.render());
            }
        }
        ref scalar => {
            output = output.replace(&format!("{{{{ {}.value }}}}", item_name), &scalar.render());
        }
    }

    output
}

/// Expands `@foreach collection as item ... @endforeach` blocks.
///
/// The body is repeated for each element of `collection`, in order. Scalars are
/// reachable as `{{ item.value }}`, objects through their keys. Only that exact
/// spelling, with one space inside the braces, is replaced. A missing or empty
/// collection expands to nothing.
pub fn expand(content: &str, context: &Context) -> String {
    FOREACH_RE
        .replace_all(content, |caps: &Captures| {
            let item_name = &caps[2];
            let body = &caps[3];

            match context.get(&caps[1]) {
                Some(Value::Array(items)) => {
                    items.iter().map(|item| render_item(body, item_name, item)).collect::<String>()
                }
                Some(Value::Object(items)) => {
                    items.values().map(|item| render_item(body, item_name, item)).collect::<String>()
                }
                _ => String::new(),
            }
        })
        .into_owned()
}
