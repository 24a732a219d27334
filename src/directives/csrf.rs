use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use crate::session::CsrfProvider;
use crate::utils::escape_html;

lazy_static! {
    static ref CSRF_RE: Regex = Regex::new(r"@csrf\(\)").unwrap();
}

/// Name of the form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";

/// The hidden input emitted for `token`
pub fn csrf_field(token: &str) -> String {
    format!(r#"<input type="hidden" name="{}" value="{}" />"#, CSRF_FIELD, escape_html(token))
}

/// Replaces every `@csrf()` with a hidden input holding the current token.
///
/// The provider is only asked for a token when the directive is used.
pub fn expand(content: &str, csrf: &dyn CsrfProvider) -> String {
    if !CSRF_RE.is_match(content) {
        return content.to_string();
    }
    let field = csrf_field(&csrf.current());
    CSRF_RE.replace_all(content, NoExpand(field.as_str())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_hidden_input() {
        let provider = || "abc123".to_string();
        assert_eq!(
            expand("<form>@csrf()</form>", &provider),
            r#"<form><input type="hidden" name="csrf_token" value="abc123" /></form>"#
        );
    }

    #[test]
    fn token_is_escaped() {
        let provider = || "a\"b".to_string();
        assert_eq!(expand("@csrf()", &provider), r#"<input type="hidden" name="csrf_token" value="a&quot;b" />"#);
    }

    #[test]
    fn same_token_for_every_form() {
        let provider = || "t".to_string();
        let out = expand("@csrf()@csrf()", &provider);
        assert_eq!(out.matches("value=\"t\"").count(), 2);
    }

    #[test]
    fn untouched_without_directive() {
        let provider = || -> String { panic!("token requested without @csrf()") };
        assert_eq!(expand("<form></form>", &provider), "<form></form>");
    }
}
