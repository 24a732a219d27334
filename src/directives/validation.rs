use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

use crate::session::ErrorStore;

lazy_static! {
    static ref ERRORS_RE: Regex = Regex::new(r#"@errors\(["'](.+?)["']\)"#).unwrap();
}

/// Replaces `@errors('field')` with the first validation error of `field`.
///
/// Reading an error consumes every error of the field, so a second `@errors`
/// for the same field renders nothing.
pub fn expand(content: &str, errors: &dyn ErrorStore) -> String {
    ERRORS_RE
        .replace_all(content, |caps: &Captures| match errors.take_error(&caps[1]) {
            Some(error) => {
                debug!("Consumed validation error of `{}`", &caps[1]);
                error
            }
            None => String::new(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    #[test]
    fn error_is_injected_once() {
        let store = MemoryStore::new();
        store.put_errors("email", vec!["Email is required".into(), "Email is invalid".into()]);
        assert_eq!(
            expand("<span>@errors('email')</span><span>@errors(\"email\")</span>", &store),
            "<span>Email is required</span><span></span>"
        );
        assert!(!store.has_errors());
    }

    #[test]
    fn missing_error_renders_nothing() {
        let store = MemoryStore::new();
        assert_eq!(expand("[@errors('name')]", &store), "[]");
    }
}
