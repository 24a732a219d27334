use std::error::Error as StdError;

use crate::errors::Error;
use crate::utils::escape_html;

/// Shown in place of a failed part of the page when debug is off
pub const GENERIC_ERROR_MESSAGE: &str = "This part of the page could not be rendered.";

/// HTML put in place of something that failed to render.
///
/// With `debug` the fragment shows the kind and the message of the error (and
/// of its sources), escaped. Otherwise only a generic message.
pub fn error_fragment(error: &Error, debug: bool) -> String {
    if !debug {
        return format!(r#"<div class="vista-error">{}</div>"#, GENERIC_ERROR_MESSAGE);
    }

    let mut message = error.to_string();
    let mut source = StdError::source(error);
    while let Some(err) = source {
        message.push_str(": ");
        message.push_str(&err.to_string());
        source = err.source();
    }

    format!(
        r#"<div class="vista-error" data-kind="{kind}"><strong>{kind}</strong> {message}</div>"#,
        kind = error.kind_name(),
        message = escape_html(&message),
    )
}
