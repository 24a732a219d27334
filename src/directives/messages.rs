use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, NoExpand, Regex};

use crate::session::FlashStore;

lazy_static! {
    static ref MESSAGE_BLOCK_RE: Regex =
        Regex::new(r#"(?s)@message\(["'](.+?)["']\)(.*?)@endmessage"#).unwrap();
    static ref MESSAGE_RE: Regex = Regex::new(r"\{\{\s*message\s*\}\}").unwrap();
}

/// Expands `@message('name') ... @endmessage` blocks.
///
/// A block is kept only if a flash message called `name` exists; the message is
/// consumed and put in place of `{{ message }}`. Otherwise the whole block goes away.
pub fn expand(content: &str, flash: &dyn FlashStore) -> String {
    MESSAGE_BLOCK_RE
        .replace_all(content, |caps: &Captures| match flash.take_message(&caps[1]) {
            Some(message) => {
                debug!("Consumed flash message `{}`", &caps[1]);
                MESSAGE_RE.replace_all(&caps[2], NoExpand(message.as_str())).into_owned()
            }
            None => String::new(),
        })
        .into_owned()
}
