//! The rewriting stages of a render pass.
//!
//! Each stage is a plain function over the text produced by the previous one;
//! `renderer::processor` runs them in order.

pub mod components;
pub mod conditionals;
pub mod csrf;
pub mod loops;
pub mod messages;
pub mod switch;
pub mod urls;
pub mod validation;
pub mod variables;
