//! Responsible for rendering templates

pub mod eval;
pub mod view;

pub(crate) mod call_stack;
pub(crate) mod fragment;
pub(crate) mod processor;

pub use self::view::{RenderedView, ViewState};

#[cfg(test)]
mod tests;
