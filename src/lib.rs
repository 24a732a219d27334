#![doc(html_root_url = "https://docs.rs/vista")]
//! # Vista
//!
//! A directive-based HTML view engine.
//!
//! Views are plain HTML files with `@` directives and `{{ variables }}`. Rendering
//! rewrites the text in a fixed order of stages: flash messages, variables,
//! components, loops, conditionals, switch, assets, images, validation errors and
//! CSRF fields. A rendered view can then be wrapped in a layout through its
//! `{{slot}}` marker.
//!
//! ## Example
//!
//! ```rust
//! use vista::{Context, Engine};
//!
//! let mut engine = Engine::default();
//! engine.add_raw_templates(vec![
//!     ("layouts/app", "<main>{{slot}}</main>"),
//!     ("components/title", "<h1>{{ text }}</h1>"),
//!     ("pages/home", "@component('title', {'text': 'Welcome'})@if($admin)<p>{{ name }}</p>@endif"),
//! ]).unwrap();
//!
//! let mut context = Context::new();
//! context.insert("name", "Ada");
//! context.insert("admin", &true);
//!
//! let view = engine.render("pages/home", &context).unwrap().layout("layouts/app").unwrap();
//! assert_eq!(view.content(), "<main><h1>Welcome</h1><p>Ada</p></main>");
//! ```
//!
//! Failures inside a view (a missing component, a malformed directive) are
//! logged through the `log` crate and rendered in place as a small error
//! fragment. Only nesting components deeper than `Engine::max_depth` makes a
//! render return an error.

mod config;
mod context;
mod directives;
mod engine;
mod errors;
mod parser;
mod renderer;
mod session;
mod template;
mod utils;

// Library exports.

pub use crate::config::{Config, APP_DEBUG, APP_PORT, APP_URL, IMAGES_PATH, PUBLIC_PATH};
pub use crate::context::{Context, ValueNumber, ValueRender, ValueTruthy};
pub use crate::directives::csrf::{csrf_field, CSRF_FIELD};
pub use crate::engine::{Engine, DEFAULT_MAX_DEPTH};
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::renderer::eval::eval_condition;
pub use crate::renderer::{RenderedView, ViewState};
pub use crate::session::{
    CsrfProvider, CsrfToken, ErrorStore, FlashStore, MemoryStore, Session, CSRF_TOKEN_LIFETIME,
};
#[doc(hidden)]
pub use crate::template::Template;
pub use crate::utils::escape_html;
// Re-export Value and other useful things from serde
// so apps can build contexts without depending on serde_json
pub use serde_json::value::{from_value, to_value, Map, Number, Value};

// Exposes the AST of conditions if one needs it but changing the AST is not
// considered a breaking change
#[doc(hidden)]
pub use crate::parser::ast;
