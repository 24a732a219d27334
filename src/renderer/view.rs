use std::fmt;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{NoExpand, Regex};

use crate::context::Context;
use crate::engine::Engine;
use crate::errors::{Error, Result};
use crate::renderer::call_stack::FrameType;
use crate::renderer::fragment::error_fragment;
use crate::renderer::processor::Processor;
use crate::session::Session;

lazy_static! {
    static ref SLOT_RE: Regex = Regex::new(r"\{\{\s*slot\s*\}\}").unwrap();
}

/// Whether a view went through a layout yet
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewState {
    /// The view's own template was rendered
    Rendered,
    /// The rendered content was put in a layout
    LayoutWrapped,
}

/// The output of `Engine::render`, which can still be wrapped in a layout.
///
/// ```no_run
/// # use vista::{Context, Engine};
/// let engine = Engine::new("views/**/*.html").unwrap();
/// let mut context = Context::new();
/// context.insert("title", "Home");
/// let html = engine.render("pages/home", &context).unwrap().layout("layouts/app").unwrap();
/// println!("{}", html);
/// ```
#[derive(Debug)]
pub struct RenderedView<'a> {
    engine: &'a Engine,
    session: &'a Session,
    context: &'a Context,
    content: String,
    state: ViewState,
}

impl<'a> RenderedView<'a> {
    pub(crate) fn new(
        engine: &'a Engine,
        session: &'a Session,
        context: &'a Context,
        content: String,
    ) -> RenderedView<'a> {
        RenderedView { engine, session, context, content, state: ViewState::Rendered }
    }

    /// Puts the content in every `{{slot}}` of the layout `name` and renders the
    /// result again with the same context.
    ///
    /// A missing layout, or one without a slot, gives an error fragment as content.
    pub fn layout(self, name: &str) -> Result<RenderedView<'a>> {
        let debug = self.engine.config().is_debug();
        let content = match self.engine.get_template(name) {
            Ok(layout) if SLOT_RE.is_match(&layout.source) => {
                debug!("Wrapping view in layout `{}`", name);
                let combined = SLOT_RE.replace_all(&layout.source, NoExpand(self.content.as_str()));
                Processor::new(self.engine, self.session, FrameType::Layout, name)
                    .render(&combined, self.context)?
            }
            Ok(_) => {
                let err = Error::malformed_directive(
                    "layout",
                    format!("layout '{}' has no {{{{slot}}}} marker", name),
                );
                warn!("{}", err);
                error_fragment(&err, debug)
            }
            Err(_) => {
                let err = Error::layout_not_found(name);
                warn!("{}", err);
                error_fragment(&err, debug)
            }
        };

        Ok(RenderedView { content, state: ViewState::LayoutWrapped, ..self })
    }

    /// The rendered HTML
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consumes the view, returning the rendered HTML
    pub fn into_string(self) -> String {
        self.content
    }

    /// Whether a layout was applied
    pub fn state(&self) -> ViewState {
        self.state
    }
}

impl<'a> fmt::Display for RenderedView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl<'a> From<RenderedView<'a>> for String {
    fn from(view: RenderedView<'a>) -> String {
        view.into_string()
    }
}
