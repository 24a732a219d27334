use log::{debug, warn};

use crate::context::Context;
use crate::directives::{
    components, conditionals, csrf, loops, messages, switch, urls, validation, variables,
};
use crate::engine::Engine;
use crate::errors::{Error, Result};
use crate::renderer::call_stack::{CallStack, FrameType};
use crate::renderer::fragment::error_fragment;
use crate::session::Session;
use crate::template::component_template_name;

/// Runs the directive stages over a template's text
pub struct Processor<'a> {
    /// Holds the templates and the config
    engine: &'a Engine,
    /// Flash messages, validation errors and CSRF token of the request
    session: &'a Session,
    /// The call stack for processing
    call_stack: CallStack,
}

impl<'a> Processor<'a> {
    /// Create a new `Processor` rendering from the template `name`
    pub fn new(engine: &'a Engine, session: &'a Session, kind: FrameType, name: &str) -> Self {
        Processor { engine, session, call_stack: CallStack::new(kind, name, engine.max_depth()) }
    }

    /// One render pass: flash messages, variables, components, loops, conditionals,
    /// switch, assets, images, validation errors and CSRF, in that order.
    ///
    /// Only fatal errors are returned, everything else is logged and contained.
    pub fn render(&mut self, source: &str, context: &Context) -> Result<String> {
        let engine = self.engine;
        let config = engine.config();

        let content = messages::expand(source, self.session.flash());
        let content = variables::substitute(&content, context);
        let content =
            components::expand(&content, |name, params| self.render_component(name, params))?;
        let content = loops::expand(&content, context);
        let content = conditionals::expand(&content, context);
        let content = switch::expand(&content, context);
        let content = urls::expand_assets(&content, config);
        let content = urls::expand_images(&content, config);
        let content = validation::expand(&content, self.session.errors());
        let content = csrf::expand(&content, self.session.csrf());

        Ok(content)
    }

    /// Renders `components/<name>` with `params` as its only context.
    ///
    /// A missing component becomes an error fragment; going over the
    /// maximum depth is returned as an error.
    pub fn render_component(&mut self, name: &str, params: Context) -> Result<String> {
        let engine = self.engine;
        let template_name = component_template_name(name);
        let template = match engine.get_template(&template_name) {
            Ok(template) => template,
            Err(_) => return Ok(self.contain(Error::component_not_found(name))),
        };

        self.call_stack.push_component_frame(&template_name)?;
        debug!("Rendering component `{}` ({})", name, self.call_stack.trace());
        let res = self.render(&template.source, &params);
        self.call_stack.pop();

        match res {
            Ok(content) => Ok(content),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => Ok(self.contain(e)),
        }
    }

    fn contain(&self, error: Error) -> String {
        warn!("{} (while rendering `{}`)", error, self.call_stack.current_frame().name);
        error_fragment(&error, self.engine.config().is_debug())
    }
}
