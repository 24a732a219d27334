use std::collections::HashMap;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use globwalk::glob_builder;
use log::{debug, warn};

use crate::config::Config;
use crate::context::Context;
use crate::errors::{Error, Result};
use crate::renderer::call_stack::FrameType;
use crate::renderer::fragment::error_fragment;
use crate::renderer::processor::Processor;
use crate::renderer::RenderedView;
use crate::session::Session;
use crate::template::{template_name_from_path, Template};

/// Maximum number of nested `@component` a render can go through
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Main point of interaction in this library.
///
/// The engine holds the templates, the config the directives read and the
/// session used by `render`. It is `Send + Sync` so one instance can serve
/// every request; per-request sessions go through `render_with_session`.
#[derive(Debug)]
pub struct Engine {
    // The glob used in `Engine::new`, None if Engine was instantiated differently
    #[doc(hidden)]
    glob: Option<String>,
    #[doc(hidden)]
    pub templates: HashMap<String, Template>,
    config: Config,
    session: Session,
    max_depth: usize,
}

impl Engine {
    /// Create a new instance of Engine, containing all the parsed templates found in the `dir` glob.
    ///
    /// The template names are the paths relative to the glob's directory without the
    /// `.html` extension: `views/pages/home.html` is `pages/home`.
    ///
    /// ```no_run
    /// # use vista::Engine;
    /// let engine = Engine::new("views/**/*.html").unwrap();
    /// ```
    pub fn new(dir: &str) -> Result<Engine> {
        if dir.find('*').is_none() {
            return Err(Error::msg(format!(
                "Engine expects a glob as input, no * were found in `{}`",
                dir
            )));
        }

        let mut engine = Engine { glob: Some(dir.to_string()), ..Engine::default() };
        engine.load_from_glob()?;

        Ok(engine)
    }

    /// Loads all the templates found in the glob that was given to `Engine::new`
    fn load_from_glob(&mut self) -> Result<()> {
        let glob = match self.glob {
            Some(ref g) => g.clone(),
            None => return Err(Error::msg("Engine can only load from glob if a glob is provided")),
        };

        // Templates added by hand don't come from the glob, keep them
        self.templates.retain(|_, t| t.path.is_none());

        let mut errors = String::new();

        // globwalk returns nothing for paths starting with `./` or `../`,
        // the parent directory is canonicalized when possible
        let star = glob.find('*').unwrap_or(0);
        let (parent_dir, glob_end) = glob.split_at(star);
        let parent_dir = match std::fs::canonicalize(parent_dir) {
            Ok(d) => d,
            Err(_) => std::path::PathBuf::from(parent_dir),
        };
        let dir = parent_dir.join(glob_end).to_string_lossy().into_owned();

        let walker = glob_builder(&dir)
            .follow_links(true)
            .build()
            .map_err(|e| Error::chain(format!("Invalid glob `{}`", glob), e))?;

        for entry in walker.filter_map(std::result::Result::ok) {
            let path = entry.into_path();
            // We only care about actual files
            if !path.is_file() {
                continue;
            }

            let filepath = match path.strip_prefix(&parent_dir) {
                Ok(p) => p.to_string_lossy().replace('\\', "/"),
                Err(_) => path.to_string_lossy().replace('\\', "/"),
            };

            let name = template_name_from_path(&filepath);
            if let Err(e) = self.add_file(Some(name.as_str()), &path) {
                use std::error::Error as StdError;

                errors += &format!("\n* {}", e);
                let mut cause = e.source();
                while let Some(e) = cause {
                    errors += &format!("\n{}", e);
                    cause = e.source();
                }
            }
        }

        if !errors.is_empty() {
            return Err(Error::msg(errors));
        }
        debug!("Loaded {} templates from `{}`", self.templates.len(), glob);

        Ok(())
    }

    // Reads a file and stores it as a template. The name is the path unless given.
    fn add_file<P: AsRef<Path>>(&mut self, name: Option<&str>, path: P) -> Result<()> {
        let path = path.as_ref();
        let tpl_name = match name {
            Some(name) => name.to_string(),
            None => template_name_from_path(&path.to_string_lossy()),
        };

        let mut f = File::open(path).map_err(|e| Error::io_error(path.display(), e))?;

        let mut input = String::new();
        f.read_to_string(&mut input).map_err(|e| Error::io_error(path.display(), e))?;

        let tpl = Template::new(&tpl_name, Some(path.to_string_lossy().into_owned()), &input);
        self.templates.insert(tpl_name, tpl);
        Ok(())
    }

    /// Re-reads every template of the glob given to `Engine::new`.
    ///
    /// Templates added with `add_raw_template(s)` are kept, the ones added with
    /// `add_template_file` are dropped unless the glob finds them again.
    pub fn full_reload(&mut self) -> Result<()> {
        if self.glob.is_some() {
            self.load_from_glob()
        } else {
            Err(Error::msg("Reloading is only available if you are using a glob"))
        }
    }

    /// Add a single template to the Engine.
    ///
    /// ```
    /// # use vista::Engine;
    /// let mut engine = Engine::default();
    /// engine.add_raw_template("components/button", "<button>{{ label }}</button>").unwrap();
    /// ```
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        self.templates.insert(name.to_string(), Template::new(name, None, content));
        Ok(())
    }

    /// Add all the templates given to the Engine.
    ///
    /// ```
    /// # use vista::Engine;
    /// let mut engine = Engine::default();
    /// engine.add_raw_templates(vec![
    ///     ("layouts/app", "<main>{{slot}}</main>"),
    ///     ("pages/home", "<h1>Home</h1>"),
    /// ]).unwrap();
    /// ```
    pub fn add_raw_templates<I, N, C>(&mut self, templates: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        for (name, content) in templates {
            self.add_raw_template(name.as_ref(), content.as_ref())?;
        }
        Ok(())
    }

    /// Add a template from a file, named after the path if no name is given.
    pub fn add_template_file<P: AsRef<Path>>(&mut self, path: P, name: Option<&str>) -> Result<()> {
        self.add_file(name, path)
    }

    /// Returns the template `name`
    pub fn get_template(&self, template_name: &str) -> Result<&Template> {
        match self.templates.get(template_name) {
            Some(tpl) => Ok(tpl),
            None => Err(Error::template_not_found(template_name)),
        }
    }

    /// Names of every loaded template
    pub fn get_template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }

    /// Replaces the settings read by `@assets`, `@images` and the error fragments
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// The current settings
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the session used by `render`
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    /// The session used by `render`
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sets how many `@component` can be nested before rendering fails
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// How many `@component` can be nested before rendering fails
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Renders the view `name` with the engine's session.
    ///
    /// A missing view gives an error fragment as content. The only error returned
    /// is going over the maximum component depth.
    pub fn render<'a>(&'a self, name: &str, context: &'a Context) -> Result<RenderedView<'a>> {
        self.render_with_session(name, context, &self.session)
    }

    /// Renders the view `name` with the given session, usually the one of the current request
    pub fn render_with_session<'a>(
        &'a self,
        name: &str,
        context: &'a Context,
        session: &'a Session,
    ) -> Result<RenderedView<'a>> {
        debug!("Rendering view `{}`", name);
        let content = match self.get_template(name) {
            Ok(template) => {
                Processor::new(self, session, FrameType::Origin, name).render(&template.source, context)?
            }
            Err(e) => {
                warn!("{}", e);
                error_fragment(&e, self.config.is_debug())
            }
        };

        Ok(RenderedView::new(self, session, context, content))
    }

    /// Renders `components/<name>` on its own, with `context` as its parameters
    pub fn render_component(&self, name: &str, context: &Context) -> Result<String> {
        self.render_component_with_session(name, context, &self.session)
    }

    /// Renders `components/<name>` on its own with the given session, usually the
    /// one of the current request
    pub fn render_component_with_session(
        &self,
        name: &str,
        context: &Context,
        session: &Session,
    ) -> Result<String> {
        Processor::new(self, session, FrameType::Origin, name).render_component(name, context.clone())
    }

    /// Renders a one off template that isn't stored in the engine
    pub fn render_str(&self, input: &str, context: &Context) -> Result<String> {
        Processor::new(self, &self.session, FrameType::Origin, "__render_str").render(input, context)
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine {
            glob: None,
            templates: HashMap::new(),
            config: Config::default(),
            session: Session::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
