/// Prefix of the templates `@component` can reference
pub const COMPONENTS_NAMESPACE: &str = "components/";

/// Extension removed from file names to get a template name
pub const TEMPLATE_EXTENSION: &str = ".html";

/// The source of a view, layout or component.
///
/// Templates are kept as raw text: directives are resolved on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Name of the template, `pages/home` for `views/pages/home.html`
    pub name: String,
    /// Original path of the file. A template doesn't necessarily have
    /// a file associated with it though so it's optional.
    pub path: Option<String>,
    /// The raw text
    pub source: String,
}

impl Template {
    /// Create a template from its name and text
    pub fn new(name: &str, path: Option<String>, source: &str) -> Template {
        Template { name: name.to_string(), path, source: source.to_string() }
    }

    /// Whether this template lives in the components namespace
    pub fn is_component(&self) -> bool {
        self.name.starts_with(COMPONENTS_NAMESPACE)
    }
}

/// Turns a file path relative to the views directory into a template name
pub fn template_name_from_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.trim_start_matches("./").trim_start_matches('/');
    path.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(path).to_string()
}

/// Name under which the component `name` is stored
pub fn component_template_name(name: &str) -> String {
    format!("{}{}", COMPONENTS_NAMESPACE, name.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_drop_the_html_extension() {
        assert_eq!(template_name_from_path("pages/home.html"), "pages/home");
        assert_eq!(template_name_from_path("./layouts/app.html"), "layouts/app");
        assert_eq!(template_name_from_path("pages\\about.html"), "pages/about");
        assert_eq!(template_name_from_path("robots.txt"), "robots.txt");
    }

    #[test]
    fn components_are_namespaced() {
        assert_eq!(component_template_name("button"), "components/button");
        let tpl = Template::new("components/button", None, "<button></button>");
        assert!(tpl.is_component());
        assert!(!Template::new("pages/home", None, "").is_component());
    }
}
