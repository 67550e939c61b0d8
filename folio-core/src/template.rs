use serde::Serialize;
use tera::{Context, Tera};

#[derive(Debug)]
pub enum TemplateError {
    TeraError(tera::Error),
    IoError(std::io::Error),
}

impl From<tera::Error> for TemplateError {
    fn from(err: tera::Error) -> Self {
        TemplateError::TeraError(err)
    }
}

impl From<std::io::Error> for TemplateError {
    fn from(err: std::io::Error) -> Self {
        TemplateError::IoError(err)
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::TeraError(e) => write!(f, "Template error: {}", e),
            TemplateError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Per-render template data, merged on top of the renderer's globals.
#[derive(Default)]
pub struct RenderContext {
    context: Context,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_context<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.context.insert(key, value);
    }
}

/// Tera wrapper over the embedded theme. The layout and one template per
/// section ship inside the binary, so there is no theme directory to keep
/// in sync with the output.
pub struct Renderer {
    tera: Tera,
    globals: Context,
}

impl Renderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("nav.html", include_str!("../templates/nav.html")),
            ("hero.html", include_str!("../templates/hero.html")),
            ("about.html", include_str!("../templates/about.html")),
            ("skills.html", include_str!("../templates/skills.html")),
            ("timeline.html", include_str!("../templates/timeline.html")),
            ("projects.html", include_str!("../templates/projects.html")),
            ("contact.html", include_str!("../templates/contact.html")),
        ])?;

        Ok(Self {
            tera,
            globals: Context::new(),
        })
    }

    /// Values visible to every template: site config, navigation, dev mode.
    pub fn set_global_context<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.globals.insert(key, value);
    }

    pub fn render(&self, template: &str, context: &RenderContext) -> Result<String, TemplateError> {
        let mut merged = self.globals.clone();
        merged.extend(context.context.clone());
        Ok(self.tera.render(template, &merged)?)
    }
}
