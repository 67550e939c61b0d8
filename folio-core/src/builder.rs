use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::Config;
use crate::sections::{self, nav_items};
use crate::template::{RenderContext, Renderer, TemplateError};

#[derive(Debug)]
pub enum BuildError {
    TemplateError(TemplateError),
}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        BuildError::TemplateError(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::TemplateError(e) => write!(f, "Template error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

#[derive(Debug)]
pub enum RenderError {
    TemplateError(TemplateError),
    IoError(std::io::Error),
}

impl From<TemplateError> for RenderError {
    fn from(err: TemplateError) -> Self {
        RenderError::TemplateError(err)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TemplateError(e) => write!(f, "Template error: {}", e),
            RenderError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

/// Host/port the live-reload snippet connects back to.
#[derive(Debug, Clone, Serialize)]
pub struct DevMode {
    pub host: String,
    pub port: u16,
}

const THEME_ASSETS: [(&str, &str); 3] = [
    ("style.css", include_str!("../assets/style.css")),
    ("reveal.js", include_str!("../assets/reveal.js")),
    ("form.js", include_str!("../assets/form.js")),
];

pub struct SiteBuilder {
    output_dir: PathBuf,
    assets_dir: Option<PathBuf>,
    config: Config,
    dev: Option<DevMode>,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("./out"),
            assets_dir: None,
            config: Config::with_defaults(),
            dev: None,
        }
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    /// Directory of user files (portrait, project previews, resume) copied
    /// verbatim into the output's `assets/`.
    pub fn assets_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.assets_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Serve-time mode: adds the live-reload snippet to the layout.
    pub fn dev_mode(mut self, host: impl Into<String>, port: u16) -> Self {
        self.dev = Some(DevMode {
            host: host.into(),
            port,
        });
        self
    }

    pub fn build(self) -> Result<Site, BuildError> {
        let mut renderer = Renderer::new()?;

        // Global context, set once: every template sees the site config,
        // the navigation and the dev flag.
        renderer.set_global_context("site", &self.config.site);
        renderer.set_global_context("navigation", &nav_items());
        renderer.set_global_context("brand", &self.config.profile.name);
        renderer.set_global_context("dev", &self.dev.is_some());
        if let Some(dev) = &self.dev {
            renderer.set_global_context("dev_host", &dev.host);
            renderer.set_global_context("dev_port", &dev.port);
        }

        Ok(Site {
            config: self.config,
            renderer,
            output_dir: self.output_dir,
            assets_dir: self.assets_dir,
        })
    }
}

pub struct Site {
    config: Config,
    renderer: Renderer,
    output_dir: PathBuf,
    assets_dir: Option<PathBuf>,
}

impl Site {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Compose the page: render each section fragment in fixed order, wrap
    /// them in the base layout.
    fn render_index(&self) -> Result<String, RenderError> {
        let fragments = sections::render_all(&self.config, &self.renderer)?;

        let mut context = RenderContext::new();
        context.add_to_context("sections", &fragments);
        Ok(self.renderer.render("base.html", &context)?)
    }

    pub fn render_all(&self) -> Result<(), RenderError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let html = self.render_index()?;
        std::fs::write(self.output_dir.join("index.html"), html)?;

        let asset_out = self.output_dir.join("assets");
        std::fs::create_dir_all(&asset_out)?;
        for (name, contents) in THEME_ASSETS {
            std::fs::write(asset_out.join(name), contents)?;
        }

        if let Some(assets_dir) = &self.assets_dir {
            self.copy_user_assets(assets_dir, &asset_out)?;
        }

        info!(output = %self.output_dir.display(), "site rendered");
        Ok(())
    }

    fn copy_user_assets(&self, from: &Path, to: &Path) -> Result<(), RenderError> {
        if !from.exists() {
            debug!(dir = %from.display(), "no user asset directory, skipping");
            return Ok(());
        }

        for entry in WalkDir::new(from).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(from).unwrap_or(path);
            let dest = to.join(relative);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(path, &dest)?;
            debug!(file = %relative.display(), "copied asset");
        }

        Ok(())
    }
}

/// One-call build used by the CLI: load-or-default config is the caller's
/// job, everything after that lives here.
pub fn build_site(
    config: Config,
    output_dir: &Path,
    assets_dir: Option<&Path>,
    dev: Option<(&str, u16)>,
) -> Result<(), RenderError> {
    let mut builder = SiteBuilder::new().config(config).output_dir(output_dir);
    if let Some(dir) = assets_dir {
        builder = builder.assets_dir(dir);
    }
    if let Some((host, port)) = dev {
        builder = builder.dev_mode(host, port);
    }

    let site = builder.build().map_err(|e| match e {
        BuildError::TemplateError(t) => RenderError::TemplateError(t),
    })?;
    site.render_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SECTIONS;

    #[test]
    fn render_all_writes_page_and_theme_assets() {
        let out = tempfile::tempdir().unwrap();
        let site = SiteBuilder::new()
            .output_dir(out.path())
            .build()
            .unwrap();
        site.render_all().unwrap();

        let html = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        let mut last = 0;
        for (id, _) in SECTIONS {
            let anchor = format!("id=\"{}\"", id);
            let pos = html.find(&anchor).unwrap_or_else(|| panic!("{} missing", id));
            assert!(pos > last, "section {} out of order", id);
            last = pos;
        }

        for (name, _) in THEME_ASSETS {
            assert!(out.path().join("assets").join(name).exists());
        }
    }

    #[test]
    fn dev_mode_injects_the_livereload_snippet() {
        let out = tempfile::tempdir().unwrap();
        let site = SiteBuilder::new()
            .output_dir(out.path())
            .dev_mode("127.0.0.1", 3000)
            .build()
            .unwrap();
        site.render_all().unwrap();

        let html = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(html.contains("__livereload"));
    }

    #[test]
    fn user_assets_are_copied_recursively() {
        let assets = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(assets.path().join("img")).unwrap();
        std::fs::write(assets.path().join("img/me.jpg"), b"jpg").unwrap();

        let out = tempfile::tempdir().unwrap();
        let site = SiteBuilder::new()
            .output_dir(out.path())
            .assets_dir(assets.path())
            .build()
            .unwrap();
        site.render_all().unwrap();

        assert!(out.path().join("assets/img/me.jpg").exists());
    }
}
