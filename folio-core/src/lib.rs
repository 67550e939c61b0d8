pub mod animation;
pub mod builder;
pub mod config;
pub mod content;
pub mod form;
pub mod markdown;
pub mod sections;
pub mod template;

// Re-export main types
pub use animation::{Reveal, Trigger};
pub use builder::{BuildError, RenderError, Site, SiteBuilder, build_site};
pub use config::{Config, ConfigError};
pub use content::{Profile, Project, Skill, TimelineEntry};
pub use form::{ContactForm, ContactMessage, Field, FormState, Notice, Notify, Submit};
pub use sections::NavItem;
pub use template::{Renderer, TemplateError};
