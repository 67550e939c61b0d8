use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::content::{
    Profile, Project, Skill, TimelineEntry, default_projects, default_skills, default_timeline,
};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
    Invalid { field: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "TOML parse error: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid value for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

/// The whole site definition: page metadata, personal copy and the three
/// content registries. Every table is optional in `folio.toml`; missing
/// tables fall back to the built-in portfolio content.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub profile: Profile,
    #[serde(rename = "skill")]
    pub skills: Vec<Skill>,
    #[serde(rename = "timeline")]
    pub timeline: Vec<TimelineEntry>,
    #[serde(rename = "project")]
    pub projects: Vec<Project>,
    pub contact: ContactConfig,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&data)?;
        config.fill_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Empty registries mean "not overridden", not "render nothing".
    fn fill_defaults(&mut self) {
        if self.skills.is_empty() {
            self.skills = default_skills();
        }
        if self.timeline.is_empty() {
            self.timeline = default_timeline();
        }
        if self.projects.is_empty() {
            self.projects = default_projects();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for skill in &self.skills {
            if skill.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "skill.name".into(),
                    reason: "Name cannot be empty".into(),
                });
            }
            if skill.percentage > 100 {
                return Err(ConfigError::Invalid {
                    field: format!("skill.{}.percentage", skill.name),
                    reason: format!("Must be between 0 and 100, got {}", skill.percentage),
                });
            }
        }

        for project in &self.projects {
            if project.repository.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: format!("project.{}.repository", project.title),
                    reason: "Repository link cannot be empty".into(),
                });
            }
        }

        Ok(())
    }

    /// Built-in content, used when no config file exists.
    pub fn with_defaults() -> Self {
        let mut config = Self::default();
        config.fill_defaults();
        config
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: Some("Navadeep Reddi — Portfolio".into()),
            description: Some(
                "Personal portfolio: projects, skills and the journey so far".to_string(),
            ),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ContactConfig {
    /// Where the rendered form posts its payload. The dev server answers
    /// this route locally; static deployments point it at their own backend.
    pub endpoint: String,
    pub heading: String,
    pub blurb: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/contact".into(),
            heading: "Get In Touch".into(),
            blurb: "Let's build something amazing together! I'm currently available for \
                    freelance projects and internships."
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_backfill_empty_registries() {
        let config = Config::with_defaults();
        assert!(!config.skills.is_empty());
        assert!(!config.timeline.is_empty());
        assert!(!config.projects.is_empty());
    }

    #[test]
    fn percentage_above_bound_is_rejected() {
        let mut config = Config::with_defaults();
        config.skills[0].percentage = 101;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn partial_toml_overrides_only_named_tables() {
        let parsed: Config = toml::from_str(
            r#"
            [site]
            title = "Someone Else"

            [[skill]]
            name = "Rust"
            percentage = 60
            color = "orange"
            "#,
        )
        .unwrap();
        let mut config = parsed;
        config.fill_defaults();

        assert_eq!(config.site.title.as_deref(), Some("Someone Else"));
        assert_eq!(config.skills.len(), 1);
        // Untouched registries still come from the defaults.
        assert_eq!(config.timeline.len(), 4);
    }
}
