pub mod about;
pub mod contact;
pub mod hero;
pub mod projects;
pub mod skills;
pub mod timeline;

use serde::Serialize;

use crate::config::Config;
use crate::template::{Renderer, TemplateError};

/// The page is a fixed vertical concatenation of these sections, in this
/// order. Identifiers double as scroll anchors for the navigation.
pub const SECTIONS: [(&str, &str); 6] = [
    ("home", "Home"),
    ("about", "About"),
    ("skills", "Skills"),
    ("timeline", "Timeline"),
    ("projects", "Projects"),
    ("contact", "Contact"),
];

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

pub fn nav_items() -> Vec<NavItem> {
    SECTIONS
        .iter()
        .map(|(id, label)| NavItem {
            text: label.to_string(),
            link: format!("#{}", id),
        })
        .collect()
}

/// Render every section fragment in page order. Each renderer is a pure
/// function of its registry; none reads another section's data.
pub fn render_all(config: &Config, renderer: &Renderer) -> Result<Vec<String>, TemplateError> {
    Ok(vec![
        hero::render(&config.profile, renderer)?,
        about::render(&config.profile, renderer)?,
        skills::render(&config.skills, renderer)?,
        timeline::render(&config.timeline, renderer)?,
        projects::render(&config.projects, renderer)?,
        contact::render(&config.profile, &config.contact, renderer)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_links_follow_section_order() {
        let items = nav_items();
        assert_eq!(items.len(), SECTIONS.len());
        assert_eq!(items[0].link, "#home");
        assert_eq!(items[5].text, "Contact");
    }

    #[test]
    fn every_fragment_carries_its_anchor() {
        let config = Config::with_defaults();
        let renderer = Renderer::new().unwrap();
        let fragments = render_all(&config, &renderer).unwrap();
        for ((id, _), fragment) in SECTIONS.iter().zip(&fragments) {
            assert!(
                fragment.contains(&format!("id=\"{}\"", id)),
                "section {} is missing its anchor",
                id
            );
        }
    }
}
