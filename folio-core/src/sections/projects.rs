use serde::Serialize;

use crate::animation::Reveal;
use crate::content::Project;
use crate::template::{RenderContext, Renderer, TemplateError};

const CARD_STAGGER_MS: u32 = 100;

#[derive(Serialize)]
struct ProjectView<'a> {
    title: &'a str,
    description: &'a str,
    tech: &'a [String],
    repository: &'a str,
    demo: Option<&'a str>,
    image: Option<&'a str>,
    reveal: String,
}

/// Project card grid. Cards cascade in; a card without a demo link renders
/// only its repository button.
pub fn render(projects: &[Project], renderer: &Renderer) -> Result<String, TemplateError> {
    let cards: Vec<ProjectView> = projects
        .iter()
        .enumerate()
        .map(|(index, project)| ProjectView {
            title: &project.title,
            description: &project.description,
            tech: &project.tech,
            repository: &project.repository,
            demo: project.demo.as_deref(),
            image: project.image.as_deref(),
            reveal: Reveal::fade_up(20)
                .duration(500)
                .staggered(CARD_STAGGER_MS, index)
                .attr(),
        })
        .collect();

    let mut context = RenderContext::new();
    context.add_to_context("projects", &cards);
    context.add_to_context("section_reveal", &Reveal::fade_up(20).duration(800).attr());

    renderer.render("projects.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_projects;

    #[test]
    fn missing_demo_suppresses_the_demo_button() {
        let renderer = Renderer::new().unwrap();
        let html = render(&default_projects(), &renderer).unwrap();
        // Three cards, two demo buttons: the database project has no demo.
        assert_eq!(html.matches("class=\"button card-action\"").count(), 3);
        assert_eq!(html.matches("class=\"button card-action primary\"").count(), 2);
    }
}
