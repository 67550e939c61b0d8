use serde::Serialize;

use crate::animation::Reveal;
use crate::content::TimelineEntry;
use crate::template::{RenderContext, Renderer, TemplateError};

const ITEM_STAGGER_MS: u32 = 200;

#[derive(Serialize)]
struct TimelineView<'a> {
    year: &'a str,
    technologies: &'a [String],
    description: &'a str,
    /// Entries alternate sides of the center line, starting left.
    side: &'static str,
    reveal: String,
}

pub fn render(entries: &[TimelineEntry], renderer: &Renderer) -> Result<String, TemplateError> {
    let items: Vec<TimelineView> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| TimelineView {
            year: &entry.year,
            technologies: &entry.technologies,
            description: &entry.description,
            side: if index % 2 == 0 { "left" } else { "right" },
            reveal: Reveal::fade_up(50)
                .duration(600)
                .staggered(ITEM_STAGGER_MS, index)
                .attr(),
        })
        .collect();

    let mut context = RenderContext::new();
    context.add_to_context("entries", &items);
    context.add_to_context("section_reveal", &Reveal::fade_up(20).duration(800).attr());

    renderer.render("timeline.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_timeline;

    #[test]
    fn entries_alternate_sides_and_stagger() {
        let renderer = Renderer::new().unwrap();
        let html = render(&default_timeline(), &renderer).unwrap();
        assert!(html.contains("timeline-item left"));
        assert!(html.contains("timeline-item right"));
        // Second entry waits one stagger step longer than the first.
        assert!(html.contains("&quot;delay&quot;:200"));
    }
}
