use serde::Serialize;

use crate::animation::Reveal;
use crate::content::Skill;
use crate::template::{RenderContext, Renderer, TemplateError};

const ITEM_STAGGER_MS: u32 = 100;

#[derive(Serialize)]
struct SkillView<'a> {
    name: &'a str,
    percentage: u8,
    color: &'a str,
    reveal: String,
}

/// Proficiency grid. Items cascade in with a fixed stagger; each bar fills
/// from zero to its percentage the first time it is seen.
pub fn render(skills: &[Skill], renderer: &Renderer) -> Result<String, TemplateError> {
    let items: Vec<SkillView> = skills
        .iter()
        .enumerate()
        .map(|(index, skill)| SkillView {
            name: &skill.name,
            percentage: skill.percentage,
            color: &skill.color,
            reveal: Reveal::fade_up(20)
                .duration(500)
                .staggered(ITEM_STAGGER_MS, index)
                .attr(),
        })
        .collect();

    let mut context = RenderContext::new();
    context.add_to_context("skills", &items);
    context.add_to_context("section_reveal", &Reveal::fade_up(20).duration(800).attr());
    context.add_to_context(
        "teaser_reveal",
        &Reveal::fade_up(20).duration(800).delay(500).attr(),
    );

    renderer.render("skills.html", &context)
}
