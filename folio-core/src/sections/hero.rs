use crate::animation::Reveal;
use crate::content::Profile;
use crate::template::{RenderContext, Renderer, TemplateError};

/// Full-viewport banner: greeting, headline, tagline, call-to-action
/// buttons and a scroll hint. Everything animates on page load with
/// increasing delays, so the banner builds up top to bottom.
pub fn render(profile: &Profile, renderer: &Renderer) -> Result<String, TemplateError> {
    let mut context = RenderContext::new();
    context.add_to_context("profile", profile);
    context.add_to_context(
        "container_reveal",
        &Reveal::fade_up(30).duration(800).on_load().attr(),
    );
    context.add_to_context(
        "greeting_reveal",
        &Reveal::fade().duration(600).delay(200).on_load().attr(),
    );
    context.add_to_context(
        "heading_reveal",
        &Reveal::fade_up(20).duration(800).delay(400).on_load().attr(),
    );
    context.add_to_context(
        "tagline_reveal",
        &Reveal::fade_up(20).duration(800).delay(600).on_load().attr(),
    );
    context.add_to_context(
        "actions_reveal",
        &Reveal::fade_up(20).duration(800).delay(800).on_load().attr(),
    );
    context.add_to_context(
        "hint_reveal",
        &Reveal::fade().duration(800).delay(1200).on_load().attr(),
    );

    renderer.render("hero.html", &context)
}
