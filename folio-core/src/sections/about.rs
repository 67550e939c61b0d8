use crate::animation::Reveal;
use crate::content::Profile;
use crate::markdown::render_markdown;
use crate::template::{RenderContext, Renderer, TemplateError};

/// Two-column introduction: portrait on the left, bio and education card on
/// the right. Bio paragraphs are markdown-valued.
pub fn render(profile: &Profile, renderer: &Renderer) -> Result<String, TemplateError> {
    let bio: Vec<String> = profile.bio.iter().map(|p| render_markdown(p)).collect();

    let mut context = RenderContext::new();
    context.add_to_context("profile", profile);
    context.add_to_context("bio", &bio);
    context.add_to_context("section_reveal", &Reveal::fade_up(20).duration(800).attr());
    context.add_to_context(
        "portrait_reveal",
        &Reveal::grow(0.8).duration(800).delay(300).attr(),
    );
    context.add_to_context(
        "text_reveal",
        &Reveal::fade_left(50).duration(800).delay(500).attr(),
    );

    renderer.render("about.html", &context)
}
