use serde::Serialize;

use crate::animation::Reveal;
use crate::config::ContactConfig;
use crate::content::Profile;
use crate::template::{RenderContext, Renderer, TemplateError};

#[derive(Serialize)]
struct ContactChannel<'a> {
    label: &'a str,
    value: &'a str,
    href: Option<String>,
}

/// Contact details on the left, the message form on the right. The form
/// posts to the configured endpoint; field rules mirror
/// [`crate::form::ContactForm::validate`] server-side.
pub fn render(
    profile: &Profile,
    contact: &ContactConfig,
    renderer: &Renderer,
) -> Result<String, TemplateError> {
    let channels = [
        ContactChannel {
            label: "Email",
            value: &profile.email,
            href: Some(format!("mailto:{}", profile.email)),
        },
        ContactChannel {
            label: "Location",
            value: &profile.location,
            href: None,
        },
        ContactChannel {
            label: "LinkedIn",
            value: trim_scheme(&profile.linkedin),
            href: Some(profile.linkedin.clone()),
        },
        ContactChannel {
            label: "GitHub",
            value: trim_scheme(&profile.github),
            href: Some(profile.github.clone()),
        },
    ];

    let mut context = RenderContext::new();
    context.add_to_context("profile", profile);
    context.add_to_context("contact", contact);
    context.add_to_context("channels", &channels);
    context.add_to_context("section_reveal", &Reveal::fade_up(20).duration(600).attr());
    context.add_to_context("info_reveal", &Reveal::fade_up(20).duration(600).attr());
    context.add_to_context("form_reveal", &Reveal::fade_up(20).duration(600).attr());

    renderer.render("contact.html", &context)
}

fn trim_scheme(url: &str) -> &str {
    url.trim_start_matches("https://").trim_start_matches("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_points_at_the_configured_endpoint() {
        let renderer = Renderer::new().unwrap();
        let contact = ContactConfig {
            endpoint: "https://formspree.io/f/abc".into(),
            ..ContactConfig::default()
        };
        let html = render(&Profile::default(), &contact, &renderer).unwrap();
        assert!(html.contains("data-endpoint="));
        assert!(html.contains("formspree.io"));
    }
}
