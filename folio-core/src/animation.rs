use serde::Serialize;

/// When a reveal transition starts.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Plays once the page has loaded, after the configured delay.
    Load,
    /// Plays the first time the element enters the viewport, then never
    /// again. The runner unobserves the element after the first firing.
    View,
}

/// A declarative enter transition. Each record describes the element's
/// initial offset from its resting state; the runner animates it back to
/// identity. Serialized into a `data-reveal` attribute consumed by one
/// generic script, so sections carry configuration rather than animation
/// code.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Reveal {
    pub opacity: f32,
    pub x: i32,
    pub y: i32,
    pub scale: f32,
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    #[serde(rename = "delay")]
    pub delay_ms: u32,
    pub trigger: Trigger,
}

impl Reveal {
    /// Fade in with no movement.
    pub fn fade() -> Self {
        Self {
            opacity: 0.0,
            x: 0,
            y: 0,
            scale: 1.0,
            duration_ms: 600,
            delay_ms: 0,
            trigger: Trigger::View,
        }
    }

    /// Fade in while rising `y` pixels.
    pub fn fade_up(y: i32) -> Self {
        Self { y, ..Self::fade() }
    }

    /// Fade in while sliding from `x` pixels to the right.
    pub fn fade_left(x: i32) -> Self {
        Self { x, ..Self::fade() }
    }

    /// Fade in while growing from `scale`.
    pub fn grow(scale: f32) -> Self {
        Self {
            scale,
            ..Self::fade()
        }
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn delay(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn on_load(mut self) -> Self {
        self.trigger = Trigger::Load;
        self
    }

    /// Cascade for list items: each subsequent item waits a fixed `step_ms`
    /// increment more than the previous one.
    pub fn staggered(mut self, step_ms: u32, index: usize) -> Self {
        self.delay_ms += step_ms * index as u32;
        self
    }

    /// The JSON payload placed in the `data-reveal` attribute.
    pub fn attr(&self) -> String {
        serde_json::to_string(self).expect("reveal config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_scales_with_index() {
        let base = Reveal::fade_up(20).delay(100);
        assert_eq!(base.clone().staggered(100, 0).delay_ms, 100);
        assert_eq!(base.clone().staggered(100, 3).delay_ms, 400);
    }

    #[test]
    fn attr_is_compact_json_for_the_runner() {
        let attr = Reveal::fade_up(30).duration(800).on_load().attr();
        let parsed: serde_json::Value = serde_json::from_str(&attr).unwrap();
        assert_eq!(parsed["y"], 30);
        assert_eq!(parsed["duration"], 800);
        assert_eq!(parsed["trigger"], "load");
    }

    #[test]
    fn view_trigger_is_the_default() {
        assert_eq!(Reveal::fade().trigger, Trigger::View);
    }
}
