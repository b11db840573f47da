//! Scene-wide visibility state: idle until the planet is clicked, then a
//! timed fade of everything the intro reveals.

use starlit_space::WHITE;

use crate::object::{Category, Drawable};

/// Opacity of fadeable objects while idle, and where the fade starts.
pub const IDLE_OPACITY: f64 = 0.1;

/// Fade increase per frame once the intro has started.
pub const FADE_STEP: f64 = 0.025;

/// Phase derived from [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    TransitioningIn,
    Active,
}

/// Owned replacement for the scene's global intro flags.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    intro_started: bool,
    fade_opacity: f64,
    fade_in_progress: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            intro_started: false,
            fade_opacity: IDLE_OPACITY,
            fade_in_progress: false,
        }
    }

    pub fn intro_started(&self) -> bool {
        self.intro_started
    }

    pub fn fade_opacity(&self) -> f64 {
        self.fade_opacity
    }

    pub fn phase(&self) -> Phase {
        if !self.intro_started {
            Phase::Idle
        } else if self.fade_opacity < 1.0 {
            Phase::TransitioningIn
        } else {
            Phase::Active
        }
    }

    /// Start the intro. Returns `false` if it had already started.
    pub fn trigger(&mut self) -> bool {
        if self.intro_started {
            return false;
        }
        self.intro_started = true;
        self.fade_in_progress = true;
        true
    }

    /// Frame-start bookkeeping: ramp the fade, or pin it while idle.
    pub fn begin_frame(&mut self) {
        if self.fade_in_progress && self.fade_opacity < 1.0 {
            self.fade_opacity += FADE_STEP;
            if self.fade_opacity > 1.0 {
                self.fade_opacity = 1.0;
            }
        }
        if !self.intro_started {
            self.fade_opacity = IDLE_OPACITY;
        }
    }

    /// Apply the visibility rule for the current phase to one drawable.
    pub fn apply(&self, drawable: &mut Drawable) {
        let category = drawable.category();
        let material = &mut drawable.material;

        if !self.intro_started {
            match category {
                Category::Starfield => {
                    material.transparent = false;
                    material.opacity = 1.0;
                }
                Category::Ring => {
                    material.transparent = false;
                    material.opacity = 1.0;
                    if material.color.is_some() {
                        material.color = Some(WHITE);
                    }
                }
                Category::Exempt => {}
                Category::Fadeable => {
                    material.transparent = true;
                    material.opacity = IDLE_OPACITY as f32;
                }
            }
            return;
        }

        match category {
            Category::Ring | Category::Exempt => {
                material.opacity = 1.0;
                material.transparent = false;
            }
            Category::Fadeable | Category::Starfield => {
                material.transparent = true;
                material.opacity = self.fade_opacity as f32;
            }
        }
        if material.color.is_some() {
            material.color = Some(WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::MaterialState;

    fn drawable(category: Category) -> Drawable {
        Drawable::new(category, MaterialState::transparent(0.5, Some([0.6, 0.9, 1.0])))
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = SessionState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.intro_started());
        assert_eq!(state.fade_opacity(), IDLE_OPACITY);
    }

    #[test]
    fn test_fade_reaches_one_after_exactly_36_frames() {
        let mut state = SessionState::new();
        state.begin_frame();
        assert!(state.trigger());
        assert!(state.intro_started(), "intro flips immediately on trigger");

        for frame in 1..=35 {
            state.begin_frame();
            assert!(
                state.fade_opacity() < 1.0,
                "fade saturated early at frame {frame}"
            );
            assert_eq!(state.phase(), Phase::TransitioningIn);
        }
        state.begin_frame();
        assert_eq!(state.fade_opacity(), 1.0);
        assert_eq!(state.phase(), Phase::Active);
    }

    #[test]
    fn test_fade_monotonic_and_bounded() {
        let mut state = SessionState::new();
        state.trigger();
        let mut last = state.fade_opacity();
        for _ in 0..100 {
            state.begin_frame();
            let fade = state.fade_opacity();
            assert!(fade >= last, "fade decreased from {last} to {fade}");
            assert!((IDLE_OPACITY..=1.0).contains(&fade));
            assert!(state.intro_started());
            last = fade;
        }
    }

    #[test]
    fn test_trigger_is_one_shot() {
        let mut state = SessionState::new();
        assert!(state.trigger());
        assert!(!state.trigger());
        assert!(state.intro_started());
    }

    #[test]
    fn test_idle_visibility() {
        let state = SessionState::new();

        let mut fade = drawable(Category::Fadeable);
        state.apply(&mut fade);
        assert_eq!(fade.material.opacity, 0.1);
        assert!(fade.material.transparent);
        assert_eq!(fade.material.color, Some([0.6, 0.9, 1.0]), "idle keeps tints");

        let mut ring = drawable(Category::Ring);
        state.apply(&mut ring);
        assert_eq!(ring.material, MaterialState::opaque(Some(WHITE)));

        let mut exempt = drawable(Category::Exempt);
        let before = exempt;
        state.apply(&mut exempt);
        assert_eq!(exempt, before, "exempt objects are untouched while idle");

        let mut stars = drawable(Category::Starfield);
        state.apply(&mut stars);
        assert_eq!(stars.material.opacity, 1.0);
        assert!(!stars.material.transparent);
    }

    #[test]
    fn test_post_intro_visibility_tracks_fade() {
        let mut state = SessionState::new();
        state.trigger();
        for _ in 0..4 {
            state.begin_frame();
        }

        let mut fade = drawable(Category::Fadeable);
        state.apply(&mut fade);
        assert_eq!(fade.material.opacity, state.fade_opacity() as f32);
        assert!(fade.material.transparent);
        assert_eq!(fade.material.color, Some(WHITE));

        for category in [Category::Ring, Category::Exempt] {
            let mut d = drawable(category);
            state.apply(&mut d);
            assert_eq!(d.material, MaterialState::opaque(Some(WHITE)));
        }

        let mut shader = Drawable::new(Category::Fadeable, MaterialState::opaque(None));
        state.apply(&mut shader);
        assert_eq!(shader.material.color, None, "shader materials have no color");
    }
}
