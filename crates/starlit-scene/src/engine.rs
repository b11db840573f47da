//! The frame engine: owns the scene and runs the per-frame update in a fixed
//! order, resolving clicks and asset completions between frames.

use starlit_animation::{Camera, CameraRig};
use starlit_lod::LodSelector;

use crate::error::SceneError;
use crate::external::{
    AssetEvent, AssetProvider, AssetReceiver, AudioPlayer, CanvasJob, FrameView, PlaybackOptions,
    Renderer, neon_fit,
};
use crate::scene::Scene;
use crate::session::{Phase, SessionState};

/// Edge length of the square texture each photo is fitted into.
pub const PHOTO_TEXTURE_SIZE: u32 = 256;

/// Host-provided inputs of the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    pub seed: u64,
    /// Viewport width over height.
    pub aspect: f32,
    /// One photo cloud is built per path.
    pub image_paths: Vec<String>,
    pub font_url: String,
    pub audio_url: String,
}

/// What happened during one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub phase: Phase,
    pub fade_opacity: f64,
    pub shooting_stars: usize,
    pub lod_switches: usize,
    pub ready_clouds: usize,
    /// Objects skipped or removed because their update failed.
    pub failures: usize,
}

/// Drives the scene with host-provided capabilities.
pub struct SceneEngine<R, A, P> {
    renderer: R,
    assets: A,
    audio: P,
    events: AssetReceiver,
    settings: EngineSettings,
    scene: Scene,
    session: SessionState,
    rig: CameraRig,
    selector: LodSelector,
    frame: u64,
}

impl<R: Renderer, A: AssetProvider, P: AudioPlayer> SceneEngine<R, A, P> {
    /// Build the scene and request every asynchronous asset.
    ///
    /// `events` must be the receiving end of the channel `assets` reports on.
    pub fn new(
        settings: EngineSettings,
        mut renderer: R,
        mut assets: A,
        audio: P,
        events: AssetReceiver,
    ) -> Self {
        let scene = Scene::build(
            settings.seed,
            settings.image_paths.len(),
            &mut renderer,
            &mut assets,
        );
        for (group, path) in settings.image_paths.iter().enumerate() {
            assets.load_image(group, path);
        }
        assets.load_font(&settings.font_url);
        tracing::info!(
            seed = settings.seed,
            clouds = scene.clouds.len(),
            galaxy_points = scene.galaxy.particles.len(),
            "Scene built"
        );

        Self {
            renderer,
            assets,
            audio,
            events,
            rig: CameraRig::new(Camera::new(settings.aspect)),
            settings,
            scene,
            session: SessionState::new(),
            selector: LodSelector::default(),
            frame: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn camera(&self) -> &Camera {
        self.rig.camera()
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn audio(&self) -> &P {
        &self.audio
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Run one frame. `time` is seconds since the engine started.
    pub fn frame(&mut self, time: f64) -> FrameStats {
        self.drain_asset_events();
        let mut failures = 0;

        self.rig.update();
        self.scene.set_planet_time(time);

        self.session.begin_frame();
        self.scene.apply_visibility(&self.session);

        let pool = self.scene.pool.update(time);
        failures += pool.failed.len();

        let camera = self.rig.camera().position;
        let switches = self.scene.update_lod(&self.selector, camera);
        for (group, switch) in &switches {
            tracing::debug!(group, from = ?switch.from, to = ?switch.to, "Photo cloud LOD switch");
        }

        self.scene.face_planet(camera);

        for err in self.scene.update_rings(time, camera) {
            tracing::warn!("Skipping glyph: {}", SceneError::from(err));
            failures += 1;
        }

        self.scene.force_starfield_opaque();

        self.frame += 1;
        self.renderer.render(&FrameView {
            frame: self.frame,
            camera: self.rig.camera(),
            scene: &self.scene,
            session: &self.session,
        });

        FrameStats {
            frame: self.frame,
            phase: self.session.phase(),
            fade_opacity: self.session.fade_opacity(),
            shooting_stars: self.scene.pool.len(),
            lod_switches: switches.len(),
            ready_clouds: self.scene.clouds.iter().filter(|c| c.lod.is_ready()).count(),
            failures,
        }
    }

    /// Resolve a pointer click at pixel (`x`, `y`). Returns whether it
    /// started the intro.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        if self.session.intro_started() {
            return false;
        }
        let ray = self.renderer.screen_to_ray(x, y, self.rig.camera());
        let Some(hit) = self
            .renderer
            .intersect(&ray, &self.scene.planet.pick_target())
        else {
            tracing::trace!(x, y, "Click missed the planet");
            return false;
        };
        if !self.session.trigger() {
            return false;
        }

        tracing::info!(distance = hit.distance, "Planet clicked, starting intro");
        self.audio
            .play(&self.settings.audio_url, PlaybackOptions::default());
        self.rig.start_fly_in();
        self.scene.set_starfield_range(true);
        true
    }

    fn drain_asset_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_asset_event(event);
        }
    }

    fn handle_asset_event(&mut self, event: AssetEvent) {
        match event {
            AssetEvent::ImageLoaded { group, image } => {
                let texture = self.assets.paint_canvas(&CanvasJob::NeonFit {
                    image,
                    size: PHOTO_TEXTURE_SIZE,
                    rect: neon_fit(image.width, image.height, PHOTO_TEXTURE_SIZE),
                });
                match self.scene.attach_cloud_texture(group, texture) {
                    Ok(_) => tracing::debug!(group, "Photo cloud texture attached"),
                    Err(err) => tracing::warn!("Dropping image: {err}"),
                }
            }
            AssetEvent::ImageFailed { group, reason } => {
                tracing::warn!("{}", SceneError::ImageUnavailable { group, reason });
            }
            AssetEvent::FontLoaded(_) => {
                if self.scene.attach_font() {
                    tracing::info!(rings = self.scene.rings.rings().len(), "Text rings ready");
                }
            }
            AssetEvent::FontFailed { reason } => {
                if self.scene.font_failed() {
                    tracing::warn!("{}; continuing without rings", SceneError::FontUnavailable(reason));
                }
            }
        }
    }
}
