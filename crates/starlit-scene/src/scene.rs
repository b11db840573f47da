//! The scene graph: every drawable object, built once at startup and mutated
//! in place by the frame loop.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starlit_animation::{PLANET_RADIUS, RING_TEXTS, RingError, RingState, look_rotation};
use starlit_lod::{LodGroup, LodPair, LodSelector, LodSwitch};
use starlit_space::{
    CloudGeometry, GalaxyGenerator, GlowSprite, NebulaGenerator, ParticleGroup, PhotoCloud,
    PhotoCloudGenerator, STAR_COUNT, Starfield, StarfieldGenerator, WHITE, central_glow,
};

use crate::error::SceneError;
use crate::external::{
    AssetProvider, CanvasJob, ParticleBuffers, PickTarget, RenderHandle, Renderer, TextureHandle,
};
use crate::object::{Category, Drawable, MaterialState, PointMaterial};
use crate::pool::ShootingStarPool;
use crate::session::SessionState;

/// Shader time advances at half the elapsed time.
const PLANET_TIME_SCALE: f64 = 0.5;

/// Edge length of the painted planet surface texture.
const PLANET_TEXTURE_SIZE: u32 = 512;

/// The spiral galaxy particle system.
#[derive(Clone, Debug)]
pub struct GalaxyObject {
    pub particles: ParticleGroup,
    pub handle: RenderHandle,
    pub drawable: Drawable,
}

/// A glow sprite with its painted gradient texture.
#[derive(Clone, Debug)]
pub struct GlowObject {
    pub sprite: GlowSprite,
    pub texture: TextureHandle,
    pub drawable: Drawable,
}

/// The clickable planet.
#[derive(Clone, Debug)]
pub struct Planet {
    pub radius: f32,
    pub position: Vec3,
    pub rotation: Quat,
    /// Time uniform of the storm shader.
    pub storm_time: f64,
    pub texture: TextureHandle,
    pub drawable: Drawable,
}

impl Planet {
    /// Target used to resolve pointer clicks.
    pub fn pick_target(&self) -> PickTarget {
        PickTarget::Sphere {
            center: self.position,
            radius: self.radius,
        }
    }
}

/// A photo cloud with its renderer handles and LOD state.
#[derive(Clone, Debug)]
pub struct CloudObject {
    pub cloud: PhotoCloud,
    pub near_handle: RenderHandle,
    pub far_handle: RenderHandle,
    pub lod: LodGroup<CloudGeometry, PointMaterial>,
}

/// The background starfield with its current draw range.
#[derive(Clone, Debug)]
pub struct StarfieldObject {
    pub stars: Starfield,
    pub handle: RenderHandle,
    pub draw_count: usize,
    pub drawable: Drawable,
}

/// Seeds for every procedural part of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SceneSeeds {
    galaxy: u64,
    clouds: u64,
    nebula: u64,
    starfield: u64,
    pool: u64,
    planet: u64,
}

impl SceneSeeds {
    fn derive(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            galaxy: rng.random(),
            clouds: rng.random(),
            nebula: rng.random(),
            starfield: rng.random(),
            pool: rng.random(),
            planet: rng.random(),
        }
    }
}

/// Every object in the scene.
#[derive(Clone, Debug)]
pub struct Scene {
    pub galaxy: GalaxyObject,
    pub nebulae: Vec<GlowObject>,
    pub central_glow: GlowObject,
    pub planet: Planet,
    pub clouds: Vec<CloudObject>,
    pub starfield: StarfieldObject,
    pub rings: RingState,
    /// One material per glyph, indexed like `rings.rings()[r].glyphs()[g]`.
    pub ring_materials: Vec<Vec<Drawable>>,
    pub pool: ShootingStarPool,
}

impl Scene {
    /// Generate all procedural content and register it with the host.
    ///
    /// `image_count` is the number of photo-cloud images that will be
    /// requested. Their textures attach later through
    /// [`attach_cloud_texture`](Self::attach_cloud_texture).
    pub fn build<R: Renderer, A: AssetProvider>(
        seed: u64,
        image_count: usize,
        renderer: &mut R,
        assets: &mut A,
    ) -> Self {
        let seeds = SceneSeeds::derive(seed);

        let particles = GalaxyGenerator::new(seeds.galaxy).generate();
        let handle = renderer.create_particle_system(&ParticleBuffers {
            label: "galaxy",
            positions: particles.positions(),
            colors: Some(particles.colors()),
        });
        tracing::debug!(
            points = particles.len(),
            discarded = particles.discarded(),
            "Galaxy generated"
        );
        let galaxy = GalaxyObject {
            particles,
            handle,
            drawable: Drawable::new(Category::Fadeable, MaterialState::opaque(Some(WHITE))),
        };

        let nebulae = NebulaGenerator::new(seeds.nebula)
            .generate()
            .into_iter()
            .map(|sprite| glow_object(sprite, Category::Fadeable, assets))
            .collect();
        let central_glow = glow_object(central_glow(), Category::Exempt, assets);

        let planet = Planet {
            radius: PLANET_RADIUS,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            storm_time: 0.0,
            texture: assets.paint_canvas(&CanvasJob::PlanetSurface {
                size: PLANET_TEXTURE_SIZE,
                seed: seeds.planet,
            }),
            drawable: Drawable::new(Category::Exempt, MaterialState::opaque(None)),
        };

        let clouds = PhotoCloudGenerator::new(seeds.clouds, image_count)
            .generate()
            .into_iter()
            .map(|cloud| {
                let near_handle = renderer.create_particle_system(&ParticleBuffers {
                    label: "photo-cloud-near",
                    positions: cloud.near().positions(),
                    colors: Some(cloud.near().colors()),
                });
                let far_handle = renderer.create_particle_system(&ParticleBuffers {
                    label: "photo-cloud-far",
                    positions: cloud.far().positions(),
                    colors: Some(cloud.far().colors()),
                });
                CloudObject {
                    lod: LodGroup::new(cloud.pivot()),
                    cloud,
                    near_handle,
                    far_handle,
                }
            })
            .collect::<Vec<_>>();
        if clouds.len() < image_count {
            tracing::warn!(
                requested = image_count,
                built = clouds.len(),
                "Some photo clouds ended up empty and were dropped"
            );
        }

        let stars = StarfieldGenerator::new(seeds.starfield, STAR_COUNT).generate();
        let handle = renderer.create_particle_system(&ParticleBuffers {
            label: "starfield",
            positions: stars.positions(),
            colors: None,
        });
        let starfield = StarfieldObject {
            draw_count: stars.draw_count(false),
            stars,
            handle,
            drawable: Drawable::new(Category::Starfield, MaterialState::opaque(Some(WHITE))),
        };

        Self {
            galaxy,
            nebulae,
            central_glow,
            planet,
            clouds,
            starfield,
            rings: RingState::Pending,
            ring_materials: Vec::new(),
            pool: ShootingStarPool::new(seeds.pool),
        }
    }

    /// Give the photo cloud of image `group` its texture, making it drawable.
    ///
    /// Returns whether the cloud was uninitialized before.
    pub fn attach_cloud_texture(
        &mut self,
        group: usize,
        texture: TextureHandle,
    ) -> Result<bool, SceneError> {
        let object = self
            .clouds
            .iter_mut()
            .find(|c| c.cloud.group() == group)
            .ok_or(SceneError::UnknownPhotoGroup(group))?;
        let near = LodPair {
            geometry: object.cloud.near().clone(),
            material: PointMaterial::near(texture),
        };
        let far = LodPair {
            geometry: object.cloud.far().clone(),
            material: PointMaterial::far(texture),
        };
        Ok(object.lod.attach(near, far))
    }

    /// Lay out the text rings once the font is available. Ignored unless the
    /// rings are still pending.
    pub fn attach_font(&mut self) -> bool {
        if !matches!(self.rings, RingState::Pending) {
            return false;
        }
        self.rings = RingState::build(&RING_TEXTS);
        self.ring_materials = self
            .rings
            .rings()
            .iter()
            .map(|ring| {
                vec![
                    Drawable::new(Category::Ring, MaterialState::opaque(Some(WHITE)));
                    ring.glyphs().len()
                ]
            })
            .collect();
        true
    }

    /// Give up on the rings for good. Ignored unless they are still pending.
    pub fn font_failed(&mut self) -> bool {
        if !matches!(self.rings, RingState::Pending) {
            return false;
        }
        self.rings = RingState::Unavailable;
        true
    }

    pub fn set_planet_time(&mut self, time: f64) {
        self.planet.storm_time = time * PLANET_TIME_SCALE;
    }

    /// Turn the planet's +Z axis toward `camera`.
    pub fn face_planet(&mut self, camera: Vec3) {
        if let Some(rotation) = look_rotation(camera - self.planet.position) {
            self.planet.rotation = rotation;
        }
    }

    /// Apply the session's visibility rule to every drawable in the scene.
    pub fn apply_visibility(&mut self, session: &SessionState) {
        self.for_each_drawable_mut(|d| session.apply(d));
    }

    /// Visit every material in the scene, in the same order as
    /// [`for_each_drawable_mut`](Self::for_each_drawable_mut).
    pub fn for_each_drawable(&self, mut f: impl FnMut(&Drawable)) {
        f(&self.galaxy.drawable);
        for glow in &self.nebulae {
            f(&glow.drawable);
        }
        f(&self.central_glow.drawable);
        f(&self.planet.drawable);
        for cloud in &self.clouds {
            if let Some((near, far)) = cloud.lod.pairs() {
                f(&near.material.drawable);
                f(&far.material.drawable);
            }
        }
        f(&self.starfield.drawable);
        for glyphs in &self.ring_materials {
            for glyph in glyphs {
                f(glyph);
            }
        }
        for star in self.pool.stars() {
            for drawable in star.drawables() {
                f(drawable);
            }
        }
    }

    /// Visit every material in the scene.
    pub fn for_each_drawable_mut(&mut self, mut f: impl FnMut(&mut Drawable)) {
        f(&mut self.galaxy.drawable);
        for glow in &mut self.nebulae {
            f(&mut glow.drawable);
        }
        f(&mut self.central_glow.drawable);
        f(&mut self.planet.drawable);
        for cloud in &mut self.clouds {
            if let Some((near, far)) = cloud.lod.pairs_mut() {
                f(&mut near.material.drawable);
                f(&mut far.material.drawable);
            }
        }
        f(&mut self.starfield.drawable);
        for glyphs in &mut self.ring_materials {
            for glyph in glyphs {
                f(glyph);
            }
        }
        for star in self.pool.stars_mut() {
            for drawable in star.drawables_mut() {
                f(drawable);
            }
        }
    }

    /// Re-select the representation of every ready cloud.
    pub fn update_lod(&mut self, selector: &LodSelector, camera: Vec3) -> Vec<(usize, LodSwitch)> {
        self.clouds
            .iter_mut()
            .filter_map(|c| {
                c.lod
                    .update(selector, camera)
                    .map(|switch| (c.cloud.group(), switch))
            })
            .collect()
    }

    pub fn update_rings(&mut self, time: f64, camera: Vec3) -> Vec<RingError> {
        self.rings.update(time, camera)
    }

    /// The starfield ends every frame fully opaque, whatever the fade did.
    pub fn force_starfield_opaque(&mut self) {
        let material = &mut self.starfield.drawable.material;
        material.opacity = 1.0;
        material.transparent = false;
    }

    /// Draw the full starfield once the intro has started.
    pub fn set_starfield_range(&mut self, intro_started: bool) {
        self.starfield.draw_count = self.starfield.stars.draw_count(intro_started);
    }

    /// Number of drawables the visibility pass touches.
    pub fn drawable_count(&self) -> usize {
        let mut count = 0;
        self.for_each_drawable(|_| count += 1);
        count
    }
}

fn glow_object<A: AssetProvider>(sprite: GlowSprite, category: Category, assets: &mut A) -> GlowObject {
    let texture = assets.paint_canvas(&CanvasJob::RadialGlow {
        size: sprite.texture_size,
        core: sprite.core_color,
    });
    let drawable = Drawable::new(
        category,
        MaterialState::transparent(sprite.opacity, Some(WHITE)),
    );
    GlowObject {
        sprite,
        texture,
        drawable,
    }
}
