//! Headless renderer: picks with analytic rays and logs frame summaries
//! instead of drawing.

use glam::Vec3;
use starlit_animation::Camera;
use starlit_scene::{FrameView, Hit, ParticleBuffers, PickTarget, Ray, RenderHandle, Renderer};
use tracing::info;

/// A registered particle system.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystemInfo {
    pub label: String,
    pub points: usize,
    pub colored: bool,
}

/// Renderer for running the scene without a window.
pub struct HeadlessRenderer {
    width: u32,
    height: u32,
    summary_interval: u64,
    systems: Vec<ParticleSystemInfo>,
    frames_rendered: u64,
}

impl HeadlessRenderer {
    /// `summary_interval` is the number of frames between logged summaries;
    /// zero disables them.
    pub fn new(width: u32, height: u32, summary_interval: u64) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            summary_interval,
            systems: Vec::new(),
            frames_rendered: 0,
        }
    }

    pub fn systems(&self) -> &[ParticleSystemInfo] {
        &self.systems
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Renderer for HeadlessRenderer {
    fn create_particle_system(&mut self, buffers: &ParticleBuffers<'_>) -> RenderHandle {
        self.systems.push(ParticleSystemInfo {
            label: buffers.label.to_string(),
            points: buffers.positions.len(),
            colored: buffers.colors.is_some(),
        });
        RenderHandle(self.systems.len() as u64 - 1)
    }

    fn render(&mut self, view: &FrameView<'_>) {
        self.frames_rendered += 1;
        if self.summary_interval == 0 || view.frame % self.summary_interval != 0 {
            return;
        }
        let scene = view.scene;
        let ready_clouds = scene.clouds.iter().filter(|c| c.lod.is_ready()).count();
        let p = view.camera.position;
        info!(
            frame = view.frame,
            phase = ?view.session.phase(),
            fade = view.session.fade_opacity(),
            shooting_stars = scene.pool.len(),
            ready_clouds,
            rings = scene.rings.rings().len(),
            stars_drawn = scene.starfield.draw_count,
            "Frame summary, camera at ({:.1}, {:.1}, {:.1})",
            p.x,
            p.y,
            p.z
        );
    }

    fn screen_to_ray(&self, x: f32, y: f32, camera: &Camera) -> Ray {
        let ndc_x = 2.0 * x / self.width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.height as f32;
        let half_height = (camera.fov_y_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * camera.aspect;

        let direction = camera.forward()
            + camera.right() * (ndc_x * half_width)
            + camera.up() * (ndc_y * half_height);
        Ray {
            origin: camera.position,
            direction: direction.try_normalize().unwrap_or(camera.forward()),
        }
    }

    fn intersect(&self, ray: &Ray, target: &PickTarget) -> Option<Hit> {
        match *target {
            PickTarget::Sphere { center, radius } => ray_sphere(ray, center, radius),
        }
    }
}

/// Nearest non-negative intersection of a ray with a sphere.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<Hit> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let distance = if -b - root >= 0.0 {
        -b - root
    } else if -b + root >= 0.0 {
        // Origin inside the sphere.
        -b + root
    } else {
        return None;
    };
    Some(Hit {
        distance,
        point: ray.at(distance),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(16.0 / 9.0)
    }

    #[test]
    fn test_center_ray_follows_forward() {
        let renderer = HeadlessRenderer::new(1280, 720, 0);
        let cam = camera();
        let ray = renderer.screen_to_ray(640.0, 360.0, &cam);
        assert!((ray.direction - cam.forward()).length() < 1e-5);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn test_center_click_hits_planet() {
        let renderer = HeadlessRenderer::new(1280, 720, 0);
        let cam = camera();
        let ray = renderer.screen_to_ray(640.0, 360.0, &cam);
        let hit = renderer
            .intersect(&ray, &PickTarget::Sphere {
                center: Vec3::ZERO,
                radius: 10.0,
            })
            .expect("center of the view looks at the planet");
        let expected = cam.position.length() - 10.0;
        assert!((hit.distance - expected).abs() < 1e-3);
        assert!((hit.point.length() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_corner_click_misses_planet() {
        let renderer = HeadlessRenderer::new(1280, 720, 0);
        let ray = renderer.screen_to_ray(0.0, 0.0, &camera());
        let target = PickTarget::Sphere {
            center: Vec3::ZERO,
            radius: 10.0,
        };
        assert!(renderer.intersect(&ray, &target).is_none());
    }

    #[test]
    fn test_ray_sphere_behind_origin() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 20.0),
            direction: Vec3::Z,
        };
        assert!(ray_sphere(&ray, Vec3::ZERO, 5.0).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        let hit = ray_sphere(&ray, Vec3::ZERO, 5.0).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_particle_systems_are_recorded() {
        let mut renderer = HeadlessRenderer::new(10, 10, 0);
        let points = [Vec3::ZERO, Vec3::ONE];
        let handle = renderer.create_particle_system(&ParticleBuffers {
            label: "stars",
            positions: &points,
            colors: None,
        });
        assert_eq!(handle, RenderHandle(0));
        assert_eq!(renderer.systems()[0].points, 2);
        assert!(!renderer.systems()[0].colored);
    }
}
