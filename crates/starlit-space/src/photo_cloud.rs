//! Per-image photo clouds: galaxy-shaped point groups with a white near
//! representation and a gradient far representation over one shared
//! position buffer.

use std::sync::Arc;

use glam::{DVec3, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starlit_lod::PointSet;

use crate::color::{Rgb, WHITE};
use crate::galaxy::{CORE_RADIUS, GalaxyParams};

/// Positions and per-vertex colors of one representation.
///
/// Cloning is cheap: both buffers are reference counted.
#[derive(Clone, Debug, PartialEq)]
pub struct CloudGeometry {
    positions: Arc<[Vec3]>,
    colors: Arc<[Rgb]>,
}

impl CloudGeometry {
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether both geometries point at the very same position buffer.
    pub fn shares_positions_with(&self, other: &CloudGeometry) -> bool {
        Arc::ptr_eq(&self.positions, &other.positions)
    }
}

impl PointSet for CloudGeometry {
    fn points(&self) -> &[Vec3] {
        &self.positions
    }
}

/// One photo cloud, centered on its own centroid.
#[derive(Clone, Debug)]
pub struct PhotoCloud {
    group: usize,
    pivot: Vec3,
    near: CloudGeometry,
    far: CloudGeometry,
    requested: usize,
}

impl PhotoCloud {
    /// Index of the image this cloud displays.
    pub fn group(&self) -> usize {
        self.group
    }

    /// World position of the cloud's local origin (its original centroid).
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn near(&self) -> &CloudGeometry {
        &self.near
    }

    pub fn far(&self) -> &CloudGeometry {
        &self.far
    }

    pub fn len(&self) -> usize {
        self.near.len()
    }

    pub fn is_empty(&self) -> bool {
        self.near.is_empty()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn discarded(&self) -> usize {
        self.requested - self.len()
    }
}

/// Generates one cloud per image. Deterministic for a given seed.
pub struct PhotoCloudGenerator {
    seed: u64,
    groups: usize,
    params: GalaxyParams,
}

impl PhotoCloudGenerator {
    pub fn new(seed: u64, groups: usize) -> Self {
        Self {
            seed,
            groups,
            params: GalaxyParams::PHOTO_CLOUDS,
        }
    }

    /// Candidates drawn for every group.
    pub fn points_per_group(&self) -> usize {
        if self.groups == 0 {
            0
        } else {
            self.params.count / self.groups
        }
    }

    /// Build the clouds. Groups left without any point are omitted, so the
    /// result can be shorter than the number of images.
    pub fn generate(&self) -> Vec<PhotoCloud> {
        let params = &self.params;
        let per_group = self.points_per_group();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut clouds = Vec::with_capacity(self.groups);

        for group in 0..self.groups {
            let mut positions = Vec::with_capacity(per_group);
            let mut colors = Vec::with_capacity(per_group);

            for i in 0..per_group {
                let global_index = group * per_group + i;
                let radius = params.sample_radius(&mut rng);
                if radius < CORE_RADIUS {
                    continue;
                }
                let jitter = params.sample_jitter(&mut rng, radius);
                positions.push(params.arm_position(global_index, radius, jitter));
                colors.push(params.sample_color(&mut rng, radius));
            }

            if positions.is_empty() {
                log::debug!("Photo cloud {group} has no points, skipping");
                continue;
            }

            let pivot = centroid(&positions);
            for p in &mut positions {
                *p -= pivot;
            }

            let positions: Arc<[Vec3]> = positions.into();
            let near_colors: Arc<[Rgb]> = vec![WHITE; positions.len()].into();
            clouds.push(PhotoCloud {
                group,
                pivot,
                near: CloudGeometry {
                    positions: Arc::clone(&positions),
                    colors: near_colors,
                },
                far: CloudGeometry {
                    positions,
                    colors: colors.into(),
                },
                requested: per_group,
            });
        }

        log::debug!("Generated {} photo clouds", clouds.len());
        clouds
    }
}

fn centroid(points: &[Vec3]) -> Vec3 {
    let sum: DVec3 = points.iter().map(|p| p.as_dvec3()).sum();
    (sum / points.len() as f64).as_vec3()
}
