//! Scene object tags and material state.

use starlit_space::{Rgb, WHITE};

use crate::external::TextureHandle;

/// How the visibility pass treats an object. Assigned at construction and
/// never inferred afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// A text ring or one of its glyphs: always opaque.
    Ring,
    /// The planet and the central glow: untouched while idle, opaque after.
    Exempt,
    /// Everything else: dimmed while idle, follows the fade after.
    Fadeable,
    /// The background starfield: always ends the frame fully opaque.
    Starfield,
}

/// Mutable appearance of one material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialState {
    pub opacity: f32,
    pub transparent: bool,
    /// Tint color. `None` for shader materials, which have no color to set.
    pub color: Option<Rgb>,
}

impl MaterialState {
    pub fn opaque(color: Option<Rgb>) -> Self {
        Self {
            opacity: 1.0,
            transparent: false,
            color,
        }
    }

    pub fn transparent(opacity: f32, color: Option<Rgb>) -> Self {
        Self {
            opacity,
            transparent: true,
            color,
        }
    }
}

/// A material together with the category of the object that owns it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    category: Category,
    pub material: MaterialState,
}

impl Drawable {
    pub fn new(category: Category, material: MaterialState) -> Self {
        Self { category, material }
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Color blending mode of a point material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

/// Point-sprite material used by the photo clouds.
#[derive(Clone, Debug, PartialEq)]
pub struct PointMaterial {
    pub texture: TextureHandle,
    pub size: f32,
    pub alpha_test: f32,
    pub depth_write: bool,
    pub depth_test: bool,
    pub blending: Blending,
    pub vertex_colors: bool,
    pub drawable: Drawable,
}

impl PointMaterial {
    /// Opaque, depth-tested close-up material.
    pub fn near(texture: TextureHandle) -> Self {
        Self {
            texture,
            size: 1.0,
            alpha_test: 0.2,
            depth_write: true,
            depth_test: true,
            blending: Blending::Normal,
            vertex_colors: true,
            drawable: Drawable::new(Category::Fadeable, MaterialState::opaque(Some(WHITE))),
        }
    }

    /// Additive glow material for distant clouds.
    pub fn far(texture: TextureHandle) -> Self {
        Self {
            texture,
            size: 1.0,
            alpha_test: 0.2,
            depth_write: false,
            depth_test: true,
            blending: Blending::Additive,
            vertex_colors: true,
            drawable: Drawable::new(
                Category::Fadeable,
                MaterialState::transparent(1.0, Some(WHITE)),
            ),
        }
    }
}
