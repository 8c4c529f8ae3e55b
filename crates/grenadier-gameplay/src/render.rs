//! Render hand-off for projectiles.
//!
//! Drawing is done elsewhere; this module only turns projectiles into
//! screen-space instances.

use glam::DVec2;

use crate::projectile::Projectile;

/// GPU-friendly projectile instance for rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectileInstance {
    /// Screen position (x, y).
    pub position: [f32; 2],
    /// Sprite rotation in degrees.
    pub rotation: f32,
    /// Projectile kind as `u8` widened for alignment.
    pub kind: u32,
}

impl ProjectileInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Create from a projectile, shifting by the camera `offset`.
    #[must_use]
    pub fn from_projectile(projectile: &Projectile, offset: DVec2) -> Self {
        let screen = (projectile.position() - offset).as_vec2();
        Self {
            position: screen.to_array(),
            rotation: projectile.rotation as f32,
            kind: projectile.kind as u32,
        }
    }
}

/// Something projectiles can be drawn onto.
pub trait RenderSurface {
    /// Draws one projectile sprite.
    fn draw_projectile(&mut self, instance: &ProjectileInstance);
}

impl RenderSurface for Vec<ProjectileInstance> {
    fn draw_projectile(&mut self, instance: &ProjectileInstance) {
        self.push(*instance);
    }
}
