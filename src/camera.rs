use glam::{Mat4, Vec3, Vec4};

/// Right-handed perspective camera with explicit placement.
///
/// Passed into the renderer and the picking code at construction instead of
/// living as module state, so a second scene instance cannot collide with
/// this one's camera.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Clip-space projection matrix for the given surface aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-4), self.znear, self.zfar)
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space ray through backing-store pixel (`sx`, `sy`) of a surface
    /// sized `width` x `height`. Returns `(ray_origin, ray_direction)`.
    pub fn screen_to_world_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let w = width.max(1.0);
        let h = height.max(1.0);
        let ndc_x = (2.0 * sx / w) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / h);
        let inv = self.view_proj(w / h).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p_far: Vec3 = p_far.truncate() / p_far.w;
        let dir = (p_far - self.eye).normalize();
        (self.eye, dir)
    }
}
