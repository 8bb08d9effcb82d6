use glam::{UVec2, Vec2};

use super::HeightField;

impl HeightField {
    /// Bilinearly interpolated value at normalized coordinates `uv`, where `(0, 0)` is the
    /// first sample and `(1, 1)` the last. Coordinates outside the unit square are clamped.
    ///
    /// The result stays in this field's own normalized space.
    pub fn interpolated(&self, uv: Vec2) -> f32 {
        let last = self.resolution().saturating_sub(1);
        if last == 0 {
            return self.data().first().copied().unwrap_or_default();
        }

        let pos = uv.clamp(Vec2::ZERO, Vec2::ONE) * last as f32;
        // Keep the lower corner one short of the edge so the far sample is always in range.
        let x0 = (pos.x.floor() as u32).min(last - 1);
        let y0 = (pos.y.floor() as u32).min(last - 1);
        let tx = pos.x - x0 as f32;
        let ty = pos.y - y0 as f32;

        let sample = |x: u32, y: u32| self.get(UVec2::new(x, y)).copied().unwrap_or_default();
        let h00 = sample(x0, y0);
        let h10 = sample(x0 + 1, y0);
        let h01 = sample(x0, y0 + 1);
        let h11 = sample(x0 + 1, y0 + 1);

        let bottom = h00 + (h10 - h00) * tx;
        let top = h01 + (h11 - h01) * tx;
        bottom + (top - bottom) * ty
    }
}
