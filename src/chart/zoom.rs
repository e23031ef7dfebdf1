//! Zoom transform shared by the bar and line charts.
//!
//! A transform is a scale factor `k` plus a horizontal translation `x` in
//! pixels. Screen position `p` maps back to unzoomed position `(p - x) / k`.

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { k: 1.0, x: 0.0 };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Unzoomed position of screen pixel `p`.
    pub fn invert_x(&self, p: f64) -> f64 {
        (p - self.x) / self.k
    }

    /// Multiply the scale by `factor`, keeping the content under `anchor`
    /// in place. The resulting scale is clamped to `extent`.
    pub fn scale_by(&self, factor: f64, anchor: f64, extent: (f64, f64)) -> Self {
        let k = (self.k * factor).clamp(extent.0, extent.1);
        let content = self.invert_x(anchor);
        Self {
            k,
            x: anchor - content * k,
        }
    }

    pub fn translate_by(&self, dx: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + dx,
        }
    }

    /// Keep the zoomed content covering the whole `[0, width]` viewport.
    pub fn constrain(&self, width: f64) -> Self {
        let min_x = width * (1.0 - self.k);
        Self {
            k: self.k,
            x: self.x.clamp(min_x.min(0.0), 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_clamped_to_extent() {
        let t = ZoomTransform::IDENTITY.scale_by(100.0, 0.0, (1.0, 4.0));
        assert_eq!(t.k, 4.0);
        let t = t.scale_by(0.01, 0.0, (1.0, 4.0));
        assert_eq!(t.k, 1.0);
    }

    #[test]
    fn anchor_stays_fixed() {
        let t = ZoomTransform::IDENTITY.scale_by(2.0, 100.0, (1.0, 10.0));
        assert_eq!(t.invert_x(100.0), 100.0);
        assert_eq!(t.x, -100.0);
    }

    #[test]
    fn constrain_keeps_viewport_inside_content() {
        let t = ZoomTransform { k: 2.0, x: -500.0 }.constrain(200.0);
        assert_eq!(t.x, -200.0);
        let t = ZoomTransform { k: 2.0, x: 30.0 }.constrain(200.0);
        assert_eq!(t.x, 0.0);
        let t = ZoomTransform { k: 1.0, x: -30.0 }.constrain(200.0);
        assert_eq!(t.x, 0.0);
    }
}
