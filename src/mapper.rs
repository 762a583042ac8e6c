//! Conversion between display space (the possibly downscaled buffer the user
//! clicks on) and original space (the source image, which is what gets
//! reported).

pub const DEFAULT_MAX_WIDTH: u32 = 1200;
pub const DEFAULT_MAX_HEIGHT: u32 = 800;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    factor: f64,
}

impl Scale {
    /// `min(max_w / w, max_h / h, 1.0)`; images never get upscaled.
    pub fn fit(orig_w: u32, orig_h: u32, max_w: u32, max_h: u32) -> Self {
        let fx = max_w as f64 / orig_w.max(1) as f64;
        let fy = max_h as f64 / orig_h.max(1) as f64;
        Self {
            factor: fx.min(fy).min(1.0),
        }
    }

    pub fn identity() -> Self {
        Self { factor: 1.0 }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn is_scaled(&self) -> bool {
        self.factor < 1.0
    }

    /// Size of the display buffer for an image of the given original size.
    pub fn display_size(&self, orig_w: u32, orig_h: u32) -> (u32, u32) {
        if !self.is_scaled() {
            return (orig_w, orig_h);
        }
        (
            ((orig_w as f64 * self.factor) as u32).max(1),
            ((orig_h as f64 * self.factor) as u32).max(1),
        )
    }

    /// Display -> original. Truncates toward zero.
    pub fn to_original(&self, x: u32, y: u32) -> (u32, u32) {
        (
            (x as f64 / self.factor) as u32,
            (y as f64 / self.factor) as u32,
        )
    }

    /// Original -> display. Rounds, so it is not an exact inverse of
    /// `to_original`; callers only use it to redraw stored markers.
    pub fn to_display(&self, x: u32, y: u32) -> (u32, u32) {
        (
            (x as f64 * self.factor).round() as u32,
            (y as f64 * self.factor).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_downscales_large_images() {
        let s = Scale::fit(2400, 1600, DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT);
        assert_eq!(s.factor(), 0.5);
        assert!(s.is_scaled());
        assert_eq!(s.display_size(2400, 1600), (1200, 800));
    }

    #[test]
    fn test_fit_uses_tighter_axis() {
        // width ratio 0.6, height ratio 0.4
        let s = Scale::fit(2000, 2000, 1200, 800);
        assert_eq!(s.factor(), 0.4);
        assert_eq!(s.display_size(2000, 2000), (800, 800));
    }

    #[test]
    fn test_fit_never_upscales() {
        for (w, h) in [(800, 600), (1200, 800), (1, 1), (1200, 10)] {
            let s = Scale::fit(w, h, DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT);
            assert_eq!(s.factor(), 1.0);
            assert!(!s.is_scaled());
            assert_eq!(s.display_size(w, h), (w, h));
        }
    }

    #[test]
    fn test_display_size_is_at_least_one_pixel() {
        let s = Scale::fit(100_000, 10, 1200, 800);
        let (w, h) = s.display_size(100_000, 10);
        assert_eq!(w, 1200);
        assert_eq!(h, 1);
    }

    #[test]
    fn test_to_original_truncates() {
        let s = Scale::fit(2400, 1600, 1200, 800);
        assert_eq!(s.to_original(100, 50), (200, 100));
        assert_eq!(s.to_original(300, 300), (600, 600));

        let s = Scale::fit(3000, 3000, 1200, 800);
        // factor 0.2666..; 7 / 0.2666.. = 26.25
        assert_eq!(s.to_original(7, 7), (26, 26));
    }

    #[test]
    fn test_identity_is_exact() {
        let s = Scale::fit(800, 600, 1200, 800);
        assert_eq!(s, Scale::identity());
        assert_eq!(s.to_original(50, 50), (50, 50));
        assert_eq!(s.to_display(50, 50), (50, 50));
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        let sizes = [(2400, 1600), (1799, 1000), (5000, 3333), (1201, 801), (4096, 4096)];
        for (w, h) in sizes {
            let s = Scale::fit(w, h, 1200, 800);
            let (dw, dh) = s.display_size(w, h);
            for x in (0..dw).step_by(37) {
                for y in (0..dh).step_by(41) {
                    let (ox, oy) = s.to_original(x, y);
                    let (bx, by) = s.to_display(ox, oy);
                    assert!(bx.abs_diff(x) <= 1, "x {x} -> {ox} -> {bx} at {w}x{h}");
                    assert!(by.abs_diff(y) <= 1, "y {y} -> {oy} -> {by} at {w}x{h}");
                }
            }
        }
    }
}
