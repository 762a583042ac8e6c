use image::{Rgba, RgbaImage};

// ── Colours ─────────────────────────────────────────────────────────────────

pub const MARKER_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const BOX_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);

pub const MARKER_RADIUS: i32 = 5;
/// The outline covers `BOX_HALF_WIDTH` pixels either side of each edge.
pub const BOX_HALF_WIDTH: u32 = 1;
/// Horizontal gap between a marker and its label.
pub const LABEL_OFFSET: u32 = 10;

// ── Overlay ─────────────────────────────────────────────────────────────────

/// Text burned into the overlay. Rasterising glyphs into the buffer needs a
/// font, so labels are kept beside it and painted by the window instead;
/// they live and die with the buffer they were drawn on.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub pos: (u32, u32),
    pub text: String,
}

/// The display buffer: a copy of the scaled image with prompts drawn on it.
pub struct Overlay {
    base: RgbaImage,
    buffer: RgbaImage,
    labels: Vec<Label>,
    revision: u64,
}

impl Overlay {
    pub fn new(base: RgbaImage) -> Self {
        let buffer = base.clone();
        Self {
            base,
            buffer,
            labels: Vec::new(),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.base.width()
    }

    pub fn height(&self) -> u32 {
        self.base.height()
    }

    /// The scaled image without any overlay.
    pub fn base(&self) -> &RgbaImage {
        &self.base
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Bumped on every mutation so the window knows when to re-upload.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Discards every marker, outline and label.
    pub fn clear(&mut self) {
        self.buffer = self.base.clone();
        self.labels.clear();
        self.revision += 1;
    }

    pub fn draw_marker(&mut self, x: u32, y: u32) {
        fill_circle(&mut self.buffer, x as i32, y as i32, MARKER_RADIUS, MARKER_COLOR);
        self.revision += 1;
    }

    pub fn draw_label(&mut self, x: u32, y: u32, text: String) {
        self.labels.push(Label {
            pos: (x + LABEL_OFFSET, y),
            text,
        });
        self.revision += 1;
    }

    pub fn draw_box(&mut self, min: (u32, u32), max: (u32, u32)) {
        let (x0, y0) = min;
        let (x1, y1) = max;
        let t = BOX_HALF_WIDTH;
        let img = &mut self.buffer;
        fill_rect(img, (x0.saturating_sub(t), y0.saturating_sub(t)), (x1 + t, y0 + t), BOX_COLOR);
        fill_rect(img, (x0.saturating_sub(t), y1.saturating_sub(t)), (x1 + t, y1 + t), BOX_COLOR);
        fill_rect(img, (x0.saturating_sub(t), y0.saturating_sub(t)), (x0 + t, y1 + t), BOX_COLOR);
        fill_rect(img, (x1.saturating_sub(t), y0.saturating_sub(t)), (x1 + t, y1 + t), BOX_COLOR);
        self.revision += 1;
    }
}

// ── Raster helpers ──────────────────────────────────────────────────────────

fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: i32, color: Rgba<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (px, py) = (cx + dx, cy + dy);
            if px >= 0 && px < w && py >= 0 && py < h {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Fills the inclusive span `min..=max`, clipped to the image.
fn fill_rect(img: &mut RgbaImage, min: (u32, u32), max: (u32, u32), color: Rgba<u8>) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let x_end = max.0.min(img.width() - 1);
    let y_end = max.1.min(img.height() - 1);
    for y in min.1..=y_end {
        for x in min.0..=x_end {
            img.put_pixel(x, y, color);
        }
    }
}
