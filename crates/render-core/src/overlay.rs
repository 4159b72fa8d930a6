//! Overlay marker canvas.
//!
//! The overlay shows where the user is currently looking: a single filled
//! circle at the most recent gaze point on a transparent surface sized to
//! the viewport. Every draw resizes the surface to the current viewport,
//! clears it, and paints the new marker, so no trace of earlier markers
//! survives a redraw.

/// Default marker radius in pixels.
pub const DEFAULT_DOT_RADIUS: f64 = 10.0;

/// Default marker color (opaque red, RGBA).
pub const DEFAULT_DOT_COLOR: [u8; 4] = [255, 0, 0, 255];

/// A transparent RGBA pixel surface carrying the gaze marker.
#[derive(Debug, Clone)]
pub struct OverlayCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    dot_radius: f64,
    dot_color: [u8; 4],
    last_dot: Option<(f64, f64)>,
    draws: u64,
}

impl OverlayCanvas {
    /// Create an empty canvas. The surface is sized on first draw.
    pub fn new() -> Self {
        Self::with_style(DEFAULT_DOT_RADIUS, DEFAULT_DOT_COLOR)
    }

    /// Create a canvas with a custom marker radius and color.
    pub fn with_style(dot_radius: f64, dot_color: [u8; 4]) -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            dot_radius,
            dot_color,
            last_dot: None,
            draws: 0,
        }
    }

    /// Draw the marker at `(x, y)` for a viewport of the given size.
    ///
    /// Resizes the surface to the viewport (idempotent when unchanged),
    /// clears every pixel to transparent, then paints a filled circle
    /// clipped to the surface. Only the latest gaze point is ever visible.
    pub fn draw_dot(&mut self, viewport_width: u32, viewport_height: u32, x: f64, y: f64) {
        self.resize(viewport_width, viewport_height);
        self.clear();
        self.fill_circle(x, y);
        self.last_dot = Some((x, y));
        self.draws += 1;
    }

    /// Surface dimensions `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The position of the most recently drawn marker.
    pub fn last_dot(&self) -> Option<(f64, f64)> {
        self.last_dot
    }

    /// Number of draw calls performed.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// RGBA value at `(px, py)`, or `None` outside the surface.
    pub fn pixel(&self, px: u32, py: u32) -> Option<[u8; 4]> {
        if px >= self.width || py >= self.height {
            return None;
        }
        let idx = ((py * self.width + px) * 4) as usize;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Whether any pixel on the surface is non-transparent.
    pub fn has_visible_pixels(&self) -> bool {
        self.pixels.chunks_exact(4).any(|px| px[3] != 0)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width as usize) * (height as usize) * 4];
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let r = self.dot_radius;
        let min_x = ((cx - r).floor().max(0.0)) as u32;
        let max_x = ((cx + r).ceil().min(self.width as f64 - 1.0)).max(0.0) as u32;
        let min_y = ((cy - r).floor().max(0.0)) as u32;
        let max_y = ((cy + r).ceil().min(self.height as f64 - 1.0)).max(0.0) as u32;

        if min_x > max_x || min_y > max_y {
            return;
        }

        let r2 = r * r;
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    let idx = ((py * self.width + px) * 4) as usize;
                    self.pixels[idx..idx + 4].copy_from_slice(&self.dot_color);
                }
            }
        }
    }
}

impl Default for OverlayCanvas {
    fn default() -> Self {
        Self::new()
    }
}
