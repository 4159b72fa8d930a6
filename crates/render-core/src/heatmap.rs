//! Gaze density sink and intensity-field heatmap.
//!
//! The capture session forwards every recorded gaze point, unit-weighted,
//! through the [`DensitySink`] boundary. [`DensityMap`] is the in-tree
//! implementation: an intensity field over the viewport where each point
//! stamps a radial kernel with a solid core and a blurred rim. Opacity
//! mapping normalizes against the current peak density, so the hottest
//! cell always renders at `max_opacity`.

/// Density map parameters, fixed at sink construction.
#[derive(Debug, Clone, Copy)]
pub struct DensityConfig {
    /// Stamp radius in pixels.
    pub radius: f64,

    /// Opacity at peak density.
    pub max_opacity: f64,

    /// Opacity at zero density.
    pub min_opacity: f64,

    /// Blur factor in [0.0, 1.0]: fraction of the radius used for the
    /// falloff rim. 0.0 is a hard-edged stamp; 1.0 fades from the center.
    pub blur: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            radius: 40.0,
            max_opacity: 0.6,
            min_opacity: 0.0,
            blur: 0.75,
        }
    }
}

/// Boundary to the density-visualization component.
///
/// The session only ever calls `add_point`; accumulation, decay, and
/// compositing are the sink's own business.
pub trait DensitySink: Send {
    /// Accumulate a weighted gaze point at `(x, y)` in pixels.
    fn add_point(&mut self, x: f64, y: f64, weight: f64);

    /// Number of points forwarded to this sink so far.
    fn points_added(&self) -> u64;
}

/// An intensity field accumulating gaze density over the viewport.
#[derive(Debug, Clone)]
pub struct DensityMap {
    width: u32,
    height: u32,
    config: DensityConfig,
    cells: Vec<f64>,
    max_density: f64,
    points_added: u64,
}

impl DensityMap {
    /// Create a density map covering a viewport of the given size.
    pub fn new(width: u32, height: u32, config: DensityConfig) -> Self {
        Self {
            width,
            height,
            config,
            cells: vec![0.0; (width as usize) * (height as usize)],
            max_density: 0.0,
            points_added: 0,
        }
    }

    /// Viewport dimensions `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The configuration this map was built with.
    pub fn config(&self) -> DensityConfig {
        self.config
    }

    /// Raw accumulated intensity at `(px, py)`, or `None` outside the field.
    pub fn intensity_at(&self, px: u32, py: u32) -> Option<f64> {
        if px >= self.width || py >= self.height {
            return None;
        }
        Some(self.cells[(py * self.width + px) as usize])
    }

    /// Peak accumulated intensity across the field.
    pub fn max_density(&self) -> f64 {
        self.max_density
    }

    /// Rendered opacity at `(px, py)`: intensity normalized against the
    /// peak, mapped into `[min_opacity, max_opacity]`.
    pub fn opacity_at(&self, px: u32, py: u32) -> Option<f64> {
        let intensity = self.intensity_at(px, py)?;
        if self.max_density <= 0.0 {
            return Some(self.config.min_opacity);
        }
        let normalized = intensity / self.max_density;
        Some(self.config.min_opacity + normalized * (self.config.max_opacity - self.config.min_opacity))
    }

    /// Kernel falloff for a pixel at `dist` from the stamp center.
    /// Solid inside `radius * (1 - blur)`, linear falloff to the rim.
    fn falloff(&self, dist: f64) -> f64 {
        let radius = self.config.radius;
        if dist >= radius {
            return 0.0;
        }
        let core = radius * (1.0 - self.config.blur.clamp(0.0, 1.0));
        if dist <= core {
            return 1.0;
        }
        1.0 - (dist - core) / (radius - core)
    }
}

impl DensitySink for DensityMap {
    fn add_point(&mut self, x: f64, y: f64, weight: f64) {
        self.points_added += 1;

        if self.width == 0 || self.height == 0 {
            return;
        }

        let r = self.config.radius;
        let min_x = ((x - r).floor().max(0.0)) as u32;
        let max_x = ((x + r).ceil().min(self.width as f64 - 1.0)).max(0.0) as u32;
        let min_y = ((y - r).floor().max(0.0)) as u32;
        let max_y = ((y + r).ceil().min(self.height as f64 - 1.0)).max(0.0) as u32;

        if min_x > max_x || min_y > max_y {
            return;
        }

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f64 + 0.5 - x;
                let dy = py as f64 + 0.5 - y;
                let dist = (dx * dx + dy * dy).sqrt();
                let contribution = weight * self.falloff(dist);
                if contribution <= 0.0 {
                    continue;
                }

                let idx = (py * self.width + px) as usize;
                self.cells[idx] += contribution;
                if self.cells[idx] > self.max_density {
                    self.max_density = self.cells[idx];
                }
            }
        }
    }

    fn points_added(&self) -> u64 {
        self.points_added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_peaks_at_stamp_center() {
        let mut map = DensityMap::new(200, 200, DensityConfig::default());
        map.add_point(100.0, 100.0, 1.0);

        let center = map.intensity_at(100, 100).unwrap();
        let rim = map.intensity_at(130, 100).unwrap();
        let outside = map.intensity_at(160, 100).unwrap();

        assert!(center > rim);
        assert!(rim > 0.0);
        assert_eq!(outside, 0.0);
    }

    #[test]
    fn test_repeated_points_accumulate() {
        let mut map = DensityMap::new(200, 200, DensityConfig::default());
        map.add_point(100.0, 100.0, 1.0);
        let once = map.intensity_at(100, 100).unwrap();
        map.add_point(100.0, 100.0, 1.0);
        let twice = map.intensity_at(100, 100).unwrap();

        assert!((twice - 2.0 * once).abs() < 1e-9);
        assert_eq!(map.points_added(), 2);
    }

    #[test]
    fn test_opacity_mapping() {
        let config = DensityConfig::default();
        let mut map = DensityMap::new(200, 200, config);

        // Empty field renders at min opacity everywhere
        assert_eq!(map.opacity_at(50, 50), Some(config.min_opacity));

        map.add_point(100.0, 100.0, 1.0);
        let peak = map.opacity_at(100, 100).unwrap();
        assert!((peak - config.max_opacity).abs() < 1e-9);

        let far = map.opacity_at(10, 10).unwrap();
        assert!((far - config.min_opacity).abs() < 1e-9);
    }

    #[test]
    fn test_off_field_points_still_counted() {
        let mut map = DensityMap::new(100, 100, DensityConfig::default());
        map.add_point(5000.0, 5000.0, 1.0);
        assert_eq!(map.points_added(), 1);
        assert_eq!(map.max_density(), 0.0);
    }

    #[test]
    fn test_blur_zero_is_hard_edged() {
        let config = DensityConfig {
            blur: 0.0,
            ..Default::default()
        };
        let mut map = DensityMap::new(200, 200, config);
        map.add_point(100.0, 100.0, 1.0);

        let inner = map.intensity_at(120, 100).unwrap();
        let center = map.intensity_at(100, 100).unwrap();
        assert!((inner - center).abs() < 1e-9);
    }

    #[test]
    fn test_sink_trait_object_counts_forwards() {
        let mut sink: Box<dyn DensitySink> =
            Box::new(DensityMap::new(100, 100, DensityConfig::default()));
        sink.add_point(10.0, 10.0, 1.0);
        sink.add_point(20.0, 20.0, 1.0);
        assert_eq!(sink.points_added(), 2);
    }
}
