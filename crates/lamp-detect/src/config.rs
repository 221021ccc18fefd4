use crate::annotate::AnnotationStyle;
use lamp_image::{Hsv, HsvBand};

/// Parameters of the Hough gradient circle search.
///
/// Defaults are hand-calibrated for traffic light glyphs in the reference
/// clips; change them only with new calibration footage.
#[derive(Clone, Debug, PartialEq)]
pub struct HoughParams {
    dp: f32,
    min_dist: f32,
    edge_threshold: f32,
    accumulator_threshold: u32,
    min_radius: u32,
    max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            dp: 1.0,
            min_dist: 20.0,
            edge_threshold: 100.0,
            accumulator_threshold: 20,
            min_radius: 3,
            max_radius: 70,
        }
    }
}

impl HoughParams {
    /// Set the inverse accumulator resolution (1 = same as the image).
    pub fn with_dp(mut self, dp: f32) -> Self {
        self.dp = dp;
        self
    }

    /// Set the minimum distance between accepted circle centers.
    pub fn with_min_dist(mut self, min_dist: f32) -> Self {
        self.min_dist = min_dist;
        self
    }

    /// Set the minimum Sobel L1 gradient for an edge pixel.
    pub fn with_edge_threshold(mut self, edge_threshold: f32) -> Self {
        self.edge_threshold = edge_threshold;
        self
    }

    /// Set the vote and support count a circle has to exceed.
    pub fn with_accumulator_threshold(mut self, accumulator_threshold: u32) -> Self {
        self.accumulator_threshold = accumulator_threshold;
        self
    }

    pub fn with_radius_range(mut self, min_radius: u32, max_radius: u32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    pub fn dp(&self) -> f32 {
        self.dp
    }

    pub fn min_dist(&self) -> f32 {
        self.min_dist
    }

    pub fn edge_threshold(&self) -> f32 {
        self.edge_threshold
    }

    pub fn accumulator_threshold(&self) -> u32 {
        self.accumulator_threshold
    }

    pub fn min_radius(&self) -> u32 {
        self.min_radius
    }

    pub fn max_radius(&self) -> u32 {
        self.max_radius
    }

    /// Clamp inconsistent settings: `dp >= 1`, `min_dist >= dp` and
    /// `max_radius > min_radius` (raised to `min_radius + 2`).
    pub fn normalized(&self) -> Self {
        let dp = if self.dp.is_finite() { self.dp.max(1.0) } else { 1.0 };
        let min_dist = if self.min_dist.is_finite() {
            self.min_dist.max(dp)
        } else {
            dp
        };
        let max_radius = if self.max_radius <= self.min_radius {
            self.min_radius + 2
        } else {
            self.max_radius
        };
        Self {
            dp,
            min_dist,
            max_radius,
            ..self.clone()
        }
    }
}

/// Everything the per-frame detector needs.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    red_bands: Vec<HsvBand>,
    green_bands: Vec<HsvBand>,
    hough: HoughParams,
    annotation: AnnotationStyle,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            // red wraps around the hue circle, so it needs a band at each end
            red_bands: vec![
                HsvBand::new(Hsv::new(0, 100, 140), Hsv::new(10, 255, 255)),
                HsvBand::new(Hsv::new(170, 100, 140), Hsv::new(180, 255, 255)),
            ],
            green_bands: vec![HsvBand::new(Hsv::new(30, 50, 50), Hsv::new(89, 255, 255))],
            hough: HoughParams::default(),
            annotation: AnnotationStyle::default(),
        }
    }
}

impl DetectorConfig {
    pub fn with_red_bands(mut self, bands: Vec<HsvBand>) -> Self {
        self.red_bands = bands;
        self
    }

    pub fn with_green_bands(mut self, bands: Vec<HsvBand>) -> Self {
        self.green_bands = bands;
        self
    }

    pub fn with_hough(mut self, hough: HoughParams) -> Self {
        self.hough = hough;
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationStyle) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn red_bands(&self) -> &[HsvBand] {
        &self.red_bands
    }

    pub fn green_bands(&self) -> &[HsvBand] {
        &self.green_bands
    }

    pub fn hough(&self) -> &HoughParams {
        &self.hough
    }

    pub fn annotation(&self) -> &AnnotationStyle {
        &self.annotation
    }
}
