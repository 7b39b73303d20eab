//! Scene luminance estimation for tone mapping.
//!
//! All patches of a build are tone mapped with the same global parameters
//! so that neighbouring patches match in brightness.

use crate::error::{AtlasError, Result};
use crate::patch::TexturePatch;

const HISTOGRAM_BINS: usize = 10_000;
const MAX_PERCENTILE: f32 = 0.995;
const MIN_LUMINANCE: f32 = 1e-6;

/// Global parameters of the Reinhard operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMapping {
    mean: f32,
    max: f32,
}

impl ToneMapping {
    /// Create tone mapping parameters from the scene's mean luminance and
    /// the luminance that should map to white.
    pub fn new(mean: f32, max: f32) -> Result<Self> {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(AtlasError::InvalidToneMapping(format!(
                "mean luminance must be positive and finite, got {}",
                mean
            )));
        }
        if !(max.is_finite() && max > 0.0) {
            return Err(AtlasError::InvalidToneMapping(format!(
                "max luminance must be positive and finite, got {}",
                max
            )));
        }
        Ok(Self { mean, max })
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

/// Fixed-range histogram with equally sized bins.
#[derive(Debug, Clone)]
pub struct Histogram {
    min: f32,
    max: f32,
    bins: Vec<u64>,
    total: u64,
}

impl Histogram {
    pub fn new(min: f32, max: f32, num_bins: usize) -> Self {
        Self {
            min,
            max,
            bins: vec![0; num_bins.max(1)],
            total: 0,
        }
    }

    /// Add a value, clamped into the histogram range.
    pub fn add_value(&mut self, value: f32) {
        let last = self.bins.len() - 1;
        let range = self.max - self.min;
        let bin = if range > 0.0 {
            let t = ((value - self.min) / range).clamp(0.0, 1.0);
            ((t * self.bins.len() as f32) as usize).min(last)
        } else {
            0
        };
        self.bins[bin] += 1;
        self.total += 1;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Upper edge of the bin in which the cumulative count reaches
    /// `percentile` (in `[0, 1]`) of all values.
    pub fn approx_percentile(&self, percentile: f32) -> f32 {
        if self.total == 0 {
            return self.min;
        }

        let target = (percentile.clamp(0.0, 1.0) as f64 * self.total as f64).ceil() as u64;
        let bin_width = (self.max - self.min) / self.bins.len() as f32;

        let mut cumulative = 0u64;
        for (i, &count) in self.bins.iter().enumerate() {
            cumulative += count;
            if cumulative >= target.max(1) {
                return self.min + (i + 1) as f32 * bin_width;
            }
        }
        self.max
    }
}

/// Rec. 709 relative luminance of a linear RGB value.
pub fn luminance(rgb: [f32; 3]) -> f32 {
    0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2]
}

/// Estimate tone mapping parameters over the valid pixels of all patches.
///
/// The mean is the arithmetic mean luminance. The white point is taken at
/// a high percentile instead of the absolute maximum so that a few
/// saturated pixels do not darken the whole atlas.
pub fn estimate_tone_mapping(patches: &[TexturePatch]) -> Result<ToneMapping> {
    let valid_luminances = || {
        patches.iter().flat_map(|patch| {
            patch
                .image()
                .chunks_exact(3)
                .zip(patch.validity_mask())
                .filter(|(_, valid)| **valid)
                .map(|(rgb, _)| luminance([rgb[0].max(0.0), rgb[1].max(0.0), rgb[2].max(0.0)]))
        })
    };

    let mut count = 0u64;
    let mut sum = 0.0f64;
    let mut observed_max = 0.0f32;
    for l in valid_luminances() {
        count += 1;
        sum += l as f64;
        observed_max = observed_max.max(l);
    }

    let mean = if count > 0 { (sum / count as f64) as f32 } else { 0.0 };

    let mut histogram = Histogram::new(0.0, observed_max, HISTOGRAM_BINS);
    for l in valid_luminances() {
        histogram.add_value(l);
    }
    let max = histogram.approx_percentile(MAX_PERCENTILE);

    log::debug!(
        "Luminance over {} pixels: mean {:.4}, max {:.4} (observed {:.4})",
        count,
        mean,
        max,
        observed_max
    );

    ToneMapping::new(mean.max(MIN_LUMINANCE), max.max(MIN_LUMINANCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn gray_patch(values: &[f32], mask: &[bool]) -> TexturePatch {
        let image = values.iter().flat_map(|&v| [v, v, v]).collect();
        TexturePatch::new(
            values.len() as u32,
            1,
            image,
            mask.to_vec(),
            vec![0],
            vec![Vec2::ZERO; 3],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(ToneMapping::new(0.0, 1.0).is_err());
        assert!(ToneMapping::new(1.0, -1.0).is_err());
        assert!(ToneMapping::new(f32::NAN, 1.0).is_err());
        assert!(ToneMapping::new(0.5, 2.0).is_ok());
    }

    #[test]
    fn test_histogram_percentile() {
        let mut histogram = Histogram::new(0.0, 100.0, 100);
        for i in 0..100 {
            histogram.add_value(i as f32 + 0.5);
        }
        assert_eq!(histogram.total(), 100);
        assert!((histogram.approx_percentile(0.5) - 50.0).abs() < 1e-3);
        assert!((histogram.approx_percentile(1.0) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_estimate_ignores_invalid_pixels() {
        let patch = gray_patch(&[1.0, 3.0, 1000.0], &[true, true, false]);
        let tone = estimate_tone_mapping(&[patch]).unwrap();
        assert!((tone.mean() - 2.0).abs() < 1e-4);
        assert!(tone.max() <= 3.0 + 1e-3);
    }

    #[test]
    fn test_estimate_clamps_negative() {
        let patch = gray_patch(&[-5.0, 2.0], &[true, true]);
        let tone = estimate_tone_mapping(&[patch]).unwrap();
        assert!((tone.mean() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_estimate_all_black() {
        let patch = gray_patch(&[0.0, 0.0], &[true, true]);
        let tone = estimate_tone_mapping(&[patch]).unwrap();
        assert!(tone.mean() > 0.0);
        assert!(tone.max() > 0.0);
    }
}
