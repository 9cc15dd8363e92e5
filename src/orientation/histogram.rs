use crate::angle::{angle_to_bin, wrap_two_pi};
use std::f32::consts::TAU;

/// Circular histogram over [0, 2π) of gradient orientations.
#[derive(Clone, Debug)]
pub(crate) struct OrientationHistogram {
    bins: Vec<f32>,
    bin_width: f32,
}

impl OrientationHistogram {
    pub(crate) fn new(num_bins: usize) -> Self {
        assert!(
            num_bins > 0,
            "orientation histogram requires at least one bin"
        );
        OrientationHistogram {
            bins: vec![0.0; num_bins],
            bin_width: TAU / num_bins as f32,
        }
    }

    #[cfg(test)]
    pub(crate) fn bin_width(&self) -> f32 {
        self.bin_width
    }

    #[cfg(test)]
    pub(crate) fn bins(&self) -> &[f32] {
        &self.bins
    }

    pub(crate) fn into_bins(self) -> Vec<f32> {
        self.bins
    }

    pub(crate) fn accumulate(&mut self, angle: f32, weight: f32) {
        if !angle.is_finite() || !weight.is_finite() {
            return;
        }
        let idx = angle_to_bin(angle, self.bins.len());
        self.bins[idx] += weight.max(0.0);
    }

    /// Applies `iterations` passes of a circular [1, 1, 1]/3 box filter.
    pub(crate) fn smooth_box3(&mut self, iterations: usize) {
        let n = self.bins.len();
        if n <= 1 {
            return;
        }
        let mut scratch = vec![0.0f32; n];
        for _ in 0..iterations {
            for (i, dst) in scratch.iter_mut().enumerate() {
                let prev = self.bins[(i + n - 1) % n];
                let next = self.bins[(i + 1) % n];
                *dst = (prev + self.bins[i] + next) / 3.0;
            }
            std::mem::swap(&mut self.bins, &mut scratch);
        }
    }

    pub(crate) fn max(&self) -> f32 {
        self.bins.iter().copied().fold(f32::MIN, f32::max)
    }

    /// Strict circular local maxima reaching `threshold × max`, refined by a
    /// parabola through the peak and its two neighbours. Angles come back in
    /// bin order, wrapped into [0, 2π).
    pub(crate) fn peaks(&self, threshold: f32) -> Vec<f32> {
        let n = self.bins.len();
        let max = self.max();
        if n < 2 || !max.is_finite() || max <= 0.0 {
            return Vec::new();
        }
        let floor = threshold * max;
        let mut out = Vec::new();
        for i in 0..n {
            let curr = self.bins[i];
            let prev = self.bins[(i + n - 1) % n];
            let next = self.bins[(i + 1) % n];
            if curr < floor || curr <= prev || curr <= next {
                continue;
            }
            // curr is a strict maximum, so the denominator is negative
            let offset = 0.5 * (prev - next) / (prev - 2.0 * curr + next);
            out.push(wrap_two_pi((i as f32 + 0.5 + offset) * self.bin_width));
        }
        out
    }
}
