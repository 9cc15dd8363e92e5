//! SIFT-style spatial histogram of oriented gradients.
//!
//! The patch is divided into `n × n` spatial cells, each holding an
//! `m`-bin histogram of gradient orientation relative to the patch
//! orientation. Every sample is weighted by its magnitude and a Gaussian
//! centred on the patch, then spread trilinearly over the two nearest cells
//! on each axis and the two nearest orientation bins. Cell centres sit at
//! `(i + 0.5) / n`, so the provider asks for half a cell of oversampling to
//! let border cells interpolate from both sides.
//!
//! The final vector is L2-normalized, clamped at `value_threshold` and
//! normalized again, which damps the influence of a few large gradients
//! (non-linear illumination changes).
use super::{GradientFeatureProvider, GradientFeatureProviderFactory};
use crate::angle::wrap_two_pi;
use crate::error::FeatureError;
use crate::params::SiftParams;
use crate::types::OrientedFeatureVector;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct SiftFeatureProvider {
    params: SiftParams,
    patch_orientation: f32,
    inv_two_sigma_sq: f32,
    /// Row-major `(cell_y, cell_x, orientation)` accumulator.
    bins: Vec<f32>,
}

impl SiftFeatureProvider {
    /// Callers are expected to pass validated parameters
    /// (see [`SiftFeatureProviderFactory::new`]).
    pub fn new(params: SiftParams) -> Self {
        let sigma = params.gaussian_sigma;
        Self {
            params,
            patch_orientation: 0.0,
            inv_two_sigma_sq: 1.0 / (2.0 * sigma * sigma),
            bins: vec![0.0; params.descriptor_len()],
        }
    }

    #[inline]
    fn bin_index(&self, cx: usize, cy: usize, o: usize) -> usize {
        let n = self.params.num_spatial_bins;
        let m = self.params.num_orientation_bins;
        (cy * n + cx) * m + o
    }
}

impl GradientFeatureProvider for SiftFeatureProvider {
    fn oversampling_amount(&self) -> f32 {
        0.5 / self.params.num_spatial_bins as f32
    }

    fn set_patch_orientation(&mut self, orientation: f32) {
        self.patch_orientation = orientation;
    }

    fn add_sample(&mut self, sx: f32, sy: f32, magnitude: f32, orientation: f32) {
        let n = self.params.num_spatial_bins;
        let m = self.params.num_orientation_bins;

        let dx = sx - 0.5;
        let dy = sy - 0.5;
        let weight = (-(dx * dx + dy * dy) * self.inv_two_sigma_sq).exp();
        let value = magnitude * weight;
        if value == 0.0 || !value.is_finite() {
            return;
        }

        let rel = wrap_two_pi(orientation - self.patch_orientation);
        let px = sx * n as f32 - 0.5;
        let py = sy * n as f32 - 0.5;
        let po = rel * m as f32 / TAU;

        let (x0, y0, o0) = (px.floor(), py.floor(), po.floor());
        let (fx, fy, fo) = (px - x0, py - y0, po - o0);
        let (x0, y0, o0) = (x0 as isize, y0 as isize, o0 as isize);

        for (cy, wy) in [(y0, 1.0 - fy), (y0 + 1, fy)] {
            if cy < 0 || cy >= n as isize {
                continue;
            }
            for (cx, wx) in [(x0, 1.0 - fx), (x0 + 1, fx)] {
                if cx < 0 || cx >= n as isize {
                    continue;
                }
                for (co, wo) in [(o0, 1.0 - fo), (o0 + 1, fo)] {
                    let o = co.rem_euclid(m as isize) as usize;
                    let idx = self.bin_index(cx as usize, cy as usize, o);
                    self.bins[idx] += value * wy * wx * wo;
                }
            }
        }
    }

    fn feature_vector(self: Box<Self>) -> OrientedFeatureVector {
        let mut values = self.bins;
        normalize(&mut values);
        let threshold = self.params.value_threshold;
        for v in values.iter_mut() {
            *v = v.min(threshold);
        }
        normalize(&mut values);
        OrientedFeatureVector::new(self.patch_orientation, values)
    }
}

fn normalize(values: &mut [f32]) {
    let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        let inv = 1.0 / norm;
        values.iter_mut().for_each(|v| *v *= inv);
    }
}

/// Factory handing out [`SiftFeatureProvider`]s sharing one parameter set.
#[derive(Clone, Copy, Debug, Default)]
pub struct SiftFeatureProviderFactory {
    params: SiftParams,
}

impl SiftFeatureProviderFactory {
    pub fn new(params: SiftParams) -> Result<Self, FeatureError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SiftParams {
        &self.params
    }
}

impl GradientFeatureProviderFactory for SiftFeatureProviderFactory {
    fn new_provider(&self) -> Box<dyn GradientFeatureProvider> {
        Box::new(SiftFeatureProvider::new(self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn provider() -> Box<SiftFeatureProvider> {
        Box::new(SiftFeatureProvider::new(SiftParams::default()))
    }

    #[test]
    fn oversampling_is_half_a_cell() {
        assert!((provider().oversampling_amount() - 0.125).abs() < 1e-6);
    }

    #[test]
    fn empty_patch_gives_zero_vector() {
        let fv = provider().feature_vector();
        assert_eq!(fv.len(), 128);
        assert!(fv.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn sample_at_cell_centre_splits_between_two_orientation_bins() {
        let mut p = provider();
        p.set_patch_orientation(0.0);
        // centre of cell (x=1, y=2); orientation halfway between bins 2 and 3
        let ori = 2.5 * TAU / 8.0;
        p.add_sample(0.375, 0.625, 1.0, ori);
        let fv = p.feature_vector();
        let expected = (2 * 4 + 1) * 8 + 2;
        let nonzero: Vec<usize> = fv
            .values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v > 1e-6)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(nonzero, vec![expected, expected + 1]);
    }

    #[test]
    fn orientation_is_relative_to_patch() {
        let mut a = provider();
        a.set_patch_orientation(0.0);
        a.add_sample(0.4, 0.6, 1.0, 0.3);

        let mut b = provider();
        b.set_patch_orientation(FRAC_PI_2);
        b.add_sample(0.4, 0.6, 1.0, 0.3 + FRAC_PI_2);

        let (fa, fb) = (a.feature_vector(), b.feature_vector());
        assert_eq!(fb.orientation, FRAC_PI_2);
        for (va, vb) in fa.values.iter().zip(&fb.values) {
            assert!((va - vb).abs() < 1e-5);
        }
    }

    #[test]
    fn vector_is_unit_norm_and_clamped() {
        let mut p = provider();
        p.set_patch_orientation(0.0);
        for i in 0..20 {
            let s = 0.05 + 0.045 * i as f32;
            p.add_sample(s, 1.0 - s, 1.0 + i as f32, 0.2 * i as f32);
        }
        p.add_sample(0.5, 0.5, 50.0, 1.0);
        let fv = p.feature_vector();
        let norm: f32 = fv.values.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm={norm}");
        assert!(fv.values.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn samples_outside_spatial_grid_are_dropped() {
        let mut p = provider();
        p.set_patch_orientation(0.0);
        // px = -0.2·4 - 0.5 = -1.3, so both neighbouring cells are off the grid
        p.add_sample(-0.2, 0.5, 1.0, 0.0);
        let fv = p.feature_vector();
        assert!(fv.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn factory_rejects_invalid_params() {
        let bad = SiftParams {
            num_spatial_bins: 0,
            ..Default::default()
        };
        assert!(SiftFeatureProviderFactory::new(bad).is_err());
        let factory = SiftFeatureProviderFactory::default();
        assert_eq!(factory.params(), &SiftParams::default());
        assert_eq!(factory.new_provider().feature_vector().len(), 128);

        let small = SiftParams {
            num_spatial_bins: 2,
            num_orientation_bins: 4,
            ..Default::default()
        };
        let factory = SiftFeatureProviderFactory::new(small).expect("valid params");
        assert_eq!(factory.new_provider().feature_vector().len(), 16);
    }
}
