use gradient_features::angle::wrap_two_pi;
use gradient_features::image::ImageF32;
use gradient_features::OrientationMaps;
use std::f32::consts::FRAC_PI_2;

/// Magnitude and orientation built from closures over pixel coordinates.
pub fn maps_from_fn(
    w: usize,
    h: usize,
    magnitude: impl Fn(usize, usize) -> f32,
    orientation: impl Fn(usize, usize) -> f32,
) -> OrientationMaps {
    OrientationMaps {
        magnitude: ImageF32::from_fn(w, h, magnitude),
        orientation: ImageF32::from_fn(w, h, orientation),
    }
}

/// Magnitude equals `1 + y·w + x`, so every forwarded sample identifies
/// the pixel it came from.
pub fn pixel_id_maps(w: usize, h: usize, orientation: f32) -> OrientationMaps {
    maps_from_fn(w, h, |x, y| (1 + y * w + x) as f32, |_, _| orientation)
}

/// Inverse of [`pixel_id_maps`].
pub fn pixel_from_id(id: f32, w: usize) -> (usize, usize) {
    let idx = id.round() as usize - 1;
    (idx % w, idx / w)
}

/// Outward-pointing gradients whose magnitude is a ring around `(c, c)`.
pub fn radial_maps(size: usize) -> OrientationMaps {
    let c = (size / 2) as f32;
    maps_from_fn(
        size,
        size,
        |x, y| {
            let (dx, dy) = (x as f32 - c, y as f32 - c);
            let r = (dx * dx + dy * dy).sqrt();
            r * (-r * r / 200.0).exp()
        },
        // y axis up
        |x, y| wrap_two_pi((c - y as f32).atan2(x as f32 - c)),
    )
}

/// Asymmetric intensity pattern: a tilted ramp plus two blobs.
pub fn textured_image(size: usize) -> ImageF32 {
    let c = (size / 2) as f32;
    ImageF32::from_fn(size, size, |x, y| {
        let (dx, dy) = (x as f32 - c, y as f32 - c);
        let blob = |bx: f32, by: f32, s: f32| {
            let (ex, ey) = (dx - bx, dy - by);
            (-(ex * ex + ey * ey) / (2.0 * s * s)).exp()
        };
        0.02 * dx + 0.01 * dy + 0.8 * blob(6.0, -3.0, 4.0) - 0.5 * blob(-5.0, 7.0, 3.0)
    })
}

/// Rotate square maps by 90° counter-clockwise (as displayed) about the
/// central pixel. Orientations shift by +π/2; pixels rotated in from
/// outside the map get zero magnitude.
pub fn rotate_quarter_ccw(maps: &OrientationMaps) -> OrientationMaps {
    let size = maps.width();
    assert_eq!(size, maps.height(), "maps must be square");
    let c = (size / 2) as isize;
    let source = |x: usize, y: usize| {
        let (dx, dy) = (x as isize - c, y as isize - c);
        // destination offset (dx, dy) comes from (−dy, dx)
        maps.sample(c - dy, c + dx)
    };
    maps_from_fn(
        size,
        size,
        |x, y| source(x, y).map_or(0.0, |(m, _)| m),
        |x, y| source(x, y).map_or(0.0, |(_, o)| wrap_two_pi(o + FRAC_PI_2)),
    )
}

pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}
