//! File helpers for the command-line tool: decode an image into a unit
//! intensity map, dump a float map for inspection and write JSON reports.
use super::{ImageF32, ImageU8, ImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode any supported image, convert it to luma and scale to [0, 1].
pub fn load_intensity_image(path: &Path) -> Result<ImageF32, String> {
    let luma = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let (w, h) = (luma.width() as usize, luma.height() as usize);
    let view = ImageU8::new(w, h, w, luma.as_raw())
        .ok_or_else(|| format!("Decoded buffer of {} is truncated", path.display()))?;
    Ok(ImageF32::from_u8_normalized(&view))
}

/// Write `map` as an 8-bit PNG with its largest finite value mapped to 255.
/// Maps without positive finite values come out black.
pub fn save_normalized_png(map: &ImageF32, path: &Path) -> Result<(), String> {
    create_parent_dirs(path)?;
    let peak = map
        .data
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0f32, f32::max);
    let gain = if peak > 0.0 { 255.0 / peak } else { 0.0 };
    let mut png = GrayImage::new(map.w as u32, map.h as u32);
    for (y, row) in map.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let level = if v.is_finite() { (v * gain).clamp(0.0, 255.0) } else { 0.0 };
            png.put_pixel(x as u32, y as u32, Luma([level as u8]));
        }
    }
    png.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    create_parent_dirs(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to encode {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn create_parent_dirs(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_roundtrip_keeps_relative_levels() {
        let dir = std::env::temp_dir().join(format!("gradient-features-io-{}", std::process::id()));
        let path = dir.join("nested").join("map.png");
        let map = ImageF32::from_fn(4, 2, |x, _| x as f32 * 2.0);
        save_normalized_png(&map, &path).expect("write png");

        let back = load_intensity_image(&path).expect("read png");
        assert_eq!(back.dims(), (4, 2));
        assert_eq!(back.get(0, 0), 0.0);
        assert_eq!(back.get(3, 1), 1.0);
        assert!((back.get(1, 0) - 85.0 / 255.0).abs() < 1e-6);
        let _ = fs::remove_dir_all(&dir);
    }
}
