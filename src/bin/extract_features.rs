use gradient_features::config::load_config;
use gradient_features::diagnostics::{ExtractionSummary, TimingBreakdown};
use gradient_features::image::io::{load_intensity_image, save_normalized_png, write_json_file};
use gradient_features::{GradientFeatureExtractor, OrientationMaps, SiftFeatureProviderFactory};
use log::info;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let factory = SiftFeatureProviderFactory::new(config.sift).map_err(|e| e.to_string())?;
    let extractor = GradientFeatureExtractor::with_params(factory, config.extractor)
        .map_err(|e| e.to_string())?;

    let mut timing = TimingBreakdown::default();

    let start = Instant::now();
    let intensity = load_intensity_image(&config.input)?;
    timing.push("load", elapsed_ms(start));

    let start = Instant::now();
    let maps = OrientationMaps::from_image(&intensity);
    timing.push("gradients", elapsed_ms(start));

    let start = Instant::now();
    let features = extractor
        .extract_batch(&config.keypoints, &maps)
        .map_err(|e| e.to_string())?;
    timing.push("extract", elapsed_ms(start));
    info!(
        "extracted descriptors for {} keypoints in {:.3} ms",
        config.keypoints.len(),
        timing.stages.last().map_or(0.0, |s| s.elapsed_ms)
    );

    if let Some(path) = &config.output.magnitude_image {
        save_normalized_png(&maps.magnitude, path)?;
        println!("Saved gradient magnitude to {}", path.display());
    }

    let summary = ExtractionSummary::new(
        intensity.w,
        intensity.h,
        &config.keypoints,
        features,
        timing,
    );
    write_json_file(&config.output.features_json, &summary)?;

    println!(
        "Saved {} descriptors ({} of {} keypoints without orientation support) to {}",
        summary.feature_count,
        summary.unsupported_count,
        summary.keypoint_count,
        config.output.features_json.display()
    );

    Ok(())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn usage() -> String {
    "Usage: extract_features <config.json>".to_string()
}
