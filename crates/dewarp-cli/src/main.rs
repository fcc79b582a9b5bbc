use argh::FromArgs;
use std::path::{Path, PathBuf};

use dewarp::{
    imgproc::{
        calibration::{CalibrationPoint, PointCollector},
        fisheye::{self, DewarpConfig, DewarpMethod, DistortionModel},
        interpolation::InterpolationMode,
        parallel::ExecutionStrategy,
    },
    io::{calibration, config, functional as F, maps},
};

#[derive(FromArgs)]
/// Dewarp a circular fisheye image.
struct Args {
    /// path to the input image (bmp, png, jpg)
    #[argh(positional)]
    input: PathBuf,

    /// path to the output image
    #[argh(positional)]
    output: PathBuf,

    /// correction algorithm: hemicylinder (0) or midpoint-circle (1)
    #[argh(option, short = 'm')]
    method: Option<DewarpMethod>,

    /// lens model for the hemicylinder method: equidistant, equisolid or none
    #[argh(option)]
    model: Option<DistortionModel>,

    /// json file with boundary points of the fisheye circle
    #[argh(option, short = 'p')]
    points: Option<PathBuf>,

    /// boundary point as x,y (repeatable)
    #[argh(option)]
    point: Vec<CalibrationPoint>,

    /// json file with the run configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// interpolation: nearest, bilinear or bicubic
    #[argh(option, short = 'i')]
    interpolation: Option<InterpolationMode>,

    /// number of worker threads, 1 runs serially
    #[argh(option, short = 't')]
    threads: Option<usize>,

    /// directory where the coordinate maps are dumped as images
    #[argh(option)]
    dump_maps: Option<PathBuf>,
}

/// Load the configuration file, if any, and apply the command line overrides.
fn resolve_config(args: &Args) -> Result<DewarpConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => config::read_config(path)?,
        None => DewarpConfig::default(),
    };

    if let Some(method) = args.method {
        config.method = method;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(interpolation) = args.interpolation {
        config.interpolation = interpolation;
    }
    match args.threads {
        Some(1) => config.strategy = ExecutionStrategy::Serial,
        Some(n) => config.strategy = ExecutionStrategy::Fixed(n),
        None => {}
    }

    Ok(config)
}

/// Gather the boundary points from the points file and the command line.
fn collect_points(
    args: &Args,
    config: &DewarpConfig,
) -> Result<Vec<CalibrationPoint>, Box<dyn std::error::Error>> {
    let mut collector = PointCollector::new(config.required_points);

    if let Some(path) = &args.points {
        collector.extend(calibration::read_calibration_points(path)?);
    }
    collector.extend(args.point.iter().copied());

    if !config.method.requires_calibration() {
        return Ok(collector.points().to_vec());
    }

    if !collector.is_complete() {
        log::error!(
            "please provide {} points on the boundary of the circle, {} missing",
            collector.required(),
            collector.remaining()
        );
    }

    Ok(collector.finish()?)
}

fn dump_maps(dir: &Path, dewarp_maps: &fisheye::DewarpMaps) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    for (i, map) in dewarp_maps.stages().enumerate() {
        let (path_x, path_y) = maps::write_coordinate_map(dir, &format!("stage{i}"), map)?;
        log::info!("map dumped: {} {}", path_x.display(), path_y.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let config = resolve_config(&args)?;

    // read the image
    let img = F::read_image_any_rgb8(&args.input)?;
    log::info!(
        "read {} ({}), method: {}",
        args.input.display(),
        img.size(),
        config.method
    );

    // compute the coordinate maps
    let points = collect_points(&args, &config)?;
    let dewarp_maps = fisheye::generate_dewarp_maps(img.size(), &config, &points)?;

    if let Some(circle) = dewarp_maps.circle {
        log::info!(
            "fisheye circle: cx = {:.2}, cy = {:.2}, r = {:.2}",
            circle.cx,
            circle.cy,
            circle.radius
        );
    }

    if let Some(dir) = &args.dump_maps {
        dump_maps(dir, &dewarp_maps)?;
    }

    // apply the maps
    let src = img.cast_and_scale::<f32>(1.0)?;
    let dst = fisheye::dewarp_image(&src, &dewarp_maps, &config)?;

    F::write_image_rgb8(&args.output, &dst.to_u8_saturated()?)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
