use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

use heightmap_gen::noise_field::recommended_smoothing;
use heightmap_gen::{GeneratorSettings, HeightGenerator, HeightMapSession, Result, SeededRandom, Topology};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GeneratorKind {
    /// Recursive midpoint displacement
    Fractal,
    /// Smoothed uniform noise
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "heightmap_gen")]
#[command(about = "Generate height maps for wrapping tile grids")]
struct Args {
    /// Width of the grid in tiles
    #[arg(short = 'W', long, default_value = "80")]
    width: usize,

    /// Height of the grid in tiles
    #[arg(short = 'H', long, default_value = "50")]
    height: usize,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Height generator to run
    #[arg(short, long, value_enum, default_value = "fractal")]
    generator: GeneratorKind,

    /// Disable horizontal wrapping
    #[arg(long)]
    no_wrap_x: bool,

    /// Wrap vertically as well
    #[arg(long)]
    wrap_y: bool,

    /// Extra fractal subdivisions (more, smaller islands)
    #[arg(long, default_value = "0")]
    extra_subdivision: u32,

    /// Smoothing passes for the random generator (default scales with map size)
    #[arg(long)]
    smoothing: Option<u32>,

    /// Target land percentage
    #[arg(long)]
    land_percent: Option<i32>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => GeneratorSettings::load(path)?,
        None => GeneratorSettings::default(),
    };
    if let Some(land) = args.land_percent {
        settings.land_percent = land;
    }
    settings.validate()?;

    let topology = Topology::new(args.width, args.height, !args.no_wrap_x, args.wrap_y)?.with_settings(&settings);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating height map with seed: {}", seed);
    info!(
        "Map size: {}x{} (wrap x: {}, wrap y: {})",
        topology.width, topology.height, topology.wrap_x, topology.wrap_y
    );

    let generator = match args.generator {
        GeneratorKind::Fractal => HeightGenerator::Fractal {
            extra_subdivision: args.extra_subdivision,
        },
        GeneratorKind::Random => HeightGenerator::WhiteNoise {
            smoothing_passes: args
                .smoothing
                .unwrap_or_else(|| recommended_smoothing(topology.width, topology.height)),
        },
    };

    let mut session = HeightMapSession::new(&topology, &settings, SeededRandom::new(seed))?;
    let finished = session.generate(generator)?.finish();
    info!("{} land tiles flat enough to take a hill", finished.count_flat_tiles());

    let (height_map, levels) = finished.into_parts();
    let stats = height_map.stats(&levels);
    info!("Height range: {} to {}", stats.min, stats.max);
    info!(
        "Shore level {}, mountain level {}: {:.1}% land, {:.1}% above mountain level",
        levels.shore, levels.mountain, stats.land_percent, stats.mountain_percent
    );

    Ok(())
}
