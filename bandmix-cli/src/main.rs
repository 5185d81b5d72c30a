use bandmix::band::{high_pass_with, low_pass_with};
use bandmix::image::io::{load_image, save_image};
use bandmix::preset::json::load_preset;
use bandmix::{
    blend, filter, filter_par, hybridize_with, BlendConfig, FilterMode, Image, Normalization,
    Preset, StackParams,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/preset.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "bandmix CLI: filters, hybrid images and blending")]
struct Cli {
    /// Enable tracing output for performance profiling.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply one filtering step to a single image using `single_image`.
    Filter {
        #[arg(long, value_name = "FILE")]
        image: PathBuf,
        #[arg(long, value_name = "FILE")]
        preset: PathBuf,
        #[arg(long, value_enum)]
        op: FilterOp,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        /// Split the filter loop across threads.
        #[arg(long)]
        parallel: bool,
    },
    /// Build a hybrid image using `hybrid_image`.
    Hybrid {
        #[arg(long, value_name = "FILE")]
        image_a: PathBuf,
        #[arg(long, value_name = "FILE")]
        image_b: PathBuf,
        #[arg(long, value_name = "FILE")]
        preset: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Blend two images under a mask with Laplacian stacks.
    Blend {
        #[arg(long, value_name = "FILE")]
        image_a: PathBuf,
        #[arg(long, value_name = "FILE")]
        image_b: PathBuf,
        #[arg(long, value_name = "FILE")]
        mask: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        #[arg(long, default_value_t = 5)]
        levels: usize,
        #[arg(long, default_value_t = 16.0)]
        sigma: f32,
        /// Blur truncation radius; defaults to 4 * sigma.
        #[arg(long)]
        radius: Option<usize>,
        /// Add the mask-weighted coarsest level to the band sum.
        #[arg(long)]
        residual: bool,
        /// Keep the natural range instead of min-max normalizing.
        #[arg(long)]
        no_normalize: bool,
    },
    /// Print an example preset and exit.
    PrintExample,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterOp {
    CrossCorrelation,
    Convolution,
    LowPass,
    HighPass,
}

/// Inputs gathered by the shell and handed to each operation.
#[derive(Debug, Default)]
struct Session {
    image_path_a: Option<PathBuf>,
    image_path_b: Option<PathBuf>,
    preset: Option<Preset>,
}

impl Session {
    fn with_preset(mut self, path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        self.preset = Some(load_preset(path)?);
        Ok(self)
    }

    fn image_a(&self) -> Result<Image, Box<dyn std::error::Error>> {
        let path = self
            .image_path_a
            .as_ref()
            .ok_or("please provide an image")?;
        Ok(load_image(path)?)
    }

    fn image_b(&self) -> Result<Image, Box<dyn std::error::Error>> {
        let path = self
            .image_path_b
            .as_ref()
            .ok_or("please provide a second image")?;
        Ok(load_image(path)?)
    }

    fn preset(&self) -> Result<&Preset, Box<dyn std::error::Error>> {
        Ok(self.preset.as_ref().ok_or("please provide a preset")?)
    }
}

#[derive(Debug, Serialize)]
struct Report {
    operation: String,
    output: String,
    width: usize,
    height: usize,
    depth: usize,
    min: f32,
    max: f32,
}

impl Report {
    fn new(operation: impl Into<String>, output: &Path, img: &Image) -> Self {
        let (min, max) = img.min_max();
        Self {
            operation: operation.into(),
            output: output.display().to_string(),
            width: img.width(),
            height: img.height(),
            depth: img.depth(),
            min,
            max,
        }
    }
}

fn run_filter(
    session: &Session,
    op: FilterOp,
    parallel: bool,
) -> Result<Image, Box<dyn std::error::Error>> {
    let single = session.preset()?.single_image()?;
    let image = session.image_a()?;
    let apply = |mode: FilterMode| -> Result<Image, Box<dyn std::error::Error>> {
        let resolved = single.resolve("single_image")?;
        Ok(if parallel {
            filter_par(&image, &resolved.kernel, mode)
        } else {
            filter(&image, &resolved.kernel, mode)
        })
    };
    match op {
        FilterOp::CrossCorrelation => apply(FilterMode::CrossCorrelation),
        FilterOp::Convolution => apply(FilterMode::Convolution),
        FilterOp::LowPass => Ok(low_pass_with(&image, single.gaussian_params("single_image")?)?),
        FilterOp::HighPass => Ok(high_pass_with(&image, single.gaussian_params("single_image")?)?),
    }
}

fn run_hybrid(session: &Session) -> Result<Image, Box<dyn std::error::Error>> {
    let cfg = session.preset()?.resolve_hybrid()?;
    let a = session.image_a()?;
    let b = session.image_b()?;
    Ok(hybridize_with(&a, &b, &cfg)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("bandmix=info".parse()?))
            .with_target(false)
            .init();
    }

    let report = match cli.command {
        Command::PrintExample => {
            println!("{EXAMPLE_JSON}");
            return Ok(());
        }
        Command::Filter {
            image,
            preset,
            op,
            output,
            parallel,
        } => {
            let session = Session {
                image_path_a: Some(image),
                ..Session::default()
            }
            .with_preset(&preset)?;
            let result = run_filter(&session, op, parallel)?;
            save_image(&output, &result)?;
            let name = op
                .to_possible_value()
                .map_or_else(|| "filter".to_string(), |v| v.get_name().to_string());
            Report::new(name, &output, &result)
        }
        Command::Hybrid {
            image_a,
            image_b,
            preset,
            output,
        } => {
            let session = Session {
                image_path_a: Some(image_a),
                image_path_b: Some(image_b),
                ..Session::default()
            }
            .with_preset(&preset)?;
            let result = run_hybrid(&session)?;
            save_image(&output, &result)?;
            Report::new("hybrid", &output, &result)
        }
        Command::Blend {
            image_a,
            image_b,
            mask,
            output,
            levels,
            sigma,
            radius,
            residual,
            no_normalize,
        } => {
            let session = Session {
                image_path_a: Some(image_a),
                image_path_b: Some(image_b),
                ..Session::default()
            };
            let mut stack = StackParams::new(levels, sigma);
            if let Some(radius) = radius {
                stack = stack.with_radius(radius);
            }
            let normalization = if no_normalize {
                Normalization::None
            } else {
                Normalization::MinMax
            };
            let cfg = BlendConfig {
                stack,
                normalization,
                include_residual: residual,
            };
            let mask = load_image(&mask)?;
            let result = blend(&session.image_a()?, &session.image_b()?, &mask, &cfg)?;
            let to_save = match normalization {
                Normalization::MinMax => result.scaled(255.0),
                Normalization::None => result.clone(),
            };
            save_image(&output, &to_save)?;
            Report::new("blend", &output, &result)
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
