use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pnmseam::{CostTableStrategy, EnergyField, SeamCarver};

fn cli() -> Command {
    Command::new("pnmseam")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image narrowing by seam carving")
        .arg(
            Arg::new("input")
                .help("The image to carve")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .help("Where to write the carved image; the format follows the extension")
                .required(true)
                .index(2)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("seams")
                .short('n')
                .long("seams")
                .value_name("N")
                .help("How many columns to remove")
                .required(true)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .help("How the cost table is kept current between removals")
                .value_parser(["full", "incremental"])
                .default_value("incremental"),
        )
        .arg(
            Arg::new("energy")
                .long("energy")
                .value_name("PATH")
                .help("Also write the energy map of the input as a grayscale image")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log each carve at debug level")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pnmseam={level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    if let Err(err) = run(&matches) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<PathBuf>("input")
        .context("no input image given")?;
    let output = matches
        .get_one::<PathBuf>("output")
        .context("no output path given")?;
    let seams = *matches
        .get_one::<u32>("seams")
        .context("no seam count given")?;
    let strategy: CostTableStrategy = matches
        .get_one::<String>("strategy")
        .map(String::as_str)
        .unwrap_or("incremental")
        .parse()?;

    let image = image::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?
        .to_rgba8();
    info!(
        width = image.width(),
        height = image.height(),
        "loaded {}",
        input.display()
    );

    if let Some(path) = matches.get_one::<PathBuf>("energy") {
        EnergyField::from_image(&image)
            .to_image()
            .save(path)
            .with_context(|| format!("failed to write energy map to {}", path.display()))?;
    }

    let carved = SeamCarver::new(&image).strategy(strategy).carve(seams)?;
    save(carved, output)?;
    info!("wrote {}", output.display());
    Ok(())
}

// Formats without an alpha channel get the color planes only.
fn save(image: RgbaImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("cannot tell the image format of {}", path.display()))?;
    let written = match format {
        ImageFormat::Jpeg | ImageFormat::Pnm | ImageFormat::Bmp => {
            DynamicImage::ImageRgba8(image).to_rgb8().save_with_format(path, format)
        }
        _ => image.save_with_format(path, format),
    };
    written.with_context(|| format!("failed to write {}", path.display()))
}
