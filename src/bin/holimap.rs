use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use holimap::JoinPolicy;
use holimap::render::{RenderOptions, render_from_locations};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "holimap",
    version,
    about = "Render a world choropleth of public holidays per country as SVG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the map from a GeoJSON shape file and a CSV metric table.
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum JoinArg {
    /// Exact name equality (the classic behavior).
    Exact,
    /// Case-insensitive, trimmed name equality.
    Normalized,
    /// Match the shape's ISO id against the country column.
    Id,
}

impl From<JoinArg> for JoinPolicy {
    fn from(arg: JoinArg) -> Self {
        match arg {
            JoinArg::Exact => JoinPolicy::Exact,
            JoinArg::Normalized => JoinPolicy::Normalized,
            JoinArg::Id => JoinPolicy::Id,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// GeoJSON FeatureCollection of country shapes (path or URL).
    #[arg(short, long, value_name = "FILE|URL")]
    shapes: String,
    /// CSV metric table with `country` and `Holidays` columns (path or URL).
    #[arg(short, long, value_name = "FILE|URL")]
    metrics: String,
    /// Output SVG path.
    #[arg(short, long, value_name = "FILE", default_value = "map.svg")]
    out: PathBuf,
    /// Viewport width in pixels; the canvas takes 70% of it.
    #[arg(long, default_value_t = 1400.0)]
    viewport_width: f64,
    /// How shapes are matched to metric rows.
    #[arg(long, value_enum, default_value_t = JoinArg::Exact)]
    join: JoinArg,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let options = RenderOptions {
        viewport_width: args.viewport_width,
        join_policy: args.join.into(),
    };
    let map = render_from_locations(&args.shapes, &args.metrics, &options)?;
    std::fs::write(&args.out, &map.svg)?;

    let drawn = map.report.matched + map.report.unmatched.len();
    println!(
        "Wrote {} ({}x{}): {} countries, {} matched, {} without data",
        args.out.display(),
        map.dimensions.width.round(),
        map.dimensions.height.round(),
        drawn,
        map.report.matched,
        map.report.unmatched.len()
    );
    Ok(())
}
