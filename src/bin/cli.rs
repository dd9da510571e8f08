// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! polystitch CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use polystitch::cli::{parse_point, read_points, Reporter, Runner};
use polystitch::{io, Config};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "polystitch")]
#[command(about = "Stitch polygon soups into meshes and classify points against them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./polystitch.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output (-v for debug logs, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Stitch an OBJ or STL file and report the resulting meshes
    Stitch {
        /// Input OBJ or STL file
        input: PathBuf,

        /// Write the stitched meshes (OBJ groups per mesh, or STL)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep solids that only touch along an edge apart
        #[arg(long)]
        avoid_cavities: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify points as inside, outside or on the stitched meshes
    Classify {
        /// Input OBJ or STL file
        input: PathBuf,

        /// Point as x,y,z (repeatable)
        #[arg(short, long = "point", value_name = "X,Y,Z", allow_hyphen_values = true)]
        points: Vec<String>,

        /// File with one point per line
        #[arg(long, value_name = "FILE")]
        points_file: Option<PathBuf>,

        /// Only consider this mesh
        #[arg(short, long)]
        mesh: Option<usize>,

        /// Use the even-odd crossing rule
        #[arg(long)]
        even_odd: bool,

        /// Rays to try per point before giving up
        #[arg(long)]
        max_rays: Option<usize>,

        /// Seed for ray directions
        #[arg(long)]
        seed: Option<u64>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the effective configuration to a file
    Config {
        /// Output TOML file
        #[arg(default_value = polystitch::config::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env(|key| std::env::var(key).ok())?;
            config
        }
        None => Config::load()?,
    };

    match cli.command {
        Commands::Stitch {
            input,
            output,
            avoid_cavities,
            json,
        } => {
            let mut config = config;
            config.stitch.avoid_cavities |= avoid_cavities;
            stitch_command(config, &input, output.as_deref(), json)?;
        }
        Commands::Classify {
            input,
            points,
            points_file,
            mesh,
            even_odd,
            max_rays,
            seed,
            json,
        } => {
            let mut config = config;
            config.classify.even_odd |= even_odd;
            if let Some(max_rays) = max_rays {
                config.classify.max_ray_attempts = max_rays;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            let mut probes = points
                .iter()
                .map(|p| parse_point(p))
                .collect::<Result<Vec<_>>>()?;
            if let Some(path) = points_file {
                probes.extend(read_points(&path)?);
            }
            classify_command(config, &input, &probes, mesh, json)?;
        }
        Commands::Config { output } => {
            config.save(&output)?;
            Reporter::success(&format!("Configuration written to {}", output.display()));
        }
        Commands::Version => {
            println!("polystitch v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn stitch_command(config: Config, input: &Path, output: Option<&Path>, json: bool) -> Result<()> {
    let runner = Runner::new(config);
    let result = runner.stitch_file(input)?;
    let report = result.meshes.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        Reporter::report_stitch(&input.display().to_string(), &report, result.duration);
    }

    if let Some(output) = output {
        io::save_meshes(output, &result.meshes)?;
        if !json {
            Reporter::success(&format!("Wrote {}", output.display()));
        }
    }

    Ok(())
}

fn classify_command(
    config: Config,
    input: &Path,
    points: &[nalgebra::Point3<f64>],
    mesh: Option<usize>,
    json: bool,
) -> Result<()> {
    if points.is_empty() {
        Reporter::report_warning("No points given; use --point or --points-file");
        return Ok(());
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let runner = Runner::new(config);
    let result = runner.stitch_file(input)?;
    if let Some(mesh) = mesh {
        result.meshes.mesh(mesh)?;
    }
    let results = runner.classify_points(&result.meshes, points, mesh, seed);

    if json {
        let rows: Vec<serde_json::Value> = points
            .iter()
            .zip(&results)
            .map(|(p, r)| match r {
                Ok(c) => serde_json::json!({ "point": [p.x, p.y, p.z], "result": c }),
                Err(e) => serde_json::json!({ "point": [p.x, p.y, p.z], "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for (point, r) in points.iter().zip(&results) {
            Reporter::report_classification(point, r);
        }
    }

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        Reporter::report_error(&format!("{} of {} points undecided", failed, points.len()));
        std::process::exit(1);
    }

    Ok(())
}
