#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the school map generator.
//!
//! A zero-flag invocation uses the dataset paths the map was built around;
//! the flags exist so the same pipeline can run against other extracts.

use std::path::PathBuf;

use clap::Parser;
use school_map_generate::{GenerateArgs, run};

#[derive(Parser)]
#[command(name = "school_map_generate", about = "School proximity map generator")]
struct Cli {
    /// Schools point layer (GeoJSON)
    #[arg(
        long,
        default_value = "data/schools_within_shotspotter_districts.geojson"
    )]
    schools: PathBuf,

    /// District boundary layer (GeoJSON)
    #[arg(long, default_value = "data/Texas_school_districts_Shotspotter.geojson")]
    districts: PathBuf,

    /// Output HTML path
    #[arg(long, default_value = "school_map.html")]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    run(&GenerateArgs {
        schools: cli.schools,
        districts: cli.districts,
        out: cli.out,
    })
}
