use log::info;
use std::env;
use std::path::Path;
use wedge_cover::config::{self, RunConfig};
use wedge_cover::metrics;
use wedge_cover::{Cover, DataSet};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = match env::args().nth(1) {
        Some(path) => config::load_config(Path::new(&path))?,
        None => {
            println!("No config given, using defaults. Usage: cover_demo <config.json>");
            RunConfig::default()
        }
    };

    let env = config.environment.resolve();
    let (clustering, lining) = config.solve.resolve().map_err(|e| e.to_string())?;

    let mut data = DataSet::new(env);
    data.generate_uniform(config.data.points_per_layer);
    if let Some(offset) = config.data.boundary_offset {
        data.add_boundary_points(offset);
    }
    info!(
        "built {} synthetic points on each of {} layers",
        data.n_points, env.layers
    );

    let mut cover = Cover::new(env, data);
    cover
        .solve(clustering, lining, config.solve.apex, config.solve.n_lines)
        .map_err(|e| e.to_string())?;

    let report = metrics::report(&cover, config.solve.apex, config.solve.n_lines.max(1))
        .map_err(|e| e.to_string())?;
    println!(
        "patches={} acceptance={:.4} prf_mean={:.2} prf_max={}",
        report.n_patches, report.acceptance, report.prf_mean, report.prf_max
    );

    if let Some(path) = &config.output.json_out {
        config::write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}
