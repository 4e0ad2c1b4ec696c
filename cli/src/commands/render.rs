use std::path::PathBuf;

use anyhow::{Context, Result};
use tunimap::{Boundaries, MapConfig, MapState, load_tabular};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let out_path: PathBuf = args.output.clone().unwrap_or("./map.svg".into());

    let config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    let mut state = MapState::new(config);
    if !args.intervals.is_empty() {
        state.set_intervals(args.intervals.iter().map(String::as_str));
    }

    tracing::info!("[render] loading boundaries from {}", args.boundaries.display());
    let boundaries = Boundaries::read_from_geojson(&args.boundaries)?;

    if let Some(data_path) = &args.data {
        tracing::info!("[render] loading dataset from {}", data_path.display());
        let dataset = load_tabular(data_path)
            .with_context(|| format!("[render] Could not load {}", data_path.display()))?;
        state.upload(dataset);
    }

    let pass = state.render(&boundaries);
    if let Some(message) = pass.validation().message() {
        eprintln!("[render] {message}");
    }

    let is_geojson = out_path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("geojson") || ext.eq_ignore_ascii_case("json"));
    if is_geojson {
        pass.write_geojson(&out_path)?;
    } else {
        pass.to_svg_with_size(&out_path, args.width, 10)?;
    }

    println!(
        "[render] wrote {} ({}/{} delegations colored)",
        out_path.display(),
        pass.assigned_count(),
        boundaries.len(),
    );
    Ok(())
}
