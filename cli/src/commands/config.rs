use anyhow::Result;
use tunimap::MapConfig;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ConfigArgs) -> Result<()> {
    let config = MapConfig::default();
    match &args.output {
        Some(path) => {
            config.save(path)?;
            println!("[config] wrote defaults to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
