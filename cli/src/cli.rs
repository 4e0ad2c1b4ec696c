use std::path::PathBuf;

/// Choropleth CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "tunimap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Color delegation boundaries from an uploaded table
    Render(RenderArgs),

    /// Print the color each value falls into
    Classify(ClassifyArgs),

    /// Write the default configuration (the reset state)
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Delegation boundaries (GeoJSON FeatureCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub boundaries: PathBuf,

    /// Uploaded table (.csv, .json or .xlsx) with delegation names and values
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// JSON configuration file, defaults to the built-in intervals
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Interval text overriding the configured slots in order, e.g. -i 0-20 -i 101+
    #[arg(short, long = "interval", allow_hyphen_values = true)]
    pub intervals: Vec<String>,

    /// Output file (.svg or .geojson), defaults to "./map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// SVG width in pixels
    #[arg(long, default_value_t = 900)]
    pub width: u32,
}

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Values to classify
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// JSON configuration file, defaults to the built-in intervals
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Interval text overriding the configured slots in order
    #[arg(short, long = "interval", allow_hyphen_values = true)]
    pub intervals: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Output file, prints to stdout when omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn render_collects_repeated_intervals() {
        let cli = Cli::try_parse_from([
            "tunimap", "-vv", "render", "delegations.geojson",
            "-d", "valeurs.xlsx", "-i", "0-20", "-i", "101+", "-o", "map.geojson",
        ]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Render(args) = cli.command else { panic!("expected render") };
        assert_eq!(args.boundaries, PathBuf::from("delegations.geojson"));
        assert_eq!(args.data, Some(PathBuf::from("valeurs.xlsx")));
        assert_eq!(args.intervals, vec!["0-20", "101+"]);
        assert_eq!(args.output, Some(PathBuf::from("map.geojson")));
        assert_eq!(args.width, 900);
    }

    #[test]
    fn render_interval_may_start_with_hyphen() {
        let cli = Cli::try_parse_from(["tunimap", "render", "b.geojson", "--interval", "-5+"]).unwrap();
        let Commands::Render(args) = cli.command else { panic!("expected render") };
        assert_eq!(args.intervals, vec!["-5+"]);
    }

    #[test]
    fn classify_requires_values() {
        assert!(Cli::try_parse_from(["tunimap", "classify"]).is_err());
    }
}
