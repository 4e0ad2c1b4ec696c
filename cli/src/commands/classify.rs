use anyhow::Result;
use tunimap::{CellValue, ColorName, MapConfig, classify};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ClassifyArgs) -> Result<()> {
    for (value, color) in classify_values(args)? {
        println!("{value}\t{color}");
    }
    Ok(())
}

/// Pair each requested value with its color under the configured (or overridden) intervals.
fn classify_values(args: &crate::cli::ClassifyArgs) -> Result<Vec<(String, ColorName)>> {
    let config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    let rules = config
        .with_interval_overrides(args.intervals.iter().map(String::as_str))
        .rules();

    let colors = args.values.iter()
        .map(|value| (value.clone(), classify(&CellValue::from(value.as_str()), &rules)))
        .collect();
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn classify_args(argv: &[&str]) -> crate::cli::ClassifyArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Classify(args) => args,
            other => panic!("expected classify, got {other:?}"),
        }
    }

    fn colors(argv: &[&str]) -> Vec<String> {
        classify_values(&classify_args(argv)).unwrap()
            .into_iter()
            .map(|(_, color)| color.to_string())
            .collect()
    }

    #[test]
    fn default_intervals() {
        assert_eq!(colors(&["tunimap", "classify", "15", "150", "n/a"]), vec!["yellow", "green", "lightgrey"]);
    }

    #[test]
    fn negative_values_are_not_flags() {
        let args = classify_args(&["tunimap", "classify", "-5", "10"]);
        assert_eq!(args.values, vec!["-5", "10"]);
        assert_eq!(colors(&["tunimap", "classify", "-5"]), vec!["lightgrey"]);
    }

    #[test]
    fn interval_overrides_accept_leading_hyphens() {
        let args = classify_args(&["tunimap", "classify", "-i", "-5-10", "-i", "0-1000", "7"]);
        assert_eq!(args.intervals, vec!["-5-10", "0-1000"]);
        assert_eq!(args.values, vec!["7"]);

        // The malformed first slot never matches; the second slot takes its color.
        assert_eq!(colors(&["tunimap", "classify", "-i", "-5-10", "-i", "0-1000", "7"]), vec!["orange"]);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = classify_args(&["tunimap", "classify", "-c", "/nonexistent/config.json", "1"]);
        assert!(classify_values(&args).is_err());
    }
}
