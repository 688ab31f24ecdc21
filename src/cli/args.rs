use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "station-weather")]
#[command(about = "Prepare station weather data for the map dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Configuration file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,
}

/// State selection as the dropdown would send it.
#[derive(Args, Debug, Clone)]
pub struct StateSelection {
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "States to show, comma separated (e.g. CA,NV)"
    )]
    pub states: Vec<String>,

    #[arg(long, help = "Show every state; overrides --states")]
    pub all: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Per-station averages, color domain and legend
    Summary {
        #[arg(short, long, help = "Input weather CSV file")]
        input: PathBuf,

        #[command(flatten)]
        selection: StateSelection,
    },

    /// Daily temperature series for one station
    Series {
        #[arg(short, long, help = "Input weather CSV file")]
        input: PathBuf,

        #[arg(long, help = "Station identifier")]
        station: String,
    },

    /// Temperature against wind speed, with optional brush
    Scatter {
        #[arg(short, long, help = "Input weather CSV file")]
        input: PathBuf,

        #[arg(long, help = "Maximum readings to plot [default: from config]")]
        limit: Option<usize>,

        #[arg(
            long,
            num_args = 4,
            allow_negative_numbers = true,
            value_names = ["TEMP_A", "WIND_A", "TEMP_B", "WIND_B"],
            help = "Brush rectangle corners in data units"
        )]
        brush: Option<Vec<f64>>,

        #[arg(
            long = "select",
            value_name = "STATION",
            help = "Click a station's points; repeat to toggle again"
        )]
        select: Vec<String>,

        #[arg(long, help = "Print every point with its fill and style")]
        points: bool,
    },

    /// Write the filtered dashboard snapshot as JSON
    Export {
        #[arg(short, long, help = "Input weather CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Output JSON file path")]
        output: PathBuf,

        #[command(flatten)]
        selection: StateSelection,

        #[arg(long, help = "Station to show in the details panel")]
        station: Option<String>,

        #[arg(long, help = "Pretty-print the JSON")]
        pretty: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_states() {
        let cli = Cli::try_parse_from([
            "station-weather",
            "summary",
            "--input",
            "data.csv",
            "--states",
            "CA,NV",
        ])
        .unwrap();

        match cli.command {
            Commands::Summary { selection, .. } => {
                assert_eq!(selection.states, vec!["CA", "NV"]);
                assert!(!selection.all);
            }
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn test_parse_scatter_brush() {
        let cli = Cli::try_parse_from([
            "station-weather",
            "-v",
            "scatter",
            "-i",
            "data.csv",
            "--brush",
            "-10",
            "2",
            "40",
            "12.5",
            "--select",
            "USW00023174",
            "--select",
            "USW00023174",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Scatter {
                brush,
                limit,
                select,
                points,
                ..
            } => {
                assert_eq!(brush, Some(vec![-10.0, 2.0, 40.0, 12.5]));
                assert_eq!(limit, None);
                assert_eq!(select.len(), 2);
                assert!(!points);
            }
            _ => panic!("expected scatter"),
        }
    }
}
