use crate::analyzers::{popup_text, BrushSelection, Dashboard, ScatterSelection, ScatterView};
use crate::cli::args::{Cli, Commands, StateSelection};
use crate::cli::logging::init_logging;
use crate::error::{ProcessingError, Result};
use crate::processors::{DashboardData, Pipeline, SelectionEvent, StationAggregator};
use crate::settings::DashboardConfig;
use crate::utils::progress::ProgressReporter;
use crate::utils::BRUSH_DIMMED_OPACITY;
use crate::writers::{DashboardExport, JsonWriter};
use std::path::Path;
use tracing::{debug, error};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = DashboardConfig::load(cli.config.as_deref())?;
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Summary { input, selection } => {
            let data = load(&input, cli.quiet, &config).await?;
            let mut dashboard = Dashboard::new(data);
            let outcome = dashboard.apply_selection(&selection_event(&selection));

            println!(
                "Showing {} of {} stations ({} hidden)",
                outcome.visible.len(),
                dashboard.stations().len(),
                outcome.hidden_count
            );

            match dashboard.color_scale() {
                Some(scale) => {
                    let (hot, cold) = scale.domain();
                    println!("Color domain: {:.1}°C (red) to {:.1}°C (blue)", hot, cold);
                    println!("\nLegend:");
                    for entry in dashboard.legend(config.legend_bins) {
                        println!("  {}  {}", entry.color.to_hex(), entry.label());
                    }
                }
                None => println!("No station has a temperature average"),
            }

            for marker in dashboard.visible_markers() {
                println!("\n{}", popup_text(&marker.station));
                if let Some(color) = &marker.color {
                    println!("Color: {}", color);
                }
            }
        }

        Commands::Series { input, station } => {
            let data = load(&input, cli.quiet, &config).await?;
            let mut dashboard = Dashboard::new(data);
            let view = dashboard.select_station(&station)?;

            println!("{}", view.details);

            if let Some(domain) = view.series.domain() {
                println!(
                    "\n{} to {}, axis {:.1}°C to {:.1}°C",
                    domain.first_date, domain.last_date, domain.temp_low, domain.temp_high
                );
            }

            for point in &view.series.points {
                println!(
                    "{}  {}  (min {}, max {})",
                    point.date(),
                    celsius(point.temperature),
                    celsius(point.tmin_celsius()),
                    celsius(point.tmax_celsius())
                );
            }
        }

        Commands::Scatter {
            input,
            limit,
            brush,
            select,
            points,
        } => {
            let data = load(&input, cli.quiet, &config).await?;
            let limit = limit.unwrap_or(config.scatter_limit);
            let view = ScatterView::build(&data.readings, &config.projection(), limit);

            println!("Plotting {} readings", view.points().len());
            if let (Some(t), Some(w)) = (view.temperature_extent(), view.wind_extent()) {
                println!("Temperature: {:.1}°F to {:.1}°F", t.min, t.max);
                println!("Wind speed: {:.1} to {:.1} mph", w.min, w.max);
            }
            if let Some(p) = view.precipitation_extent() {
                println!("Precipitation: {:.2} to {:.2} in", p.min, p.max);
            }

            let brush = brush.as_deref().map(brush_from_values).transpose()?;
            let highlight = view.brush(brush.as_ref());

            let highlighted = view
                .points()
                .iter()
                .filter(|p| highlight.opacity(p) > BRUSH_DIMMED_OPACITY)
                .count();
            println!("Highlighted: {} of {}", highlighted, view.points().len());

            let mut selection = ScatterSelection::new();
            for station in &select {
                selection.toggle(station);
            }
            if let Some(station) = selection.selected() {
                println!("Selected station: {}", station);
            }

            if points {
                for point in view.points() {
                    let style = selection.style(point);
                    let fill = view
                        .fill_color(point.tavg)
                        .map(|c| c.to_hex())
                        .unwrap_or_default();
                    println!(
                        "{}  {}  {:.1}°F  {:.1} mph  {}  bubble r={:.1}  point r={} opacity={}  brush opacity={}",
                        point.station,
                        point.date,
                        point.tavg,
                        point.awnd,
                        fill,
                        view.precipitation_radius(point.prcp),
                        style.radius,
                        style.opacity,
                        highlight.opacity(point)
                    );
                }
            }
        }

        Commands::Export {
            input,
            output,
            selection,
            station,
            pretty,
        } => {
            let data = load(&input, cli.quiet, &config).await?;
            let mut dashboard = Dashboard::new(data);
            if let Some(station) = &station {
                dashboard.select_station(station)?;
            }
            dashboard.apply_selection(&selection_event(&selection));

            let export = DashboardExport::from_dashboard(
                &dashboard,
                &input.display().to_string(),
                config.legend_bins,
            );
            let bytes = JsonWriter::new().with_pretty(pretty).write(&export, &output)?;

            println!(
                "Wrote {} markers to {} ({} bytes)",
                export.markers.len(),
                output.display(),
                bytes
            );
        }
    }

    Ok(())
}

async fn load(input: &Path, quiet: bool, config: &DashboardConfig) -> Result<DashboardData> {
    let progress = ProgressReporter::spinner("Loading weather data...", quiet);
    let pipeline = Pipeline::new()
        .with_aggregator(StationAggregator::with_metadata_check(config.check_metadata));

    match pipeline.load(input, Some(&progress)).await {
        Ok(data) => Ok(data),
        Err(e) => {
            progress.abandon();
            error!("Failed to load {}: {}", input.display(), e);
            Err(e)
        }
    }
}

fn celsius(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.1}°C", value)
    }
}

fn selection_event(selection: &StateSelection) -> SelectionEvent {
    let event = SelectionEvent::from_values(&selection.states);
    if selection.all {
        event.with_all()
    } else {
        event
    }
}

fn brush_from_values(values: &[f64]) -> Result<BrushSelection> {
    match values {
        [t0, w0, t1, w1] => Ok(BrushSelection::from_corners((*t0, *w0), (*t1, *w1))),
        _ => Err(ProcessingError::InvalidFormat(format!(
            "Brush needs 4 values, got {}",
            values.len()
        ))),
    }
}
