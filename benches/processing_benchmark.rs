use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use station_weather::analyzers::TemperatureColorScale;
use station_weather::models::Reading;
use station_weather::processors::{apply_filter, normalize_all, SelectionEvent, StationAggregator};
use station_weather::readers::WeatherCsvReader;

const STATES: [&str; 5] = ["CA", "NV", "MN", "TX", "NY"];

fn create_test_readings(station_count: usize, days: usize) -> Vec<Reading> {
    let base_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut readings = Vec::with_capacity(station_count * days);

    // Interleave stations day by day, as the source files do
    for day in 0..days {
        let date = base_date + chrono::Duration::days(day as i64);
        for station_id in 0..station_count {
            let base = 40.0 + (station_id % 30) as f64 + (day % 7) as f64;
            let mut builder = Reading::builder()
                .station(format!("USW{:08}", station_id))
                .state(STATES[station_id % STATES.len()])
                .date(date)
                .coordinates(30.0 + (station_id % 15) as f64, -120.0 + (station_id % 40) as f64)
                .elevation(100.0)
                .temperatures(base - 8.0, base + 8.0)
                .wind_speed(5.0)
                .precipitation(0.1);

            if day % 3 != 0 {
                builder = builder.tavg(base);
            }
            readings.push(builder.build().unwrap());
        }
    }

    readings
}

fn create_test_csv(station_count: usize, days: usize) -> String {
    let mut csv = String::from(
        "station,state,latitude,longitude,elevation,date,TMIN,TMAX,TAVG,AWND,SNOW,SNWD,PRCP\n",
    );
    for r in create_test_readings(station_count, days) {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},5.0,0,0,0.1\n",
            r.station,
            r.state,
            r.latitude,
            r.longitude,
            r.elevation,
            r.date.format("%Y%m%d"),
            r.tmin.unwrap_or_default(),
            r.tmax.unwrap_or_default(),
            r.tavg.map(|t| t.to_string()).unwrap_or_default(),
        ));
    }
    csv
}

fn benchmark_csv_parsing(c: &mut Criterion) {
    let csv = create_test_csv(20, 30);
    let reader = WeatherCsvReader::new();

    c.bench_function("csv_parsing", |b| {
        b.iter(|| black_box(reader.parse_str(&csv).map(|r| r.len()).unwrap_or(0)))
    });
}

fn benchmark_normalize_and_aggregate(c: &mut Criterion) {
    let readings = create_test_readings(50, 30);
    let aggregator = StationAggregator::new();

    c.bench_function("normalize_and_aggregate", |b| {
        b.iter(|| {
            let normalized = normalize_all(readings.clone());
            black_box(aggregator.aggregate(&normalized).len())
        })
    });
}

fn benchmark_filter_and_color(c: &mut Criterion) {
    let normalized = normalize_all(create_test_readings(200, 10));
    let stations = StationAggregator::new().aggregate(&normalized);
    let selection = SelectionEvent::states(["CA", "TX"]);

    c.bench_function("filter_and_color", |b| {
        b.iter(|| {
            let scale = TemperatureColorScale::from_stations(&stations);
            let visible = apply_filter(&selection, &stations);
            let colored = visible
                .iter()
                .filter_map(|s| scale.and_then(|sc| sc.color(s.avg_temperature)))
                .count();
            black_box(colored)
        })
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation_by_size");

    for &size in &[10, 50, 100, 500] {
        group.bench_with_input(
            BenchmarkId::new("stations", size),
            &size,
            |b, &station_count| {
                let normalized = normalize_all(create_test_readings(station_count, 30));
                let aggregator = StationAggregator::new();

                b.iter(|| black_box(aggregator.aggregate(&normalized).len()))
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_csv_parsing,
    benchmark_normalize_and_aggregate,
    benchmark_filter_and_color,
    benchmark_varying_data_sizes
);
criterion_main!(benches);
