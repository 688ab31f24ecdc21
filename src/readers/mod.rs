pub mod csv_reader;

pub use csv_reader::{decode_input, parse_compact_date, WeatherCsvReader};
