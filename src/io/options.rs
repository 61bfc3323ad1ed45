use std::{env, fmt, iter::Peekable, path::Path, str::FromStr, time::Duration};

use log::LevelFilter;

use crate::{Error, Result};

/// Options that take no value on the command line.
const FLAG_OPTIONS: &[&str] = &["closed", "no-log-timestamp"];

const DEFAULT_OUTLIER_FACTOR: f64 = 3.0;

/// Runtime options for one solver run.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Input CSV path with `name,lat,lon` rows. Empty means stdin.
    pub input: String,
    /// Output file path for the ordered route lines. Empty means stdout.
    pub output: String,
    /// Output file path for the GeoJSON export. Empty disables the export.
    pub geojson: String,
    /// Name of the place the tour must start from. Empty means unpinned.
    pub start: String,
    /// Treat the tour as a cycle that returns to its start.
    pub closed: bool,
    /// Wall-clock budget in seconds for 2-opt refinement. Zero means unlimited.
    pub time_limit: u64,
    /// Multiplier over the average edge used to count spikes in metrics logs.
    pub outlier_factor: f64,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {raw}"
            ))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {raw}"
            ))),
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            geojson: String::new(),
            start: String::new(),
            closed: false,
            time_limit: 0,
            outlier_factor: DEFAULT_OUTLIER_FACTOR,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }
            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n{}",
                    Self::usage()
                )));
            };

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option --{name}\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    fn split_arg(
        raw_name: &str,
        args: &mut Peekable<impl Iterator<Item = String>>,
    ) -> (String, Option<String>) {
        if let Some((name, value)) = raw_name.split_once('=') {
            return (name.to_string(), Some(value.to_string()));
        }
        if FLAG_OPTIONS.contains(&raw_name) {
            return (raw_name.to_string(), None);
        }

        let value = match args.peek() {
            Some(next) if !next.starts_with("--") => args.next(),
            _ => None,
        };

        (raw_name.to_string(), value)
    }

    fn apply_cli_option(&mut self, name: &str, value: Option<String>) -> Result<bool> {
        match name {
            "input" => self.input = required(name, value)?,
            "output" => self.output = required(name, value)?,
            "geojson" => self.geojson = required(name, value)?,
            "start" => self.start = required(name, value)?,
            "closed" => self.closed = true,
            "time-limit" => self.time_limit = parse_number(name, &required(name, value)?)?,
            "outlier-factor" => self.outlier_factor = parse_number(name, &required(name, value)?)?,
            "log-level" => self.log_level = LogLevel::parse(&required(name, value)?)?,
            "log-format" => self.log_format = LogFormat::parse(&required(name, value)?)?,
            "no-log-timestamp" => self.log_timestamp = false,
            "log-output" => self.log_output = required(name, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage: geotour [options]\n",
            "\n",
            "Route options:\n",
            "  --input <path>         CSV file with name,lat,lon rows (default: stdin)\n",
            "  --output <path>        File for the ordered route lines (default: stdout)\n",
            "  --geojson <path>       Write the route as a GeoJSON LineString\n",
            "  --start <name>         Pin the tour start to the named place\n",
            "  --closed               Return to the start, closing the tour\n",
            "  --time-limit <secs>    Budget for 2-opt refinement, 0 = unlimited\n",
            "  --outlier-factor <f>   Spike threshold multiplier for metrics\n",
            "\n",
            "Logging options:\n",
            "  --log-level <level>    error|warn|info|debug|trace|off\n",
            "  --log-format <format>  compact|pretty\n",
            "  --no-log-timestamp     Omit timestamps from log lines\n",
            "  --log-output <path>    Log destination (default: stderr)\n",
        )
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_empty_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_empty_path(&self.output)
    }

    pub fn geojson_path(&self) -> Option<&Path> {
        non_empty_path(&self.geojson)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_empty_path(&self.log_output)
    }

    pub fn start_name(&self) -> Option<&str> {
        (!self.start.is_empty()).then_some(self.start.as_str())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit > 0).then(|| Duration::from_secs(self.time_limit))
    }
}

fn non_empty_path(raw: &str) -> Option<&Path> {
    (!raw.is_empty()).then(|| Path::new(raw))
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::invalid_input(format!("Invalid value for --{name}: {raw}")))
}

impl fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input={:?} output={:?} geojson={:?} start={:?} closed={} time_limit={} \
             outlier_factor={} log_level={:?} log_format={:?} log_timestamp={} log_output={:?}",
            self.input,
            self.output,
            self.geojson,
            self.start,
            self.closed,
            self.time_limit,
            self.outlier_factor,
            self.log_level,
            self.log_format,
            self.log_timestamp,
            self.log_output
        )
    }
}
