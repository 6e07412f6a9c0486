use std::{env, path::Path, time::Duration};

use log::LevelFilter;
use tsp_bnb_derive::{CliOptions, CliValue, KvDisplay};

use crate::{
    Error, Result,
    bnb::solver::{SearchMode, SearchOptions},
    constants::DEFAULT_SEED,
};

/// Runtime options for the `tsp-bnb` binary.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Edge-list file to read. Empty or `-` means stdin.
    #[cli(long = "input", value = "<path>")]
    pub input: String,
    /// Generate a random Euclidean graph with this many nodes instead of reading one.
    #[cli(long = "random-nodes", value = "<usize>")]
    #[kv(fmt = "opt")]
    pub random_nodes: Option<usize>,
    /// Seed for random graph generation.
    #[cli(long = "seed", value = "<u64>")]
    pub seed: u64,
    /// Write the solved graph as an edge list to this path.
    #[cli(long = "save-graph", value = "<path>")]
    pub save_graph: String,
    /// Output file for the tour. Empty or `-` means stdout.
    #[cli(long = "output", value = "<path>")]
    pub output: String,
    #[cli(long = "search-mode", value = "<sequential|parallel>", parse_with = "SearchMode::parse")]
    pub search_mode: SearchMode,
    /// Worker threads in parallel mode; 0 uses every core.
    #[cli(long = "threads", value = "<usize>")]
    pub threads: usize,
    /// Stop searching after this many seconds and report the best tour so far.
    #[cli(long = "time-limit", value = "<secs>")]
    #[kv(fmt = "opt")]
    pub time_limit: Option<f64>,
    /// Only accept tours strictly cheaper than this cost.
    #[cli(long = "upper-bound", value = "<f64>")]
    #[kv(fmt = "opt")]
    pub upper_bound: Option<f64>,
    #[cli(long = "log-level", value = "<error|warn|info|debug|trace|off>", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", value = "<compact|pretty>", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Log file. Empty or `-` means stderr.
    #[cli(long = "log-output", value = "<path>")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
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

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            input: String::new(),
            random_nodes: None,
            seed: DEFAULT_SEED,
            save_graph: String::new(),
            output: String::new(),
            search_mode: SearchMode::Sequential,
            threads: 0,
            time_limit: None,
            upper_bound: None,
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

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
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
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, inline) = Self::split_arg(raw_name);
            if !options.apply_cli_option(&name, inline, &mut args)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.check()?;
        Ok(options)
    }

    fn check(&self) -> Result<()> {
        self.time_limit_duration()?;
        if let Some(bound) = self.upper_bound
            && bound.is_nan()
        {
            return Err(Error::invalid_input("--upper-bound must be a number"));
        }
        Ok(())
    }

    pub fn usage() -> String {
        format!(
            concat!(
                "Usage:\n",
                "  tsp-bnb [options] [--input graph.txt]\n",
                "  tsp-bnb [options] < graph.txt\n",
                "  tsp-bnb [options] --random-nodes 10 --seed 7\n\n",
                "Options:\n",
                "{}",
                "  --help\n",
                "\n",
                "Input is a weighted edge list, one '<u> <v> <weight>' line per undirected edge.\n",
                "\n",
                "Examples:\n",
                "  tsp-bnb --input graph.txt --log-level info\n",
                "  tsp-bnb --random-nodes 12 --save-graph graph.txt --search-mode parallel\n",
                "  tsp-bnb --time-limit=5 --output tour.txt < graph.txt\n",
            ),
            Self::options_usage()
        )
    }

    pub fn search_options(&self) -> Result<SearchOptions> {
        Ok(SearchOptions {
            mode: self.search_mode,
            threads: self.threads,
            time_limit: self.time_limit_duration()?,
            upper_bound: self.upper_bound,
            interruptible: true,
        })
    }

    fn time_limit_duration(&self) -> Result<Option<Duration>> {
        self.time_limit
            .map(|limit| {
                Duration::try_from_secs_f64(limit).map_err(|e| {
                    Error::invalid_input(format!(
                        "--time-limit must be a non-negative number of seconds, got {limit} ({e})"
                    ))
                })
            })
            .transpose()
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_std_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_std_path(&self.output)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_std_path(&self.log_output)
    }

    pub fn save_graph_path(&self) -> Option<&Path> {
        non_std_path(&self.save_graph)
    }
}

/// Empty and `-` mean the standard stream.
fn non_std_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use log::LevelFilter;

    use super::{LogFormat, LogLevel, SolverOptions};
    use crate::{Error, bnb::solver::SearchMode};

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
    }

    #[test]
    fn log_level_accepts_warning_alias() {
        assert_eq!(LogLevel::parse("WARNING").expect("parse"), LogLevel::Warn);
    }

    #[test]
    fn parse_from_iter_applies_known_cli_options() {
        let options = SolverOptions::parse_from_iter([
            "--input=graph.txt",
            "--random-nodes",
            "9",
            "--seed=77",
            "--save-graph=saved.txt",
            "--output",
            "tour.txt",
            "--search-mode=parallel",
            "--threads=3",
            "--time-limit=2.5",
            "--upper-bound=120",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=false",
            "--log-output=run.log",
        ])
        .expect("parse options");

        assert_eq!(options.input, "graph.txt");
        assert_eq!(options.random_nodes, Some(9));
        assert_eq!(options.seed, 77);
        assert_eq!(options.save_graph, "saved.txt");
        assert_eq!(options.output, "tour.txt");
        assert_eq!(options.search_mode, SearchMode::Parallel);
        assert_eq!(options.threads, 3);
        assert_eq!(options.time_limit, Some(2.5));
        assert_eq!(options.upper_bound, Some(120.0));
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
    }

    #[test]
    fn flag_without_value_enables_and_negation_disables() {
        let options = SolverOptions::parse_from_iter(["--no-log-timestamp"]).expect("parse");
        assert!(!options.log_timestamp);

        let options = SolverOptions::parse_from_iter(["--no-log-timestamp", "--log-timestamp"])
            .expect("parse");
        assert!(options.log_timestamp);
    }

    #[test]
    fn negated_flag_rejects_a_value() {
        let err = SolverOptions::parse_from_iter(["--no-log-timestamp=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn flag_rejects_unknown_boolean() {
        let err = SolverOptions::parse_from_iter(["--log-timestamp=maybe"])
            .expect_err("invalid bool should fail");
        assert!(
            err.to_string()
                .contains("Invalid boolean for --log-timestamp: maybe")
        );
    }

    #[test]
    fn parse_from_iter_rejects_unknown_option() {
        let err = SolverOptions::parse_from_iter(["--unknown-opt=1"])
            .expect_err("expected unknown option error");
        assert!(err.to_string().contains("Unknown option: --unknown-opt"));
    }

    #[test]
    fn parse_from_iter_rejects_unexpected_positional_argument() {
        let err =
            SolverOptions::parse_from_iter(["graph.txt"]).expect_err("expected positional error");
        assert!(err.to_string().contains("Unexpected argument: graph.txt"));
    }

    #[test]
    fn parse_from_iter_requires_a_value() {
        let err = SolverOptions::parse_from_iter(["--seed"]).expect_err("missing value");
        assert!(err.to_string().contains("Missing value for --seed"));

        let err = SolverOptions::parse_from_iter(["--seed", "--threads=2"])
            .expect_err("next option is not a value");
        assert!(err.to_string().contains("Missing value for --seed"));
    }

    #[test]
    fn parse_from_iter_reports_bad_numbers() {
        let err = SolverOptions::parse_from_iter(["--threads=many"]).expect_err("bad usize");
        assert!(err.to_string().contains("Invalid value for --threads: many"));
    }

    #[test]
    fn parse_from_iter_rejects_negative_time_limit() {
        let err = SolverOptions::parse_from_iter(["--time-limit=-1"]).expect_err("negative");
        assert!(err.to_string().contains("--time-limit must be"));
    }

    #[test]
    fn parse_from_iter_rejects_time_limit_beyond_duration_range() {
        let err = SolverOptions::parse_from_iter(["--time-limit=1e20"]).expect_err("too large");
        assert!(err.to_string().contains("--time-limit must be"));

        let options = SolverOptions {
            time_limit: Some(1e20),
            ..SolverOptions::default()
        };
        assert!(matches!(
            options.search_options(),
            Err(Error::InvalidInput(_))
        ));

        let options = SolverOptions::parse_from_iter(["--time-limit=1e9"]).expect("in range");
        assert_eq!(
            options.search_options().expect("search options").time_limit,
            Some(Duration::from_secs(1_000_000_000))
        );
    }

    #[test]
    fn help_lists_every_option() {
        let err = SolverOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        let text = err.to_string();
        assert!(text.contains("Usage:"));
        assert!(text.contains("  --random-nodes <usize>"));
        assert!(text.contains("  --search-mode <sequential|parallel>"));
        assert!(text.contains("  --log-timestamp[=<bool>]"));
        assert!(text.contains("  --no-log-timestamp"));
    }

    #[test]
    fn search_options_carry_mode_limit_and_bound() {
        let options = SolverOptions {
            search_mode: SearchMode::Parallel,
            time_limit: Some(1.5),
            upper_bound: Some(10.0),
            ..SolverOptions::default()
        };
        let search = options.search_options().expect("search options");
        assert_eq!(search.mode, SearchMode::Parallel);
        assert_eq!(search.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(search.upper_bound, Some(10.0));
        assert!(search.interruptible);
    }

    #[test]
    fn paths_treat_empty_and_dash_as_standard_streams() {
        let options = SolverOptions::default();
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());
        assert!(options.save_graph_path().is_none());

        let options = SolverOptions {
            input: "-".to_string(),
            output: "out/tour.txt".to_string(),
            ..SolverOptions::default()
        };
        assert!(options.input_path().is_none());
        assert_eq!(options.output_path(), Some(Path::new("out/tour.txt")));
    }

    #[test]
    fn display_lists_options_as_key_values() {
        let text = SolverOptions::default().to_string();
        assert!(text.contains("random_nodes"));
        assert!(text.contains("= none"));
        assert!(text.contains("search_mode"));
        assert!(text.contains("= sequential"));
    }
}
