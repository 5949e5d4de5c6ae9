use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use timeref::config::{parse_duration, Config};
use timeref::health::{HealthWindow, NtpStatusSnapshot, RecoveryAdvisor};
use timeref::iqt::{self, IqtSmoother};
use timeref::nmea::{self, SatelliteQualitySnapshot, SentenceKind};
use timeref::ntpq::{self, ClockVar, PeerTable};

#[derive(Parser)]
#[command(name = "timeref")]
#[command(about = "GPS time reference quality monitor")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay NMEA sentences from a file ("-" for stdin)
    Nmea { input: String },
    /// Score a sequence of ntpq captures (peers output followed by clockvar output)
    Health {
        #[arg(required = true)]
        captures: Vec<String>,
        /// Time between consecutive captures
        #[arg(long, default_value = "10s", value_parser = parse_interval)]
        interval: Duration,
    },
    /// Validate a configuration file
    ValidateConfig { path: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::ValidateConfig { path } => validate_config(&path),
        Commands::Nmea { input } => match load_config(cli.config.as_deref()) {
            Some(config) => replay_nmea(&input, &config),
            None => ExitCode::FAILURE,
        },
        Commands::Health { captures, interval } => match load_config(cli.config.as_deref()) {
            Some(config) => replay_health(&captures, interval, &config),
            None => ExitCode::FAILURE,
        },
    }
}

fn parse_interval(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

/// Captures are replayed on a synthetic clock, one `interval` apart.
fn capture_time(start: DateTime<Utc>, interval: Duration, index: usize) -> DateTime<Utc> {
    start + interval * index as i32
}

fn load_config(path: Option<&str>) -> Option<Config> {
    let Some(path) = path else {
        return Some(Config::default());
    };
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

fn validate_config(path: &str) -> ExitCode {
    match Config::from_file(path) {
        Ok(config) => {
            println!("Config is valid");
            println!("  iqt.smoothing_window: {}", config.iqt.smoothing_window);
            println!("  health.poor_threshold: {}", config.health.poor_threshold);
            println!("  health.restart_cycles: {}", config.health.restart_cycles);
            println!("  health.restart_cooldown: {}", config.health.restart_cooldown);
            println!("  gps_driver.markers: {:?}", config.gps_driver.markers);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn open_input(input: &str) -> io::Result<Box<dyn BufRead>> {
    if input == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(fs::File::open(input)?)))
    }
}

fn replay_nmea(input: &str, config: &Config) -> ExitCode {
    let reader = match open_input(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading {}: {}", input, e);
            return ExitCode::FAILURE;
        }
    };

    let mut quality = SatelliteQualitySnapshot::new();
    let mut smoother = IqtSmoother::new(config.iqt.smoothing_window);
    let mut sentences = 0usize;

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("Read error after {} sentences: {}", sentences, e);
                return ExitCode::FAILURE;
            }
        };
        sentences += 1;

        let kind =
            nmea::sentence_fields(&line).and_then(|fields| SentenceKind::from_address(fields[0]));
        if let Some(kind) = kind {
            log::trace!("{} sentence", kind);
        }

        if kind == Some(SentenceKind::Rmc) {
            let fix = nmea::decode(&line).with_quality(&quality);
            println!("{}", fix);
            // RMC arrives once per epoch, which paces the smoothing window.
            smoother.push(&iqt::calculate(&quality));
        } else {
            nmea::update_quality_state(&line, &mut quality);
        }
    }

    log::info!("Replayed {} sentences", sentences);

    let result = iqt::calculate(&quality);
    let report = json!({
        "iqt": result,
        "smoothed_total": smoother.average(),
    });
    println!("{}", report);
    ExitCode::SUCCESS
}

fn replay_health(captures: &[String], interval: Duration, config: &Config) -> ExitCode {
    let policy = match config.health.recovery_policy() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut window = HealthWindow::new();
    let mut advisor = RecoveryAdvisor::new(policy);
    let start = Utc::now();

    for (index, path) in captures.iter().enumerate() {
        let raw = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading file {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        };

        let (peers_raw, clockvar_raw) = ntpq::split_capture(&raw);
        let peers = PeerTable::parse(peers_raw);
        let clockvar = ClockVar::parse(clockvar_raw);
        let snapshot = NtpStatusSnapshot::from_parts(&peers, &clockvar);
        let fix = (!snapshot.timecode.is_empty()).then(|| nmea::decode(&snapshot.timecode));

        let verdict = window.observe(snapshot.clone());
        let advice = advisor.assess(&verdict, &snapshot, capture_time(start, interval, index));
        log::info!("{}: health {:.0} ({})", path, verdict.score, verdict.status());

        let line = json!({
            "capture": path,
            "score": verdict.score,
            "frozen": verdict.is_frozen,
            "status": verdict.status(),
            "advice": advice,
            "gps_is_system_peer": peers.gps_is_system_peer(&config.gps_driver.markers),
            "fix": fix,
        });
        println!("{}", line);
    }

    ExitCode::SUCCESS
}
