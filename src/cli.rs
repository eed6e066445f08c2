use crate::config::{AppConfig, ConfigSource};
use crate::error::AppError;
use crate::infra::{
    format_date, format_time, parse_date, parse_latitude, parse_longitude, parse_time,
};
use crate::matching::{
    AlertSink, ConsoleAlerts, FormField, HttpScoringGateway, MatchSession, Mode,
    NoPositionSource, ReportedPosition,
};
use crate::telemetry;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "love-match",
    about = "Check name, rashi or lagna compatibility against a remote scoring service",
    version
)]
struct Cli {
    /// Runtime configuration document (file path or http(s) URL); overrides APP_CONFIG_SOURCE
    #[arg(long)]
    config: Option<String>,
    /// Device latitude in decimal degrees; the fallback location is used when omitted
    #[arg(
        long,
        requires = "lon",
        allow_hyphen_values = true,
        value_parser = parse_latitude
    )]
    lat: Option<f64>,
    /// Device longitude in decimal degrees
    #[arg(
        long,
        requires = "lat",
        allow_hyphen_values = true,
        value_parser = parse_longitude
    )]
    lon: Option<f64>,
    /// Print the stored result as JSON instead of the rendered text
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Name compatibility
    Name(NameArgs),
    /// Rashi (moon sign) compatibility from birth date and time
    Rashi(BirthArgs),
    /// Lagna (ascendant) compatibility from birth date and time
    Lagna(BirthArgs),
}

#[derive(Args, Debug)]
struct NameArgs {
    /// First person's name
    #[arg(long)]
    name1: String,
    /// Second person's name
    #[arg(long)]
    name2: String,
}

#[derive(Args, Debug)]
struct BirthArgs {
    /// First person's name
    #[arg(long)]
    name1: String,
    /// First person's birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    dob1: Option<NaiveDate>,
    /// First person's birth time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time1: Option<NaiveTime>,
    /// Second person's name
    #[arg(long)]
    name2: String,
    /// Second person's birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    dob2: Option<NaiveDate>,
    /// Second person's birth time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time2: Option<NaiveTime>,
}

impl Command {
    /// Copies the arguments into the session form and selects the mode.
    fn fill(self, session: &mut MatchSession) {
        let (mode, args) = match self {
            Command::Name(args) => {
                session.set_mode(Mode::Name);
                session.set_field(FormField::Name1, args.name1);
                session.set_field(FormField::Name2, args.name2);
                return;
            }
            Command::Rashi(args) => (Mode::Rashi, args),
            Command::Lagna(args) => (Mode::Lagna, args),
        };

        session.set_mode(mode);
        session.set_field(FormField::Name1, args.name1);
        session.set_field(FormField::Name2, args.name2);
        if let Some(date) = args.dob1 {
            session.set_field(FormField::Dob1, format_date(date));
        }
        if let Some(time) = args.time1 {
            session.set_field(FormField::Time1, format_time(time));
        }
        if let Some(date) = args.dob2 {
            session.set_field(FormField::Dob2, format_date(date));
        }
        if let Some(time) = args.time2 {
            session.set_field(FormField::Time2, format_time(time));
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(raw) = cli.config.as_deref() {
        config.config_source = ConfigSource::parse(raw)?;
    }

    telemetry::init(&config.telemetry)?;

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let alerts: Arc<dyn AlertSink> = Arc::new(ConsoleAlerts);

    let mut session = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => {
            let provider = ReportedPosition::new(lat, lon);
            MatchSession::start(&client, &config.config_source, &provider, alerts).await
        }
        _ => MatchSession::start(&client, &config.config_source, &NoPositionSource, alerts).await,
    };

    info!(?config.environment, readiness = ?session.readiness(), "session started");
    if !session.can_submit() {
        warn!("session is not ready; submit checks will decide whether to proceed");
    }

    cli.command.fill(&mut session);
    let blank = session.blank_fields();
    if !blank.is_empty() {
        warn!(mode = %session.mode(), ?blank, "some fields are empty; the service decides how to score them");
    }

    let gateway = HttpScoringGateway::new(client);
    session.submit(&gateway).await?;

    if cli.json {
        if let Some(result) = session.result() {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    } else if let Some(view) = session.view() {
        println!("{view}");
    }

    Ok(())
}
