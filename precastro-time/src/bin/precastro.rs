use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use precastro_time::calendar::CalendarDate;
use precastro_time::civil::julian_date_to_civil;
use precastro_time::leap_seconds::LeapSecondConfig;
use precastro_time::parsing::parse_iso8601;
use precastro_time::{FuturePolicy, LeapSecondTable, Time, TimeScale};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "precastro", version, about = "Leap-second aware astronomical time conversions")]
struct Cli {
    #[clap(flatten)]
    table: TableArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct TableArgs {
    /// Load the leap second table from an IERS Leap_Second.dat file
    #[arg(long, global = true, conflicts_with = "nist")]
    iers: Option<PathBuf>,

    /// Load the leap second table from a NIST leap-seconds.list file
    #[arg(long, global = true)]
    nist: Option<PathBuf>,

    /// Fail for dates after the table expires instead of extrapolating
    #[arg(long, global = true)]
    reject_future: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a calendar date/time between time scales
    Convert {
        /// ISO 8601 date/time, e.g. 2016-12-31T23:59:60.5
        time: String,

        #[arg(long, default_value = "UTC")]
        from: TimeScale,

        #[arg(long, default_value = "TT")]
        to: TimeScale,

        /// Decimal places of the seconds field (-5..=9)
        #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
        digits: i32,

        /// Accept dates beyond the leap second table's expiry
        #[arg(long)]
        dubious_ok: bool,
    },

    /// Print TAI-UTC at 0h UTC of a date
    Offset { date: String },

    /// Print the version and entries of the active table
    Table,

    /// Print the current time
    Now {
        #[arg(long, default_value = "UTC")]
        scale: TimeScale,

        #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
        digits: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let table = load_table(&cli.table)?;
    tracing::debug!(version = %table.version(), "using leap second table");

    match cli.command {
        Command::Convert {
            time,
            from,
            to,
            digits,
            dubious_ok,
        } => convert(&table, &time, from, to, digits, dubious_ok),
        Command::Offset { date } => offset(&table, &date),
        Command::Table => {
            print_table(&table);
            Ok(())
        }
        Command::Now { scale, digits } => now(&table, scale, digits),
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("precastro_time={level},precastro={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_table(args: &TableArgs) -> Result<LeapSecondTable> {
    let config = match (&args.iers, &args.nist) {
        (Some(path), _) => LeapSecondConfig::iers_file(path),
        (None, Some(path)) => LeapSecondConfig::nist_file(path),
        (None, None) => LeapSecondConfig::builtin(),
    };
    let policy = if args.reject_future {
        FuturePolicy::Reject
    } else {
        FuturePolicy::HoldLastOffset
    };

    config
        .with_future_policy(policy)
        .load()
        .context("failed to load leap second table")
}

fn convert(
    table: &LeapSecondTable,
    input: &str,
    from: TimeScale,
    to: TimeScale,
    digits: i32,
    dubious_ok: bool,
) -> Result<()> {
    let parsed = parse_iso8601(input).with_context(|| format!("cannot parse {input:?}"))?;
    let jd = parsed.to_julian_date(from, table)?.accept(dubious_ok)?;
    let converted = Time::from_jd(jd, from).to_scale_with(to, table)?;
    if converted.is_dubious() {
        tracing::warn!("{input} {from} lies beyond the table expiry; the result is extrapolated");
    }
    let converted = converted.accept(dubious_ok)?;

    let civil = julian_date_to_civil(to, table, converted.julian_date(), digits)?
        .accept(dubious_ok)?;
    println!("{civil} {to}");
    Ok(())
}

fn offset(table: &LeapSecondTable, input: &str) -> Result<()> {
    let parsed = parse_iso8601(input).with_context(|| format!("cannot parse {input:?}"))?;
    if (parsed.hour, parsed.minute, parsed.second) != (0, 0, 0.0) {
        bail!("expected a date without a time of day, got {input:?}");
    }
    let date = CalendarDate::new(parsed.year, parsed.month, parsed.day)?;

    let offset = table.offset_at(date.year, date.month as i32, date.day as i32, 0.0)?;
    let marker = if offset.is_dubious() { " (extrapolated)" } else { "" };
    println!("{date}  TAI-UTC = {:.7} s{marker}", offset.value());
    Ok(())
}

fn print_table(table: &LeapSecondTable) {
    println!("{}", table.version());
    println!("policy: {:?}", table.policy());
    for entry in table.entries() {
        match entry.drift {
            Some(drift) => println!(
                "{}  {:>10.7} s + (MJD - {}) x {:.7} s",
                entry.epoch(),
                entry.offset,
                drift.reference_mjd,
                drift.rate
            ),
            None => println!("{}  {:>10.1} s", entry.epoch(), entry.offset),
        }
    }
}

fn now(table: &LeapSecondTable, scale: TimeScale, digits: i32) -> Result<()> {
    println!("{}", format_instant(table, Time::now(), scale, digits)?);
    Ok(())
}

/// Civil time of `time` in `scale`, marked when the table had to be extrapolated.
fn format_instant(table: &LeapSecondTable, time: Time, scale: TimeScale, digits: i32) -> Result<String> {
    let converted = time.to_scale_with(scale, table)?;
    let civil = julian_date_to_civil(scale, table, converted.value().julian_date(), digits)?;
    let marker = if converted.is_dubious() || civil.is_dubious() {
        tracing::warn!(
            expires = %table.version().expires,
            "leap second table has expired; {} is extrapolated",
            scale
        );
        " (extrapolated)"
    } else {
        ""
    };
    Ok(format!("{} {scale}{marker}", civil.into_value()))
}
