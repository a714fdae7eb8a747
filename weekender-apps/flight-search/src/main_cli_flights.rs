//!  Weekender Flight Search
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! CLI for QPX Express flight search.
//!
//! # Examples
//!
//! ```bash
//! # Round trip, leave after 17:00, back before 21:00
//! weekender-flights -f SFO -t LAS -d 2017-01-27 -R 2017-01-29 \
//!     --depart-after 17:00 --return-before 21:00
//!
//! # Cheapest of the next 8 weekends
//! weekender-flights -f SFO -t LAS --weekends 8 --depart-after 17:00
//!
//! # Print the request document only
//! weekender-flights -f SFO -t LAS -d 2017-01-27 --dry-run
//! ```

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use weekender_flight_search::{
    qpx_vocabulary::{DATE_FORMAT, TIME_OF_DAY_FORMAT},
    upcoming_weekends, Cabin, Money, QpxExpressClient, SearchResponse, TimeOfDayRange, TripQuery,
    TripQueryBuilder,
};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "weekender-flights")]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Origin airport code (e.g., SFO, LAX)
    #[arg(short, long)]
    from: String,

    /// Destination airport code (e.g., LAS, JFK)
    #[arg(short, long)]
    to: String,

    /// Departure date (YYYY-MM-DD or YYYY/MM/DD)
    #[arg(short, long, required_unless_present = "weekends")]
    date: Option<String>,

    /// Return date for round trips (YYYY-MM-DD or YYYY/MM/DD)
    #[arg(short = 'R', long, conflicts_with = "weekends")]
    return_date: Option<String>,

    /// Search the next N Friday to Sunday weekends, starting from --date or today
    #[arg(short, long)]
    weekends: Option<usize>,

    /// Number of adult passengers
    #[arg(short, long, default_value = "1")]
    adults: u32,

    /// Cabin class: coach, premium_coach, business, first
    #[arg(short, long, default_value = "coach")]
    cabin: String,

    /// Maximum number of stops per slice (0 = nonstop only)
    #[arg(long, default_value = "0")]
    max_stops: u32,

    /// Price ceiling (e.g., USD1000.00)
    #[arg(short = 'p', long, default_value = "USD1000.00")]
    max_price: String,

    /// Country the sale is made in
    #[arg(long, default_value = "US")]
    sale_country: String,

    /// Country the ticket is issued in
    #[arg(long, default_value = "US")]
    ticketing_country: String,

    /// Refundable fares only
    #[arg(long)]
    refundable: bool,

    /// Maximum number of trip options requested
    #[arg(long, default_value = "500")]
    solutions: u32,

    /// Earliest outbound departure time (HH:MM)
    #[arg(long)]
    depart_after: Option<String>,

    /// Latest return departure time (HH:MM)
    #[arg(long)]
    return_before: Option<String>,

    /// Number of fares shown per search
    #[arg(short = 'n', long, default_value = "5")]
    limit: usize,

    /// QPX Express API key
    #[arg(long, env = "QPX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Print the request documents without sending them
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

/// Configure logging based on verbosity level
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Parse cabin class string to Cabin enum
fn parse_cabin(s: &str) -> Result<Cabin> {
    Cabin::from_str_name(s).with_context(|| {
        format!(
            "Invalid cabin class: {}. Use: coach, premium_coach, business, first",
            s
        )
    })
}

/// Parse date string to NaiveDate
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .context(format!(
            "Invalid date format: {}. Use YYYY-MM-DD or YYYY/MM/DD",
            s
        ))
}

/// Parse time of day string to NaiveTime
fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_OF_DAY_FORMAT)
        .context(format!("Invalid time: {}. Use HH:MM", s))
}

/// Apply the flags shared by single and weekend searches.
fn apply_common(args: &CliArgs, mut builder: TripQueryBuilder) -> Result<TripQueryBuilder> {
    let max_price: Money = args.max_price.parse()?;
    builder = builder
        .adult_count(args.adults)
        .preferred_cabin(parse_cabin(&args.cabin)?)
        .max_stops(args.max_stops)
        .max_price(max_price)
        .sale_country(args.sale_country.to_uppercase())
        .ticketing_country(args.ticketing_country.to_uppercase())
        .refundable(args.refundable)
        .max_solutions(args.solutions);

    if let Some(t) = &args.depart_after {
        builder = builder.departure_time_window(TimeOfDayRange::after(parse_time(t)?));
    }
    Ok(builder)
}

fn build_queries(args: &CliArgs) -> Result<Vec<TripQuery>> {
    let origin = args.from.to_uppercase();
    let destination = args.to.to_uppercase();
    let return_before = args.return_before.as_deref().map(parse_time).transpose()?;

    let builders: Vec<TripQueryBuilder> = match args.weekends {
        Some(count) => {
            let start = match &args.date {
                Some(d) => parse_date(d)?,
                None => chrono::Local::now().date_naive(),
            };
            upcoming_weekends(start, count)
                .iter()
                .map(|w| w.trip_query(origin.clone(), destination.clone()))
                .collect()
        }
        None => {
            let Some(date) = &args.date else {
                bail!("--date is required unless --weekends is given");
            };
            let mut builder = TripQuery::builder(origin, destination, parse_date(date)?);
            if let Some(rd) = &args.return_date {
                builder = builder.return_date(parse_date(rd)?);
            }
            vec![builder]
        }
    };

    builders
        .into_iter()
        .map(|builder| {
            let mut builder = apply_common(args, builder)?;
            if let Some(t) = return_before {
                builder = builder.return_time_window(TimeOfDayRange::before(t));
            }
            builder.build().context("Failed to build search parameters")
        })
        .collect()
}

/// Get terminal width for responsive tables
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(100)
}

fn dash_bar() -> String {
    "-".repeat(get_terminal_width().min(100))
}

fn fmt_dates(query: &TripQuery) -> String {
    match query.return_date {
        Some(rd) => format!("{} ⇄ {}", query.departure_date, rd),
        None => format!("{} (one-way)", query.departure_date),
    }
}

/// Render one search to stdout
fn render_response(query: &TripQuery, response: &SearchResponse, limit: usize) {
    println!(
        "\n🛫  {} → {}  {}",
        query.origin,
        query.destination,
        fmt_dates(query)
    );
    println!("📊 Trip options: {}", response.count_of_trip_options());

    let mut fares: Vec<_> = response.trip_options().iter().enumerate().collect();
    fares.sort_by(|(_, a), (_, b)| a.sale_total.total_cmp(&b.sale_total));

    if fares.is_empty() {
        println!("   No fares under {}", query.max_price);
        return;
    }

    println!("{}", dash_bar());
    println!("  {:>4}  {:>12}  {:>8}", "#", "PRICE", "OPTION");
    for (rank, (index, option)) in fares.iter().take(limit).enumerate() {
        println!(
            "  {:>4}  {:>12}  {:>8}",
            rank + 1,
            format!("{} {:.2}", option.currency, option.sale_total),
            index
        );
    }
    println!("{}", dash_bar());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    tracing::info!("Starting weekender-flights CLI");
    tracing::debug!("Args: {:?}", args);

    let queries = build_queries(&args)?;
    tracing::info!("Prepared {} search request(s)", queries.len());

    if args.dry_run {
        for query in &queries {
            let document = query.to_search_request()?;
            println!("{}", document.to_json_pretty()?);
        }
        return Ok(());
    }

    let Some(api_key) = args.api_key.clone() else {
        bail!("An API key is required: pass --api-key or set QPX_API_KEY");
    };
    let client = QpxExpressClient::new(api_key, args.timeout)?;

    let single = queries.len() == 1;
    let mut best: Option<(&TripQuery, f64, String)> = None;

    for query in &queries {
        let response = match client.search_trips(query).await {
            Ok(r) => r,
            Err(e) if !single => {
                tracing::warn!("Search for {} failed: {:#}", fmt_dates(query), e);
                continue;
            }
            Err(e) => return Err(e.context("Search failed")),
        };

        render_response(query, &response, args.limit);

        if let Some(cheapest) = response.cheapest() {
            let is_better = best
                .as_ref()
                .is_none_or(|(_, price, _)| cheapest.sale_total < *price);
            if is_better {
                best = Some((query, cheapest.sale_total, cheapest.currency.clone()));
            }
        }
    }

    if !single {
        match best {
            Some((query, price, currency)) => println!(
                "\n💰 Cheapest weekend: {} at {} {:.2}",
                fmt_dates(query),
                currency,
                price
            ),
            None => println!("\nNo fares found on any weekend"),
        }
    }

    Ok(())
}
