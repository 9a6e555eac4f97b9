//! Lookup command - runs a single query against the configured backends

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::{GeoLookup, PointQuery};
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct LookupArgs {
    #[command(subcommand)]
    pub query: LookupQuery,
}

#[derive(Subcommand, Debug)]
pub enum LookupQuery {
    /// City substring, state name, county name or postal code
    Keyword { keyword: String },

    /// Exact postal code
    Zip { zip: i32 },

    /// Exact state code, e.g. IL
    State { code: String },

    /// Records near a coordinate
    #[command(allow_negative_numbers = true)]
    Point {
        lat: f64,
        lng: f64,
        /// Search radius in miles
        #[arg(long)]
        radius: Option<u32>,
        /// Maximum number of records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// State name for a postal code
    StateByZip { zip: i32 },

    /// Distinct state code and name pairs
    States,
}

/// Run one lookup and print the result to stdout
pub async fn run(args: LookupArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_cli_logging();

    let config = AppConfig::load()?;
    let service = crate::create_lookup_service(&config).await?;

    let output = execute(&service, args.query).await?;
    println!("{}", output);

    Ok(())
}

async fn execute(service: &dyn GeoLookup, query: LookupQuery) -> anyhow::Result<String> {
    match query {
        LookupQuery::Keyword { keyword } => to_json(&service.keyword_lookup(&keyword).await?),
        LookupQuery::Zip { zip } => to_json(&service.zipcode_lookup(zip).await?),
        LookupQuery::State { code } => to_json(&service.statecode_lookup(&code).await?),
        LookupQuery::Point {
            lat,
            lng,
            radius,
            limit,
        } => {
            let query = point_query(service.default_point_query(lat, lng), radius, limit);
            to_json(&service.point_lookup(query).await?)
        }
        LookupQuery::StateByZip { zip } => to_json(&service.state_by_zip(zip).await?),
        LookupQuery::States => to_json(&service.states().await?),
    }
}

fn point_query(base: PointQuery, radius: Option<u32>, limit: Option<usize>) -> PointQuery {
    let query = match radius {
        Some(radius) => base.with_radius(radius),
        None => base,
    };

    match limit {
        Some(limit) => query.with_limit(limit),
        None => query,
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
