use std::env;

use anyhow::{bail, Context, Result};
use sqlx::postgres::PgPool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use menus::config::{AppConfig, LogFormat};
use menus::db::{self, SeedOutcome};
use menus::seed::verify_builtin_menus;
use menus::Restaurant;

const USAGE: &str =
    "usage: menus [count | review | export <restaurant> | seed | reseed <restaurant>]";

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging; `log` records from the library are captured too
    init_logging(config.log_format);

    info!(
        log_format = ?config.log_format,
        variant_layout = ?config.parser.variant_layout,
        "Starting menus"
    );

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str).unwrap_or("count") {
        "count" => print_counts(),
        "review" => print_review(&config),
        "export" => export_menu(&config, args.get(1))?,
        "seed" => seed_all(&config).await?,
        "reseed" => reseed(&config, args.get(1)).await?,
        other => bail!("unknown command '{other}'\n{USAGE}"),
    }

    Ok(())
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn print_counts() {
    let mut total = 0;
    for restaurant in Restaurant::ALL {
        let count = restaurant.admin_menu().len();
        total += count;
        println!("{}: {} items", restaurant.display_name(), count);
    }
    println!("Total: {total} items");
}

fn print_review(config: &AppConfig) {
    for restaurant in Restaurant::ALL {
        let flagged: Vec<_> = restaurant
            .admin_menu()
            .iter()
            .filter(|item| item.needs_review(config.parser.review_threshold))
            .collect();

        println!("{} ({} to review)", restaurant.display_name(), flagged.len());
        for item in flagged {
            println!("  {} (confidence {:.2})", item, item.veg_confidence);
        }
    }
}

fn parse_restaurant(arg: Option<&String>) -> Result<Restaurant> {
    let Some(slug) = arg else {
        bail!("missing restaurant\n{USAGE}");
    };
    Ok(slug.parse::<Restaurant>()?)
}

fn export_menu(config: &AppConfig, arg: Option<&String>) -> Result<()> {
    let restaurant = parse_restaurant(arg)?;

    // Parsed fresh so MENU_VARIANT_LAYOUT applies; the cached menu always splits
    let items = restaurant
        .parser(config.parser.clone())
        .parse_items(restaurant.menu_text());

    let json = serde_json::to_string_pretty(&items).context("Failed to serialize menu")?;
    println!("{json}");
    Ok(())
}

async fn connect(config: &AppConfig) -> Result<PgPool> {
    let database_url = config.require_database_url()?;
    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    db::init_menu_schema(&pool).await?;
    Ok(pool)
}

async fn seed_all(config: &AppConfig) -> Result<()> {
    verify_builtin_menus()?;
    let pool = connect(config).await?;

    for restaurant in Restaurant::ALL {
        match db::seed_menu_if_empty(&pool, restaurant).await? {
            SeedOutcome::Seeded(count) => println!("{}: seeded {} items", restaurant, count),
            SeedOutcome::AlreadySeeded(count) => {
                println!("{}: already has {} items, skipped", restaurant, count)
            }
        }
    }

    Ok(())
}

async fn reseed(config: &AppConfig, arg: Option<&String>) -> Result<()> {
    let restaurant = parse_restaurant(arg)?;
    let pool = connect(config).await?;

    warn!(restaurant = restaurant.slug(), "Reseeding menu, non-customized rows are replaced");
    let inserted = db::reseed_menu(&pool, restaurant).await?;
    println!("{}: reseeded {} items", restaurant, inserted);
    Ok(())
}
