//! # Database Module
//!
//! Postgres storage for seeded menus. The parser output is only written when a
//! restaurant has no rows yet; after that the table is authoritative and admin
//! edits go straight to it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnection, PgPool, PgRow};
use sqlx::Row;
use tracing::{debug, info, warn};

use crate::errors::MenuError;
use crate::menu_model::MenuItemRecord;
use crate::restaurants::Restaurant;
use crate::seed::{seed_documents, verify_unique_ids, SeedDocument};

/// What a seeding call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table was empty for the restaurant and this many rows were inserted
    Seeded(usize),
    /// The restaurant already had this many rows; nothing was written
    AlreadySeeded(i64),
}

/// Initialize the database schema
pub async fn init_menu_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing menu schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS menu_items (
            id TEXT PRIMARY KEY,
            restaurant_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price INTEGER NOT NULL CHECK (price >= 0),
            category TEXT NOT NULL,
            is_veg BOOLEAN NOT NULL,
            veg_confidence REAL NOT NULL,
            rating REAL NOT NULL,
            preparation_time INTEGER NOT NULL,
            image TEXT NOT NULL,
            is_available BOOLEAN NOT NULL,
            variant TEXT,
            variants TEXT[] NOT NULL DEFAULT '{}',
            variant_prices INTEGER[] NOT NULL DEFAULT '{}',
            is_admin_customized BOOLEAN NOT NULL DEFAULT FALSE,
            seeded_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create menu_items table")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS menu_items_restaurant_idx
         ON menu_items (restaurant_id, position)",
    )
    .execute(pool)
    .await
    .context("Failed to create menu_items index")?;

    info!("Menu schema initialized successfully");
    Ok(())
}

/// Number of stored menu items for a restaurant
pub async fn count_menu_items(pool: &PgPool, restaurant_id: &str) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items WHERE restaurant_id = $1")
        .bind(restaurant_id)
        .fetch_one(pool)
        .await
        .context("Failed to count menu items")
}

/// Insert seed documents, leaving rows with an existing id untouched
///
/// Returns the number of rows actually inserted.
pub async fn insert_seed_documents(
    conn: &mut PgConnection,
    docs: &[SeedDocument],
) -> Result<usize> {
    let mut inserted = 0;

    for (position, doc) in docs.iter().enumerate() {
        let item = &doc.item;
        let price = to_int_column(item.price, "price", &item.id)?;
        let preparation_time = to_int_column(item.preparation_time, "preparation time", &item.id)?;
        let variant_prices = item
            .variant_prices
            .iter()
            .map(|p| to_int_column(*p, "variant price", &item.id))
            .collect::<Result<Vec<i32>>>()?;
        let position = i32::try_from(position).context("Menu has too many items")?;

        let result = sqlx::query(
            "INSERT INTO menu_items (
                id, restaurant_id, position, name, description, price, category,
                is_veg, veg_confidence, rating, preparation_time, image, is_available,
                variant, variants, variant_prices, is_admin_customized, seeded_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9,
                $10, $11, $12, $13, $14, $15, $16, $17, $18
            )
            ON CONFLICT (id) DO NOTHING",
        )
        .bind(&item.id)
        .bind(&doc.restaurant_id)
        .bind(position)
        .bind(&item.name)
        .bind(&item.description)
        .bind(price)
        .bind(&item.category)
        .bind(item.is_veg)
        .bind(item.veg_confidence)
        .bind(item.rating)
        .bind(preparation_time)
        .bind(&item.image)
        .bind(item.is_available)
        .bind(&item.variant)
        .bind(&item.variants)
        .bind(&variant_prices)
        .bind(doc.is_admin_customized)
        .bind(doc.seeded_at)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("Failed to insert menu item {}", item.id))?;

        if result.rows_affected() == 0 {
            debug!(id = %item.id, "Menu item already present, skipped");
        }
        inserted += result.rows_affected() as usize;
    }

    Ok(inserted)
}

/// Postgres INTEGER columns are signed; refuse values that would wrap
fn to_int_column(value: u32, field: &str, id: &str) -> Result<i32> {
    i32::try_from(value).with_context(|| format!("{field} {value} of {id} does not fit INTEGER"))
}

/// Seed a restaurant's menu from its parsed admin text if it has no rows yet
pub async fn seed_menu_if_empty(pool: &PgPool, restaurant: Restaurant) -> Result<SeedOutcome> {
    let items = restaurant.admin_menu();
    verify_unique_ids([(restaurant.slug(), items)])?;

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM menu_items WHERE restaurant_id = $1",
    )
    .bind(restaurant.slug())
    .fetch_one(&mut *tx)
    .await
    .context("Failed to count menu items")?;

    if existing > 0 {
        info!(restaurant = restaurant.slug(), existing, "Menu already seeded");
        tx.rollback().await.context("Failed to roll back transaction")?;
        return Ok(SeedOutcome::AlreadySeeded(existing));
    }

    let docs = seed_documents(restaurant, items);
    let inserted = insert_seed_documents(&mut tx, &docs).await?;
    tx.commit().await.context("Failed to commit seed transaction")?;

    info!(restaurant = restaurant.slug(), inserted, "Seeded menu");
    Ok(SeedOutcome::Seeded(inserted))
}

/// Wipe a restaurant's non-customised rows and seed them again
///
/// Rows an admin has customised are kept, and the parsed record with the same
/// id is not inserted over them. Fails without writing if any parsed id is
/// already owned by a different restaurant.
pub async fn reseed_menu(pool: &PgPool, restaurant: Restaurant) -> Result<usize> {
    let items = restaurant.admin_menu();
    verify_unique_ids([(restaurant.slug(), items)])?;

    let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let conflict = sqlx::query(
        "SELECT id, restaurant_id FROM menu_items
         WHERE id = ANY($1) AND restaurant_id <> $2
         LIMIT 1",
    )
    .bind(&ids)
    .bind(restaurant.slug())
    .fetch_optional(&mut *tx)
    .await
    .context("Failed to check for id conflicts")?;

    if let Some(row) = conflict {
        let id: String = row.try_get("id")?;
        let owner: String = row.try_get("restaurant_id")?;
        warn!(%id, %owner, restaurant = restaurant.slug(), "Reseed id conflict");
        return Err(MenuError::DuplicateId {
            id,
            first: owner,
            second: restaurant.slug().to_string(),
        }
        .into());
    }

    let deleted = sqlx::query(
        "DELETE FROM menu_items WHERE restaurant_id = $1 AND is_admin_customized = FALSE",
    )
    .bind(restaurant.slug())
    .execute(&mut *tx)
    .await
    .context("Failed to delete menu items")?
    .rows_affected();

    let docs = seed_documents(restaurant, items);
    let inserted = insert_seed_documents(&mut tx, &docs).await?;
    tx.commit().await.context("Failed to commit reseed transaction")?;

    info!(restaurant = restaurant.slug(), deleted, inserted, "Reseeded menu");
    Ok(inserted)
}

/// Flag a stored item as edited by an admin so reseeding leaves it alone
pub async fn mark_admin_customized(pool: &PgPool, id: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE menu_items SET is_admin_customized = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to mark menu item as customized")?;

    Ok(result.rows_affected() > 0)
}

/// Stored menu items for a restaurant in source order
pub async fn list_menu_items(pool: &PgPool, restaurant_id: &str) -> Result<Vec<SeedDocument>> {
    let rows = sqlx::query(
        "SELECT id, restaurant_id, name, description, price, category, is_veg, veg_confidence,
                rating, preparation_time, image, is_available, variant, variants,
                variant_prices, is_admin_customized, seeded_at
         FROM menu_items
         WHERE restaurant_id = $1
         ORDER BY position",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
    .context("Failed to list menu items")?;

    rows.iter().map(row_to_document).collect()
}

fn row_to_document(row: &PgRow) -> Result<SeedDocument> {
    let variant_prices: Vec<i32> = row.try_get("variant_prices")?;
    let seeded_at: DateTime<Utc> = row.try_get("seeded_at")?;

    let item = MenuItemRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: u32::try_from(row.try_get::<i32, _>("price")?)
            .context("Negative price in database")?,
        category: row.try_get("category")?,
        is_veg: row.try_get("is_veg")?,
        veg_confidence: row.try_get("veg_confidence")?,
        rating: row.try_get("rating")?,
        preparation_time: u32::try_from(row.try_get::<i32, _>("preparation_time")?)
            .context("Negative preparation time in database")?,
        image: row.try_get("image")?,
        is_available: row.try_get("is_available")?,
        variant: row.try_get("variant")?,
        variants: row.try_get("variants")?,
        variant_prices: variant_prices.into_iter().map(|p| p.max(0) as u32).collect(),
    };

    Ok(SeedDocument {
        item,
        restaurant_id: row.try_get("restaurant_id")?,
        is_admin_customized: row.try_get("is_admin_customized")?,
        seeded_at,
    })
}
