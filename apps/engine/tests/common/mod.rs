#![allow(dead_code)]

// Shared test harness: sqlite in-memory store with the real schema applied,
// plus fixture helpers for cards, daily numbers, and claims.

use once_cell::sync::Lazy;
use sea_orm::DatabaseConnection;
use serde_json::json;
use time::{Date, OffsetDateTime};

use bingo_engine::repos::{cards, claims, daily_numbers};
use bingo_engine::EngineConfig;

static INIT_LOGGING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
});

/// Fresh in-memory store with all migrations applied.
pub async fn test_db() -> DatabaseConnection {
    Lazy::force(&INIT_LOGGING);
    let db = bingo_engine::connect_db("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    migration::migrate_up(&db).await.expect("apply migrations");
    db
}

pub fn test_config() -> EngineConfig {
    EngineConfig::default()
}

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Row-major card layout [1..=25].
pub fn row_major_cells() -> serde_json::Value {
    json!((1..=25).collect::<Vec<i32>>())
}

pub async fn seed_card(
    db: &DatabaseConnection,
    user_id: i64,
    month: Date,
    cells: serde_json::Value,
) -> cards::Card {
    cards::create_card(db, user_id, month, cells, now())
        .await
        .expect("seed card")
}

pub async fn seed_daily_number(
    db: &DatabaseConnection,
    date: Date,
    number: i32,
) -> daily_numbers::DailyNumber {
    daily_numbers::publish(db, date, number, now())
        .await
        .expect("seed daily number")
}

/// Seed a claim directly at the repo layer, bypassing the claim-window
/// check. Used to accumulate history across past days.
pub async fn seed_claim(
    db: &DatabaseConnection,
    user_id: i64,
    card_id: i64,
    claim_date: Date,
    number: i32,
) {
    let outcome = claims::insert_claim(
        db,
        claims::ClaimData {
            user_id,
            card_id,
            daily_number_id: 0,
            claim_date,
            number,
        },
        now(),
    )
    .await
    .expect("seed claim");
    assert!(
        matches!(outcome, claims::ClaimInsert::Inserted(_)),
        "seed claim collided with an existing (user, date)"
    );
}
