//! # Game Repository
//!
//! The catalogue and the availability flag.
//!
//! ## Platform Column
//! ```text
//! games.platform (TEXT)  ──► Platform::from_code
//!   "PS5"                      Some(Platform::Ps5)
//!   "PC_ANY"                   Some(Platform::PcAny)
//!   "DREAMCAST"                None  → never compatible, never listed
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use gameshop_core::{CoreResult, Game, GameStore, ListingType, Platform};

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone, sqlx::FromRow)]
struct GameRecord {
    id: String,
    title: String,
    genre: String,
    platform: String,
    listing: ListingType,
    price_cents: i64,
    is_available: bool,
}

impl From<GameRecord> for Game {
    fn from(r: GameRecord) -> Self {
        let platform = Platform::from_code(&r.platform);
        if platform.is_none() {
            warn!(id = %r.id, platform = %r.platform, "Unrecognised platform code");
        }

        Game {
            id: r.id,
            title: r.title,
            genre: r.genre,
            platform,
            listing: r.listing,
            price_cents: r.price_cents,
            is_available: r.is_available,
        }
    }
}

const SELECT_GAME: &str = r#"
    SELECT id, title, genre, platform, listing, price_cents, is_available
    FROM games
"#;

/// Repository for game database operations.
#[derive(Debug, Clone)]
pub struct GameRepository {
    pool: SqlitePool,
}

impl GameRepository {
    pub fn new(pool: SqlitePool) -> Self {
        GameRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Game>> {
        let record = sqlx::query_as::<_, GameRecord>(&format!("{SELECT_GAME} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Game::from))
    }

    /// Available games of one listing type, ordered by title.
    ///
    /// Platform filtering happens in the policy core, not in SQL, so that
    /// generation wildcards and unknown codes follow one rule.
    pub async fn list_available(&self, listing: ListingType) -> DbResult<Vec<Game>> {
        debug!(listing = %listing, "Listing available games");

        let records = sqlx::query_as::<_, GameRecord>(&format!(
            "{SELECT_GAME} WHERE listing = ?1 AND is_available = 1 ORDER BY title COLLATE NOCASE"
        ))
        .bind(listing)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Game::from).collect())
    }

    /// Whole catalogue, ordered by title.
    pub async fn list_all(&self) -> DbResult<Vec<Game>> {
        let records = sqlx::query_as::<_, GameRecord>(&format!(
            "{SELECT_GAME} ORDER BY title COLLATE NOCASE"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Game::from).collect())
    }

    /// Inserts a game. A game without a platform is stored under an empty
    /// code and will never be listed.
    pub async fn insert(&self, game: &Game) -> DbResult<()> {
        debug!(id = %game.id, title = %game.title, "Inserting game");

        sqlx::query(
            r#"
            INSERT INTO games (id, title, genre, platform, listing, price_cents, is_available)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&game.id)
        .bind(&game.title)
        .bind(&game.genre)
        .bind(game.platform.map(|p| p.code()).unwrap_or_default())
        .bind(game.listing)
        .bind(game.price_cents)
        .bind(game.is_available)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sets the availability flag. Setting the current value again is fine.
    pub async fn set_availability(&self, id: &str, available: bool) -> DbResult<()> {
        debug!(id = %id, available, "Setting game availability");

        let result = sqlx::query("UPDATE games SET is_available = ?1 WHERE id = ?2")
            .bind(available)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Game", id));
        }

        Ok(())
    }
}

#[async_trait]
impl GameStore for GameRepository {
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Game>> {
        Ok(GameRepository::get_by_id(self, id).await?)
    }

    async fn list_available(&self, listing: ListingType) -> CoreResult<Vec<Game>> {
        Ok(GameRepository::list_available(self, listing).await?)
    }

    async fn insert(&self, game: &Game) -> CoreResult<()> {
        Ok(GameRepository::insert(self, game).await?)
    }

    async fn set_availability(&self, id: &str, available: bool) -> CoreResult<()> {
        Ok(GameRepository::set_availability(self, id, available).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
