//! Challenge catalog: categories, levels, challenges, and first-run seeding
//!
//! Catalog browsing has no HTTP surface here; the entities exist because a
//! practice session points at a challenge whose level and category names are
//! sent to the analysis engine.

use crate::db::models::{Category, Challenge, Level};
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// A challenge joined with its category and level, as the recording pipeline
/// consumes it.
#[derive(Debug, Clone)]
pub struct ChallengeContext {
    pub challenge: Challenge,
    pub category: Category,
    pub level: Level,
}

pub async fn fetch_challenge(pool: &SqlitePool, id: i64) -> Result<Option<Challenge>> {
    let challenge = sqlx::query_as::<_, Challenge>("SELECT * FROM challenges WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(challenge)
}

pub async fn fetch_category(pool: &SqlitePool, id: i64) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn fetch_level(pool: &SqlitePool, id: i64) -> Result<Option<Level>> {
    let level = sqlx::query_as::<_, Level>("SELECT * FROM levels WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(level)
}

/// Load a challenge together with its category and level
pub async fn fetch_challenge_context(
    pool: &SqlitePool,
    challenge_id: i64,
) -> Result<Option<ChallengeContext>> {
    let challenge = match fetch_challenge(pool, challenge_id).await? {
        Some(challenge) => challenge,
        None => return Ok(None),
    };

    let category = fetch_category(pool, challenge.category_id).await?;
    let level = fetch_level(pool, challenge.level_id).await?;

    match (category, level) {
        (Some(category), Some(level)) => Ok(Some(ChallengeContext {
            challenge,
            category,
            level,
        })),
        // Cascade deletes make this unreachable in practice; treat a dangling
        // reference the same as a missing challenge.
        _ => Ok(None),
    }
}

/// First challenge by id, for tests and smoke tooling
pub async fn first_challenge(pool: &SqlitePool) -> Result<Challenge> {
    let challenge =
        sqlx::query_as::<_, Challenge>("SELECT * FROM challenges ORDER BY id LIMIT 1")
            .fetch_one(pool)
            .await?;
    Ok(challenge)
}

/// Seed default levels, categories, and a starter challenge set.
///
/// Only runs against empty tables, so an operator-curated catalog is never
/// overwritten.
pub async fn seed_catalog(pool: &SqlitePool) -> Result<()> {
    let (level_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM levels")
        .fetch_one(pool)
        .await?;
    if level_count == 0 {
        seed_levels(pool).await?;
    }

    let (category_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    if category_count == 0 {
        seed_categories(pool).await?;
    }

    let (challenge_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM challenges")
        .fetch_one(pool)
        .await?;
    if challenge_count == 0 {
        seed_challenges(pool).await?;
    }

    Ok(())
}

async fn seed_levels(pool: &SqlitePool) -> Result<()> {
    let levels = [
        ("easy", "Easy", "Basic warm-up questions", "#4CAF50", 0, 10),
        ("medium", "Medium", "Moderate difficulty", "#FF9800", 40, 20),
        ("hard", "Hard", "Advanced / stressful", "#F44336", 70, 30),
    ];

    for (slug, name, description, color, min_score, sort_order) in levels {
        sqlx::query(
            "INSERT INTO levels (slug, name, description, color, min_score, sort_order) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(slug)
        .bind(name)
        .bind(description)
        .bind(color)
        .bind(min_score)
        .bind(sort_order)
        .execute(pool)
        .await?;
    }

    info!("Seeded {} difficulty levels", levels.len());
    Ok(())
}

async fn insert_category(
    pool: &SqlitePool,
    parent_id: Option<i64>,
    slug: &str,
    name: &str,
    description: &str,
    icon: &str,
    sort_order: i64,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO categories (parent_id, slug, name, description, icon, sort_order) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(parent_id)
    .bind(slug)
    .bind(name)
    .bind(description)
    .bind(icon)
    .bind(sort_order)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

async fn seed_categories(pool: &SqlitePool) -> Result<()> {
    let interview = insert_category(
        pool,
        None,
        "interview",
        "Interview",
        "Practice answering common interview questions",
        "mic",
        10,
    )
    .await?;
    insert_category(
        pool,
        Some(interview),
        "interview-behavioral",
        "Behavioral",
        "STAR method and situation-based questions",
        "star",
        1,
    )
    .await?;
    insert_category(
        pool,
        Some(interview),
        "interview-hr-general",
        "HR & General",
        "General and HR interview questions",
        "users",
        2,
    )
    .await?;

    let presentation = insert_category(
        pool,
        None,
        "presentation",
        "Presentation",
        "Practice explaining concepts clearly",
        "chart",
        20,
    )
    .await?;
    insert_category(
        pool,
        Some(presentation),
        "presentation-pitch",
        "Pitch",
        "Elevator pitches and product pitches",
        "zap",
        1,
    )
    .await?;
    insert_category(
        pool,
        Some(presentation),
        "presentation-explainer",
        "Explainer",
        "Explain complex ideas simply",
        "book-open",
        2,
    )
    .await?;

    let debate = insert_category(
        pool,
        None,
        "debate",
        "Debate",
        "Practice defending a position",
        "balance",
        30,
    )
    .await?;
    insert_category(
        pool,
        Some(debate),
        "debate-persuasive",
        "Persuasive Speech",
        "Persuade and influence",
        "message-circle",
        1,
    )
    .await?;

    let storytelling = insert_category(
        pool,
        None,
        "storytelling",
        "Storytelling",
        "Practice telling engaging stories",
        "book",
        40,
    )
    .await?;
    insert_category(
        pool,
        Some(storytelling),
        "storytelling-personal",
        "Personal Stories",
        "Stories from your own experience",
        "user",
        1,
    )
    .await?;

    info!("Seeded default categories");
    Ok(())
}

async fn category_id_by_slug(pool: &SqlitePool, slug: &str) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM categories WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn level_id_by_slug(pool: &SqlitePool, slug: &str) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM levels WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn seed_challenges(pool: &SqlitePool) -> Result<()> {
    let challenges: [(&str, &str, &str, i64, i64, Option<Vec<&str>>); 10] = [
        (
            "interview-behavioral",
            "easy",
            "Tell me about a goal you set and how you achieved it.",
            2,
            3,
            None,
        ),
        (
            "interview-behavioral",
            "medium",
            "Describe a challenging situation at work and how you handled it.",
            3,
            3,
            None,
        ),
        (
            "interview-hr-general",
            "easy",
            "Tell me about yourself and your professional background.",
            2,
            3,
            None,
        ),
        (
            "interview-hr-general",
            "hard",
            "What is your biggest weakness and how are you working on it?",
            2,
            2,
            None,
        ),
        (
            "presentation-pitch",
            "easy",
            "Give a 60-second elevator pitch for a product you use daily.",
            1,
            3,
            None,
        ),
        (
            "presentation-pitch",
            "hard",
            "Pitch a new product as if to investors in under three minutes.",
            3,
            2,
            None,
        ),
        (
            "presentation-explainer",
            "medium",
            "Explain a complex concept from your field to someone with no background in it.",
            3,
            0,
            Some(vec!["Use analogies", "Avoid jargon", "Check for understanding"]),
        ),
        (
            "debate-persuasive",
            "easy",
            "Convince someone to try a hobby you enjoy.",
            2,
            3,
            None,
        ),
        (
            "debate-persuasive",
            "medium",
            "Persuade your manager to approve a training budget increase.",
            3,
            2,
            None,
        ),
        (
            "storytelling-personal",
            "medium",
            "Tell the story of a time you overcame a fear or obstacle.",
            3,
            2,
            None,
        ),
    ];

    for (category_slug, level_slug, title, minutes, hints, tips) in challenges {
        let category_id = category_id_by_slug(pool, category_slug).await?;
        let level_id = level_id_by_slug(pool, level_slug).await?;
        let tips_json = match tips {
            Some(tips) => Some(serde_json::to_string(&tips).map_err(|e| {
                crate::Error::Internal(format!("Failed to serialize seed tips: {}", e))
            })?),
            None => None,
        };

        sqlx::query(
            "INSERT INTO challenges \
             (category_id, level_id, title, suggested_time_minutes, hints_available, tips) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(category_id)
        .bind(level_id)
        .bind(title)
        .bind(minutes)
        .bind(hints)
        .bind(tips_json)
        .execute(pool)
        .await?;
    }

    info!("Seeded starter challenge set");
    Ok(())
}
