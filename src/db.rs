//! Migration runner and idempotent activity-catalog seeding.

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

struct ActivitySeed {
    name: &'static str,
    description: &'static str,
    schedule: &'static str,
    capacity: i64,
}

/// Fixed catalog. Activities are created only here and are immutable
/// afterwards; re-running the seed never overwrites or duplicates a row.
const ACTIVITY_CATALOG: &[ActivitySeed] = &[
    ActivitySeed {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        capacity: 12,
    },
    ActivitySeed {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        capacity: 20,
    },
    ActivitySeed {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        capacity: 30,
    },
    ActivitySeed {
        name: "Soccer Team",
        description: "Join the school soccer team and compete in matches",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        capacity: 22,
    },
    ActivitySeed {
        name: "Basketball Team",
        description: "Practice and play basketball with the school team",
        schedule: "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
        capacity: 15,
    },
    ActivitySeed {
        name: "Art Club",
        description: "Explore your creativity through painting and drawing",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        capacity: 15,
    },
    ActivitySeed {
        name: "Drama Club",
        description: "Act, direct, and produce plays and performances",
        schedule: "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        capacity: 20,
    },
    ActivitySeed {
        name: "Math Club",
        description: "Solve challenging problems and participate in math competitions",
        schedule: "Tuesdays, 3:30 PM - 4:30 PM",
        capacity: 10,
    },
    ActivitySeed {
        name: "Debate Team",
        description: "Develop public speaking and argumentation skills",
        schedule: "Fridays, 4:00 PM - 5:30 PM",
        capacity: 12,
    },
    ActivitySeed {
        name: "GitHub Skills",
        description: "Learn practical coding and collaboration skills with GitHub. \
                      First part of the GitHub Certifications program.",
        schedule: "Thursdays, 4:00 PM - 5:00 PM",
        capacity: 25,
    },
];

pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}

/// Inserts every catalog entry that does not already exist, in a single
/// transaction. Safe to run on every startup.
pub async fn seed_activities(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    for seed in ACTIVITY_CATALOG {
        sqlx::query(
            "INSERT INTO activities (name, description, schedule, capacity) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(seed.name)
        .bind(seed.description)
        .bind(seed.schedule)
        .bind(seed.capacity)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to seed activity {}", seed.name))?;
    }

    tx.commit().await?;
    info!(count = ACTIVITY_CATALOG.len(), "Activity catalog seeded");
    Ok(())
}
