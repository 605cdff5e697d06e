//! `coursedup` command line
//!
//! Duplicates one stored course and prints the duplication report as JSON.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use coursedup_engine::adapters::PostgresCourseRepository;
use coursedup_engine::app::{DuplicateCourseParams, DuplicationService};
use coursedup_engine::config::Config;
use coursedup_engine::domain::entities::{CourseId, UserId};

#[derive(Parser, Debug)]
#[command(name = "coursedup", version, about = "Duplicate a course into a new term")]
struct Args {
    /// Id of the course to duplicate
    #[arg(env = "COURSEDUP_COURSE_ID")]
    course_id: Uuid,

    /// Title of the new course
    #[arg(long, env = "COURSEDUP_TITLE")]
    title: String,

    /// Start of the new course (RFC 3339); every timestamp shifts by the same offset
    #[arg(long, env = "COURSEDUP_START_AT")]
    start_at: DateTime<Utc>,

    /// User recorded as creator of regenerated rows
    #[arg(long, env = "COURSEDUP_ACTOR")]
    actor: Uuid,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,coursedup_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;
    let preserved: Vec<String> = config
        .audit_policy
        .preserved_kinds()
        .map(|k| k.to_string())
        .collect();
    tracing::debug!(preserved = ?preserved, "Audit policy loaded");

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let courses = Arc::new(PostgresCourseRepository::new(db));
    let service = DuplicationService::new(courses, config.audit_policy.clone());

    let params = DuplicateCourseParams {
        new_title: args.title,
        new_start_at: args.start_at,
        actor: UserId(args.actor),
    };

    let outcome = service
        .duplicate(&CourseId(args.course_id), &params)
        .await
        .with_context(|| format!("Failed to duplicate course {}", args.course_id))?;

    println!("{}", serde_json::to_string_pretty(&outcome.report)?);

    Ok(())
}
