//! Reference-data seeding commands.
//!
//! # Usage
//!
//! ```bash
//! slk-cli seed postcodes
//! ```
//!
//! The postcode registry ships with the CLI as a `code;city` resource and
//! is upserted, so reseeding after a registry update is safe.

use sqlx::PgPool;

use shoplokalt_core::Postcode;
use shoplokalt_server::db::{PostcodeRepository, RepositoryError};
use shoplokalt_server::models::PostcodeEntry;

/// Bundled Danish postcode registry.
const POSTCODES: &str = include_str!("../../data/postcodes.csv");

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Bad registry line {line}: {content}")]
    BadEntry { line: usize, content: String },
}

/// Load the bundled postcode registry into the `postcode` table.
///
/// # Errors
///
/// Returns `SeedError` if the registry resource is malformed or the
/// database rejects an upsert.
pub async fn postcodes() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;
    let repository = PostcodeRepository::new(&pool);

    let mut count = 0usize;
    for (index, line) in POSTCODES.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let entry = parse_entry(line).ok_or_else(|| SeedError::BadEntry {
            line: index + 1,
            content: line.to_owned(),
        })?;

        repository.upsert(&entry).await?;
        count += 1;
    }

    tracing::info!(count, "Postcode registry seeded");
    Ok(())
}

/// Parse one `code;city` registry line.
fn parse_entry(line: &str) -> Option<PostcodeEntry> {
    let (code, city) = line.split_once(';')?;
    let postcode = Postcode::parse(code).ok()?;
    let city = city.trim();
    if city.is_empty() {
        return None;
    }
    Some(PostcodeEntry {
        postcode,
        city: city.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let entry = parse_entry("8000;Aarhus C").expect("valid line");
        assert_eq!(entry.postcode, Postcode::new(8000));
        assert_eq!(entry.city, "Aarhus C");
    }

    #[test]
    fn test_parse_entry_rejects_garbage() {
        assert!(parse_entry("no-separator").is_none());
        assert!(parse_entry("abc;City").is_none());
        assert!(parse_entry("8000;").is_none());
    }

    #[test]
    fn test_bundled_registry_parses() {
        for (index, line) in POSTCODES.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            assert!(parse_entry(line).is_some(), "bad line {}: {line}", index + 1);
        }
    }
}
