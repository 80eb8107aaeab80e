//! The full content registry against a store.

use std::collections::HashMap;
use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use folio_db::store::{DataStore, Entity, MemoryStore, PgStore};
use folio_seed::config::SeedConfig;
use folio_seed::operations::{default_registry, SeedCategories, SeedPosts};
use folio_seed::orchestrator::{Orchestrator, RunState};
use folio_seed::registry::OperationRegistry;
use folio_seed::report;
use sqlx::PgPool;

const EXPECTED: [(Entity, u64); 7] = [
    (Entity::User, 1),
    (Entity::Category, 3),
    (Entity::Tag, 6),
    (Entity::Post, 4),
    (Entity::PostTag, 8),
    (Entity::Service, 3),
    (Entity::ContactSubmission, 3),
];

fn config() -> SeedConfig {
    let vars = HashMap::from([("SEED_ADMIN_EMAIL", "editor@example.com")]);
    SeedConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

fn orchestrator_for(store: Arc<dyn DataStore>) -> Orchestrator {
    let registry = default_registry(store, &config()).unwrap();
    registry.validate().unwrap();
    Orchestrator::new(registry)
}

async fn assert_counts(store: &dyn DataStore) {
    for (entity, expected) in EXPECTED {
        assert_eq!(store.count(entity).await.unwrap(), expected, "{entity}");
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[test]
fn default_registry_runs_tables_parents_first() {
    let registry = default_registry(Arc::new(MemoryStore::new()), &config()).unwrap();
    assert_eq!(
        registry.names(),
        [
            "users",
            "categories",
            "tags",
            "posts",
            "post_tags",
            "services",
            "contact_submissions",
        ]
    );
}

#[tokio::test]
async fn seeds_every_table() {
    let store = Arc::new(MemoryStore::new());
    let orchestrator = orchestrator_for(store.clone());

    let run = orchestrator.run_all().await;

    assert_eq!(run.state, RunState::Completed, "{:?}", run.failure());
    let summary = report::summarize(&run.results);
    assert_eq!(summary.total_records, 28);
    assert_eq!(summary.success_count, 7);
    for (result, (entity, expected)) in run.results.iter().zip(EXPECTED) {
        assert_eq!(result.name, entity.table_name());
        assert_eq!(result.records_created, expected);
    }
    assert_counts(store.as_ref()).await;

    let users = store.list_users().await.unwrap();
    assert_eq!(users[0].email, "editor@example.com");
    let posts = store.list_posts().await.unwrap();
    assert!(posts.iter().all(|p| p.author_id == users[0].id));
    assert_eq!(posts.iter().filter(|p| p.published_at.is_none()).count(), 1);
}

#[tokio::test]
async fn rerun_replaces_rather_than_duplicates() {
    let store = Arc::new(MemoryStore::new());
    let orchestrator = orchestrator_for(store.clone());

    let first = orchestrator.run_all().await;
    let second = orchestrator.run_all().await;

    assert!(first.is_success());
    assert!(second.is_success(), "{:?}", second.failure());
    assert_eq!(
        report::summarize(&first.results).total_records,
        report::summarize(&second.results).total_records
    );
    assert_counts(store.as_ref()).await;
}

#[tokio::test]
async fn clear_all_empties_every_table() {
    let store = Arc::new(MemoryStore::new());
    let orchestrator = orchestrator_for(store.clone());
    assert!(orchestrator.run_all().await.is_success());

    let failures = orchestrator.clear_all().await;

    assert_eq!(failures, 0);
    for entity in Entity::ALL {
        assert_eq!(store.count(entity).await.unwrap(), 0, "{entity}");
    }
}

#[tokio::test]
async fn missing_author_stops_run_at_posts() {
    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::new());
    let mut registry = OperationRegistry::new();
    registry
        .register(Box::new(SeedCategories::new(store.clone())))
        .unwrap();
    registry
        .register(Box::new(SeedPosts::new(
            store.clone(),
            "nobody@example.com".to_string(),
        )))
        .unwrap();

    let run = Orchestrator::new(registry).run_all().await;

    assert_eq!(run.state, RunState::FailedEarly);
    assert_eq!(run.results.len(), 2);
    assert!(run.results[0].success);
    let failure = run.failure().unwrap();
    assert_eq!(failure.name, "posts");
    assert!(
        failure
            .error
            .as_deref()
            .unwrap()
            .contains("nobody@example.com"),
        "{failure:?}"
    );
    assert_eq!(store.count(Entity::Post).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Postgres (requires DATABASE_URL)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn seeds_postgres_twice(pool: PgPool) {
    let store = Arc::new(PgStore::new(pool.clone()));
    let orchestrator = orchestrator_for(store.clone());

    let first = orchestrator.run_all().await;
    assert!(first.is_success(), "{:?}", first.failure());
    let second = orchestrator.run_all().await;
    assert!(second.is_success(), "{:?}", second.failure());
    assert_counts(store.as_ref()).await;

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE email = $1")
        .bind("editor@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(hash.starts_with("$argon2id$"));
    let parsed = PasswordHash::new(&hash).unwrap();
    assert!(Argon2::default()
        .verify_password(b"change-me-please", &parsed)
        .is_ok());
}
