//! Constraint behaviour of the in-memory [`MemoryStore`].

mod common;

use assert_matches::assert_matches;
use folio_db::models::contact_submission::{NewContactSubmission, CONTACT_STATUS_NEW};
use folio_db::models::tag::NewPostTag;
use folio_db::store::{DataStore, Entity, MemoryStore, StoreError};

use common::{new_category, new_post, new_service, new_tag, new_user};

#[tokio::test]
async fn inserts_return_rows_in_input_order_with_fresh_ids() {
    let store = MemoryStore::new();
    let tags = store
        .insert_tags(&[new_tag("Rust"), new_tag("Postgres")])
        .await
        .unwrap();

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].slug, "rust");
    assert_eq!(tags[1].slug, "postgres");
    assert_ne!(tags[0].id, tags[1].id);
    assert_eq!(store.count(Entity::Tag).await.unwrap(), 2);
}

#[tokio::test]
async fn duplicate_slug_rejects_whole_batch() {
    let store = MemoryStore::new();
    store.insert_categories(&[new_category("Design")]).await.unwrap();

    let err = store
        .insert_categories(&[new_category("Engineering"), new_category("Design")])
        .await
        .unwrap_err();

    assert_matches!(err, StoreError::Duplicate { entity: Entity::Category, ref key } if key == "design");
    assert_eq!(store.count(Entity::Category).await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_email_within_batch_rejected() {
    let store = MemoryStore::new();
    let err = store
        .insert_users(&[new_user("a@example.com"), new_user("a@example.com")])
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Duplicate { entity: Entity::User, .. });
}

#[tokio::test]
async fn post_with_unknown_category_rejected() {
    let store = MemoryStore::new();
    let users = store.insert_users(&[new_user("a@example.com")]).await.unwrap();

    let err = store
        .insert_posts(&[new_post("Hello", users[0].id, 9_999)])
        .await
        .unwrap_err();

    assert_matches!(
        err,
        StoreError::MissingReference {
            entity: Entity::Post,
            referenced: Entity::Category,
            ..
        }
    );
    assert_eq!(store.count(Entity::Post).await.unwrap(), 0);
}

#[tokio::test]
async fn post_tags_require_existing_post_and_tag() {
    let store = MemoryStore::new();
    let tags = store.insert_tags(&[new_tag("Rust")]).await.unwrap();

    let err = store
        .insert_post_tags(&[NewPostTag {
            post_id: 42,
            tag_id: tags[0].id,
        }])
        .await
        .unwrap_err();

    assert_matches!(
        err,
        StoreError::MissingReference {
            referenced: Entity::Post,
            ..
        }
    );
}

#[tokio::test]
async fn contact_submission_service_is_optional() {
    let store = MemoryStore::new();
    let services = store.insert_services(&[new_service("Audit", 1)]).await.unwrap();

    let rows = vec![
        NewContactSubmission {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            subject: None,
            message: "Hi".into(),
            service_id: Some(services[0].id),
            status: CONTACT_STATUS_NEW.into(),
        },
        NewContactSubmission {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            subject: Some("General".into()),
            message: "Hello".into(),
            service_id: None,
            status: CONTACT_STATUS_NEW.into(),
        },
    ];
    let created = store.insert_contact_submissions(&rows).await.unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[1].service_id, None);
}

#[tokio::test]
async fn delete_all_on_empty_table_returns_zero() {
    let store = MemoryStore::new();
    for entity in Entity::ALL {
        assert_eq!(store.delete_all(entity).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn delete_restricted_while_dependents_exist() {
    let store = MemoryStore::new();
    let users = store.insert_users(&[new_user("a@example.com")]).await.unwrap();
    let categories = store.insert_categories(&[new_category("News")]).await.unwrap();
    store
        .insert_posts(&[new_post("Launch", users[0].id, categories[0].id)])
        .await
        .unwrap();

    let err = store.delete_all(Entity::User).await.unwrap_err();
    assert_matches!(
        err,
        StoreError::InUse {
            entity: Entity::User,
            referenced_by: Entity::Post
        }
    );

    assert_eq!(store.delete_all(Entity::Post).await.unwrap(), 1);
    assert_eq!(store.delete_all(Entity::User).await.unwrap(), 1);
    assert_eq!(store.delete_all(Entity::Category).await.unwrap(), 1);
}

#[tokio::test]
async fn ids_are_not_reused_after_clear() {
    let store = MemoryStore::new();
    let first = store.insert_tags(&[new_tag("Rust")]).await.unwrap();
    store.delete_all(Entity::Tag).await.unwrap();
    let second = store.insert_tags(&[new_tag("Rust")]).await.unwrap();
    assert!(second[0].id > first[0].id);
}

#[tokio::test]
async fn services_listed_in_display_order() {
    let store = MemoryStore::new();
    store
        .insert_services(&[new_service("Support", 3), new_service("Audit", 1)])
        .await
        .unwrap();
    let names: Vec<String> = store
        .list_services()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Audit", "Support"]);
}
