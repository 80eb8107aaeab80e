//! Row builders shared by the store integration tests.

#![allow(dead_code)]

use folio_core::slug::slugify;
use folio_core::types::DbId;
use folio_db::models::category::NewCategory;
use folio_db::models::post::{NewPost, POST_STATUS_DRAFT};
use folio_db::models::service::NewService;
use folio_db::models::tag::NewTag;
use folio_db::models::user::{NewUser, ROLE_EDITOR};

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        display_name: "Test Editor".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role: ROLE_EDITOR.to_string(),
    }
}

pub fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        slug: slugify(name),
        description: None,
    }
}

pub fn new_tag(name: &str) -> NewTag {
    NewTag {
        name: name.to_string(),
        slug: slugify(name),
    }
}

pub fn new_post(title: &str, author_id: DbId, category_id: DbId) -> NewPost {
    NewPost {
        title: title.to_string(),
        slug: slugify(title),
        excerpt: None,
        body: format!("Body of {title}"),
        status: POST_STATUS_DRAFT.to_string(),
        author_id,
        category_id,
        published_at: None,
    }
}

pub fn new_service(name: &str, sort_order: i32) -> NewService {
    NewService {
        name: name.to_string(),
        slug: slugify(name),
        summary: format!("{name} summary"),
        price_cents: Some(150_000),
        sort_order,
        is_active: true,
    }
}
