use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use folio_core::validation::validate_batch;
use folio_db::models::contact_submission::{
    NewContactSubmission, CONTACT_STATUS_NEW, CONTACT_STATUS_REPLIED,
};
use folio_db::store::{DataStore, Entity};

use super::{clear_entity, key_index, resolve};
use crate::operation::{Operation, OperationConfig};

const CONFIG: OperationConfig =
    OperationConfig::new("contact_submissions", 70, "Sample contact form entries")
        .depends_on(&["services"]);

struct ContactFixture {
    name: &'static str,
    email: &'static str,
    subject: Option<&'static str>,
    message: &'static str,
    /// Slug of the service the enquiry is about.
    service: Option<&'static str>,
    replied: bool,
}

const CONTACTS: &[ContactFixture] = &[
    ContactFixture {
        name: "Priya Natarajan",
        email: "priya@example.com",
        subject: Some("Redesign quote"),
        message: "We need a new marketing site before our spring launch. What would that cost?",
        service: Some("website-design"),
        replied: true,
    },
    ContactFixture {
        name: "Tomás Ortega",
        email: "tomas@example.org",
        subject: None,
        message: "Do you offer a monthly plan for keeping our blog up to date?",
        service: Some("ongoing-support"),
        replied: false,
    },
    ContactFixture {
        name: "Lee Morgan",
        email: "lee.morgan@example.net",
        subject: Some("Speaking invitation"),
        message: "Would someone from your team talk at our meetup about accessible forms?",
        service: None,
        replied: false,
    },
];

/// Creates contact form entries, some linked to services by slug.
pub struct SeedContactSubmissions {
    store: Arc<dyn DataStore>,
}

impl SeedContactSubmissions {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Operation for SeedContactSubmissions {
    fn config(&self) -> &OperationConfig {
        &CONFIG
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        let services = self
            .store
            .list_services()
            .await
            .context("failed to load services")?;
        let services = key_index(&services, |s| s.slug.as_str(), |s| s.id);

        let mut rows = Vec::with_capacity(CONTACTS.len());
        for fixture in CONTACTS {
            let service_id = fixture
                .service
                .map(|slug| resolve(&services, "service", slug))
                .transpose()?;
            let status = if fixture.replied {
                CONTACT_STATUS_REPLIED
            } else {
                CONTACT_STATUS_NEW
            };
            rows.push(NewContactSubmission {
                name: fixture.name.to_string(),
                email: fixture.email.to_string(),
                subject: fixture.subject.map(str::to_string),
                message: fixture.message.to_string(),
                service_id,
                status: status.to_string(),
            });
        }
        validate_batch("contact submission", &rows)?;

        let created = self
            .store
            .insert_contact_submissions(&rows)
            .await
            .context("failed to insert contact submissions")?;
        Ok(created.len() as u64)
    }

    async fn clear(&self) -> anyhow::Result<()> {
        clear_entity(self.store.as_ref(), Entity::ContactSubmission).await
    }
}
