use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use folio_di::Build;
use folio_models::contact::{ContactMessage, ContactSubmission};
use folio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use folio_utils::trace_instrument;
use serde_json::Value;
use tracing::debug;


#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Db, ContactRepo> {
    db: Db,
    contact_repo: ContactRepo,
}

impl<Db, ContactRepo> ContactFeatureServiceImpl<Db, ContactRepo> {
    pub fn new(db: Db, contact_repo: ContactRepo) -> Self {
        Self { db, contact_repo }
    }
}

impl<Db, ContactRepo> ContactFeatureService for ContactFeatureServiceImpl<Db, ContactRepo>
where
    Db: Database,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    #[trace_instrument(skip(self, payload))]
    async fn submit_message(&self, payload: Value) -> Result<ContactMessage, ContactSubmitError> {
        let submission = ContactSubmission::validate(&payload)
            .inspect_err(|err| debug!(?err.errors, "rejected contact submission"))?;

        let mut txn = self.db.begin_transaction().await?;

        let message = self.contact_repo.create(&mut txn, &submission).await?;

        txn.commit().await?;

        debug!(id = %message.id, "saved contact message");

        Ok(message)
    }
}
