use anyhow::Context;
use bb8_postgres::tokio_postgres::Row;
use folio_di::Build;
use folio_models::contact::{
    ContactEmail, ContactMessage, ContactMessageContent, ContactName, ContactSubject,
    ContactSubmission,
};
use folio_persistence_contracts::contact::ContactRepository;
use folio_utils::trace_instrument;

use crate::{arg_indices, columns, PostgresTransaction};

#[derive(Debug, Clone, Copy, Build)]
pub struct PostgresContactRepository;

columns!(contact: "id", "name", "email", "subject", "message", "created_at");
columns!(contact_insert: "name", "email", "subject", "message");

impl ContactRepository<PostgresTransaction> for PostgresContactRepository {
    #[trace_instrument(skip(self, txn))]
    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        submission: &ContactSubmission,
    ) -> anyhow::Result<ContactMessage> {
        let row = txn
            .txn()
            .query_one(
                &format!(
                    "insert into contacts ({CONTACT_INSERT_COL_NAMES}) values ({}) returning \
                     {CONTACT_COL_NAMES}",
                    arg_indices(1..=CONTACT_INSERT_CNT)
                ),
                &[
                    &submission.name.as_str(),
                    &submission.email.as_str(),
                    &submission.subject.as_str(),
                    &submission.message.as_str(),
                ],
            )
            .await
            .context("Failed to insert contact message")?;

        decode_contact_message(&row, &mut 0)
    }
}

fn decode_contact_message(row: &Row, offset: &mut usize) -> anyhow::Result<ContactMessage> {
    let mut idx = || {
        *offset += 1;
        *offset - 1
    };

    Ok(ContactMessage {
        id: row.get::<_, i64>(idx()).into(),
        submission: ContactSubmission {
            name: ContactName::try_new(row.get::<_, String>(idx()))?,
            email: ContactEmail::try_new(row.get::<_, String>(idx()))?,
            subject: ContactSubject::try_new(row.get::<_, String>(idx()))?,
            message: ContactMessageContent::try_new(row.get::<_, String>(idx()))?,
        },
        created_at: row.get(idx()),
    })
}
