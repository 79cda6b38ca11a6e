use std::future::Future;

pub mod contact;

#[cfg_attr(feature = "mock", mockall::automock(type Transaction = MockTransaction;))]
pub trait Database: Send + Sync + 'static {
    type Transaction: Transaction;

    /// Starts a new transaction which can be used to interact with the
    /// database.
    ///
    /// Changes are persisted only after explicitly invoking
    /// [`Transaction::commit()`]. Dropping a transaction without committing
    /// it discards all changes.
    fn begin_transaction(&self) -> impl Future<Output = anyhow::Result<Self::Transaction>> + Send;

    /// Verify the connection to the database.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Transaction: Send + Sync + 'static {
    /// Persists any changes made to the database using this transaction.
    fn commit(self) -> impl Future<Output = anyhow::Result<()>> + Send;
    /// Explicitly discards any changes made to the database using this
    /// transaction.
    fn rollback(self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockDatabase {
    /// Expect exactly one transaction, which is committed if
    /// `expect_commit` is set.
    pub fn build(expect_commit: bool) -> Self {
        let mut txn = MockTransaction::new();
        if expect_commit {
            txn.expect_commit()
                .once()
                .return_once(|| Box::pin(std::future::ready(Ok(()))));
        }

        Self::new().with_begin_transaction(txn)
    }

    /// Expect exactly one transaction whose commit fails.
    pub fn build_failing_commit(error: anyhow::Error) -> Self {
        let mut txn = MockTransaction::new();
        txn.expect_commit()
            .once()
            .return_once(|| Box::pin(std::future::ready(Err(error))));

        Self::new().with_begin_transaction(txn)
    }

    pub fn with_begin_transaction(mut self, txn: MockTransaction) -> Self {
        self.expect_begin_transaction()
            .once()
            .return_once(|| Box::pin(std::future::ready(Ok(txn))));
        self
    }

    pub fn with_begin_transaction_error(mut self, error: anyhow::Error) -> Self {
        self.expect_begin_transaction()
            .once()
            .return_once(|| Box::pin(std::future::ready(Err(error))));
        self
    }

    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
