// crates/shared-kernel/src/domain/transaction/transaction_manager_stub.rs

use std::future::Future;
use std::pin::Pin;
use crate::domain::transaction::{Transaction, TransactionManager};
use crate::domain::transaction::transaction_stub::FakeTransaction;

pub struct StubTxManager;

impl TransactionManager for StubTxManager {
    fn in_transaction<'a>(
        &'a self,
        f: Box<
            dyn for<'t> FnOnce(
                &'t mut dyn Transaction,
            ) -> Pin<Box<dyn Future<Output = crate::errors::Result<()>> + Send + 't>>
            + Send
            + 'a,
        >,
    ) -> Pin<Box<dyn Future<Output = crate::errors::Result<()>> + Send + 'a>> {
        // On crée l'instance ici pour qu'elle soit trouvée dans le scope
        Box::pin(async move {
            let mut tx = FakeTransaction;
            f(&mut tx).await
        })
    }
}
