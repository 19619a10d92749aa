// crates/shared-kernel/src/domain/transaction/transaction_manager.rs

use std::future::Future;
use std::pin::Pin;
use crate::domain::transaction::Transaction;
use crate::errors::Result;

/// Frontière d'atomicité : tout ce qui est écrit via la transaction prêtée
/// au closure (état métier + lignes d'outbox) est commité ou annulé d'un
/// bloc. Le commit appartient au manager : si le closure échoue, rien n'est
/// persisté, les événements bufferisés disparaissent avec la transaction.
pub trait TransactionManager: Send + Sync {
    fn in_transaction<'a>(
        &'a self,
        f: Box<
            dyn for<'t> FnOnce(
                &'t mut dyn Transaction,
            ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 't>>
            + Send
            + 'a,
        >,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Helper générique pour éviter le Box manuel à chaque appel
pub trait TransactionManagerExt: TransactionManager {
    fn run_in_transaction<'a, F>(
        &'a self,
        f: F,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>
    where
        F: for<'t> FnOnce(
                &'t mut dyn Transaction,
            ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 't>>
            + Send
            + 'a,
    {
        self.in_transaction(Box::new(f))
    }
}
impl<T: TransactionManager + ?Sized> TransactionManagerExt for T {}
