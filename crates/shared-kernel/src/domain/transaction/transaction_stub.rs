// crates/shared-kernel/src/domain/transaction/transaction_stub.rs

use crate::domain::transaction::Transaction;

pub struct FakeTransaction;

impl Transaction for FakeTransaction {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
