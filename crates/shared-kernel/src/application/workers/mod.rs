mod event_consumer;
mod outbox_dispatcher;

#[cfg(test)]
mod outbox_dispatcher_test;

pub use event_consumer::EventConsumer;
pub use outbox_dispatcher::{DispatcherConfig, OutboxDispatcher};
