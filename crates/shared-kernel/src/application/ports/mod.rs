mod effect_handler;
mod message_consumer;
mod message_producer;

pub use effect_handler::{EffectHandler, HandlerFailure};
pub use message_consumer::{
    DeadLetterReason, Delivery, DeliveryHandler, Disposition, MessageConsumer,
};
pub use message_producer::MessageProducer;

#[cfg(any(test, feature = "test-utils"))]
mod message_producer_stub;
#[cfg(any(test, feature = "test-utils"))]
pub use message_producer_stub::{PublishedMessage, RecordingProducer};
