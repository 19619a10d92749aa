mod message;
mod routing;

#[cfg(test)]
mod routing_test;

pub use message::OutboxMessage;
pub use routing::TopicRouter;
