// crates/shared-kernel/src/application/ports/message_consumer.rs

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use crate::errors::AppResult;

/// Livraison brute reçue du canal : le transport ne présume rien du contenu.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub payload: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadLetterReason {
    /// Payload vide ou indéchiffrable : ne se corrigera jamais, pas de retry
    InvalidPayload,
    /// Échec définitif du handler d'effet
    ProcessingError,
}

impl DeadLetterReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPayload => "InvalidPayload",
            Self::ProcessingError => "ProcessingError",
        }
    }
}

/// Issue d'UNE tentative de livraison.
/// `Complete` et `DeadLetter` sont terminaux pour cette livraison ;
/// `Retry` signifie "pas d'acquittement", la relivraison par le broker
/// démarre une instance neuve de la machine à états.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    Complete,
    Retry {
        reason: String,
    },
    DeadLetter {
        reason: DeadLetterReason,
        description: String,
    },
}

pub type DeliveryHandler =
    Box<dyn Fn(Delivery) -> BoxFuture<'static, Disposition> + Send + Sync>;

#[async_trait]
pub trait MessageConsumer: Send + Sync {
    /// S'abonne au canal nommé et remet chaque livraison au handler ;
    /// acquittement / dead-letter sont des actions explicites dérivées de la
    /// `Disposition` retournée.
    async fn consume(&self, topic: &str, handler: DeliveryHandler) -> AppResult<()>;
}
