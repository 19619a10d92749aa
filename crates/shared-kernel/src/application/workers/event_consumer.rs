// crates/shared-kernel/src/application/workers/event_consumer.rs

use std::sync::Arc;

use crate::application::ports::{
    DeadLetterReason, Delivery, DeliveryHandler, Disposition, EffectHandler, HandlerFailure,
};
use crate::domain::events::EventEnvelope;
use crate::domain::repositories::IdempotencyLedger;

/// Pipeline de consommation, indépendant du broker.
///
/// Machine à états par livraison :
/// `Received -> DeadLettered(InvalidPayload)` |
/// `Received -> Processing -> Completed` |
/// `Received -> Processing -> DeadLettered(ProcessingError)`.
/// `Retry` = aucun état terminal atteint, la relivraison repart de zéro.
///
/// Les livraisons arrivent en parallèle sur N instances sans état partagé :
/// toute la coordination d'idempotence passe par le registre durable.
pub struct EventConsumer {
    handler: Arc<dyn EffectHandler>,
    ledger: Arc<dyn IdempotencyLedger>,
}

impl EventConsumer {
    pub fn new(handler: Arc<dyn EffectHandler>, ledger: Arc<dyn IdempotencyLedger>) -> Self {
        Self { handler, ledger }
    }

    pub async fn process(&self, delivery: Delivery) -> Disposition {
        // 1. Un payload vide ou indéchiffrable ne se corrigera jamais :
        // dead-letter immédiate, le handler d'effet n'est JAMAIS invoqué
        if delivery.payload.is_empty() {
            return Disposition::DeadLetter {
                reason: DeadLetterReason::InvalidPayload,
                description: "Empty payload".into(),
            };
        }

        if let Some(ct) = delivery.content_type.as_deref() {
            if !ct.starts_with("application/json") {
                return Disposition::DeadLetter {
                    reason: DeadLetterReason::InvalidPayload,
                    description: format!("Unsupported content type '{}'", ct),
                };
            }
        }

        let envelope: EventEnvelope = match serde_json::from_slice(&delivery.payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                return Disposition::DeadLetter {
                    reason: DeadLetterReason::InvalidPayload,
                    description: format!("Envelope deserialization failed: {}", e),
                };
            }
        };

        let handler_name = self.handler.handler_name();

        // 2. Relivraison d'un message déjà appliqué : acquitter sans ré-appliquer
        match self.ledger.already_applied(handler_name, envelope.id).await {
            Ok(true) => {
                tracing::debug!(
                    event_id = %envelope.id,
                    handler = handler_name,
                    "Duplicate delivery, effect already applied"
                );
                return Disposition::Complete;
            }
            Ok(false) => {}
            Err(e) => {
                // Registre injoignable : on ne peut pas trancher, on retente
                return Disposition::Retry {
                    reason: format!("Idempotency ledger unavailable: {}", e),
                };
            }
        }

        // 3. Effet, avec classification transitoire/permanent par le handler
        match self.handler.apply(&envelope).await {
            Ok(()) => {
                if let Err(e) = self.ledger.record_applied(handler_name, envelope.id).await {
                    // L'effet est appliqué mais pas enregistré : la
                    // relivraison pourra ré-appliquer (at-least-once assumé)
                    tracing::warn!(
                        event_id = %envelope.id,
                        "Effect applied but ledger write failed: {}",
                        e
                    );
                    return Disposition::Retry {
                        reason: format!("Ledger write failed: {}", e),
                    };
                }

                Disposition::Complete
            }
            Err(HandlerFailure::Invalid(description)) => Disposition::DeadLetter {
                reason: DeadLetterReason::InvalidPayload,
                description,
            },
            Err(HandlerFailure::Transient(reason)) => Disposition::Retry { reason },
            Err(HandlerFailure::Permanent(detail)) => Disposition::DeadLetter {
                reason: DeadLetterReason::ProcessingError,
                description: detail,
            },
        }
    }

    pub fn into_delivery_handler(self: Arc<Self>) -> DeliveryHandler {
        Box::new(move |delivery| {
            let consumer = Arc::clone(&self);
            Box::pin(async move { consumer.process(delivery).await })
        })
    }
}
