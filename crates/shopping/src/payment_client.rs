//! Client side of the payment ledger, as seen by the order orchestrator.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// Status strings the ledger uses for an accepted payment.
const SUCCESS_MARKERS: [&str; 2] = ["success", "paid"];

/// A completed ledger call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The ledger accepted the charge.
    Settled { payment_id: String },
    /// The ledger answered but did not accept the charge.
    Declined { reason: String },
}

/// The ledger call did not complete.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    #[error("payment request timed out")]
    Timeout,

    #[error("payment transport error: {0}")]
    Transport(String),

    #[error("unreadable payment reply: {0}")]
    MalformedReply(String),
}

#[derive(Debug, Serialize)]
struct ChargeRequest<'a> {
    email: &'a str,
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct LedgerReply {
    #[serde(default)]
    payment_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl LedgerReply {
    fn into_outcome(self) -> PaymentOutcome {
        let status = self.status.unwrap_or_default();
        let payment_id = self
            .payment_id
            .filter(|id| !id.is_empty())
            .or(self.id.filter(|id| !id.is_empty()));

        match payment_id {
            Some(payment_id) if SUCCESS_MARKERS.contains(&status.as_str()) => {
                PaymentOutcome::Settled { payment_id }
            }
            Some(_) => PaymentOutcome::Declined {
                reason: format!("ledger status {status:?}"),
            },
            None => PaymentOutcome::Declined {
                reason: "ledger reply carries no payment id".to_string(),
            },
        }
    }
}

/// Charges an email for an amount against the payment ledger.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, email: &str, amount: i64)
    -> Result<PaymentOutcome, PaymentGatewayError>;
}

/// REST client for the ledger's `POST /payments`.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: reqwest::Client,
    url: String,
}

impl HttpPaymentClient {
    /// Creates a client whose every call is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentClient {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn charge(
        &self,
        email: &str,
        amount: i64,
    ) -> Result<PaymentOutcome, PaymentGatewayError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ChargeRequest { email, amount })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentGatewayError::Timeout
                } else {
                    PaymentGatewayError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::info!(%status, "ledger declined payment");
            return Ok(PaymentOutcome::Declined {
                reason: format!("ledger responded {status}"),
            });
        }

        let reply: LedgerReply = response.json().await.map_err(|e| {
            if e.is_timeout() {
                PaymentGatewayError::Timeout
            } else {
                PaymentGatewayError::MalformedReply(e.to_string())
            }
        })?;
        Ok(reply.into_outcome())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum StubMode {
    #[default]
    Settle,
    Decline,
    Unreachable,
}

#[derive(Debug, Default)]
struct StubState {
    mode: StubMode,
    calls: Vec<(String, i64)>,
    next_id: u32,
}

/// In-memory ledger stand-in for tests.
///
/// Settles with ids `pay1`, `pay2`, ... unless told to decline or to act
/// unreachable. Every call is recorded.
#[derive(Debug, Default)]
pub struct InMemoryPaymentGateway {
    state: Mutex<StubState>,
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent charges come back declined.
    pub async fn set_decline(&self, decline: bool) {
        self.state.lock().await.mode = if decline {
            StubMode::Decline
        } else {
            StubMode::Settle
        };
    }

    /// Makes subsequent charges fail as if the ledger were down.
    pub async fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().await.mode = if unreachable {
            StubMode::Unreachable
        } else {
            StubMode::Settle
        };
    }

    /// Number of charge attempts received.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// The most recent `(email, amount)` charged.
    pub async fn last_request(&self) -> Option<(String, i64)> {
        self.state.lock().await.calls.last().cloned()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn charge(
        &self,
        email: &str,
        amount: i64,
    ) -> Result<PaymentOutcome, PaymentGatewayError> {
        let mut state = self.state.lock().await;
        state.calls.push((email.to_owned(), amount));

        match state.mode {
            StubMode::Settle => {
                state.next_id += 1;
                Ok(PaymentOutcome::Settled {
                    payment_id: format!("pay{}", state.next_id),
                })
            }
            StubMode::Decline => Ok(PaymentOutcome::Declined {
                reason: "declined by stub".to_string(),
            }),
            StubMode::Unreachable => Err(PaymentGatewayError::Transport(
                "connection refused".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: serde_json::Value) -> PaymentOutcome {
        serde_json::from_value::<LedgerReply>(json)
            .unwrap()
            .into_outcome()
    }

    #[test]
    fn test_success_markers() {
        for status in ["success", "paid"] {
            assert_eq!(
                reply(serde_json::json!({"payment_id": "pay1", "status": status})),
                PaymentOutcome::Settled {
                    payment_id: "pay1".into()
                }
            );
        }
    }

    #[test]
    fn test_ledger_record_id_is_accepted() {
        let outcome = reply(serde_json::json!({"id": "abc", "status": "paid", "amount": 5}));
        assert_eq!(
            outcome,
            PaymentOutcome::Settled {
                payment_id: "abc".into()
            }
        );
    }

    #[test]
    fn test_success_without_id_is_declined() {
        assert!(matches!(
            reply(serde_json::json!({"status": "success"})),
            PaymentOutcome::Declined { .. }
        ));
        assert!(matches!(
            reply(serde_json::json!({"payment_id": "", "status": "success"})),
            PaymentOutcome::Declined { .. }
        ));
    }

    #[test]
    fn test_other_status_is_declined() {
        assert!(matches!(
            reply(serde_json::json!({"payment_id": "pay1", "status": "pending"})),
            PaymentOutcome::Declined { .. }
        ));
    }

    #[tokio::test]
    async fn test_stub_sequence_and_modes() {
        let stub = InMemoryPaymentGateway::new();
        assert_eq!(
            stub.charge("a@b.com", 1).await.unwrap(),
            PaymentOutcome::Settled {
                payment_id: "pay1".into()
            }
        );

        stub.set_decline(true).await;
        assert!(matches!(
            stub.charge("a@b.com", 2).await.unwrap(),
            PaymentOutcome::Declined { .. }
        ));

        stub.set_unreachable(true).await;
        assert!(stub.charge("a@b.com", 3).await.is_err());

        assert_eq!(stub.call_count().await, 3);
        assert_eq!(stub.last_request().await, Some(("a@b.com".into(), 3)));
    }
}
