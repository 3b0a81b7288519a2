//! Payment record.

use chrono::{DateTime, Utc};
use common::RecordId;
use serde::{Deserialize, Serialize};

/// Lifecycle marker of a payment record.
///
/// Stored records are always `Paid`; `Deleted` only appears on the copy
/// returned by a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Deleted,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "deleted" => Ok(PaymentStatus::Deleted),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: RecordId,
    pub email: String,
    /// Integer minor units, always positive.
    pub amount: i64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// A freshly recorded payment.
    pub fn paid(email: String, amount: i64) -> Self {
        Self {
            id: RecordId::new(),
            email,
            amount,
            status: PaymentStatus::Paid,
            created_at: Utc::now(),
        }
    }
}

impl From<Payment> for rpc::payment::Payment {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id.to_string(),
            email: p.email,
            amount: p.amount,
            status: p.status.to_string(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}
