//! Defines the core data models for transactions.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, OffsetDateTime, macros::date};

// ============================================================================
// MODELS
// ============================================================================

/// The opaque identifier of a transaction.
///
/// Records persisted by the backend carry the ID the backend assigned (which
/// may be a number or a string on the wire). Records that only exist on this
/// screen carry an ID derived from the time they were created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an ID as given by the backend or a URL path.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create an ID for a record that has not been persisted remotely.
    ///
    /// The ID is the number of milliseconds since the Unix epoch at `now`.
    pub fn local(now: OffsetDateTime) -> Self {
        Self((now.unix_timestamp_nanos() / 1_000_000).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(number) => Self(number.to_string()),
            RawId::Text(text) => Self(text),
        })
    }
}

/// Whether a transaction exists in the remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// The backend stored the transaction and assigned its ID.
    Synced,
    /// The transaction only exists in this screen's memory and is lost when
    /// the screen goes away.
    LocalOnly,
}

/// A cash advance handed to a person, acknowledged with their signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The full name of the person who received the money.
    pub person_name: String,
    /// When the money was handed over.
    pub date: Date,
    /// How much money was handed over. Never negative.
    pub amount: Decimal,
    /// Free text about the transaction, kept exactly as entered.
    pub notes: Option<String>,
    /// The person's signature as a PNG data URI.
    pub signature: String,
    /// When the record was created, if known.
    pub created_at: Option<OffsetDateTime>,
    /// Whether the record has been persisted remotely.
    pub sync: SyncState,
}

/// A validated transaction that has not been stored anywhere yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub person_name: String,
    pub date: Date,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub signature: String,
}

impl NewTransaction {
    /// Turn the transaction into a record that only exists locally.
    ///
    /// Used when the backend could not store the transaction.
    pub fn into_local(self, now: OffsetDateTime) -> Transaction {
        Transaction {
            id: TransactionId::local(now),
            person_name: self.person_name,
            date: self.date,
            amount: self.amount,
            notes: self.notes,
            signature: self.signature,
            created_at: Some(now),
            sync: SyncState::LocalOnly,
        }
    }
}

/// A 1x1 transparent PNG, used as the signature of the demonstration records.
pub const PLACEHOLDER_SIGNATURE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// The records shown when the transaction list could not be loaded.
pub fn demo_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: TransactionId::new("demo-1"),
            person_name: "João Silva".to_owned(),
            date: date!(2024 - 06 - 19),
            amount: Decimal::new(15000, 2),
            notes: Some("Emergência médica - consulta".to_owned()),
            signature: PLACEHOLDER_SIGNATURE.to_owned(),
            created_at: None,
            sync: SyncState::LocalOnly,
        },
        Transaction {
            id: TransactionId::new("demo-2"),
            person_name: "Maria Santos".to_owned(),
            date: date!(2024 - 06 - 18),
            amount: Decimal::new(30000, 2),
            notes: Some("Medicamentos urgentes".to_owned()),
            signature: PLACEHOLDER_SIGNATURE.to_owned(),
            created_at: None,
            sync: SyncState::LocalOnly,
        },
    ]
}
