//! Transcript records and their identity keys

use super::categorization::CategorizationResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One validated sales-meeting transcript row
///
/// Immutable once persisted; a full pipeline re-run deletes and regenerates
/// all persisted rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub meeting_date: NaiveDate,
    pub assigned_seller: String,
    pub closed: bool,
    /// Required non-empty free text
    pub transcript: String,
}

impl TranscriptRecord {
    /// Natural key used for duplicate detection against persisted rows
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            client_name: self.client_name.clone(),
            email: self.email.clone(),
            meeting_date: self.meeting_date.to_string(),
        }
    }
}

/// Exact-match `(client_name, email, meeting_date)` triple
///
/// The meeting date is compared as its ISO string form, matching how it is
/// stored in the database. No fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub client_name: String,
    pub email: String,
    pub meeting_date: String,
}

/// A transcript record merged with its categorization
///
/// This denormalized pair is what the persistence layer owns. The
/// `concerns_text` field is a derived cache of `concerns` (type + quote
/// excerpt, space-joined) used for search; it is recomputed on load rather
/// than trusted as a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: TranscriptRecord,
    #[serde(flatten)]
    pub categorization: CategorizationResult,
    pub concerns_text: String,
}
