//! Data model for the lead categorization pipeline

pub mod categorization;
pub mod record;
pub mod upload;

pub use categorization::{
    CategorizationResult, Concern, ConcernType, ImpactLevel, SectorPrimary, SourcePrimary,
    UrgencyLevel, VolumeLevel,
};
pub use record::{EnrichedRecord, IdentityKey, TranscriptRecord};
pub use upload::{validate_rows, RawMeetingRow};
