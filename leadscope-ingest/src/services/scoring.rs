//! Lead potential scoring
//!
//! Pure and deterministic: the same enriched record always produces the
//! same score. Scores are derived on demand and never persisted.
//!
//! Formula: base = mean(volume points, urgency points, scalability points),
//! plus a trigger bonus and a budget bonus, capped at 100, rounded to one
//! decimal. The fixed point lookups are part of the algorithm; the keyword
//! lists are configuration data (they are language- and market-specific),
//! defaulting to the Spanish-market sets.

use crate::models::{
    CategorizationResult, EnrichedRecord, SectorPrimary, UrgencyLevel, VolumeLevel,
};

/// Keyword configuration for the score bonuses
///
/// All matching is case-insensitive substring search; keywords should be
/// lowercase.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// High-quality referral signals: +5 trigger bonus
    pub high_quality_triggers: Vec<String>,
    /// Active-search signals: +3 trigger bonus (only when no high-quality
    /// trigger matched)
    pub active_search_terms: Vec<String>,
    /// Large-scale-operation indicators in the transcript: +5 budget bonus
    pub budget_indicators: Vec<String>,
    /// Sectors with implied budget: +3 budget bonus
    pub high_budget_sectors: Vec<SectorPrimary>,
    /// Upsell entries that signal multilingual/international scalability
    pub multilingual_upsell_signals: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let to_strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

        Self {
            high_quality_triggers: to_strings(&[
                "recomendación",
                "recomendó",
                "colega",
                "amigo en la industria",
                "conferencia",
                "seminario",
                "webinar",
                "feria",
                "evento",
                "linkedin",
                "podcast",
                "charla",
                "taller",
                "forum",
            ]),
            active_search_terms: to_strings(&["google", "artículo", "búsqueda", "encontré"]),
            budget_indicators: to_strings(&[
                "internacional",
                "global",
                "multinacional",
                "múltiples sedes",
                "operaciones internacionales",
                "distintos países",
                "gran escala",
                "corporativo",
                "empresa grande",
            ]),
            high_budget_sectors: vec![
                SectorPrimary::Technology,
                SectorPrimary::Consulting,
                SectorPrimary::Health,
            ],
            multilingual_upsell_signals: to_strings(&["multilingüe", "internacional"]),
        }
    }
}

/// Lead potential scorer
#[derive(Debug, Clone, Default)]
pub struct LeadScorer {
    config: ScoringConfig,
}

impl LeadScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Compute the lead potential score, in [0, 100] with one decimal
    pub fn score(&self, record: &EnrichedRecord) -> f64 {
        let categorization = &record.categorization;

        let base = (volume_points(categorization.volume_level)
            + urgency_points(categorization.urgency_level)
            + self.scalability_points(categorization))
            / 3.0;

        let source_text = format!(
            "{} {} {}",
            categorization.source_primary, categorization.source_detail, record.record.transcript
        )
        .to_lowercase();
        let transcript_lower = record.record.transcript.to_lowercase();

        let trigger_bonus = self.trigger_bonus(&source_text);
        let budget_bonus =
            self.budget_bonus(categorization.sector_primary, &transcript_lower);

        let final_score = (base + trigger_bonus + budget_bonus).min(100.0);
        round_one_decimal(final_score)
    }

    /// Scalability sub-score: seasonal peaks and international reach scale
    /// best, a long upsell list is a weaker signal, 40 is the baseline
    fn scalability_points(&self, categorization: &CategorizationResult) -> f64 {
        if categorization.seasonal_peak {
            return 100.0;
        }

        let has_multilingual_signal = categorization.upsell_opportunities.iter().any(|item| {
            let item = item.to_lowercase();
            self.config
                .multilingual_upsell_signals
                .iter()
                .any(|signal| item.contains(signal))
        });
        if has_multilingual_signal {
            return 100.0;
        }

        if categorization.upsell_opportunities.len() >= 3 {
            return 70.0;
        }

        40.0
    }

    /// Trigger bonus over source + detail + transcript; highest tier wins
    fn trigger_bonus(&self, combined_text: &str) -> f64 {
        if self
            .config
            .high_quality_triggers
            .iter()
            .any(|t| combined_text.contains(t.as_str()))
        {
            return 5.0;
        }
        if self
            .config
            .active_search_terms
            .iter()
            .any(|t| combined_text.contains(t.as_str()))
        {
            return 3.0;
        }
        0.0
    }

    /// Budget bonus: explicit large-scale indicators beat sector heuristics
    fn budget_bonus(&self, sector: SectorPrimary, transcript_lower: &str) -> f64 {
        if self
            .config
            .budget_indicators
            .iter()
            .any(|t| transcript_lower.contains(t.as_str()))
        {
            return 5.0;
        }
        if self.config.high_budget_sectors.contains(&sector) {
            return 3.0;
        }
        0.0
    }
}

/// Volume bracket points (fixed lookup)
fn volume_points(level: VolumeLevel) -> f64 {
    match level {
        VolumeLevel::Unknown => 0.0,
        VolumeLevel::Low => 20.0,
        VolumeLevel::Medium => 50.0,
        VolumeLevel::High => 80.0,
        VolumeLevel::VeryHigh => 100.0,
    }
}

/// Urgency points (fixed lookup); unrecognized urgency scores like Low
fn urgency_points(level: UrgencyLevel) -> f64 {
    match level {
        UrgencyLevel::Low | UrgencyLevel::Unknown => 30.0,
        UrgencyLevel::Medium => 60.0,
        UrgencyLevel::High => 100.0,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
