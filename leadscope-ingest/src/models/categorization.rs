//! Structured categories extracted from a transcript by the remote model
//!
//! Field and variant renames match the JSON the categorization service is
//! instructed to return (Spanish wire names, see `services::prompts`).
//! Fields the model omits fall back to the same defaults the expansion step
//! would apply, so a sparse-but-valid object still deserializes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary business sector (11 fixed values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SectorPrimary {
    #[serde(rename = "Tecnología / Software / SaaS")]
    Technology,
    #[serde(rename = "Retail / E-commerce")]
    Retail,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Consultoría")]
    Consulting,
    #[serde(rename = "Educación / EdTech")]
    Education,
    #[serde(rename = "Alimentación / Restaurantes / Catering")]
    Food,
    #[serde(rename = "Logística / Transporte")]
    Logistics,
    #[serde(rename = "Turismo / Hospitalidad")]
    Tourism,
    #[serde(rename = "Eventos")]
    Events,
    #[serde(rename = "Moda sostenible")]
    SustainableFashion,
    #[default]
    #[serde(rename = "Otros", other)]
    Other,
}

impl SectorPrimary {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectorPrimary::Technology => "Tecnología / Software / SaaS",
            SectorPrimary::Retail => "Retail / E-commerce",
            SectorPrimary::Health => "Salud",
            SectorPrimary::Consulting => "Consultoría",
            SectorPrimary::Education => "Educación / EdTech",
            SectorPrimary::Food => "Alimentación / Restaurantes / Catering",
            SectorPrimary::Logistics => "Logística / Transporte",
            SectorPrimary::Tourism => "Turismo / Hospitalidad",
            SectorPrimary::Events => "Eventos",
            SectorPrimary::SustainableFashion => "Moda sostenible",
            SectorPrimary::Other => "Otros",
        }
    }
}

impl fmt::Display for SectorPrimary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly interaction volume bracket
///
/// The remote model normalizes reported volumes to a weekly cadence before
/// classifying, so the bracket bounds always refer to interactions per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VolumeLevel {
    #[serde(rename = "Bajo (<100)")]
    Low,
    #[serde(rename = "Medio (100-250)")]
    Medium,
    #[serde(rename = "Alto (251-500)")]
    High,
    #[serde(rename = "Muy Alto (>500)")]
    VeryHigh,
    #[default]
    #[serde(rename = "Desconocido", other)]
    Unknown,
}

impl VolumeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeLevel::Low => "Bajo (<100)",
            VolumeLevel::Medium => "Medio (100-250)",
            VolumeLevel::High => "Alto (251-500)",
            VolumeLevel::VeryHigh => "Muy Alto (>500)",
            VolumeLevel::Unknown => "Desconocido",
        }
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the prospect first heard of us (6 fixed values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SourcePrimary {
    #[serde(rename = "Evento/Conferencia")]
    EventConference,
    #[serde(rename = "Recomendación")]
    Referral,
    #[serde(rename = "Búsqueda Online")]
    OnlineSearch,
    #[serde(rename = "LinkedIn/Publicación")]
    LinkedInPost,
    #[serde(rename = "Webinar/Podcast")]
    WebinarPodcast,
    #[default]
    #[serde(rename = "Otro", other)]
    Other,
}

impl SourcePrimary {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePrimary::EventConference => "Evento/Conferencia",
            SourcePrimary::Referral => "Recomendación",
            SourcePrimary::OnlineSearch => "Búsqueda Online",
            SourcePrimary::LinkedInPost => "LinkedIn/Publicación",
            SourcePrimary::WebinarPodcast => "Webinar/Podcast",
            SourcePrimary::Other => "Otro",
        }
    }
}

impl fmt::Display for SourcePrimary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency expressed by the prospect
///
/// Off-enum wire values land on `Unknown` rather than failing the whole
/// response; the record is kept and scored conservatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UrgencyLevel {
    #[serde(rename = "Alta")]
    High,
    #[default]
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Baja")]
    Low,
    #[serde(rename = "Desconocida", other)]
    Unknown,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::High => "Alta",
            UrgencyLevel::Medium => "Media",
            UrgencyLevel::Low => "Baja",
            UrgencyLevel::Unknown => "Desconocida",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concern category (8 fixed values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcernType {
    #[serde(rename = "Integración con sistemas")]
    SystemIntegration,
    #[serde(rename = "Personalización/Tono de marca")]
    BrandPersonalization,
    #[serde(rename = "Confidencialidad/Compliance")]
    Compliance,
    #[serde(rename = "Multilingüe/Internacional")]
    Multilingual,
    #[serde(rename = "Volumen extremo")]
    ExtremeVolume,
    #[serde(rename = "Consultas técnicas complejas")]
    ComplexTechnicalQueries,
    #[serde(rename = "Urgencia en tiempo real")]
    RealTimeUrgency,
    #[serde(rename = "Otra", other)]
    Other,
}

impl ConcernType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernType::SystemIntegration => "Integración con sistemas",
            ConcernType::BrandPersonalization => "Personalización/Tono de marca",
            ConcernType::Compliance => "Confidencialidad/Compliance",
            ConcernType::Multilingual => "Multilingüe/Internacional",
            ConcernType::ExtremeVolume => "Volumen extremo",
            ConcernType::ComplexTechnicalQueries => "Consultas técnicas complejas",
            ConcernType::RealTimeUrgency => "Urgencia en tiempo real",
            ConcernType::Other => "Otra",
        }
    }
}

impl fmt::Display for ConcernType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact of a concern on the deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactLevel {
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Desconocido", other)]
    Unknown,
}

/// One concern raised during the meeting, with a verbatim excerpt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concern {
    #[serde(rename = "tipo")]
    pub concern_type: ConcernType,
    #[serde(rename = "impacto")]
    pub impact: ImpactLevel,
    #[serde(rename = "ejemplo_frase")]
    pub quote_excerpt: String,
}

/// Structured categorization for one transcript
///
/// Produced by the remote service or by [`CategorizationResult::default_fallback`].
/// `categorization_succeeded` is never part of the model response; the batch
/// orchestrator sets it after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizationResult {
    #[serde(rename = "sector_principal", default)]
    pub sector_primary: SectorPrimary,
    #[serde(rename = "sector_secundario", default)]
    pub sector_secondary: Option<String>,
    /// Interactions per week, normalized from whatever cadence the
    /// transcript mentions (daily x7, monthly /4)
    #[serde(rename = "volumen_numerico", default)]
    pub volume_numeric_weekly: Option<i64>,
    #[serde(rename = "volumen_nivel", default)]
    pub volume_level: VolumeLevel,
    #[serde(rename = "es_pico_estacional", default)]
    pub seasonal_peak: bool,
    #[serde(rename = "fuente_primaria", default)]
    pub source_primary: SourcePrimary,
    #[serde(rename = "fuente_detalle", default)]
    pub source_detail: String,
    /// At most 3, ordered by importance
    #[serde(rename = "preocupaciones", default)]
    pub concerns: Vec<Concern>,
    #[serde(rename = "urgencia_nivel", default)]
    pub urgency_level: UrgencyLevel,
    #[serde(rename = "potencial_upsell", default)]
    pub upsell_opportunities: Vec<String>,
    /// False only when this result came from the default fallback
    #[serde(skip_deserializing, default)]
    pub categorization_succeeded: bool,
}

impl CategorizationResult {
    /// Fixed categorization substituted when the remote call cannot be
    /// completed after retries
    pub fn default_fallback() -> Self {
        Self {
            sector_primary: SectorPrimary::Other,
            sector_secondary: None,
            volume_numeric_weekly: None,
            volume_level: VolumeLevel::Unknown,
            seasonal_peak: false,
            source_primary: SourcePrimary::Other,
            source_detail: "No disponible".to_string(),
            concerns: Vec::new(),
            urgency_level: UrgencyLevel::Medium,
            upsell_opportunities: Vec::new(),
            categorization_succeeded: false,
        }
    }
}
