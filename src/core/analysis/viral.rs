// src/core/analysis/viral.rs
//
// Viral potential assessment: six deterministic factors derived from the
// other analyses, averaged into an overall score and a rating.

use serde::Serialize;

use crate::core::analysis::beat::BeatAnalysis;
use crate::core::analysis::energy::EnergyAnalysis;
use crate::core::analysis::hooks::HookAnalysis;
use crate::core::analysis::spectral::SpectralAnalysis;
use crate::core::analysis::vocal::VocalAnalysis;

/// Spectral centroid treated as the most common, in Hz
const TYPICAL_CENTROID: f32 = 2000.0;

/// Overall rating bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViralPotential {
    High,
    Medium,
    Low,
}

impl ViralPotential {
    /// Bucket an overall score: above 0.7 is High, above 0.5 Medium
    pub fn from_score(score: f32) -> Self {
        if score > 0.7 {
            ViralPotential::High
        } else if score > 0.5 {
            ViralPotential::Medium
        } else {
            ViralPotential::Low
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ViralPotential::High => "✓",
            ViralPotential::Medium => "?",
            ViralPotential::Low => "✗",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ViralPotential::High => "Strong hook and rhythm profile, likely to carry a short clip",
            ViralPotential::Medium => "Some catchy elements, needs the right clip to take off",
            ViralPotential::Low => "Weak hook profile for short-form clips",
        }
    }
}

/// The six factors, their mean, and the resulting rating
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralAnalysis {
    /// Best and average hook scores combined
    pub catchiness: f32,
    /// Hook strength tempered by frequency stability
    pub memorability: f32,
    /// Sustained energy plus vocal presence
    pub shareability: f32,
    /// Beat strength, regularity, and a dance-tempo bonus
    pub danceability: f32,
    /// Dynamic range plus energy variation
    pub emotional_impact: f32,
    /// Frequency variation plus distance from the typical centroid
    pub uniqueness: f32,
    /// Mean of the six factors, in [0, 1]
    pub overall_viral_score: f32,
    pub viral_potential: ViralPotential,
}

/// Combine the per-domain analyses into the six viral factors.
///
/// Every factor is clamped to [0, 1]. The danceability bonus follows
/// `BeatAnalysis::is_danceable`, which requires a measured tempo between
/// 120 and 140 BPM; a fallback tempo never earns it.
pub fn assess_viral_potential(
    energy: &EnergyAnalysis,
    spectral: &SpectralAnalysis,
    beat: &BeatAnalysis,
    vocal: &VocalAnalysis,
    hooks: &HookAnalysis,
) -> ViralAnalysis {
    let best_hook = hooks.best_hook.as_ref().map(|h| h.score).unwrap_or(0.0);
    let avg_hook = hooks.average_hook_potential;

    let catchiness = (0.6 * best_hook + 0.4 * avg_hook).clamp(0.0, 1.0);

    let memorability =
        (0.5 * avg_hook + 0.5 * (1.0 - spectral.frequency_variation)).clamp(0.0, 1.0);

    let sustained = if energy.max < 1e-10 {
        0.0
    } else {
        (energy.average / energy.max).clamp(0.0, 1.0)
    };
    let shareability = (0.6 * sustained + 0.4 * vocal.presence).clamp(0.0, 1.0);

    let dance_bonus = if beat.is_danceable { 1.0 } else { 0.0 };
    let danceability =
        (beat.strength * (0.5 + 0.3 * beat.consistency) + 0.2 * dance_bonus).clamp(0.0, 1.0);

    let emotional_impact = (energy.dynamic_range + energy.variation).clamp(0.0, 1.0);

    let centroid_distance =
        ((spectral.spectral_centroid - TYPICAL_CENTROID).abs() / TYPICAL_CENTROID).min(1.0);
    let uniqueness = (0.6 * spectral.frequency_variation + 0.4 * centroid_distance).clamp(0.0, 1.0);

    let overall = ((catchiness
        + memorability
        + shareability
        + danceability
        + emotional_impact
        + uniqueness)
        / 6.0)
        .clamp(0.0, 1.0);

    ViralAnalysis {
        catchiness,
        memorability,
        shareability,
        danceability,
        emotional_impact,
        uniqueness,
        overall_viral_score: overall,
        viral_potential: ViralPotential::from_score(overall),
    }
}
