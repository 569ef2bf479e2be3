//! Advisory text generation
//!
//! Baseline guidance from the catalog plus warnings from the submitted
//! temperature, humidity and pH.

use crate::models::{AdvisoryProfile, FeatureVector};
use super::catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryWarning {
    Heat,
    Cold,
    FungalRisk,
    Irrigation,
    Acidity,
    Alkalinity,
}

impl AdvisoryWarning {
    pub fn message(self) -> &'static str {
        match self {
            AdvisoryWarning::Heat => "Temperatura alta - considerar sombra o riego adicional",
            AdvisoryWarning::Cold => "Temperatura baja - puede retrasar germinación",
            AdvisoryWarning::FungalRisk => "Humedad alta - riesgo de enfermedades fúngicas",
            AdvisoryWarning::Irrigation => "Humedad baja - aumentar frecuencia de riego",
            AdvisoryWarning::Acidity => "Suelo ácido - considerar aplicar cal",
            AdvisoryWarning::Alkalinity => "Suelo alcalino - añadir materia orgánica",
        }
    }
}

/// Threshold rules, in reporting order. Bounds are strict.
pub fn warnings_for(features: &FeatureVector) -> Vec<AdvisoryWarning> {
    let mut warnings = Vec::new();

    if features.temperature > 35.0 {
        warnings.push(AdvisoryWarning::Heat);
    } else if features.temperature < 15.0 {
        warnings.push(AdvisoryWarning::Cold);
    }

    if features.humidity > 80.0 {
        warnings.push(AdvisoryWarning::FungalRisk);
    } else if features.humidity < 30.0 {
        warnings.push(AdvisoryWarning::Irrigation);
    }

    if features.ph < 6.0 {
        warnings.push(AdvisoryWarning::Acidity);
    } else if features.ph > 8.0 {
        warnings.push(AdvisoryWarning::Alkalinity);
    }

    warnings
}

/// Build the advisory for `crop`. Crops without catalog guidance get empty
/// guidance fields; warnings are always evaluated.
pub fn advise(crop: &str, features: &FeatureVector) -> AdvisoryProfile {
    let mut profile = match catalog::guidance(crop) {
        Some(g) => AdvisoryProfile {
            planting_season: g.planting_season.to_string(),
            irrigation_recommendation: g.irrigation.to_string(),
            fertilization_recommendation: g.fertilization.to_string(),
            growth_duration: g.growth_duration.to_string(),
            expected_yield: g.expected_yield.to_string(),
            ..Default::default()
        },
        None => AdvisoryProfile::default(),
    };

    profile.climate_warnings = warnings_for(features)
        .into_iter()
        .map(AdvisoryWarning::message)
        .collect::<Vec<_>>()
        .join("; ");

    profile
}
