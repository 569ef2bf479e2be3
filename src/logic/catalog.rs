//! Crop catalog
//!
//! Static lookup tables built once on first use: display names in the
//! service locale (Spanish) and baseline cultivation guidance.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Cultivation guidance for one crop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGuidance {
    pub planting_season: &'static str,
    pub irrigation: &'static str,
    pub fertilization: &'static str,
    pub growth_duration: &'static str,
    pub expected_yield: &'static str,
}

static TRANSLATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("apple", "Manzana"),
        ("banana", "Plátano"),
        ("blackgram", "Frijol negro"),
        ("chickpea", "Garbanzo"),
        ("coffee", "Café"),
        ("coconut", "Coco"),
        ("cotton", "Algodón"),
        ("grapes", "Uvas"),
        ("jute", "Yute"),
        ("kidneybeans", "Frijoles rojos"),
        ("lentil", "Lentejas"),
        ("maize", "Maíz"),
        ("mango", "Mango"),
        ("mothbeans", "Frijoles de polilla"),
        ("mungbean", "Frijol mungo"),
        ("muskmelon", "Melón"),
        ("orange", "Naranja"),
        ("papaya", "Papaya"),
        ("pigeonpeas", "Guisante de paloma"),
        ("pomegranate", "Granada"),
        ("rice", "Arroz"),
        ("watermelon", "Sandía"),
    ])
});

static GUIDANCE: Lazy<HashMap<&'static str, CropGuidance>> = Lazy::new(|| {
    HashMap::from([
        (
            "rice",
            CropGuidance {
                planting_season: "Época de lluvias (junio-julio)",
                irrigation: "Mantener suelo inundado durante crecimiento",
                fertilization: "Aplicar nitrógeno en 3 etapas",
                growth_duration: "120-150 días",
                expected_yield: "4-6 toneladas/hectárea",
            },
        ),
        (
            "maize",
            CropGuidance {
                planting_season: "Inicio de temporada de lluvias",
                irrigation: "Riego regular, evitar encharcamiento",
                fertilization: "NPK 20-10-10 al momento de siembra",
                growth_duration: "90-120 días",
                expected_yield: "3-5 toneladas/hectárea",
            },
        ),
        (
            "cotton",
            CropGuidance {
                planting_season: "Abril-mayo",
                irrigation: "Riego por goteo recomendado",
                fertilization: "Alto requerimiento de potasio",
                growth_duration: "180-200 días",
                expected_yield: "1-2 toneladas/hectárea",
            },
        ),
    ])
});

/// Localized display name; unknown identifiers are returned unchanged
pub fn localize(crop: &str) -> &str {
    TRANSLATIONS.get(crop).copied().unwrap_or(crop)
}

pub fn guidance(crop: &str) -> Option<&'static CropGuidance> {
    GUIDANCE.get(crop)
}
