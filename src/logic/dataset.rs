//! Training dataset summary
//!
//! Per-crop box statistics for each feature, computed once from the
//! training CSV at startup.

use std::io::Read;
use std::path::Path;

use crate::models::{BoxStats, DatasetRecord, Feature, FeatureDistribution};
use super::catalog;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no records")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct DatasetSummary {
    total_records: usize,
    features: Vec<FeatureDistribution>,
}

impl DatasetSummary {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        tracing::info!("Loading dataset from: {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let records = csv_reader
            .deserialize::<DatasetRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(&records)
    }

    pub fn from_records(records: &[DatasetRecord]) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        // Crops in first-appearance order
        let mut crops: Vec<&str> = Vec::new();
        for record in records {
            if !crops.contains(&record.label.as_str()) {
                crops.push(&record.label);
            }
        }

        let features = Feature::ALL
            .iter()
            .map(|&feature| FeatureDistribution {
                feature,
                title: feature.title().to_string(),
                by_crop: crops
                    .iter()
                    .map(|crop| {
                        let values: Vec<f64> = records
                            .iter()
                            .filter(|r| r.label == *crop)
                            .map(|r| r.value(feature))
                            .collect();
                        box_stats(crop, values)
                    })
                    .collect(),
            })
            .collect();

        tracing::info!(
            "Dataset summary ready ({} records, {} crops)",
            records.len(),
            crops.len()
        );

        Ok(Self {
            total_records: records.len(),
            features,
        })
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn features(&self) -> &[FeatureDistribution] {
        &self.features
    }

    pub fn feature(&self, feature: Feature) -> Option<&FeatureDistribution> {
        self.features.iter().find(|d| d.feature == feature)
    }
}

/// `values` is non-empty: every crop comes from at least one record.
fn box_stats(crop: &str, mut values: Vec<f64>) -> BoxStats {
    values.sort_by(f64::total_cmp);

    BoxStats {
        crop: crop.to_string(),
        crop_localized: catalog::localize(crop).to_string(),
        count: values.len(),
        min: values.first().copied().unwrap_or(f64::NAN),
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
N,P,K,temperature,humidity,ph,rainfall,label
90,42,43,20.87,82.0,6.5,202.9,rice
85,58,41,21.77,80.3,7.0,226.6,rice
60,55,44,23.0,82.3,7.8,263.9,rice
80,40,40,22.0,81.0,6.9,210.0,rice
71,54,16,22.6,63.6,5.7,87.7,maize
";

    #[test]
    fn test_quantile_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 0.5), 2.5);
        assert_eq!(quantile(&values, 0.25), 1.75);
        assert_eq!(quantile(&values, 1.0), 4.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_summary_from_csv() {
        let summary = DatasetSummary::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(summary.total_records(), 5);
        assert_eq!(summary.features().len(), 7);

        let nitrogen = summary.feature(Feature::Nitrogen).unwrap();
        assert_eq!(nitrogen.title, "Nivel de Nitrógeno");
        let crops: Vec<&str> = nitrogen.by_crop.iter().map(|b| b.crop.as_str()).collect();
        assert_eq!(crops, vec!["rice", "maize"]);

        let rice = &nitrogen.by_crop[0];
        assert_eq!(rice.crop_localized, "Arroz");
        assert_eq!(rice.count, 4);
        assert_eq!(rice.min, 60.0);
        assert_eq!(rice.median, 82.5);
        assert_eq!(rice.max, 90.0);

        let maize = &nitrogen.by_crop[1];
        assert_eq!((maize.min, maize.q1, maize.q3, maize.max), (71.0, 71.0, 71.0, 71.0));
    }

    #[test]
    fn test_empty_and_malformed() {
        let header_only = "N,P,K,temperature,humidity,ph,rainfall,label\n";
        assert!(matches!(
            DatasetSummary::from_reader(header_only.as_bytes()),
            Err(DatasetError::Empty)
        ));

        let bad = "N,P,K,temperature,humidity,ph,rainfall,label\nx,1,1,1,1,1,1,rice\n";
        assert!(matches!(
            DatasetSummary::from_reader(bad.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            DatasetSummary::load(Path::new("/nonexistent/crops.csv")),
            Err(DatasetError::Io(_))
        ));
    }
}
