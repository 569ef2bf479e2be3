//! Sensor relay model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Most recent microcontroller reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub temperature: f64,
    pub humidity: f64,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SensorReadingRequest {
    pub temperature: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SensorReadingResponse {
    pub status: &'static str,
    pub temperature: f64,
    pub humidity: f64,
}

/// Reader payload; all fields null before the first write
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LatestSensorResponse {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub received_at: Option<DateTime<Utc>>,
}

impl From<Option<SensorSample>> for LatestSensorResponse {
    fn from(sample: Option<SensorSample>) -> Self {
        match sample {
            Some(s) => Self {
                temperature: Some(s.temperature),
                humidity: Some(s.humidity),
                received_at: Some(s.received_at),
            },
            None => Self::default(),
        }
    }
}
