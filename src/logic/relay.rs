//! Sensor Relay
//!
//! Single-slot, last-value cache for microcontroller readings. Writers
//! overwrite; readers get a copy or `None` before the first write.

use chrono::Utc;
use parking_lot::RwLock;

use crate::models::SensorSample;

#[derive(Debug, Default)]
pub struct SensorRelay {
    latest: RwLock<Option<SensorSample>>,
}

impl SensorRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, temperature: f64, humidity: f64) -> SensorSample {
        let sample = SensorSample {
            temperature,
            humidity,
            received_at: Utc::now(),
        };
        *self.latest.write() = Some(sample);
        sample
    }

    pub fn latest(&self) -> Option<SensorSample> {
        *self.latest.read()
    }
}
