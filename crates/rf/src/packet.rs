//! RF info packet model
//!
//! Frequencies and bandwidths are in Hz, delays in nanoseconds. A packet is
//! always exchanged by value; holders never share one mutably.

use frontend_core::{FrontendError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Frequency range with optional discrete values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FreqRange {
    /// Lower bound in Hz
    pub min_val: f64,
    /// Upper bound in Hz
    pub max_val: f64,
    /// Discrete values inside the range, if the hardware only supports those
    pub values: Vec<f64>,
}

/// Antenna description
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AntennaInfo {
    /// Antenna name
    pub name: String,
    /// Antenna type, e.g. "dipole"
    #[serde(rename = "type")]
    pub antenna_type: String,
    /// Physical size, free text
    pub size: String,
    /// Free text description
    pub description: String,
}

/// Feed description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedInfo {
    /// Feed name
    pub name: String,
    /// Polarization, e.g. "RHCP"
    pub polarization: String,
    /// Frequency coverage of the feed
    pub freq_range: FreqRange,
}

/// Sensor chain the RF flow originates from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorInfo {
    /// Mission name
    pub mission: String,
    /// Collector name
    pub collector: String,
    /// Receiver name
    pub rx: String,
    /// Antenna
    pub antenna: AntennaInfo,
    /// Feed
    pub feed: FeedInfo,
}

/// External path delay at a given frequency
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathDelay {
    /// Frequency in Hz
    pub freq: f64,
    /// Delay in nanoseconds
    pub delay_ns: f64,
}

/// Tuning capabilities of the RF front end
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RfCapabilities {
    /// Tunable frequency range
    pub freq_range: FreqRange,
    /// Supported bandwidth range
    pub bw_range: FreqRange,
}

/// RF info packet describing the RF flow feeding a front-end device
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RfInfoPkt {
    /// RF flow identifier
    pub rf_flow_id: String,
    /// RF center frequency in Hz
    pub rf_center_freq: f64,
    /// RF bandwidth in Hz
    pub rf_bandwidth: f64,
    /// IF center frequency in Hz
    pub if_center_freq: f64,
    /// Whether the spectrum is inverted
    pub spectrum_inverted: bool,
    /// Sensor chain
    pub sensor: SensorInfo,
    /// External path delays
    pub ext_path_delays: Vec<PathDelay>,
    /// Tuning capabilities
    pub capabilities: RfCapabilities,
    /// Device specific properties
    pub additional_info: BTreeMap<String, serde_json::Value>,
}

impl FreqRange {
    /// Create a continuous range
    pub fn new(min_val: f64, max_val: f64) -> Self {
        Self {
            min_val,
            max_val,
            values: Vec::new(),
        }
    }

    /// Check if `freq` lies inside the range (bounds inclusive)
    pub fn contains(&self, freq: f64) -> bool {
        freq >= self.min_val && freq <= self.max_val
    }

    fn check_finite(&self, field: &str) -> Result<()> {
        check_finite(&format!("{}.min_val", field), self.min_val)?;
        check_finite(&format!("{}.max_val", field), self.max_val)?;
        for (i, value) in self.values.iter().enumerate() {
            check_finite(&format!("{}.values[{}]", field, i), *value)?;
        }
        Ok(())
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.min_val > self.max_val {
            return Err(FrontendError::bad_parameter(format!(
                "{}: min_val {} exceeds max_val {}",
                field, self.min_val, self.max_val
            )));
        }
        Ok(())
    }
}

impl RfInfoPkt {
    /// Create an otherwise empty packet for `rf_flow_id`
    pub fn new(rf_flow_id: impl Into<String>) -> Self {
        Self {
            rf_flow_id: rf_flow_id.into(),
            ..Default::default()
        }
    }

    /// Check that every numeric field is finite.
    ///
    /// JSON has no representation for NaN or infinity, so a packet failing
    /// this check cannot cross a process boundary intact.
    pub fn check_finite(&self) -> Result<()> {
        check_finite("rf_center_freq", self.rf_center_freq)?;
        check_finite("rf_bandwidth", self.rf_bandwidth)?;
        check_finite("if_center_freq", self.if_center_freq)?;
        self.sensor
            .feed
            .freq_range
            .check_finite("sensor.feed.freq_range")?;
        self.capabilities
            .freq_range
            .check_finite("capabilities.freq_range")?;
        self.capabilities
            .bw_range
            .check_finite("capabilities.bw_range")?;
        for (i, delay) in self.ext_path_delays.iter().enumerate() {
            check_finite(&format!("ext_path_delays[{}].freq", i), delay.freq)?;
            check_finite(&format!("ext_path_delays[{}].delay_ns", i), delay.delay_ns)?;
        }
        Ok(())
    }

    /// Reject packets no device could be tuned to.
    ///
    /// Fails with [`FrontendError::BadParameter`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        self.check_finite()?;
        if self.rf_bandwidth < 0.0 {
            return Err(FrontendError::bad_parameter(format!(
                "rf_bandwidth is negative: {}",
                self.rf_bandwidth
            )));
        }

        self.sensor.feed.freq_range.validate("sensor.feed.freq_range")?;
        self.capabilities
            .freq_range
            .validate("capabilities.freq_range")?;
        self.capabilities.bw_range.validate("capabilities.bw_range")?;

        for (i, delay) in self.ext_path_delays.iter().enumerate() {
            if delay.delay_ns < 0.0 {
                return Err(FrontendError::bad_parameter(format!(
                    "ext_path_delays[{}].delay_ns is negative: {}",
                    i, delay.delay_ns
                )));
            }
        }

        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FrontendError::bad_parameter(format!(
            "{} is not finite: {}",
            field, value
        )))
    }
}
