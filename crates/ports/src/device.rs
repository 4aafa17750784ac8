//! In-memory reference device
//!
//! Holds an RF flow id and an RF info packet and validates every change.
//! The flow id and the packet's `rf_flow_id` are kept in step.

use crate::delegate::RfInfoDelegate;
use frontend_core::{DeviceConfig, FrontendError, Result};
use frontend_rf::RfInfoPkt;
use tracing::{info, warn};

/// In-memory RF info device
#[derive(Debug, Clone)]
pub struct RfInfoDevice {
    name: String,
    rf_flow_id: String,
    pkt: RfInfoPkt,
    supports_flow_id: bool,
    supports_info_pkt: bool,
}

impl RfInfoDevice {
    /// Create a device supporting every operation
    pub fn new(name: impl Into<String>, rf_flow_id: impl Into<String>) -> Self {
        let rf_flow_id = rf_flow_id.into();
        let device = Self {
            name: name.into(),
            pkt: RfInfoPkt::new(rf_flow_id.clone()),
            rf_flow_id,
            supports_flow_id: true,
            supports_info_pkt: true,
        };
        info!(device = %device.name, rf_flow_id = %device.rf_flow_id, "Device created");
        device
    }

    /// Create a device from configuration.
    ///
    /// The configured flow id must pass [`validate_rf_flow_id`].
    pub fn from_config(config: &DeviceConfig) -> Result<Self> {
        validate_rf_flow_id(&config.rf_flow_id).map_err(|err| {
            warn!(device = %config.name, error = %err, "Invalid configured RF flow id");
            err
        })?;
        let mut device = Self::new(config.name.clone(), config.rf_flow_id.clone());
        device.supports_flow_id = config.supports_flow_id;
        device.supports_info_pkt = config.supports_info_pkt;
        Ok(device)
    }

    /// Device name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flow id as stored, regardless of what is supported
    pub fn current_flow_id(&self) -> &str {
        &self.rf_flow_id
    }

    /// Packet as stored, regardless of what is supported
    pub fn current_pkt(&self) -> &RfInfoPkt {
        &self.pkt
    }

    fn require_flow_id(&self, operation: &str) -> Result<()> {
        if self.supports_flow_id {
            Ok(())
        } else {
            let err = FrontendError::not_supported(format!("{}: {}", self.name, operation));
            Err(self.reject(operation, err))
        }
    }

    fn require_info_pkt(&self, operation: &str) -> Result<()> {
        if self.supports_info_pkt {
            Ok(())
        } else {
            let err = FrontendError::not_supported(format!("{}: {}", self.name, operation));
            Err(self.reject(operation, err))
        }
    }

    fn reject(&self, operation: &str, err: FrontendError) -> FrontendError {
        warn!(device = %self.name, operation, error = %err, "Rejected");
        err
    }
}

/// Flow ids must be non-empty and free of control characters.
pub fn validate_rf_flow_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(FrontendError::bad_parameter("rf_flow_id is empty"));
    }
    if id.chars().any(char::is_control) {
        return Err(FrontendError::bad_parameter(format!(
            "rf_flow_id contains control characters: {:?}",
            id
        )));
    }
    Ok(())
}

impl RfInfoDelegate for RfInfoDevice {
    fn rf_flow_id(&self) -> Result<String> {
        self.require_flow_id("rf_flow_id")?;
        Ok(self.rf_flow_id.clone())
    }

    fn set_rf_flow_id(&mut self, id: String) -> Result<()> {
        self.require_flow_id("set_rf_flow_id")?;
        validate_rf_flow_id(&id).map_err(|err| self.reject("set_rf_flow_id", err))?;

        info!(device = %self.name, from = %self.rf_flow_id, to = %id, "RF flow id changed");
        self.pkt.rf_flow_id = id.clone();
        self.rf_flow_id = id;
        Ok(())
    }

    fn rf_info_pkt(&self) -> Result<RfInfoPkt> {
        self.require_info_pkt("rf_info_pkt")?;
        Ok(self.pkt.clone())
    }

    fn set_rf_info_pkt(&mut self, mut pkt: RfInfoPkt) -> Result<()> {
        self.require_info_pkt("set_rf_info_pkt")?;
        pkt.validate()
            .map_err(|err| self.reject("set_rf_info_pkt", err))?;

        if pkt.rf_flow_id.is_empty() {
            pkt.rf_flow_id = self.rf_flow_id.clone();
        } else {
            validate_rf_flow_id(&pkt.rf_flow_id)
                .map_err(|err| self.reject("set_rf_info_pkt", err))?;
            self.rf_flow_id = pkt.rf_flow_id.clone();
        }

        info!(
            device = %self.name,
            rf_flow_id = %pkt.rf_flow_id,
            rf_center_freq = pkt.rf_center_freq,
            rf_bandwidth = pkt.rf_bandwidth,
            "RF info packet replaced"
        );
        self.pkt = pkt;
        Ok(())
    }
}
