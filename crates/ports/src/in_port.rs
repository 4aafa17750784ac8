//! Provides-side RF info port
//!
//! Incoming calls are forwarded to the delegate installed by the owning
//! device. Calls into the delegate are serialised by its mutex.

use crate::delegate::RfInfoDelegate;
use crate::remote::{lock_delegate, RfInfoRemote};
use frontend_core::{FrontendError, Result};
use frontend_rf::RfInfoPkt;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, warn};

/// Delegate shared between a device and its port
pub type SharedDelegate = Arc<Mutex<dyn RfInfoDelegate>>;

/// Provides-side RF info port
pub struct InRfInfoPort {
    name: String,
    delegate: RwLock<Option<SharedDelegate>>,
}

impl InRfInfoPort {
    /// Create a port with no delegate installed
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delegate: RwLock::new(None),
        }
    }

    /// Create a port forwarding to `delegate`
    pub fn with_delegate(name: impl Into<String>, delegate: SharedDelegate) -> Self {
        let port = Self::new(name);
        port.set_delegate(delegate);
        port
    }

    /// Port name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install or replace the delegate
    pub fn set_delegate(&self, delegate: SharedDelegate) {
        match self.delegate.write() {
            Ok(mut slot) => *slot = Some(delegate),
            Err(poisoned) => *poisoned.into_inner() = Some(delegate),
        }
        debug!(port = %self.name, "Delegate installed");
    }

    /// Remove the delegate; later calls fail until a new one is installed
    pub fn clear_delegate(&self) {
        match self.delegate.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        debug!(port = %self.name, "Delegate cleared");
    }

    /// Check if a delegate is installed
    pub fn has_delegate(&self) -> bool {
        self.delegate
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn delegate_for(&self, operation: &str) -> Result<SharedDelegate> {
        let slot = self.delegate.read().map_err(|_| {
            FrontendError::frontend(format!("{} delegate slot poisoned", self.name))
        })?;
        match slot.as_ref() {
            Some(delegate) => Ok(Arc::clone(delegate)),
            None => {
                warn!(port = %self.name, operation, "No delegate installed");
                Err(FrontendError::frontend(format!(
                    "{} {} callback delegate not defined",
                    self.name, operation
                )))
            }
        }
    }
}

impl RfInfoRemote for InRfInfoPort {
    fn rf_flow_id(&self) -> Result<String> {
        let delegate = self.delegate_for("rf_flow_id")?;
        let guard = lock_delegate(&*delegate, &self.name)?;
        guard.rf_flow_id()
    }

    fn set_rf_flow_id(&self, id: &str) -> Result<()> {
        let delegate = self.delegate_for("set_rf_flow_id")?;
        let mut guard = lock_delegate(&*delegate, &self.name)?;
        guard.set_rf_flow_id(id.to_string())
    }

    fn rf_info_pkt(&self) -> Result<RfInfoPkt> {
        let delegate = self.delegate_for("rf_info_pkt")?;
        let guard = lock_delegate(&*delegate, &self.name)?;
        guard.rf_info_pkt()
    }

    fn set_rf_info_pkt(&self, pkt: &RfInfoPkt) -> Result<()> {
        let delegate = self.delegate_for("set_rf_info_pkt")?;
        let mut guard = lock_delegate(&*delegate, &self.name)?;
        guard.set_rf_info_pkt(pkt.clone())
    }
}

impl RfInfoDelegate for InRfInfoPort {
    fn rf_flow_id(&self) -> Result<String> {
        RfInfoRemote::rf_flow_id(self)
    }

    fn set_rf_flow_id(&mut self, id: String) -> Result<()> {
        RfInfoRemote::set_rf_flow_id(self, &id)
    }

    fn rf_info_pkt(&self) -> Result<RfInfoPkt> {
        RfInfoRemote::rf_info_pkt(self)
    }

    fn set_rf_info_pkt(&mut self, pkt: RfInfoPkt) -> Result<()> {
        RfInfoRemote::set_rf_info_pkt(self, &pkt)
    }
}

impl std::fmt::Debug for InRfInfoPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InRfInfoPort")
            .field("name", &self.name)
            .field("has_delegate", &self.has_delegate())
            .finish()
    }
}
