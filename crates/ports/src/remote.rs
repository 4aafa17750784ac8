//! Caller-side view of an RF info servant.

use crate::delegate::RfInfoDelegate;
use frontend_core::{FrontendError, Result};
use frontend_rf::RfInfoPkt;
use std::sync::{Mutex, MutexGuard};

/// RF info operations on a servant reachable through a shared handle.
///
/// Unlike [`RfInfoDelegate`], every operation takes `&self`: the servant
/// serialises access on its own side. An unreachable servant reports
/// [`FrontendError::Frontend`].
pub trait RfInfoRemote: Send + Sync {
    /// Current RF flow identifier
    fn rf_flow_id(&self) -> Result<String>;

    /// Replace the RF flow identifier
    fn set_rf_flow_id(&self, id: &str) -> Result<()>;

    /// Copy of the current RF info packet
    fn rf_info_pkt(&self) -> Result<RfInfoPkt>;

    /// Replace the RF info packet
    fn set_rf_info_pkt(&self, pkt: &RfInfoPkt) -> Result<()>;
}

pub(crate) fn lock_delegate<'a, D: ?Sized>(
    delegate: &'a Mutex<D>,
    owner: &str,
) -> Result<MutexGuard<'a, D>> {
    delegate
        .lock()
        .map_err(|_| FrontendError::frontend(format!("{}: delegate lock poisoned", owner)))
}

/// A locally held delegate, e.g. `Arc<Mutex<RfInfoDevice>>`.
impl<D: RfInfoDelegate + ?Sized> RfInfoRemote for Mutex<D> {
    fn rf_flow_id(&self) -> Result<String> {
        lock_delegate(self, "local servant")?.rf_flow_id()
    }

    fn set_rf_flow_id(&self, id: &str) -> Result<()> {
        lock_delegate(self, "local servant")?.set_rf_flow_id(id.to_string())
    }

    fn rf_info_pkt(&self) -> Result<RfInfoPkt> {
        lock_delegate(self, "local servant")?.rf_info_pkt()
    }

    fn set_rf_info_pkt(&self, pkt: &RfInfoPkt) -> Result<()> {
        lock_delegate(self, "local servant")?.set_rf_info_pkt(pkt.clone())
    }
}
