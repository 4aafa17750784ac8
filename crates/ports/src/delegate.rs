//! RF info capability implemented by front-end devices.

use frontend_core::{FrontendError, Result};
use frontend_rf::RfInfoPkt;

/// RF flow id and RF info packet access on a front-end device.
///
/// Each operation may fail with any [`FrontendError`] kind. Implementations
/// that do not provide an operation can leave its default body, which
/// reports [`FrontendError::NotSupported`].
pub trait RfInfoDelegate: Send {
    /// Current RF flow identifier
    fn rf_flow_id(&self) -> Result<String> {
        Err(FrontendError::not_supported("rf_flow_id"))
    }

    /// Replace the RF flow identifier.
    ///
    /// [`FrontendError::BadParameter`] signals an invalid identifier.
    fn set_rf_flow_id(&mut self, id: String) -> Result<()> {
        let _ = id;
        Err(FrontendError::not_supported("set_rf_flow_id"))
    }

    /// Copy of the current RF info packet
    fn rf_info_pkt(&self) -> Result<RfInfoPkt> {
        Err(FrontendError::not_supported("rf_info_pkt"))
    }

    /// Replace the RF info packet.
    ///
    /// [`FrontendError::BadParameter`] signals a malformed packet.
    fn set_rf_info_pkt(&mut self, pkt: RfInfoPkt) -> Result<()> {
        let _ = pkt;
        Err(FrontendError::not_supported("set_rf_info_pkt"))
    }
}

impl<D: RfInfoDelegate + ?Sized> RfInfoDelegate for Box<D> {
    fn rf_flow_id(&self) -> Result<String> {
        (**self).rf_flow_id()
    }

    fn set_rf_flow_id(&mut self, id: String) -> Result<()> {
        (**self).set_rf_flow_id(id)
    }

    fn rf_info_pkt(&self) -> Result<RfInfoPkt> {
        (**self).rf_info_pkt()
    }

    fn set_rf_info_pkt(&mut self, pkt: RfInfoPkt) -> Result<()> {
        (**self).set_rf_info_pkt(pkt)
    }
}
