//! RF info ports for front-end devices
//!
//! A device exposes its RF flow id and RF info packet through the
//! [`RfInfoDelegate`] capability. Around it sit:
//! - [`InRfInfoPort`], the provides side, forwarding calls to a delegate
//! - [`OutRfInfoPort`], the uses side, forwarding calls to connected servants
//! - [`Servant`] / [`ServantClient`], which run a delegate behind a message
//!   boundary so every value crosses it by copy
//! - [`RfInfoDevice`], an in-memory reference device
//!
//! # Examples
//!
//! ```no_run
//! use frontend_core::ServantConfig;
//! use frontend_ports::{OutRfInfoPort, RfInfoDevice, Servant};
//! use std::sync::Arc;
//!
//! let device = RfInfoDevice::new("rx-0", "flow-0");
//! let (_servant, client) = Servant::spawn("rx-0", device, &ServantConfig::default())?;
//!
//! let port = OutRfInfoPort::new("RFInfo_out");
//! port.connect("conn-1", Arc::new(client));
//! port.set_rf_flow_id("flow-1", None)?;
//! assert_eq!(port.rf_flow_id(None)?, "flow-1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod delegate;
pub mod device;
pub mod in_port;
pub mod out_port;
pub mod remote;
pub mod servant;

pub use delegate::RfInfoDelegate;
pub use device::RfInfoDevice;
pub use in_port::InRfInfoPort;
pub use out_port::{OutRfInfoPort, PortError};
pub use remote::RfInfoRemote;
pub use servant::{RfInfoReply, RfInfoRequest, Servant, ServantClient};

// Re-export the shared types so callers need only this crate
pub use frontend_core::{ErrorKind, FrontendError, Result};
pub use frontend_rf::RfInfoPkt;
