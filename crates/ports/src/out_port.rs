//! Uses-side RF info port
//!
//! Forwards calls to connected servants. Getters need exactly one target:
//! either the named connection or the only connection. Setters without a
//! connection id fan out to every connection in connection order.

use crate::delegate::RfInfoDelegate;
use crate::remote::RfInfoRemote;
use frontend_core::FrontendError;
use frontend_rf::RfInfoPkt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Out port errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// Port has no connections
    #[error("{port}: no connections available")]
    NoConnections {
        /// Port name
        port: String,
    },

    /// Requested connection id is not connected
    #[error("{port}: unknown connection id {connection_id}")]
    UnknownConnection {
        /// Port name
        port: String,
        /// Requested connection id
        connection_id: String,
    },

    /// Getter called without a connection id while several are connected
    #[error("{port}: returned parameters require either a single connection or a connection id ({count} connections)")]
    AmbiguousConnection {
        /// Port name
        port: String,
        /// Number of connections
        count: usize,
    },

    /// Error raised by the servant
    #[error(transparent)]
    Remote(#[from] FrontendError),
}

impl From<PortError> for FrontendError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Remote(inner) => inner,
            other => FrontendError::frontend(other.to_string()),
        }
    }
}

type Connection = (String, Arc<dyn RfInfoRemote>);

/// Uses-side RF info port
pub struct OutRfInfoPort {
    name: String,
    connections: RwLock<Vec<Connection>>,
}

impl OutRfInfoPort {
    /// Create a port with no connections
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connections: RwLock::new(Vec::new()),
        }
    }

    /// Port name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connect `remote` under `connection_id`, replacing any existing
    /// connection with the same id
    pub fn connect(&self, connection_id: impl Into<String>, remote: Arc<dyn RfInfoRemote>) {
        let connection_id = connection_id.into();
        let mut connections = self.write_connections();
        match connections.iter_mut().find(|(id, _)| *id == connection_id) {
            Some(existing) => {
                existing.1 = remote;
                info!(port = %self.name, connection_id = %connection_id, "Connection replaced");
            }
            None => {
                info!(port = %self.name, connection_id = %connection_id, "Connected");
                connections.push((connection_id, remote));
            }
        }
    }

    /// Remove a connection, returning whether it existed
    pub fn disconnect(&self, connection_id: &str) -> bool {
        let mut connections = self.write_connections();
        let before = connections.len();
        connections.retain(|(id, _)| id != connection_id);
        let removed = connections.len() != before;
        if removed {
            info!(port = %self.name, connection_id, "Disconnected");
        }
        removed
    }

    /// Connection ids in connection order
    pub fn connection_ids(&self) -> Vec<String> {
        self.read_connections()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Check if the port has any connection
    pub fn is_connected(&self) -> bool {
        !self.read_connections().is_empty()
    }

    /// RF flow id from the selected connection
    pub fn rf_flow_id(&self, connection_id: Option<&str>) -> Result<String, PortError> {
        let (id, remote) = self.single_target(connection_id)?;
        debug!(port = %self.name, connection_id = %id, "rf_flow_id");
        Ok(remote.rf_flow_id()?)
    }

    /// Set the RF flow id on the named connection, or on all connections
    pub fn set_rf_flow_id(&self, id: &str, connection_id: Option<&str>) -> Result<(), PortError> {
        for (conn, remote) in self.targets(connection_id)? {
            debug!(port = %self.name, connection_id = %conn, rf_flow_id = id, "set_rf_flow_id");
            remote.set_rf_flow_id(id).map_err(|err| {
                warn!(port = %self.name, connection_id = %conn, error = %err, "set_rf_flow_id failed");
                err
            })?;
        }
        Ok(())
    }

    /// RF info packet from the selected connection
    pub fn rf_info_pkt(&self, connection_id: Option<&str>) -> Result<RfInfoPkt, PortError> {
        let (id, remote) = self.single_target(connection_id)?;
        debug!(port = %self.name, connection_id = %id, "rf_info_pkt");
        Ok(remote.rf_info_pkt()?)
    }

    /// Set the RF info packet on the named connection, or on all connections
    pub fn set_rf_info_pkt(
        &self,
        pkt: &RfInfoPkt,
        connection_id: Option<&str>,
    ) -> Result<(), PortError> {
        for (conn, remote) in self.targets(connection_id)? {
            debug!(port = %self.name, connection_id = %conn, rf_flow_id = %pkt.rf_flow_id, "set_rf_info_pkt");
            remote.set_rf_info_pkt(pkt).map_err(|err| {
                warn!(port = %self.name, connection_id = %conn, error = %err, "set_rf_info_pkt failed");
                err
            })?;
        }
        Ok(())
    }

    // Connections are cloned out so the lock is not held across remote calls.
    fn single_target(&self, connection_id: Option<&str>) -> Result<Connection, PortError> {
        let connections = self.read_connections();
        if connections.is_empty() {
            return Err(self.no_connections());
        }
        match connection_id {
            Some(wanted) => self.find(&connections, wanted),
            None if connections.len() > 1 => Err(PortError::AmbiguousConnection {
                port: self.name.clone(),
                count: connections.len(),
            }),
            None => Ok(connections[0].clone()),
        }
    }

    fn targets(&self, connection_id: Option<&str>) -> Result<Vec<Connection>, PortError> {
        let connections = self.read_connections();
        if connections.is_empty() {
            return Err(self.no_connections());
        }
        match connection_id {
            Some(wanted) => Ok(vec![self.find(&connections, wanted)?]),
            None => Ok(connections.clone()),
        }
    }

    fn find(&self, connections: &[Connection], wanted: &str) -> Result<Connection, PortError> {
        connections
            .iter()
            .find(|(id, _)| id == wanted)
            .cloned()
            .ok_or_else(|| PortError::UnknownConnection {
                port: self.name.clone(),
                connection_id: wanted.to_string(),
            })
    }

    fn no_connections(&self) -> PortError {
        PortError::NoConnections {
            port: self.name.clone(),
        }
    }

    fn read_connections(&self) -> RwLockReadGuard<'_, Vec<Connection>> {
        self.connections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_connections(&self) -> RwLockWriteGuard<'_, Vec<Connection>> {
        self.connections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Lets a device pass its RF info through to an upstream servant.
impl RfInfoDelegate for OutRfInfoPort {
    fn rf_flow_id(&self) -> frontend_core::Result<String> {
        Ok(OutRfInfoPort::rf_flow_id(self, None)?)
    }

    fn set_rf_flow_id(&mut self, id: String) -> frontend_core::Result<()> {
        Ok(OutRfInfoPort::set_rf_flow_id(self, &id, None)?)
    }

    fn rf_info_pkt(&self) -> frontend_core::Result<RfInfoPkt> {
        Ok(OutRfInfoPort::rf_info_pkt(self, None)?)
    }

    fn set_rf_info_pkt(&mut self, pkt: RfInfoPkt) -> frontend_core::Result<()> {
        Ok(OutRfInfoPort::set_rf_info_pkt(self, &pkt, None)?)
    }
}

impl std::fmt::Debug for OutRfInfoPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutRfInfoPort")
            .field("name", &self.name)
            .field("connections", &self.connection_ids())
            .finish()
    }
}
