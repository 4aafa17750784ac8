//! Servant adapter
//!
//! Runs a delegate on its own thread behind a request channel. Requests and
//! replies travel as JSON bytes, so nothing is shared between caller and
//! servant: packets always cross by copy. Any failure to reach the servant
//! or to read its reply is a generic front-end failure.

use crate::delegate::RfInfoDelegate;
use crate::remote::RfInfoRemote;
use frontend_core::{FrontendError, Result, ServantConfig};
use frontend_rf::RfInfoPkt;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Request sent to a servant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RfInfoRequest {
    /// Read the RF flow id
    GetRfFlowId,
    /// Replace the RF flow id
    SetRfFlowId(String),
    /// Read the RF info packet
    GetRfInfoPkt,
    /// Replace the RF info packet
    SetRfInfoPkt(RfInfoPkt),
}

/// Reply sent back by a servant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RfInfoReply {
    /// Current RF flow id
    RfFlowId(String),
    /// Current RF info packet
    RfInfoPkt(RfInfoPkt),
    /// Setter completed
    Done,
    /// Delegate raised an error
    Error(FrontendError),
}

impl RfInfoRequest {
    fn operation(&self) -> &'static str {
        match self {
            RfInfoRequest::GetRfFlowId => "rf_flow_id",
            RfInfoRequest::SetRfFlowId(_) => "set_rf_flow_id",
            RfInfoRequest::GetRfInfoPkt => "rf_info_pkt",
            RfInfoRequest::SetRfInfoPkt(_) => "set_rf_info_pkt",
        }
    }
}

enum Envelope {
    Call {
        request: Vec<u8>,
        reply_tx: mpsc::Sender<Vec<u8>>,
    },
    Shutdown,
}

/// Handle owning a running servant thread.
///
/// Dropping the handle shuts the servant down.
pub struct Servant {
    name: String,
    tx: mpsc::Sender<Envelope>,
    worker: Option<JoinHandle<()>>,
}

/// Caller-side handle to a servant. Cheap to clone.
#[derive(Clone)]
pub struct ServantClient {
    name: String,
    tx: mpsc::Sender<Envelope>,
    call_timeout: Option<Duration>,
}

impl Servant {
    /// Start `delegate` on a dedicated thread
    pub fn spawn<D>(
        name: impl Into<String>,
        delegate: D,
        config: &ServantConfig,
    ) -> Result<(Servant, ServantClient)>
    where
        D: RfInfoDelegate + 'static,
    {
        let name = name.into();
        let (tx, rx) = mpsc::channel::<Envelope>();

        let worker_name = name.clone();
        let worker = thread::Builder::new()
            .name(format!("servant-{}", name))
            .spawn(move || run(worker_name, delegate, rx))
            .map_err(|e| {
                FrontendError::frontend(format!("{}: failed to start servant: {}", name, e))
            })?;

        info!(servant = %name, call_timeout_ms = config.call_timeout_ms, "Servant started");

        let client = ServantClient {
            name: name.clone(),
            tx: tx.clone(),
            call_timeout: config.call_timeout(),
        };
        let servant = Servant {
            name,
            tx,
            worker: Some(worker),
        };
        Ok((servant, client))
    }

    /// Servant name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the servant thread is still running
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .map(|worker| !worker.is_finished())
            .unwrap_or(false)
    }

    /// Stop the servant thread and wait for it to exit.
    ///
    /// Requests already queued ahead of the shutdown are still answered.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.tx.send(Envelope::Shutdown);
        if worker.join().is_err() {
            error!(servant = %self.name, "Servant thread panicked");
        }
        info!(servant = %self.name, "Servant stopped");
    }
}

impl Drop for Servant {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Servant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Servant")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish()
    }
}

fn run<D: RfInfoDelegate>(name: String, mut delegate: D, rx: mpsc::Receiver<Envelope>) {
    while let Ok(envelope) = rx.recv() {
        let (request, reply_tx) = match envelope {
            Envelope::Shutdown => break,
            Envelope::Call { request, reply_tx } => (request, reply_tx),
        };

        let reply = match serde_json::from_slice::<RfInfoRequest>(&request) {
            Ok(request) => {
                debug!(servant = %name, operation = request.operation(), "Dispatching");
                dispatch(&mut delegate, request)
            }
            Err(e) => {
                warn!(servant = %name, error = %e, "Undecodable request");
                RfInfoReply::Error(FrontendError::frontend(format!(
                    "{}: undecodable request: {}",
                    name, e
                )))
            }
        };

        match serde_json::to_vec(&reply) {
            Ok(bytes) => {
                // Caller may have timed out and gone away
                let _ = reply_tx.send(bytes);
            }
            Err(e) => error!(servant = %name, error = %e, "Failed to encode reply"),
        }
    }
    debug!(servant = %name, "Servant loop exited");
}

fn dispatch<D: RfInfoDelegate>(delegate: &mut D, request: RfInfoRequest) -> RfInfoReply {
    let result = match request {
        RfInfoRequest::GetRfFlowId => delegate.rf_flow_id().map(RfInfoReply::RfFlowId),
        RfInfoRequest::SetRfFlowId(id) => delegate.set_rf_flow_id(id).map(|()| RfInfoReply::Done),
        RfInfoRequest::GetRfInfoPkt => delegate.rf_info_pkt().and_then(|pkt| {
            // A non-finite field would be written as null and fail to decode
            pkt.check_finite()?;
            Ok(RfInfoReply::RfInfoPkt(pkt))
        }),
        RfInfoRequest::SetRfInfoPkt(pkt) => {
            delegate.set_rf_info_pkt(pkt).map(|()| RfInfoReply::Done)
        }
    };
    result.unwrap_or_else(RfInfoReply::Error)
}

impl ServantClient {
    /// Name of the servant this client talks to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send one request and block for its reply
    pub fn call(&self, request: &RfInfoRequest) -> Result<RfInfoReply> {
        let operation = request.operation();
        let bytes = serde_json::to_vec(request).map_err(|e| {
            FrontendError::frontend(format!("{}: failed to encode {}: {}", self.name, operation, e))
        })?;

        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Envelope::Call {
                request: bytes,
                reply_tx,
            })
            .map_err(|_| self.unreachable(operation))?;

        let reply = match self.call_timeout {
            Some(timeout) => reply_rx.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => {
                    warn!(servant = %self.name, operation, timeout_ms = timeout.as_millis() as u64, "Call timed out");
                    FrontendError::frontend(format!(
                        "{}: {} timed out after {:?}",
                        self.name, operation, timeout
                    ))
                }
                RecvTimeoutError::Disconnected => self.unreachable(operation),
            })?,
            None => reply_rx.recv().map_err(|_| self.unreachable(operation))?,
        };

        serde_json::from_slice(&reply).map_err(|e| {
            FrontendError::frontend(format!(
                "{}: undecodable reply to {}: {}",
                self.name, operation, e
            ))
        })
    }

    fn unreachable(&self, operation: &str) -> FrontendError {
        warn!(servant = %self.name, operation, "Servant unreachable");
        FrontendError::frontend(format!("{}: servant unreachable for {}", self.name, operation))
    }

    fn unexpected(&self, reply: RfInfoReply, operation: &str) -> FrontendError {
        match reply {
            RfInfoReply::Error(err) => err,
            other => FrontendError::frontend(format!(
                "{}: unexpected reply to {}: {:?}",
                self.name, operation, other
            )),
        }
    }
}

impl RfInfoRemote for ServantClient {
    fn rf_flow_id(&self) -> Result<String> {
        match self.call(&RfInfoRequest::GetRfFlowId)? {
            RfInfoReply::RfFlowId(id) => Ok(id),
            other => Err(self.unexpected(other, "rf_flow_id")),
        }
    }

    fn set_rf_flow_id(&self, id: &str) -> Result<()> {
        match self.call(&RfInfoRequest::SetRfFlowId(id.to_string()))? {
            RfInfoReply::Done => Ok(()),
            other => Err(self.unexpected(other, "set_rf_flow_id")),
        }
    }

    fn rf_info_pkt(&self) -> Result<RfInfoPkt> {
        match self.call(&RfInfoRequest::GetRfInfoPkt)? {
            RfInfoReply::RfInfoPkt(pkt) => Ok(pkt),
            other => Err(self.unexpected(other, "rf_info_pkt")),
        }
    }

    fn set_rf_info_pkt(&self, pkt: &RfInfoPkt) -> Result<()> {
        pkt.check_finite()?;
        match self.call(&RfInfoRequest::SetRfInfoPkt(pkt.clone()))? {
            RfInfoReply::Done => Ok(()),
            other => Err(self.unexpected(other, "set_rf_info_pkt")),
        }
    }
}

impl std::fmt::Debug for ServantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServantClient")
            .field("name", &self.name)
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}
