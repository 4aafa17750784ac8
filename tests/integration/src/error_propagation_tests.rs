//! Error propagation across the RF info stack
//!
//! Each operation must be able to raise every error kind, and the kind must
//! reach the caller unchanged through the in port, the servant and the out
//! port. An unreachable side is always a generic failure.

use crate::test_utils::{error_of, init_tracing, FailingDelegate, ALL_KINDS};
use frontend_core::{ErrorKind, FrontendError, ServantConfig};
use frontend_ports::{
    InRfInfoPort, OutRfInfoPort, PortError, RfInfoDevice, RfInfoRemote, Servant,
};
use frontend_rf::RfInfoPkt;
use std::sync::{Arc, Mutex};

fn kinds_of(remote: &dyn RfInfoRemote) -> [ErrorKind; 4] {
    [
        remote.rf_flow_id().unwrap_err().kind(),
        remote.set_rf_flow_id("flow-1").unwrap_err().kind(),
        remote.rf_info_pkt().unwrap_err().kind(),
        remote
            .set_rf_info_pkt(&RfInfoPkt::new("flow-1"))
            .unwrap_err()
            .kind(),
    ]
}

#[test]
fn test_every_kind_through_in_port() {
    for kind in ALL_KINDS {
        let port = InRfInfoPort::with_delegate(
            "RFInfo_in",
            Arc::new(Mutex::new(FailingDelegate { kind })),
        );
        assert_eq!(kinds_of(&port), [kind; 4], "{:?}", kind);
    }
}

#[test]
fn test_every_kind_through_servant() {
    init_tracing();
    for kind in ALL_KINDS {
        let (_servant, client) = Servant::spawn(
            format!("failing-{:?}", kind),
            FailingDelegate { kind },
            &ServantConfig::default(),
        )
        .unwrap();
        assert_eq!(kinds_of(&client), [kind; 4], "{:?}", kind);
    }
}

#[test]
fn test_every_kind_through_out_port() {
    for kind in ALL_KINDS {
        let in_port = InRfInfoPort::with_delegate(
            "RFInfo_in",
            Arc::new(Mutex::new(FailingDelegate { kind })),
        );
        let (_servant, client) =
            Servant::spawn("failing", in_port, &ServantConfig::default()).unwrap();
        let out_port = OutRfInfoPort::new("RFInfo_out");
        out_port.connect("conn-1", Arc::new(client));

        let errors: Vec<FrontendError> = vec![
            out_port.rf_flow_id(None).unwrap_err().into(),
            out_port.set_rf_flow_id("flow-1", None).unwrap_err().into(),
            out_port.rf_info_pkt(None).unwrap_err().into(),
            out_port
                .set_rf_info_pkt(&RfInfoPkt::default(), None)
                .unwrap_err()
                .into(),
        ];
        for (err, operation) in errors.iter().zip([
            "rf_flow_id",
            "set_rf_flow_id",
            "rf_info_pkt",
            "set_rf_info_pkt",
        ]) {
            assert_eq!(err, &error_of(kind, operation));
        }
    }
}

#[test]
fn test_stopped_servant_is_generic_failure_everywhere() {
    let device = RfInfoDevice::new("rx-0", "flow-0");
    let (mut servant, client) =
        Servant::spawn("rx-0", device, &ServantConfig::default()).unwrap();
    let out_port = OutRfInfoPort::new("RFInfo_out");
    out_port.connect("conn-1", Arc::new(client.clone()));

    servant.shutdown();

    assert_eq!(kinds_of(&client), [ErrorKind::Generic; 4]);
    let err = out_port.rf_flow_id(None).unwrap_err();
    assert!(matches!(err, PortError::Remote(FrontendError::Frontend(_))));
}

#[test]
fn test_missing_delegate_behind_servant_is_generic_failure() {
    let in_port = InRfInfoPort::new("RFInfo_in");
    let (_servant, client) =
        Servant::spawn("empty", in_port, &ServantConfig::default()).unwrap();
    assert_eq!(kinds_of(&client), [ErrorKind::Generic; 4]);
}

#[test]
fn test_out_port_without_connections_never_returns_default() {
    let out_port = OutRfInfoPort::new("RFInfo_out");
    let err: FrontendError = out_port.rf_info_pkt(None).unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::Generic);
}
