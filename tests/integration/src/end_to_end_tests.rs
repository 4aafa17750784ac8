//! End-to-end RF info tests
//!
//! Calls travel `out port -> servant -> in port -> device` and back.

use crate::test_utils::{init_tracing, tuned_packet, Stack};
use frontend_core::{Config, ErrorKind, FrontendError, ServantConfig};
use frontend_ports::{OutRfInfoPort, PortError, RfInfoDelegate, RfInfoDevice, Servant};
use frontend_rf::RfInfoPkt;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_flow_id_round_trip() {
    init_tracing();
    let stack = Stack::new("flow-0");

    assert_eq!(stack.out_port.rf_flow_id(None).unwrap(), "flow-0");
    stack.out_port.set_rf_flow_id("flow-1", None).unwrap();
    assert_eq!(stack.out_port.rf_flow_id(None).unwrap(), "flow-1");
    assert_eq!(stack.device.lock().unwrap().current_flow_id(), "flow-1");
}

#[test]
fn test_packet_round_trip_is_exact() {
    let stack = Stack::new("flow-0");
    let pkt = tuned_packet("flow-fm");

    stack.out_port.set_rf_info_pkt(&pkt, None).unwrap();

    assert_eq!(stack.out_port.rf_info_pkt(None).unwrap(), pkt);
    assert_eq!(stack.out_port.rf_flow_id(None).unwrap(), "flow-fm");
}

#[test]
fn test_non_finite_packet_is_bad_parameter() {
    let stack = Stack::new("flow-0");
    stack
        .out_port
        .set_rf_info_pkt(&tuned_packet("flow-fm"), None)
        .unwrap();

    let mut bad = tuned_packet("flow-nan");
    bad.rf_center_freq = f64::NAN;
    let err = stack.out_port.set_rf_info_pkt(&bad, None).unwrap_err();
    assert!(matches!(err, PortError::Remote(FrontendError::BadParameter(_))));

    let mut bad = tuned_packet("flow-inf");
    bad.capabilities.bw_range.max_val = f64::INFINITY;
    let err: FrontendError = stack
        .out_port
        .set_rf_info_pkt(&bad, None)
        .unwrap_err()
        .into();
    assert_eq!(err.kind(), ErrorKind::BadParameter);

    assert_eq!(stack.out_port.rf_info_pkt(None).unwrap(), tuned_packet("flow-fm"));
}

#[test]
fn test_packets_never_alias_the_device() {
    let stack = Stack::new("flow-0");
    stack
        .out_port
        .set_rf_info_pkt(&tuned_packet("flow-fm"), None)
        .unwrap();

    let mut fetched = stack.out_port.rf_info_pkt(None).unwrap();
    fetched.rf_center_freq = 1.0;
    fetched.additional_info.clear();

    let stored = stack.device.lock().unwrap().current_pkt().clone();
    assert_eq!(stored, tuned_packet("flow-fm"));
}

#[test]
fn test_rejected_packet_keeps_previous_state() {
    let stack = Stack::new("flow-0");
    stack
        .out_port
        .set_rf_info_pkt(&tuned_packet("flow-fm"), None)
        .unwrap();

    let mut bad = tuned_packet("flow-bad");
    bad.rf_bandwidth = -5.0;
    let err = stack.out_port.set_rf_info_pkt(&bad, None).unwrap_err();
    assert!(matches!(err, PortError::Remote(FrontendError::BadParameter(_))));

    assert_eq!(stack.out_port.rf_flow_id(None).unwrap(), "flow-fm");
}

#[test]
fn test_fan_out_to_several_servants() {
    let a = Stack::new("flow-a");
    let b = Stack::new("flow-b");

    let out_port = OutRfInfoPort::new("RFInfo_out");
    let (_servant_a, client_a) = Servant::spawn(
        "proxy-a",
        DeviceProxy(a.out_port),
        &ServantConfig::default(),
    )
    .unwrap();
    let (_servant_b, client_b) = Servant::spawn(
        "proxy-b",
        DeviceProxy(b.out_port),
        &ServantConfig::default(),
    )
    .unwrap();
    out_port.connect("conn-a", Arc::new(client_a));
    out_port.connect("conn-b", Arc::new(client_b));

    out_port.set_rf_flow_id("flow-shared", None).unwrap();
    assert_eq!(a.device.lock().unwrap().current_flow_id(), "flow-shared");
    assert_eq!(b.device.lock().unwrap().current_flow_id(), "flow-shared");

    assert!(matches!(
        out_port.rf_flow_id(None),
        Err(PortError::AmbiguousConnection { count: 2, .. })
    ));
    assert_eq!(out_port.rf_flow_id(Some("conn-b")).unwrap(), "flow-shared");
}

/// Upstream pass-through: a delegate that is itself an out port.
struct DeviceProxy(OutRfInfoPort);

impl RfInfoDelegate for DeviceProxy {
    fn rf_flow_id(&self) -> frontend_core::Result<String> {
        RfInfoDelegate::rf_flow_id(&self.0)
    }

    fn set_rf_flow_id(&mut self, id: String) -> frontend_core::Result<()> {
        RfInfoDelegate::set_rf_flow_id(&mut self.0, id)
    }
}

#[test]
fn test_partial_delegate_reports_not_supported_end_to_end() {
    let a = Stack::new("flow-a");
    let (_servant, client) = Servant::spawn(
        "proxy",
        DeviceProxy(a.out_port),
        &ServantConfig::default(),
    )
    .unwrap();
    let out_port = OutRfInfoPort::new("RFInfo_out");
    out_port.connect("conn", Arc::new(client));

    let err: FrontendError = out_port.rf_info_pkt(None).unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::NotSupported);
    assert_eq!(out_port.rf_flow_id(None).unwrap(), "flow-a");
}

#[test]
fn test_device_from_config_behind_servant() {
    let config = Config::from_toml_str(
        r#"
        [device]
        name = "rx-cfg"
        rf_flow_id = "flow-cfg"
        supports_info_pkt = false

        [servant]
        call_timeout_ms = 500
        "#,
    )
    .unwrap();

    let device = RfInfoDevice::from_config(&config.device).unwrap();
    let (_servant, client) =
        Servant::spawn(config.device.name.clone(), device, &config.servant).unwrap();
    let out_port = OutRfInfoPort::new("RFInfo_out");
    out_port.connect("conn", Arc::new(client));

    assert_eq!(out_port.rf_flow_id(None).unwrap(), "flow-cfg");
    let err: FrontendError = out_port
        .set_rf_info_pkt(&RfInfoPkt::default(), None)
        .unwrap_err()
        .into();
    assert_eq!(err.kind(), ErrorKind::NotSupported);
}

#[test]
fn test_invalid_config_flow_id_is_rejected() {
    let config = Config::from_toml_str(
        r#"
        [device]
        name = "rx-cfg"
        rf_flow_id = "flow\u0007"
        "#,
    )
    .unwrap();

    let err = RfInfoDevice::from_config(&config.device).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadParameter);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn set_then_get_round_trips_across_stack(id in "[a-zA-Z0-9][a-zA-Z0-9 _./:-]{0,40}") {
        let stack = Stack::new("flow-0");
        stack.out_port.set_rf_flow_id(&id, None).unwrap();
        prop_assert_eq!(stack.out_port.rf_flow_id(None).unwrap(), id);
    }

    #[test]
    fn frequencies_cross_stack_bit_exact(
        rf in any::<f64>().prop_filter("finite", |f| f.is_finite()),
        bw in any::<f64>().prop_filter("finite", |f| f.is_finite()),
        if_freq in any::<f64>().prop_filter("finite", |f| f.is_finite()),
    ) {
        let stack = Stack::new("flow-0");
        let mut pkt = tuned_packet("flow-fm");
        pkt.rf_center_freq = rf;
        pkt.rf_bandwidth = bw.abs();
        pkt.if_center_freq = if_freq;
        stack.out_port.set_rf_info_pkt(&pkt, None).unwrap();

        let back = stack.out_port.rf_info_pkt(None).unwrap();
        prop_assert_eq!(back.rf_center_freq.to_bits(), pkt.rf_center_freq.to_bits());
        prop_assert_eq!(back.rf_bandwidth.to_bits(), pkt.rf_bandwidth.to_bits());
        prop_assert_eq!(back.if_center_freq.to_bits(), pkt.if_center_freq.to_bits());
    }
}
