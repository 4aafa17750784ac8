//! RF info packet types
//!
//! The record a front-end device reports about its RF tuning, the checks a
//! device applies before accepting one, and the JSON form used when a packet
//! crosses a process boundary.

#![warn(missing_docs)]

pub mod codec;
pub mod packet;

pub use codec::{decode, encode, CodecError};
pub use packet::{
    AntennaInfo, FeedInfo, FreqRange, PathDelay, RfCapabilities, RfInfoPkt, SensorInfo,
};
