//! Integration tests across the RF info stack
//!
//! This test suite validates:
//! - the four RF info operations end to end: out port, servant, in port, device
//! - every operation raising each error kind through every layer
//! - unreachable servants surfacing as generic failures
//! - packet copy semantics across the servant boundary


#[cfg(test)]
mod error_propagation_tests;

#[cfg(test)]
mod end_to_end_tests;
