//! Embedded group pool
//!
//! Group table compiled into the binary at build time.

// Include generated group table from build script
include!(concat!(env!("OUT_DIR"), "/groups.rs"));
