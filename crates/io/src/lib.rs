//! IO operations and data structures for the Neo blockchain.
//!
//! This crate provides binary serialization, buffered reading/writing, and
//! caching primitives shared by the ledger, VM, and network crates.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod binary_reader;
pub mod binary_writer;
pub mod caching;
pub mod error;
pub mod memory_reader;
pub mod serializable;

pub use binary_reader::BinaryReader;
pub use binary_writer::BinaryWriter;
pub use error::{Error, IoError, IoResult, Result};
pub use memory_reader::MemoryReader;
pub use serializable::{helper, Serializable, SerializableExt};
