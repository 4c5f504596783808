//! Blockchain module.
//!
//! This module provides the main blockchain functionality exactly matching the wire format Blockchain.
//! The module is organized structured as:
//! - storage: Storage interface and implementation
//! - genesis: Genesis block creation and initialization
//! - verification: Block, header, and transaction verification
//! - persistence: Block persistence and storage management
//! - state: Blockchain state management
//! - blockchain: Main Blockchain struct

pub mod advanced_validation;
pub mod blockchain;
pub mod genesis;
pub mod import;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod validation;
pub mod verification;

pub use blockchain::{Blockchain, BlockchainStats};
pub use genesis::GenesisManager;
pub use persistence::{BlockchainPersistence, BlockchainSnapshot};
pub use state::{BlockchainState, PolicySettings};
pub use storage::{RocksDBStorage, Storage, StorageItem, StorageKey, StorageProvider};
pub use verification::{BlockchainVerifier, VerifyResult};
