//! Cryptographic signature handling for consensus messages.
//!
//! Validators sign prepare/commit/change-view payloads with their secp256r1
//! key; this module owns that signing and the corresponding verification.

use crate::{Error, Result};
use neo_config::HASH_SIZE;
use neo_core::UInt160;
use neo_cryptography::ecc::ECC;
use neo_cryptography::ecdsa::ECDsa;
use neo_cryptography::ECPoint;

/// A validator's signing key.
///
/// This is intentionally minimal: it holds only what consensus needs to sign
/// and identify a validator, not wallet concerns like WIF/NEP-2 import.
#[derive(Clone)]
pub struct ValidatorKey {
    private_key: [u8; HASH_SIZE],
    public_key: ECPoint,
}

impl ValidatorKey {
    /// Builds a validator key from a raw secp256r1 private scalar.
    pub fn from_private_key(private_key: [u8; HASH_SIZE]) -> Result<Self> {
        let public_key_bytes = ECC::generate_public_key(&private_key)
            .map_err(|e| Error::Generic(format!("invalid validator private key: {e}")))?;
        let public_key = ECPoint::from_bytes(&public_key_bytes)
            .map_err(|e| Error::Generic(format!("invalid validator public key: {e}")))?;

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// The validator's public key.
    pub fn public_key(&self) -> &ECPoint {
        &self.public_key
    }

    /// Signs a message with this key.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        ECDsa::sign(message, &self.private_key)
            .map_err(|e| Error::Generic(format!("failed to sign message: {e}")))
    }
}

/// Signature provider for consensus operations.
pub struct SignatureProvider {
    /// Validator public key hash
    validator_hash: UInt160,
    /// Key for signing, present only on nodes participating as a validator
    key: Option<ValidatorKey>,
}

impl SignatureProvider {
    /// Creates a new signature provider for a validator.
    pub fn new(validator_hash: UInt160, key: Option<ValidatorKey>) -> Self {
        Self {
            validator_hash,
            key,
        }
    }

    /// Signs a message using the validator's private key.
    ///
    /// Returns an error if this provider has no key, which is the case for
    /// nodes that relay consensus traffic without participating as a
    /// validator themselves.
    pub fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>> {
        let key = self.key.as_ref().ok_or_else(|| {
            Error::Generic(format!(
                "validator {} has no signing key configured",
                self.validator_hash
            ))
        })?;
        key.sign(message)
    }

    /// Verifies a signature using a public key.
    pub fn verify_signature(message: &[u8], signature: &[u8], public_key: &ECPoint) -> bool {
        ECDsa::verify_signature(message, signature, &public_key.to_bytes()).unwrap_or(false)
    }
}

/// Message signing utilities for consensus
pub struct MessageSigner;

impl MessageSigner {
    /// Creates message data for prepare request signature
    pub fn create_prepare_request_data(
        block_index: u32,
        view_number: u8,
        timestamp: u64,
        block_hash: &neo_core::UInt256,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.push(b'P'); // PrepareRequest marker
        data.extend_from_slice(&block_index.to_le_bytes());
        data.push(view_number);
        data.extend_from_slice(&timestamp.to_le_bytes());
        data.extend_from_slice(block_hash.as_bytes());
        data
    }

    /// Creates message data for prepare response signature
    pub fn create_prepare_response_data(
        block_index: u32,
        view_number: u8,
        block_hash: &neo_core::UInt256,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.push(b'R'); // PrepareResponse marker
        data.extend_from_slice(&block_index.to_le_bytes());
        data.push(view_number);
        data.extend_from_slice(block_hash.as_bytes());
        data
    }

    /// Creates message data for commit signature
    pub fn create_commit_data(
        block_index: u32,
        view_number: u8,
        block_hash: &neo_core::UInt256,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.push(b'C'); // Commit marker
        data.extend_from_slice(&block_index.to_le_bytes());
        data.push(view_number);
        data.extend_from_slice(block_hash.as_bytes());
        data
    }

    /// Creates message data for change view signature
    pub fn create_change_view_data(
        block_index: u32,
        view_number: u8,
        new_view_number: u8,
        reason: u8,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.push(b'V'); // ViewChange marker
        data.extend_from_slice(&block_index.to_le_bytes());
        data.push(view_number);
        data.push(new_view_number);
        data.push(reason);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> ValidatorKey {
        ValidatorKey::from_private_key([7u8; HASH_SIZE]).unwrap()
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let key = test_key();
        let provider = SignatureProvider::new(UInt160::zero(), Some(key));

        let message = b"test message";
        let signature = provider.sign_message(message).unwrap();

        assert!(SignatureProvider::verify_signature(
            message,
            &signature,
            provider.key.as_ref().unwrap().public_key(),
        ));
    }

    #[test]
    fn sign_message_without_key_fails() {
        let provider = SignatureProvider::new(UInt160::zero(), None);
        assert!(provider.sign_message(b"test message").is_err());
    }

    #[test]
    fn test_message_data_creation() {
        let block_hash = neo_core::UInt256::zero();

        let prepare_data =
            MessageSigner::create_prepare_request_data(100, 1, 1234567890, &block_hash);
        assert_eq!(prepare_data[0], b'P');

        let response_data = MessageSigner::create_prepare_response_data(100, 1, &block_hash);
        assert_eq!(response_data[0], b'R');

        let commit_data = MessageSigner::create_commit_data(100, 1, &block_hash);
        assert_eq!(commit_data[0], b'C');

        let change_view_data = MessageSigner::create_change_view_data(100, 1, 2, 0);
        assert_eq!(change_view_data[0], b'V');
    }
}
