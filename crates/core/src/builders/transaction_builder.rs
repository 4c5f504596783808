// Copyright (C) 2015-2025 The Neo Project.
//
// transaction_builder.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Builder for Neo transactions.

/// Builder for Neo transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx: crate::Transaction,
}

impl TransactionBuilder {
    /// Creates an empty TransactionBuilder.
    ///
    /// # Returns
    ///
    /// A new TransactionBuilder instance with default transaction.
    pub fn create_empty() -> Self {
        let mut tx = crate::Transaction::new();
        tx.set_script(vec![0x40]); // OpCode.RET
        Self { tx }
    }

    /// Sets the transaction version.
    pub fn version(mut self, version: u8) -> Self {
        self.tx.set_version(version);
        self
    }

    /// Sets the transaction nonce.
    pub fn nonce(mut self, nonce: u32) -> Self {
        self.tx.set_nonce(nonce);
        self
    }

    /// Sets the system fee.
    pub fn system_fee(mut self, system_fee: i64) -> Self {
        self.tx.set_system_fee(system_fee);
        self
    }

    /// Sets the network fee.
    pub fn network_fee(mut self, network_fee: i64) -> Self {
        self.tx.set_network_fee(network_fee);
        self
    }

    /// Sets the valid until block.
    pub fn valid_until(mut self, block_index: u32) -> Self {
        self.tx.set_valid_until_block(block_index);
        self
    }

    /// Attaches a script to the transaction.
    pub fn attach_system(mut self, script: Vec<u8>) -> Self {
        self.tx.set_script(script);
        self
    }

    /// Adds a signer to the transaction.
    pub fn add_signer(mut self, signer: crate::Signer) -> Self {
        self.tx.add_signer(signer);
        self
    }

    /// Adds a witness to the transaction.
    pub fn add_witness(mut self, witness: crate::Witness) -> Self {
        self.tx.add_witness(witness);
        self
    }

    /// Builds the transaction.
    ///
    /// # Returns
    ///
    /// The built transaction.
    pub fn build(self) -> crate::Transaction {
        self.tx
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::create_empty()
    }
}
