//! Adapters that let the dBFT consensus service talk to this node's real
//! ledger, network, and mempool instead of the trait objects it expects.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use neo_consensus::{Error as ConsensusError, LedgerService, NetworkService, Result as ConsensusResult};
use neo_core::{Transaction, UInt160, UInt256, Witness};
use neo_cryptography::ECPoint;
use neo_ledger::Blockchain;
use neo_network::{ExtensiblePayload, NetworkMessage, P2pNode, ProtocolMessage};
use neo_smart_contract::native::{GasToken, NativeContract};

/// About a day of blocks at the default 15s block time.
const VALID_BLOCK_WINDOW: u32 = 5760;

fn ledger_err(e: impl std::fmt::Display) -> ConsensusError {
    ConsensusError::Generic(e.to_string())
}

fn network_err(e: impl std::fmt::Display) -> ConsensusError {
    ConsensusError::Generic(e.to_string())
}

/// Builds the single-signature verification script for a validator's public
/// key: `PUSHDATA1 <compressed pubkey> CHECKSIG`.
fn verification_script_for(public_key: &ECPoint) -> ConsensusResult<Vec<u8>> {
    let compressed = public_key.encode_compressed().map_err(network_err)?;
    let mut script = Vec::with_capacity(2 + compressed.len() + 1);
    script.push(0x0C); // PUSHDATA1
    script.push(compressed.len() as u8);
    script.extend_from_slice(&compressed);
    script.push(0x41); // CHECKSIG
    Ok(script)
}

/// Derives the account script hash a validator signs consensus payloads with.
pub fn validator_script_hash(public_key: &ECPoint) -> ConsensusResult<UInt160> {
    let script = verification_script_for(public_key)?;
    Ok(UInt160::from_script(&script))
}

/// Exposes the chain and native GAS balance to the consensus service.
pub struct LedgerAdapter {
    blockchain: Arc<Blockchain>,
    validators: Vec<ECPoint>,
}

impl LedgerAdapter {
    pub fn new(blockchain: Arc<Blockchain>, validators: Vec<ECPoint>) -> Self {
        Self {
            blockchain,
            validators,
        }
    }
}

#[async_trait]
impl LedgerService for LedgerAdapter {
    async fn get_block(&self, height: u32) -> ConsensusResult<Option<neo_core::Block>> {
        Ok(self
            .blockchain
            .get_block(height)
            .await
            .map_err(ledger_err)?
            .map(|block| block.to_core_block()))
    }

    async fn get_block_by_hash(
        &self,
        hash: &UInt256,
    ) -> ConsensusResult<Option<neo_core::Block>> {
        Ok(self
            .blockchain
            .get_block_by_hash(hash)
            .await
            .map_err(ledger_err)?
            .map(|block| block.to_core_block()))
    }

    async fn get_current_height(&self) -> ConsensusResult<u32> {
        Ok(self.blockchain.get_height().await)
    }

    async fn add_block(&self, block: neo_core::Block) -> ConsensusResult<()> {
        let block = neo_ledger::Block::from_core_block(&block);
        self.blockchain.persist_block(&block).await.map_err(ledger_err)
    }

    async fn get_transaction(&self, hash: &UInt256) -> ConsensusResult<Option<Transaction>> {
        self.blockchain.get_transaction(hash).await.map_err(ledger_err)
    }

    async fn contains_transaction(&self, hash: &UInt256) -> ConsensusResult<bool> {
        self.blockchain.contains_transaction(hash).await.map_err(ledger_err)
    }

    async fn get_next_block_validators(&self) -> ConsensusResult<Vec<ECPoint>> {
        Ok(self.validators.clone())
    }

    async fn get_validators(&self, _height: u32) -> ConsensusResult<Vec<ECPoint>> {
        // Historical validator sets aren't tracked; the configured committee
        // is the only one this node knows about.
        Ok(self.validators.clone())
    }

    async fn validate_transaction(&self, transaction: &Transaction) -> ConsensusResult<bool> {
        self.blockchain
            .validate_transaction(transaction)
            .await
            .map_err(ledger_err)
    }

    async fn get_account_balance(&self, account: &UInt160) -> ConsensusResult<u64> {
        let gas_hash = GasToken::new().hash();
        let raw = self
            .blockchain
            .get_contract_storage(&gas_hash, account.as_bytes())
            .await
            .map_err(ledger_err)?;

        let balance = match raw {
            Some(bytes) if bytes.len() == 8 => {
                i64::from_le_bytes(bytes.try_into().expect("length checked above"))
            }
            _ => 0,
        };
        Ok(balance.max(0) as u64)
    }
}

/// Relays consensus messages over the P2P network as extensible payloads.
pub struct NetworkAdapter {
    p2p: Arc<P2pNode>,
    blockchain: Arc<Blockchain>,
    sender: UInt160,
    signer: Option<neo_consensus::signature::ValidatorKey>,
}

impl NetworkAdapter {
    pub fn new(
        p2p: Arc<P2pNode>,
        blockchain: Arc<Blockchain>,
        sender: UInt160,
        signer: Option<neo_consensus::signature::ValidatorKey>,
    ) -> Self {
        Self {
            p2p,
            blockchain,
            sender,
            signer,
        }
    }

    async fn wrap(&self, data: Vec<u8>) -> ConsensusResult<NetworkMessage> {
        let height = self.blockchain.get_height().await;
        let mut payload = ExtensiblePayload::consensus(
            height,
            height.saturating_add(VALID_BLOCK_WINDOW),
            self.sender,
            data,
            Witness::default(),
        );

        if let Some(signer) = &self.signer {
            let hash = payload.hash();
            let signature = signer.sign(hash.as_bytes()).map_err(network_err)?;

            let mut invocation_script = Vec::with_capacity(2 + signature.len());
            invocation_script.push(0x0C); // PUSHDATA1
            invocation_script.push(signature.len() as u8);
            invocation_script.extend_from_slice(&signature);

            let verification_script = verification_script_for(signer.public_key())?;
            payload.witness = Witness::new_with_scripts(invocation_script, verification_script);
        }

        Ok(NetworkMessage::new(ProtocolMessage::Extensible { payload }))
    }
}

#[async_trait]
impl NetworkService for NetworkAdapter {
    async fn broadcast_consensus_message(&self, message: Vec<u8>) -> ConsensusResult<()> {
        let network_message = self.wrap(message).await?;
        self.p2p
            .broadcast_message(network_message)
            .await
            .map_err(network_err)
    }

    async fn send_consensus_message(
        &self,
        peer_id: &str,
        message: Vec<u8>,
    ) -> ConsensusResult<()> {
        let peer: SocketAddr = peer_id
            .parse()
            .map_err(|e| ConsensusError::Generic(format!("invalid peer address {peer_id}: {e}")))?;
        let network_message = self.wrap(message).await?;
        self.p2p
            .send_message_to_peer(peer, network_message)
            .await
            .map_err(network_err)
    }

    async fn get_connected_peers(&self) -> ConsensusResult<Vec<String>> {
        Ok(self
            .p2p
            .get_connected_peer_addresses()
            .await
            .into_iter()
            .map(|addr| addr.to_string())
            .collect())
    }

    async fn is_connected(&self) -> bool {
        !self.p2p.get_connected_peer_addresses().await.is_empty()
    }
}
