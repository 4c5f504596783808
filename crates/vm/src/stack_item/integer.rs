//! Integer stack item implementation for the Neo Virtual Machine.
//!
//! This module provides the Integer stack item implementation used in the Neo VM.

use crate::stack_item::stack_item_type::StackItemType;
use num_bigint::BigInt;
use num_traits::Zero;

/// Represents an integer value in the VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    /// The integer value.
    value: BigInt,
}

impl Integer {
    /// Maximum number of bytes allowed to represent an integer (matches Neo C# Integer.MaxSize).
    pub const MAX_SIZE: usize = 32;

    /// Creates a new integer with the specified value.
    pub fn new<T: Into<BigInt>>(value: T) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Gets the integer value.
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// Gets the type of the stack item.
    pub fn stack_item_type(&self) -> StackItemType {
        StackItemType::Integer
    }

    /// Converts the integer to a boolean.
    pub fn to_boolean(&self) -> bool {
        !self.value.is_zero()
    }

    /// Converts the integer to a byte array.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Convert BigInt to little-endian byte array
        let (sign, mut bytes) = self.value.to_bytes_le();

        // Handle negative numbers
        if matches!(sign, num_bigint::Sign::Minus) {
            if let Some(last) = bytes.last_mut() {
                *last |= 0x80;
            }
        }

        bytes
    }

    /// Creates a deep copy of the integer.
    pub fn deep_copy(&self) -> Self {
        Self::new(self.value.clone())
    }
}
