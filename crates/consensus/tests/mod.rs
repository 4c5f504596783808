//! Consensus Test Suite
//!
//! This module contains comprehensive tests that ensure full compatibility
//! with the consensus implementation.

mod messages_tests;
