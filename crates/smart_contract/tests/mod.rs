//! Smart contract test modules

mod contract_manifest_tests;
mod contract_state_tests;
mod gas_token_tests;
mod interop_prices_tests;
mod neo_token_tests;
mod policy_contract_tests;
