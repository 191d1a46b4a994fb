//! Test support utilities and fixtures for plugin metrics tests

pub mod helpers;
pub mod mocks;

// Re-export commonly used helpers
pub use helpers::{
    expected_call, invoke_registration, plugin, rust_selector, ForwardedArgs, ForwardedCall,
    RecordingRegistry,
};
pub use mocks::{mock_registry, MockRegistry};
