/// GPU driver module - the platform driver collaborator and its state types

// Module declarations
pub mod driver;
pub mod state;

// Re-export everything from driver.rs
pub use driver::*;

// Re-export GPU-side state types
pub use state::*;

// Mock driver for unit tests (no GPU required)
#[cfg(test)]
pub mod mock_driver;
