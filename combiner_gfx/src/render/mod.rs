/// Render module - the render context owning binding state and draw submission

// Module declarations
pub mod context;

// Re-export everything from context.rs
pub use context::*;
