/// Shader module - descriptor decoding, vertex layout, binary loading,
/// program building and the session program cache

// Module declarations
pub mod descriptor;
pub mod layout;
pub mod loader;
pub mod program;
pub mod cache;

// Re-export from descriptor.rs
pub use descriptor::*;

// Re-export from other modules
pub use layout::*;
pub use loader::*;
pub use program::*;
pub use cache::*;
