/*!
# Combiner GFX

Dynamic shader-program management for a fixed-function-like graphics backend.

A 32-bit shader descriptor encodes a color-combiner configuration (generic
color inputs, texture usage, fog, alpha). This crate decodes that descriptor
into an interleaved vertex attribute schema, loads the matching precompiled
shader binaries by descriptor-derived file name, links GPU vertex+fragment
program pairs with correct attribute bindings, memoizes them for the lifetime
of a render session, and submits indexed triangle-list draws through the
currently bound program.

The platform GPU driver is an external collaborator expressed as the
[`gpu::GpuDriver`] trait. Backend implementations (a real libgxm/GL driver, or
the headless recording driver used in tests) provide concrete types behind it.

## Architecture

- **ShaderDescriptor / DecodedLayout**: descriptor bit-layout contract and decoder
- **VertexLayout**: ordered, tightly packed vertex attribute schema with stride
- **BinaryLoader**: descriptor-to-filename contract and binary registration
- **CompiledProgram**: linked vertex+fragment program pair, built once per descriptor
- **ProgramCache**: session-lifetime program arena, no eviction
- **RenderContext**: current-binding state machine and draw submission
*/

// Internal modules
mod error;
pub mod log;
pub mod gpu;
pub mod shader;
pub mod render;

// Error types
pub use error::{Error, Result};

// Shader subsystem
pub use shader::{
    DecodedLayout, Selector, ShaderDescriptor, ShaderInfo,
    VertexAttribute, VertexLayout, MAX_VERTEX_ATTRIBUTES,
    BinaryLoader, CompiledProgram, ProgramCache, ProgramKey, MAX_PROGRAMS,
};

// Render context
pub use render::{GfxConfig, RenderContext, MAX_INDICES};
