/// GpuDriver trait - the platform GPU driver collaborator

use std::sync::Arc;

use crate::error::Result;
use crate::gpu::{
    BlendState, CompareOp, GpuVertexAttribute, Rect2D, TextureId, VertexStream, WrapMode,
};

/// Shader stage of a precompiled binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

/// A shader binary registered with the driver
///
/// Implemented by backend-specific types. The handle stays valid until the
/// driver is dropped; binaries are never unregistered individually.
pub trait ShaderBinary: Send + Sync + std::fmt::Debug {
    /// Resolve the input register of a vertex attribute by semantic name
    ///
    /// # Arguments
    ///
    /// * `name` - Attribute name as it appears in the binary (e.g. "aPosition")
    ///
    /// # Returns
    ///
    /// The register index, or `None` if the binary has no such attribute
    fn attribute_register(&self, name: &str) -> Option<u32>;
}

/// A linked GPU vertex program
///
/// Implemented by backend-specific types; used only through binding.
pub trait VertexProgram: Send + Sync + std::fmt::Debug {
    // No public methods
}

/// A linked GPU fragment program
///
/// Implemented by backend-specific types; used only through binding.
pub trait FragmentProgram: Send + Sync + std::fmt::Debug {
    // No public methods
}

/// Platform GPU driver trait
///
/// This is the boundary between the shader-program subsystem and the platform
/// SDK: binary registration and program linking, the current-program GPU
/// state, triangle submission, texture upload/bind, render-state toggles and
/// the frame begin/end pair. Implemented by backend drivers (a real GXM/GL
/// driver, or the headless recording driver used in tests).
pub trait GpuDriver: Send + Sync {
    // ===== SHADER PROGRAMS =====

    /// Register a precompiled shader binary with the driver
    ///
    /// Non-idempotent: registering the same bytes twice yields two
    /// registrations. The program cache guarantees one call per
    /// (descriptor, stage) pair per session.
    ///
    /// # Arguments
    ///
    /// * `code` - The full binary blob as read from storage
    fn register_binary(&mut self, code: &[u8]) -> Result<Arc<dyn ShaderBinary>>;

    /// Link a vertex program from a registered binary
    ///
    /// # Arguments
    ///
    /// * `binary` - Registered vertex-stage binary
    /// * `attributes` - Attribute schema with registers already resolved
    /// * `stream` - The single interleaved vertex stream (stride, index type)
    fn create_vertex_program(
        &mut self,
        binary: &Arc<dyn ShaderBinary>,
        attributes: &[GpuVertexAttribute],
        stream: VertexStream,
    ) -> Result<Arc<dyn VertexProgram>>;

    /// Link a fragment program from a registered binary
    ///
    /// # Arguments
    ///
    /// * `binary` - Registered fragment-stage binary
    /// * `blend` - Blend state, or `None` for blending disabled
    fn create_fragment_program(
        &mut self,
        binary: &Arc<dyn ShaderBinary>,
        blend: Option<BlendState>,
    ) -> Result<Arc<dyn FragmentProgram>>;

    /// Make a vertex+fragment program pair the active GPU shading state
    fn set_programs(
        &mut self,
        vertex: &Arc<dyn VertexProgram>,
        fragment: &Arc<dyn FragmentProgram>,
    ) -> Result<()>;

    // ===== DRAW SUBMISSION =====

    /// Upload the index buffer used by all subsequent indexed draws
    ///
    /// Called once at context creation with the identity mapping; vertices
    /// arrive in submission order so the buffer never changes afterwards.
    fn upload_index_buffer(&mut self, indices: &[u16]) -> Result<()>;

    /// Draw `vertex_count` vertices from an interleaved buffer as a triangle
    /// list, indexed through the uploaded index buffer
    ///
    /// The buffer is interpreted per the stride of the currently set vertex
    /// program.
    fn draw_triangles(&mut self, vertex_data: &[f32], vertex_count: u32) -> Result<()>;

    // ===== TEXTURES =====

    /// Allocate a texture object
    fn new_texture(&mut self) -> Result<TextureId>;

    /// Bind a texture to a sampler tile
    fn select_texture(&mut self, tile: u32, texture: TextureId) -> Result<()>;

    /// Upload RGBA32 pixel data to the texture bound on the active tile
    fn upload_texture(&mut self, rgba32: &[u8], width: u32, height: u32) -> Result<()>;

    /// Set filtering and wrap modes for the texture bound on a tile
    fn set_sampler_parameters(
        &mut self,
        tile: u32,
        linear_filter: bool,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
    ) -> Result<()>;

    // ===== RENDER STATE =====

    /// Enable or disable the depth test
    fn set_depth_test(&mut self, enable: bool) -> Result<()>;

    /// Enable or disable depth buffer writes
    fn set_depth_mask(&mut self, enable: bool) -> Result<()>;

    /// Set the depth comparison function
    fn set_depth_compare(&mut self, compare: CompareOp) -> Result<()>;

    /// Toggle decal depth mode (negative polygon offset to win z-fighting)
    fn set_zmode_decal(&mut self, enable: bool) -> Result<()>;

    /// Set the viewport rectangle
    fn set_viewport(&mut self, rect: Rect2D) -> Result<()>;

    /// Set the scissor rectangle
    fn set_scissor(&mut self, rect: Rect2D) -> Result<()>;

    /// Enable or disable the scissor test
    fn set_scissor_enabled(&mut self, enable: bool) -> Result<()>;

    // ===== FRAME PAIR =====

    /// Clear color and depth buffers
    fn clear(&mut self, color: [f32; 4]) -> Result<()>;

    /// Finish the frame and swap buffers
    fn end_frame(&mut self) -> Result<()>;
}
