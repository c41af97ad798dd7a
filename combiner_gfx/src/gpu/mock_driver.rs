/// Mock GPU driver for unit tests (no GPU required)
///
/// Records every driver call as a command string so tests can assert on the
/// exact GPU-facing traffic without a real backend.

use std::sync::Arc;

use crate::error::Result;
use crate::gpu::{
    BlendState, CompareOp, FragmentProgram, GpuDriver, GpuVertexAttribute, Rect2D, ShaderBinary,
    TextureId, VertexProgram, VertexStream, WrapMode,
};

/// Attribute names the mock vertex binaries expose, in register order
pub const MOCK_ATTRIBUTE_NAMES: [&str; 7] = [
    "aPosition", "aTexCoord", "aFog", "aInput1", "aInput2", "aInput3", "aInput4",
];

// ============================================================================
// Mock ShaderBinary
// ============================================================================

#[derive(Debug)]
pub struct MockShaderBinary {
    /// Sequential registration id, for identity assertions
    pub id: u32,
    /// Size of the registered blob
    pub code_len: usize,
}

impl ShaderBinary for MockShaderBinary {
    fn attribute_register(&self, name: &str) -> Option<u32> {
        MOCK_ATTRIBUTE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| i as u32)
    }
}

// ============================================================================
// Mock programs
// ============================================================================

#[derive(Debug)]
pub struct MockVertexProgram {
    pub id: u32,
}

impl VertexProgram for MockVertexProgram {}

#[derive(Debug)]
pub struct MockFragmentProgram {
    pub id: u32,
    pub blend: Option<BlendState>,
}

impl FragmentProgram for MockFragmentProgram {}

// ============================================================================
// Mock driver
// ============================================================================

/// Mock GpuDriver that records calls without touching any GPU
#[derive(Debug, Default)]
pub struct MockGpuDriver {
    /// Every call, formatted, in order
    pub commands: Vec<String>,
    /// Number of register_binary calls
    pub binaries_registered: u32,
    /// Number of create_vertex_program calls
    pub vertex_programs_created: u32,
    /// Number of create_fragment_program calls
    pub fragment_programs_created: u32,
    /// (vertex_count, float_count) of every draw
    pub draws: Vec<(u32, usize)>,
    /// Index buffer contents from upload_index_buffer
    pub index_buffer: Vec<u16>,
    next_texture: u32,
}

impl MockGpuDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GpuDriver for MockGpuDriver {
    fn register_binary(&mut self, code: &[u8]) -> Result<Arc<dyn ShaderBinary>> {
        let id = self.binaries_registered;
        self.binaries_registered += 1;
        self.commands
            .push(format!("register_binary id={} len={}", id, code.len()));
        Ok(Arc::new(MockShaderBinary {
            id,
            code_len: code.len(),
        }))
    }

    fn create_vertex_program(
        &mut self,
        _binary: &Arc<dyn ShaderBinary>,
        attributes: &[GpuVertexAttribute],
        stream: VertexStream,
    ) -> Result<Arc<dyn VertexProgram>> {
        let id = self.vertex_programs_created;
        self.vertex_programs_created += 1;
        let attrs = attributes
            .iter()
            .map(|a| format!("r{}@{}x{}", a.register, a.offset, a.component_count))
            .collect::<Vec<_>>()
            .join(",");
        self.commands.push(format!(
            "create_vertex_program id={} attrs=[{}] stride={}",
            id, attrs, stream.stride
        ));
        Ok(Arc::new(MockVertexProgram { id }))
    }

    fn create_fragment_program(
        &mut self,
        _binary: &Arc<dyn ShaderBinary>,
        blend: Option<BlendState>,
    ) -> Result<Arc<dyn FragmentProgram>> {
        let id = self.fragment_programs_created;
        self.fragment_programs_created += 1;
        self.commands.push(format!(
            "create_fragment_program id={} blend={}",
            id,
            if blend.is_some() { "alpha_over" } else { "none" }
        ));
        Ok(Arc::new(MockFragmentProgram { id, blend }))
    }

    fn set_programs(
        &mut self,
        _vertex: &Arc<dyn VertexProgram>,
        _fragment: &Arc<dyn FragmentProgram>,
    ) -> Result<()> {
        self.commands.push("set_programs".to_string());
        Ok(())
    }

    fn upload_index_buffer(&mut self, indices: &[u16]) -> Result<()> {
        self.index_buffer = indices.to_vec();
        self.commands
            .push(format!("upload_index_buffer len={}", indices.len()));
        Ok(())
    }

    fn draw_triangles(&mut self, vertex_data: &[f32], vertex_count: u32) -> Result<()> {
        self.draws.push((vertex_count, vertex_data.len()));
        self.commands.push(format!(
            "draw_triangles vertices={} floats={}",
            vertex_count,
            vertex_data.len()
        ));
        Ok(())
    }

    fn new_texture(&mut self) -> Result<TextureId> {
        let id = self.next_texture;
        self.next_texture += 1;
        self.commands.push(format!("new_texture id={}", id));
        Ok(TextureId(id))
    }

    fn select_texture(&mut self, tile: u32, texture: TextureId) -> Result<()> {
        self.commands
            .push(format!("select_texture tile={} id={}", tile, texture.0));
        Ok(())
    }

    fn upload_texture(&mut self, rgba32: &[u8], width: u32, height: u32) -> Result<()> {
        self.commands.push(format!(
            "upload_texture {}x{} bytes={}",
            width,
            height,
            rgba32.len()
        ));
        Ok(())
    }

    fn set_sampler_parameters(
        &mut self,
        tile: u32,
        linear_filter: bool,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
    ) -> Result<()> {
        self.commands.push(format!(
            "set_sampler_parameters tile={} linear={} wrap=({:?},{:?})",
            tile, linear_filter, wrap_s, wrap_t
        ));
        Ok(())
    }

    fn set_depth_test(&mut self, enable: bool) -> Result<()> {
        self.commands.push(format!("set_depth_test {}", enable));
        Ok(())
    }

    fn set_depth_mask(&mut self, enable: bool) -> Result<()> {
        self.commands.push(format!("set_depth_mask {}", enable));
        Ok(())
    }

    fn set_depth_compare(&mut self, compare: CompareOp) -> Result<()> {
        self.commands.push(format!("set_depth_compare {:?}", compare));
        Ok(())
    }

    fn set_zmode_decal(&mut self, enable: bool) -> Result<()> {
        self.commands.push(format!("set_zmode_decal {}", enable));
        Ok(())
    }

    fn set_viewport(&mut self, rect: Rect2D) -> Result<()> {
        self.commands.push(format!(
            "set_viewport {},{} {}x{}",
            rect.x, rect.y, rect.width, rect.height
        ));
        Ok(())
    }

    fn set_scissor(&mut self, rect: Rect2D) -> Result<()> {
        self.commands.push(format!(
            "set_scissor {},{} {}x{}",
            rect.x, rect.y, rect.width, rect.height
        ));
        Ok(())
    }

    fn set_scissor_enabled(&mut self, enable: bool) -> Result<()> {
        self.commands.push(format!("set_scissor_enabled {}", enable));
        Ok(())
    }

    fn clear(&mut self, color: [f32; 4]) -> Result<()> {
        self.commands.push(format!("clear {:?}", color));
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.commands.push("end_frame".to_string());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_driver_tests.rs"]
mod tests;
