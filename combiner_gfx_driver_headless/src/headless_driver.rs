/// HeadlessGpuDriver - recording implementation of the GpuDriver trait

use std::sync::Arc;

use rustc_hash::FxHashMap;

use combiner_gfx::gpu::{
    BlendState, CompareOp, FragmentProgram, GpuDriver, GpuVertexAttribute, Rect2D, ShaderBinary,
    TextureId, VertexProgram, VertexStream, WrapMode,
};
use combiner_gfx::{Error, Result};

use crate::headless_shader::{HeadlessFragmentProgram, HeadlessShaderBinary, HeadlessVertexProgram};

/// Uploaded texture record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TextureRecord {
    width: u32,
    height: u32,
    bytes: usize,
}

/// GPU driver that records calls instead of rendering
///
/// Every trait method appends a line to the call log; resource creation also
/// bumps the matching counter. Tests read the log and counters back through
/// the accessor methods.
pub struct HeadlessGpuDriver {
    call_log: Vec<String>,
    binaries_registered: u32,
    vertex_programs_linked: u32,
    fragment_programs_linked: u32,
    index_buffer: Vec<u16>,
    draws: Vec<u32>,
    textures: FxHashMap<u32, TextureRecord>,
    active_texture: [Option<TextureId>; 2],
    next_texture: u32,
    frames_ended: u32,
}

impl HeadlessGpuDriver {
    /// Create an empty recording driver
    pub fn new() -> Self {
        Self {
            call_log: Vec::new(),
            binaries_registered: 0,
            vertex_programs_linked: 0,
            fragment_programs_linked: 0,
            index_buffer: Vec::new(),
            draws: Vec::new(),
            textures: FxHashMap::default(),
            active_texture: [None, None],
            next_texture: 0,
            frames_ended: 0,
        }
    }

    /// Full call log, in call order
    pub fn call_log(&self) -> &[String] {
        &self.call_log
    }

    /// Number of register_binary calls so far
    pub fn registered_binary_count(&self) -> u32 {
        self.binaries_registered
    }

    /// Number of vertex programs linked so far
    pub fn vertex_program_count(&self) -> u32 {
        self.vertex_programs_linked
    }

    /// Number of fragment programs linked so far
    pub fn fragment_program_count(&self) -> u32 {
        self.fragment_programs_linked
    }

    /// Vertex counts of every draw, in order
    pub fn draws(&self) -> &[u32] {
        &self.draws
    }

    /// Contents of the uploaded index buffer
    pub fn index_buffer(&self) -> &[u16] {
        &self.index_buffer
    }

    /// Number of frames ended
    pub fn frames_ended(&self) -> u32 {
        self.frames_ended
    }
}

impl Default for HeadlessGpuDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuDriver for HeadlessGpuDriver {
    fn register_binary(&mut self, code: &[u8]) -> Result<Arc<dyn ShaderBinary>> {
        let id = self.binaries_registered;
        self.binaries_registered += 1;
        self.call_log
            .push(format!("register_binary id={} len={}", id, code.len()));
        Ok(Arc::new(HeadlessShaderBinary {
            id,
            code: code.to_vec(),
        }))
    }

    fn create_vertex_program(
        &mut self,
        _binary: &Arc<dyn ShaderBinary>,
        attributes: &[GpuVertexAttribute],
        stream: VertexStream,
    ) -> Result<Arc<dyn VertexProgram>> {
        let id = self.vertex_programs_linked;
        self.vertex_programs_linked += 1;
        self.call_log.push(format!(
            "create_vertex_program id={} attributes={} stride={}",
            id,
            attributes.len(),
            stream.stride
        ));
        Ok(Arc::new(HeadlessVertexProgram {
            id,
            stride: stream.stride,
            attribute_count: attributes.len(),
        }))
    }

    fn create_fragment_program(
        &mut self,
        _binary: &Arc<dyn ShaderBinary>,
        blend: Option<BlendState>,
    ) -> Result<Arc<dyn FragmentProgram>> {
        let id = self.fragment_programs_linked;
        self.fragment_programs_linked += 1;
        self.call_log.push(format!(
            "create_fragment_program id={} blend={}",
            id,
            if blend.is_some() { "alpha_over" } else { "none" }
        ));
        Ok(Arc::new(HeadlessFragmentProgram { id, blend }))
    }

    fn set_programs(
        &mut self,
        _vertex: &Arc<dyn VertexProgram>,
        _fragment: &Arc<dyn FragmentProgram>,
    ) -> Result<()> {
        self.call_log.push("set_programs".to_string());
        Ok(())
    }

    fn upload_index_buffer(&mut self, indices: &[u16]) -> Result<()> {
        self.index_buffer = indices.to_vec();
        self.call_log
            .push(format!("upload_index_buffer len={}", indices.len()));
        Ok(())
    }

    fn draw_triangles(&mut self, vertex_data: &[f32], vertex_count: u32) -> Result<()> {
        if self.index_buffer.len() < vertex_count as usize {
            return Err(Error::DriverError(format!(
                "indexed draw of {} vertices exceeds index buffer of {}",
                vertex_count,
                self.index_buffer.len()
            )));
        }
        self.draws.push(vertex_count);
        self.call_log.push(format!(
            "draw_triangles vertices={} floats={}",
            vertex_count,
            vertex_data.len()
        ));
        Ok(())
    }

    fn new_texture(&mut self) -> Result<TextureId> {
        let id = self.next_texture;
        self.next_texture += 1;
        self.call_log.push(format!("new_texture id={}", id));
        Ok(TextureId(id))
    }

    fn select_texture(&mut self, tile: u32, texture: TextureId) -> Result<()> {
        if tile as usize >= self.active_texture.len() {
            return Err(Error::DriverError(format!(
                "sampler tile {} out of range",
                tile
            )));
        }
        self.active_texture[tile as usize] = Some(texture);
        self.call_log
            .push(format!("select_texture tile={} id={}", tile, texture.0));
        Ok(())
    }

    fn upload_texture(&mut self, rgba32: &[u8], width: u32, height: u32) -> Result<()> {
        // Uploads land on the texture selected on tile 0, matching the
        // upstream upload/select call order
        if let Some(texture) = self.active_texture[0] {
            self.textures.insert(
                texture.0,
                TextureRecord {
                    width,
                    height,
                    bytes: rgba32.len(),
                },
            );
        }
        self.call_log.push(format!(
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
        self.call_log.push(format!(
            "set_sampler_parameters tile={} linear={} wrap=({:?},{:?})",
            tile, linear_filter, wrap_s, wrap_t
        ));
        Ok(())
    }

    fn set_depth_test(&mut self, enable: bool) -> Result<()> {
        self.call_log.push(format!("set_depth_test {}", enable));
        Ok(())
    }

    fn set_depth_mask(&mut self, enable: bool) -> Result<()> {
        self.call_log.push(format!("set_depth_mask {}", enable));
        Ok(())
    }

    fn set_depth_compare(&mut self, compare: CompareOp) -> Result<()> {
        self.call_log.push(format!("set_depth_compare {:?}", compare));
        Ok(())
    }

    fn set_zmode_decal(&mut self, enable: bool) -> Result<()> {
        self.call_log.push(format!("set_zmode_decal {}", enable));
        Ok(())
    }

    fn set_viewport(&mut self, rect: Rect2D) -> Result<()> {
        self.call_log.push(format!(
            "set_viewport {},{} {}x{}",
            rect.x, rect.y, rect.width, rect.height
        ));
        Ok(())
    }

    fn set_scissor(&mut self, rect: Rect2D) -> Result<()> {
        self.call_log.push(format!(
            "set_scissor {},{} {}x{}",
            rect.x, rect.y, rect.width, rect.height
        ));
        Ok(())
    }

    fn set_scissor_enabled(&mut self, enable: bool) -> Result<()> {
        self.call_log
            .push(format!("set_scissor_enabled {}", enable));
        Ok(())
    }

    fn clear(&mut self, color: [f32; 4]) -> Result<()> {
        self.call_log.push(format!("clear {:?}", color));
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frames_ended += 1;
        self.call_log.push("end_frame".to_string());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "headless_driver_tests.rs"]
mod tests;
