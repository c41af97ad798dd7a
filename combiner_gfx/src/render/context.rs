/// RenderContext - program binding state machine and draw submission
///
/// One context per render session. Owns the program cache, the binary
/// loader, and the current-binding state; everything GPU-facing goes through
/// the driver trait. Single-threaded by design: all methods run on the
/// render thread, and the driver mutex exists only so backends can be shared
/// with test harnesses.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, Weak};

use crate::error::Result;
use crate::gpu::{CompareOp, GpuDriver, Rect2D, TextureId, WrapMode};
use crate::shader::{BinaryLoader, CompiledProgram, ProgramCache, ShaderDescriptor, ShaderInfo};

/// Capacity of the identity index buffer, and thus the most vertices one
/// submission may carry
pub const MAX_INDICES: usize = 8192;

/// Render context configuration
#[derive(Debug, Clone)]
pub struct GfxConfig {
    /// Directory holding the precompiled shader binaries
    pub shader_dir: PathBuf,
    /// Frame clear color (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for GfxConfig {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from("shaders"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Render context: cache, binding state and the driver boundary
pub struct RenderContext {
    driver: Arc<Mutex<dyn GpuDriver>>,
    loader: BinaryLoader,
    cache: ProgramCache,
    /// Currently bound program, or None while unbound. Weak: binding never
    /// owns the program, the cache does.
    current: Option<Weak<CompiledProgram>>,
    clear_color: [f32; 4],
}

impl RenderContext {
    /// Create a context over a driver
    ///
    /// Uploads the identity index buffer (vertices always arrive in
    /// submission order, so index i maps to vertex i for the whole session)
    /// and sets the depth compare function.
    pub fn new(driver: Arc<Mutex<dyn GpuDriver>>, config: GfxConfig) -> Result<Self> {
        {
            let mut driver = driver.lock().unwrap();
            let indices: Vec<u16> = (0..MAX_INDICES as u16).collect();
            driver.upload_index_buffer(&indices)?;
            driver.set_depth_compare(CompareOp::LessOrEqual)?;
        }

        crate::gfx_info!(
            "combiner_gfx::RenderContext",
            "Render context initialized (shader dir '{}', {} index capacity)",
            config.shader_dir.display(),
            MAX_INDICES
        );

        Ok(Self {
            driver,
            loader: BinaryLoader::new(config.shader_dir),
            cache: ProgramCache::new(),
            current: None,
            clear_color: config.clear_color,
        })
    }

    // ===== PROGRAM MANAGEMENT =====

    /// Return the program for a descriptor, building and caching it on first
    /// request
    pub fn get_or_create(&mut self, descriptor: ShaderDescriptor) -> Result<Arc<CompiledProgram>> {
        let mut driver = self.driver.lock().unwrap();
        self.cache.get_or_create(descriptor, &self.loader, &mut *driver)
    }

    /// Non-creating query for an already built program
    pub fn lookup(&self, descriptor: ShaderDescriptor) -> Option<Arc<CompiledProgram>> {
        self.cache.lookup(descriptor)
    }

    /// Vertex-record shape for a descriptor, for callers that need to fill a
    /// buffer before (or without) building the program
    ///
    /// Decoding is pure, so this never triggers a build.
    pub fn shader_info(&self, descriptor: ShaderDescriptor) -> ShaderInfo {
        descriptor.info()
    }

    /// Number of programs built this session
    pub fn program_count(&self) -> usize {
        self.cache.len()
    }

    // ===== BINDING STATE MACHINE =====

    /// Make a program the active GPU shading state
    ///
    /// Harmless if the program is already bound.
    pub fn bind(&mut self, program: &Arc<CompiledProgram>) -> Result<()> {
        let mut driver = self.driver.lock().unwrap();
        driver.set_programs(program.vertex_program(), program.fragment_program())?;
        drop(driver);
        self.current = Some(Arc::downgrade(program));
        Ok(())
    }

    /// Unconditionally drop the current binding
    pub fn unbind(&mut self) {
        self.current = None;
    }

    /// Drop the current binding only if `program` is the bound one
    ///
    /// No-op when a different program is bound. Used at teardown so stale
    /// bindings are not left dangling.
    pub fn unbind_if(&mut self, program: &Arc<CompiledProgram>) {
        if let Some(bound) = self.current_program() {
            if Arc::ptr_eq(&bound, program) {
                self.current = None;
            }
        }
    }

    /// The currently bound program, if any
    pub fn current_program(&self) -> Option<Arc<CompiledProgram>> {
        self.current.as_ref()?.upgrade()
    }

    // ===== DRAW SUBMISSION =====

    /// Submit an interleaved vertex buffer as an indexed triangle list
    ///
    /// `vertex_data` must hold exactly `vertex_count` records laid out per
    /// the bound program's stride.
    ///
    /// # Errors
    ///
    /// `Error::InvalidOperation` when no program is bound, `vertex_count` is
    /// not a multiple of 3 or exceeds `MAX_INDICES`, or the buffer length
    /// does not match `vertex_count` times the bound stride.
    pub fn submit_triangles(&mut self, vertex_data: &[f32], vertex_count: usize) -> Result<()> {
        let Some(program) = self.current_program() else {
            crate::gfx_bail!(
                "combiner_gfx::RenderContext",
                "Draw submitted with no program bound"
            );
        };

        if vertex_count % 3 != 0 {
            crate::gfx_bail!(
                "combiner_gfx::RenderContext",
                "Triangle-list submission of {} vertices is not a multiple of 3",
                vertex_count
            );
        }
        if vertex_count > MAX_INDICES {
            crate::gfx_bail!(
                "combiner_gfx::RenderContext",
                "Submission of {} vertices exceeds the index capacity of {}",
                vertex_count,
                MAX_INDICES
            );
        }
        let expected = vertex_count * program.stride_floats() as usize;
        if vertex_data.len() != expected {
            crate::gfx_bail!(
                "combiner_gfx::RenderContext",
                "Vertex buffer of {} floats does not match {} vertices at stride {} floats (program {})",
                vertex_data.len(),
                vertex_count,
                program.stride_floats(),
                program.descriptor()
            );
        }

        let mut driver = self.driver.lock().unwrap();
        driver.draw_triangles(vertex_data, vertex_count as u32)
    }

    // ===== FRAME PAIR =====

    /// Begin a frame: clear color and depth with the scissor test suspended
    pub fn begin_frame(&mut self) -> Result<()> {
        let mut driver = self.driver.lock().unwrap();
        driver.set_scissor_enabled(false)?;
        // Depth writes must be on for the depth clear to land
        driver.set_depth_mask(true)?;
        driver.clear(self.clear_color)?;
        driver.set_scissor_enabled(true)?;
        Ok(())
    }

    /// End the frame and swap buffers
    pub fn end_frame(&mut self) -> Result<()> {
        let mut driver = self.driver.lock().unwrap();
        driver.end_frame()
    }

    // ===== RENDER STATE =====

    /// Enable or disable the depth test
    pub fn set_depth_test(&mut self, enable: bool) -> Result<()> {
        self.driver.lock().unwrap().set_depth_test(enable)
    }

    /// Enable or disable depth buffer writes
    pub fn set_depth_mask(&mut self, enable: bool) -> Result<()> {
        self.driver.lock().unwrap().set_depth_mask(enable)
    }

    /// Toggle decal depth mode
    pub fn set_zmode_decal(&mut self, enable: bool) -> Result<()> {
        self.driver.lock().unwrap().set_zmode_decal(enable)
    }

    /// Set the viewport rectangle
    pub fn set_viewport(&mut self, rect: Rect2D) -> Result<()> {
        self.driver.lock().unwrap().set_viewport(rect)
    }

    /// Set the scissor rectangle
    pub fn set_scissor(&mut self, rect: Rect2D) -> Result<()> {
        self.driver.lock().unwrap().set_scissor(rect)
    }

    // ===== TEXTURES =====

    /// Allocate a texture object
    pub fn new_texture(&mut self) -> Result<TextureId> {
        self.driver.lock().unwrap().new_texture()
    }

    /// Bind a texture to a sampler tile (0 or 1)
    pub fn select_texture(&mut self, tile: u32, texture: TextureId) -> Result<()> {
        if tile > 1 {
            crate::gfx_bail!(
                "combiner_gfx::RenderContext",
                "Texture tile {} out of range (2 sampler tiles)",
                tile
            );
        }
        self.driver.lock().unwrap().select_texture(tile, texture)
    }

    /// Upload RGBA32 pixels to the texture on the active tile
    pub fn upload_texture(&mut self, rgba32: &[u8], width: u32, height: u32) -> Result<()> {
        let expected = width as usize * height as usize * 4;
        if rgba32.len() != expected {
            crate::gfx_bail!(
                "combiner_gfx::RenderContext",
                "Texture payload of {} bytes does not match {}x{} RGBA32",
                rgba32.len(),
                width,
                height
            );
        }
        self.driver.lock().unwrap().upload_texture(rgba32, width, height)
    }

    /// Set filtering and wrap modes for the texture on a tile
    pub fn set_sampler_parameters(
        &mut self,
        tile: u32,
        linear_filter: bool,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
    ) -> Result<()> {
        if tile > 1 {
            crate::gfx_bail!(
                "combiner_gfx::RenderContext",
                "Texture tile {} out of range (2 sampler tiles)",
                tile
            );
        }
        self.driver
            .lock()
            .unwrap()
            .set_sampler_parameters(tile, linear_filter, wrap_s, wrap_t)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
