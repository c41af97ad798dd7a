/// CompiledProgram - a linked, GPU-ready vertex+fragment program pair
///
/// Built once per descriptor (enforced by the program cache) and never
/// destroyed individually; all programs are reclaimed in bulk when the
/// render context is dropped.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::gpu::{
    AttributeFormat, BlendState, FragmentProgram, GpuDriver, GpuVertexAttribute, IndexSource,
    ShaderBinary, ShaderStage, VertexProgram, VertexStream,
};
use crate::shader::{BinaryLoader, DecodedLayout, ShaderDescriptor, ShaderInfo, VertexLayout};

/// A linked GPU program pair with its vertex attribute schema
#[derive(Debug)]
pub struct CompiledProgram {
    descriptor: ShaderDescriptor,
    decoded: DecodedLayout,
    layout: VertexLayout,
    vertex_binary: Arc<dyn ShaderBinary>,
    fragment_binary: Arc<dyn ShaderBinary>,
    vertex_program: Arc<dyn VertexProgram>,
    fragment_program: Arc<dyn FragmentProgram>,
}

impl CompiledProgram {
    /// Build the program pair for a descriptor
    ///
    /// Decodes the descriptor, builds the attribute layout, loads and
    /// registers both stage binaries, resolves each attribute's input
    /// register by name lookup in the vertex binary, and links the GPU
    /// program objects. Blending is enabled iff the descriptor's alpha flag
    /// is set.
    ///
    /// Registers binaries with the driver as a side effect, which is not
    /// idempotent; callers go through `ProgramCache::get_or_create` so this
    /// runs at most once per descriptor per session.
    pub(crate) fn build(
        descriptor: ShaderDescriptor,
        loader: &BinaryLoader,
        driver: &mut dyn GpuDriver,
    ) -> Result<Self> {
        let decoded = descriptor.decode();
        let layout = VertexLayout::build(&decoded);

        let vertex_binary = loader.load(descriptor, ShaderStage::Vertex, driver)?;
        let fragment_binary = loader.load(descriptor, ShaderStage::Fragment, driver)?;

        let mut gpu_attributes = Vec::with_capacity(layout.attributes.len());
        for attribute in &layout.attributes {
            let register = vertex_binary
                .attribute_register(attribute.name)
                .ok_or_else(|| {
                    crate::gfx_error!(
                        "combiner_gfx::CompiledProgram",
                        "Vertex binary for {} has no attribute '{}'",
                        descriptor,
                        attribute.name
                    );
                    Error::DriverError(format!(
                        "vertex binary for {} has no attribute '{}'",
                        descriptor, attribute.name
                    ))
                })?;
            gpu_attributes.push(GpuVertexAttribute {
                stream_index: attribute.stream_index,
                offset: attribute.offset,
                format: AttributeFormat::F32,
                register,
                component_count: attribute.component_count,
            });
        }

        let stream = VertexStream {
            stride: layout.stride,
            index_source: IndexSource::U16,
        };
        let vertex_program = driver.create_vertex_program(&vertex_binary, &gpu_attributes, stream)?;

        let blend = if decoded.opt_alpha {
            Some(BlendState::alpha_over())
        } else {
            None
        };
        let fragment_program = driver.create_fragment_program(&fragment_binary, blend)?;

        crate::gfx_debug!(
            "combiner_gfx::CompiledProgram",
            "Built program {}: {} attributes, {} inputs, stride {} bytes, alpha {}, fog {}",
            descriptor,
            layout.attributes.len(),
            decoded.num_inputs,
            layout.stride,
            decoded.opt_alpha,
            decoded.opt_fog
        );

        Ok(Self {
            descriptor,
            decoded,
            layout,
            vertex_binary,
            fragment_binary,
            vertex_program,
            fragment_program,
        })
    }

    /// The descriptor this program was built from
    pub fn descriptor(&self) -> ShaderDescriptor {
        self.descriptor
    }

    /// The decoded semantic layout
    pub fn decoded(&self) -> &DecodedLayout {
        &self.decoded
    }

    /// The vertex attribute schema
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Stride of one vertex record in bytes
    pub fn stride(&self) -> u32 {
        self.layout.stride
    }

    /// Stride of one vertex record in floats
    pub fn stride_floats(&self) -> u32 {
        self.layout.stride_floats()
    }

    /// Vertex-record shape, for vertex-buffer producers
    pub fn info(&self) -> ShaderInfo {
        ShaderInfo {
            num_inputs: self.decoded.num_inputs,
            used_textures: self.decoded.used_textures,
        }
    }

    /// The registered vertex-stage binary
    pub fn vertex_binary(&self) -> &Arc<dyn ShaderBinary> {
        &self.vertex_binary
    }

    /// The registered fragment-stage binary
    pub fn fragment_binary(&self) -> &Arc<dyn ShaderBinary> {
        &self.fragment_binary
    }

    /// The linked GPU vertex program
    pub fn vertex_program(&self) -> &Arc<dyn VertexProgram> {
        &self.vertex_program
    }

    /// The linked GPU fragment program
    pub fn fragment_program(&self) -> &Arc<dyn FragmentProgram> {
        &self.fragment_program
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
