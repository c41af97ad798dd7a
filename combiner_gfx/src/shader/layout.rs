/// Vertex attribute layout builder
///
/// Computes the ordered, tightly packed attribute schema of the single
/// interleaved vertex stream for a decoded descriptor. The schema must match
/// the memory layout the vertex-buffer producer uses upstream exactly; a
/// mismatch is silent rendering corruption, not a reported error, so the
/// accumulation rule here is a strict contract.

use crate::shader::DecodedLayout;

/// Upper bound on attributes per program: position, texcoord, fog, 4 inputs
pub const MAX_VERTEX_ATTRIBUTES: usize = 7;

/// Size in bytes of one vertex component
pub const FLOAT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// Attribute name of the position, as it appears in every vertex binary
pub const POSITION_ATTRIBUTE: &str = "aPosition";

/// Attribute name of the texture coordinate
pub const TEXCOORD_ATTRIBUTE: &str = "aTexCoord";

/// Attribute name of the fog factor
pub const FOG_ATTRIBUTE: &str = "aFog";

/// Attribute names of the generic color inputs, by channel
pub const INPUT_ATTRIBUTES: [&str; 4] = ["aInput1", "aInput2", "aInput3", "aInput4"];

/// One entry of the vertex attribute schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Semantic name, matching the vertex binary's input parameter
    pub name: &'static str,
    /// Number of float components
    pub component_count: u32,
    /// Offset in bytes within one vertex record
    pub offset: u32,
    /// Shared stream index (always 0: single interleaved stream)
    pub stream_index: u32,
}

/// Ordered vertex attribute schema plus record stride
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Attributes in stream order: position, texcoord?, fog?, inputs 1..N
    pub attributes: Vec<VertexAttribute>,
    /// Stride in bytes of one vertex record
    pub stride: u32,
}

impl VertexLayout {
    /// Build the attribute schema for a decoded descriptor
    ///
    /// Accumulation rule, in fixed order:
    /// 1. Position: always, 4 floats, offset 0
    /// 2. Texture coordinate: iff any texture unit used, 2 floats
    /// 3. Fog factor: iff fog enabled, 4 floats
    /// 4. Generic inputs 1..N: 3 floats each, 4 when alpha is enabled
    pub fn build(decoded: &DecodedLayout) -> Self {
        let mut attributes = Vec::with_capacity(MAX_VERTEX_ATTRIBUTES);
        let mut floats = 0u32;

        attributes.push(VertexAttribute {
            name: POSITION_ATTRIBUTE,
            component_count: 4,
            offset: floats * FLOAT_SIZE,
            stream_index: 0,
        });
        floats += 4;

        if decoded.uses_any_texture() {
            attributes.push(VertexAttribute {
                name: TEXCOORD_ATTRIBUTE,
                component_count: 2,
                offset: floats * FLOAT_SIZE,
                stream_index: 0,
            });
            floats += 2;
        }

        if decoded.opt_fog {
            attributes.push(VertexAttribute {
                name: FOG_ATTRIBUTE,
                component_count: 4,
                offset: floats * FLOAT_SIZE,
                stream_index: 0,
            });
            floats += 4;
        }

        let input_size = if decoded.opt_alpha { 4 } else { 3 };
        for channel in 0..decoded.num_inputs as usize {
            attributes.push(VertexAttribute {
                name: INPUT_ATTRIBUTES[channel],
                component_count: input_size,
                offset: floats * FLOAT_SIZE,
                stream_index: 0,
            });
            floats += input_size;
        }

        Self {
            attributes,
            stride: floats * FLOAT_SIZE,
        }
    }

    /// Stride of one vertex record in floats
    pub fn stride_floats(&self) -> u32 {
        self.stride / FLOAT_SIZE
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
