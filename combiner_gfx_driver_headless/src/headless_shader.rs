/// Headless implementations of the shader resource traits

use combiner_gfx::gpu::{BlendState, FragmentProgram, ShaderBinary, VertexProgram};
use combiner_gfx::shader::{
    FOG_ATTRIBUTE, INPUT_ATTRIBUTES, POSITION_ATTRIBUTE, TEXCOORD_ATTRIBUTE,
};

/// A registered binary blob
///
/// Attribute registers follow the canonical interleaved attribute order, so
/// every vertex binary produced for this subsystem resolves deterministically.
#[derive(Debug)]
pub struct HeadlessShaderBinary {
    /// Sequential registration id
    pub id: u32,
    /// The registered blob
    pub code: Vec<u8>,
}

impl ShaderBinary for HeadlessShaderBinary {
    fn attribute_register(&self, name: &str) -> Option<u32> {
        let canonical = [
            POSITION_ATTRIBUTE,
            TEXCOORD_ATTRIBUTE,
            FOG_ATTRIBUTE,
            INPUT_ATTRIBUTES[0],
            INPUT_ATTRIBUTES[1],
            INPUT_ATTRIBUTES[2],
            INPUT_ATTRIBUTES[3],
        ];
        canonical.iter().position(|n| *n == name).map(|i| i as u32)
    }
}

/// A linked vertex program record
#[derive(Debug)]
pub struct HeadlessVertexProgram {
    /// Sequential link id
    pub id: u32,
    /// Stride in bytes of the program's vertex stream
    pub stride: u32,
    /// Number of attributes in the schema
    pub attribute_count: usize,
}

impl VertexProgram for HeadlessVertexProgram {}

/// A linked fragment program record
#[derive(Debug)]
pub struct HeadlessFragmentProgram {
    /// Sequential link id
    pub id: u32,
    /// Blend state the program was linked with
    pub blend: Option<BlendState>,
}

impl FragmentProgram for HeadlessFragmentProgram {}
