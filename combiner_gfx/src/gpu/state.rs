/// GPU-side fixed-function state types shared between the subsystem and drivers

use bitflags::bitflags;

/// Data format of one vertex attribute
///
/// The interleaved stream produced upstream is all 32-bit floats; the enum
/// exists so drivers switch on it instead of assuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFormat {
    /// 32-bit IEEE float components
    F32,
}

/// One vertex attribute as handed to the driver, register already resolved
#[derive(Debug, Clone, Copy)]
pub struct GpuVertexAttribute {
    /// Vertex stream this attribute reads from (always 0: single interleaved stream)
    pub stream_index: u32,
    /// Offset in bytes from the start of a vertex record
    pub offset: u32,
    /// Component data format
    pub format: AttributeFormat,
    /// Input register inside the vertex binary, resolved by name lookup
    pub register: u32,
    /// Number of components (2, 3 or 4)
    pub component_count: u32,
}

/// Index element type fed to indexed draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    /// 16-bit indices (max 65535 vertices)
    U16,
    /// 32-bit indices
    U32,
}

/// The single interleaved vertex stream of a program
#[derive(Debug, Clone, Copy)]
pub struct VertexStream {
    /// Stride in bytes between consecutive vertex records
    pub stride: u32,
    /// Index element type
    pub index_source: IndexSource,
}

// ===== BLEND STATE =====

bitflags! {
    /// Which color channels a fragment program writes
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ColorWriteMask: u8 {
        const R = 1 << 0;
        const G = 1 << 1;
        const B = 1 << 2;
        const A = 1 << 3;
    }
}

/// Blend factor for the fixed-function blend equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Fragment-program blend state
///
/// Passed to the driver at fragment-program creation; `None` means blending
/// disabled entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    /// Channels the blend equation applies to
    pub color_mask: ColorWriteMask,
    /// Source factor for the color channels
    pub color_src: BlendFactor,
    /// Destination factor for the color channels
    pub color_dst: BlendFactor,
    /// Source factor for the alpha channel
    pub alpha_src: BlendFactor,
    /// Destination factor for the alpha channel
    pub alpha_dst: BlendFactor,
}

impl BlendState {
    /// Standard alpha-over blend: src-alpha / one-minus-src-alpha over the
    /// color channels only, alpha channel written through unblended.
    pub const fn alpha_over() -> Self {
        Self {
            color_mask: ColorWriteMask::R
                .union(ColorWriteMask::G)
                .union(ColorWriteMask::B),
            color_src: BlendFactor::SrcAlpha,
            color_dst: BlendFactor::OneMinusSrcAlpha,
            alpha_src: BlendFactor::One,
            alpha_dst: BlendFactor::Zero,
        }
    }
}

// ===== RENDER STATE =====

/// Comparison operator for the depth test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Never pass
    Never,
    /// Pass if value < reference
    Less,
    /// Pass if value == reference
    Equal,
    /// Pass if value <= reference
    LessOrEqual,
    /// Pass if value > reference
    Greater,
    /// Pass if value != reference
    NotEqual,
    /// Pass if value >= reference
    GreaterOrEqual,
    /// Always pass
    Always,
}

/// 2D rectangle for viewport and scissor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Clamp to edge
    Clamp,
    /// Repeat
    Repeat,
    /// Mirror once, then clamp
    MirrorClamp,
}

/// Driver-issued texture identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
