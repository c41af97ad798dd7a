/// ShaderDescriptor - the 32-bit combiner configuration word and its decoder
///
/// The bit layout is an external, versioned contract with the upstream
/// combiner-configuration encoder and must be decoded exactly: eight 3-bit
/// source selectors in bits 0..24 (two groups of four, the second group
/// shifted by 12), option flag bits from bit 24 up.

use bitflags::bitflags;
use std::fmt;

/// Width of one source selector field
pub const SELECTOR_BITS: u32 = 3;

/// Mask for one source selector field
pub const SELECTOR_MASK: u32 = (1 << SELECTOR_BITS) - 1;

/// Selectors per combiner group (color group and alpha group)
pub const SELECTORS_PER_GROUP: usize = 4;

/// Number of combiner groups
pub const SELECTOR_GROUPS: usize = 2;

/// Bit offset of the second selector group
pub const GROUP_SHIFT: u32 = SELECTOR_BITS * SELECTORS_PER_GROUP as u32;

/// Highest generic color input channel a descriptor can reference
pub const MAX_COLOR_INPUTS: u8 = 4;

bitflags! {
    /// Option flag bits of a shader descriptor (outside the 24 selector bits)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DescriptorFlags: u32 {
        /// Fragment alpha output enabled; widens generic inputs to 4 floats
        /// and enables alpha-over blending
        const ALPHA = 1 << 24;
        /// Per-vertex fog factor enabled
        const FOG = 1 << 25;
        /// Hard-edged alpha test variant (no layout effect)
        const TEXTURE_EDGE = 1 << 26;
        /// Dithered noise variant (no layout effect)
        const NOISE = 1 << 27;
    }
}

/// One 3-bit combiner source selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Constant zero source
    Zero,
    /// Generic color input channel 1
    Input1,
    /// Generic color input channel 2
    Input2,
    /// Generic color input channel 3
    Input3,
    /// Generic color input channel 4
    Input4,
    /// Texture unit 0 color
    Texel0,
    /// Texture unit 0 alpha
    Texel0Alpha,
    /// Texture unit 1 color
    Texel1,
}

impl Selector {
    /// Decode a selector from its 3-bit field value (total: every value maps)
    pub fn from_bits(bits: u32) -> Self {
        match bits & SELECTOR_MASK {
            1 => Selector::Input1,
            2 => Selector::Input2,
            3 => Selector::Input3,
            4 => Selector::Input4,
            5 => Selector::Texel0,
            6 => Selector::Texel0Alpha,
            7 => Selector::Texel1,
            _ => Selector::Zero,
        }
    }

    /// Generic input channel index (1..=4) referenced by this selector, if any
    pub fn channel(self) -> Option<u8> {
        match self {
            Selector::Input1 => Some(1),
            Selector::Input2 => Some(2),
            Selector::Input3 => Some(3),
            Selector::Input4 => Some(4),
            _ => None,
        }
    }

    /// Texture unit sampled by this selector, if any
    pub fn texture_unit(self) -> Option<usize> {
        match self {
            Selector::Texel0 | Selector::Texel0Alpha => Some(0),
            Selector::Texel1 => Some(1),
            _ => None,
        }
    }
}

/// Opaque 32-bit shader identifier
///
/// Encodes a full fixed-function-like shading configuration. Immutable once
/// constructed; used as the program cache key and as decoder input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderDescriptor(u32);

impl ShaderDescriptor {
    /// Wrap a raw descriptor word
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw descriptor word
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Option flags of this descriptor (unknown bits ignored)
    pub fn flags(&self) -> DescriptorFlags {
        DescriptorFlags::from_bits_truncate(self.0)
    }

    /// All eight source selectors, group 0 first
    pub fn selectors(&self) -> [Selector; SELECTOR_GROUPS * SELECTORS_PER_GROUP] {
        let mut out = [Selector::Zero; SELECTOR_GROUPS * SELECTORS_PER_GROUP];
        for group in 0..SELECTOR_GROUPS {
            for slot in 0..SELECTORS_PER_GROUP {
                let shift = group as u32 * GROUP_SHIFT + slot as u32 * SELECTOR_BITS;
                out[group * SELECTORS_PER_GROUP + slot] = Selector::from_bits(self.0 >> shift);
            }
        }
        out
    }

    /// Decode this descriptor into its semantic layout
    ///
    /// Pure and total: every 32-bit input decodes to a valid layout; unused
    /// bit patterns simply contribute no inputs and no textures.
    pub fn decode(&self) -> DecodedLayout {
        let flags = self.flags();
        let mut num_inputs = 0u8;
        let mut used_textures = [false; 2];

        for selector in self.selectors() {
            // Highest channel index referenced, not a count of channels used.
            // The vertex stream carries aInput1..aInputN for N = that maximum,
            // even when lower channels go unreferenced.
            if let Some(channel) = selector.channel() {
                num_inputs = num_inputs.max(channel);
            }
            if let Some(unit) = selector.texture_unit() {
                used_textures[unit] = true;
            }
        }

        DecodedLayout {
            num_inputs,
            used_textures,
            opt_alpha: flags.contains(DescriptorFlags::ALPHA),
            opt_fog: flags.contains(DescriptorFlags::FOG),
        }
    }

    /// Vertex-record shape of this descriptor, for callers that fill buffers
    pub fn info(&self) -> ShaderInfo {
        let decoded = self.decode();
        ShaderInfo {
            num_inputs: decoded.num_inputs,
            used_textures: decoded.used_textures,
        }
    }
}

impl fmt::Display for ShaderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Semantic layout derived from a descriptor
///
/// Computed once per descriptor, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedLayout {
    /// Number of generic color inputs in the vertex stream, in [0, 4]
    pub num_inputs: u8,
    /// Which texture units any selector samples
    pub used_textures: [bool; 2],
    /// Alpha output flag
    pub opt_alpha: bool,
    /// Fog flag
    pub opt_fog: bool,
}

impl DecodedLayout {
    /// Whether any texture unit is sampled (texcoord attribute present)
    pub fn uses_any_texture(&self) -> bool {
        self.used_textures[0] || self.used_textures[1]
    }
}

/// Vertex-record shape exposed to vertex-buffer producers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderInfo {
    /// Number of generic color inputs
    pub num_inputs: u8,
    /// Which texture units the shader samples
    pub used_textures: [bool; 2],
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
