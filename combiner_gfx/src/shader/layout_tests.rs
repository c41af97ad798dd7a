//! Unit tests for layout.rs
//!
//! The attribute schemas asserted here are the memory-layout contract with
//! the vertex-buffer producer; the exact offsets and strides matter.

use crate::shader::layout::{
    VertexAttribute, VertexLayout, FOG_ATTRIBUTE, INPUT_ATTRIBUTES, MAX_VERTEX_ATTRIBUTES,
    POSITION_ATTRIBUTE, TEXCOORD_ATTRIBUTE,
};
use crate::shader::DecodedLayout;

fn decoded(
    num_inputs: u8,
    used_textures: [bool; 2],
    opt_alpha: bool,
    opt_fog: bool,
) -> DecodedLayout {
    DecodedLayout {
        num_inputs,
        used_textures,
        opt_alpha,
        opt_fog,
    }
}

fn attribute(name: &'static str, component_count: u32, offset: u32) -> VertexAttribute {
    VertexAttribute {
        name,
        component_count,
        offset,
        stream_index: 0,
    }
}

// ============================================================================
// SCHEMA TESTS
// ============================================================================

#[test]
fn test_position_only_layout() {
    let layout = VertexLayout::build(&decoded(0, [false, false], false, false));
    assert_eq!(layout.attributes, vec![attribute(POSITION_ATTRIBUTE, 4, 0)]);
    assert_eq!(layout.stride, 16);
    assert_eq!(layout.stride_floats(), 4);
}

#[test]
fn test_texture_adds_texcoord_after_position() {
    let layout = VertexLayout::build(&decoded(0, [true, false], false, false));
    assert_eq!(
        layout.attributes,
        vec![
            attribute(POSITION_ATTRIBUTE, 4, 0),
            attribute(TEXCOORD_ATTRIBUTE, 2, 16),
        ]
    );
    assert_eq!(layout.stride, 24);
}

#[test]
fn test_either_texture_unit_yields_one_texcoord() {
    let unit0 = VertexLayout::build(&decoded(0, [true, false], false, false));
    let unit1 = VertexLayout::build(&decoded(0, [false, true], false, false));
    let both = VertexLayout::build(&decoded(0, [true, true], false, false));
    assert_eq!(unit0, unit1);
    assert_eq!(unit0, both);
}

#[test]
fn test_fog_layout() {
    let layout = VertexLayout::build(&decoded(0, [false, false], false, true));
    assert_eq!(
        layout.attributes,
        vec![
            attribute(POSITION_ATTRIBUTE, 4, 0),
            attribute(FOG_ATTRIBUTE, 4, 16),
        ]
    );
    assert_eq!(layout.stride, 32);
}

#[test]
fn test_inputs_are_three_floats_without_alpha() {
    let layout = VertexLayout::build(&decoded(2, [false, false], false, false));
    assert_eq!(
        layout.attributes,
        vec![
            attribute(POSITION_ATTRIBUTE, 4, 0),
            attribute(INPUT_ATTRIBUTES[0], 3, 16),
            attribute(INPUT_ATTRIBUTES[1], 3, 28),
        ]
    );
    assert_eq!(layout.stride, 40);
}

#[test]
fn test_alpha_widens_inputs_to_four_floats() {
    let layout = VertexLayout::build(&decoded(2, [false, false], true, false));
    assert_eq!(
        layout.attributes,
        vec![
            attribute(POSITION_ATTRIBUTE, 4, 0),
            attribute(INPUT_ATTRIBUTES[0], 4, 16),
            attribute(INPUT_ATTRIBUTES[1], 4, 32),
        ]
    );
    assert_eq!(layout.stride, 48);
}

#[test]
fn test_textured_alpha_input_layout() {
    // One texture, one input, alpha on: position 4@0, texcoord 2@16,
    // aInput1 4@24, stride 40 bytes
    let layout = VertexLayout::build(&decoded(1, [true, false], true, false));
    assert_eq!(
        layout.attributes,
        vec![
            attribute(POSITION_ATTRIBUTE, 4, 0),
            attribute(TEXCOORD_ATTRIBUTE, 2, 16),
            attribute(INPUT_ATTRIBUTES[0], 4, 24),
        ]
    );
    assert_eq!(layout.stride, 40);
    assert_eq!(layout.stride_floats(), 10);
}

#[test]
fn test_full_layout_orders_all_attributes() {
    let layout = VertexLayout::build(&decoded(4, [true, true], true, true));
    assert_eq!(
        layout.attributes,
        vec![
            attribute(POSITION_ATTRIBUTE, 4, 0),
            attribute(TEXCOORD_ATTRIBUTE, 2, 16),
            attribute(FOG_ATTRIBUTE, 4, 24),
            attribute(INPUT_ATTRIBUTES[0], 4, 40),
            attribute(INPUT_ATTRIBUTES[1], 4, 56),
            attribute(INPUT_ATTRIBUTES[2], 4, 72),
            attribute(INPUT_ATTRIBUTES[3], 4, 88),
        ]
    );
    assert_eq!(layout.attributes.len(), MAX_VERTEX_ATTRIBUTES);
    assert_eq!(layout.stride, 104);
}

// ============================================================================
// INVARIANT TESTS
// ============================================================================

#[test]
fn test_attributes_are_contiguous_with_no_gaps() {
    // Offsets must accumulate exactly: next offset = previous offset + size
    for num_inputs in 0..=4u8 {
        for textured in [false, true] {
            for alpha in [false, true] {
                for fog in [false, true] {
                    let layout = VertexLayout::build(&decoded(
                        num_inputs,
                        [textured, false],
                        alpha,
                        fog,
                    ));
                    let mut expected_offset = 0;
                    for attr in &layout.attributes {
                        assert_eq!(attr.offset, expected_offset);
                        assert_eq!(attr.stream_index, 0);
                        expected_offset += attr.component_count * 4;
                    }
                    assert_eq!(layout.stride, expected_offset);
                    assert!(layout.attributes.len() <= MAX_VERTEX_ATTRIBUTES);
                }
            }
        }
    }
}

#[test]
fn test_stride_grows_with_each_feature() {
    let base = VertexLayout::build(&decoded(0, [false, false], false, false));
    let textured = VertexLayout::build(&decoded(0, [true, false], false, false));
    let fogged = VertexLayout::build(&decoded(0, [false, false], false, true));
    let one_input = VertexLayout::build(&decoded(1, [false, false], false, false));

    assert!(textured.stride > base.stride);
    assert!(fogged.stride > base.stride);
    assert!(one_input.stride > base.stride);
}
