/*!
# Combiner GFX headless driver

A `GpuDriver` backend that records every driver call instead of talking to a
GPU. Used by integration tests and CI runs of the shader-program subsystem:
it validates registration/link ordering, tracks resource counts, and exposes
the full call log for assertions, with no platform SDK in the loop.

Vertex binaries are treated as opaque blobs; attribute name lookup resolves
against the canonical interleaved attribute set of the subsystem
(`aPosition`, `aTexCoord`, `aFog`, `aInput1..aInput4`).
*/

mod headless_driver;
mod headless_shader;

pub use headless_driver::HeadlessGpuDriver;
pub use headless_shader::{HeadlessFragmentProgram, HeadlessShaderBinary, HeadlessVertexProgram};
