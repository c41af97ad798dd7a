/// Shader binary loader
///
/// Resolves the storage path of a precompiled shader binary from its
/// descriptor and stage, reads the blob, and registers it with the GPU
/// driver. The file naming scheme is a persisted contract with the offline
/// shader-binary producer and must not drift.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::gpu::{GpuDriver, ShaderBinary, ShaderStage};
use crate::shader::ShaderDescriptor;

/// File extension of precompiled shader binaries
pub const BINARY_EXTENSION: &str = "gxp";

/// Storage file name of a shader binary: hex descriptor plus stage suffix
///
/// Part of the producer contract, e.g. `00000551_v.gxp` / `00000551_f.gxp`.
pub fn binary_file_name(descriptor: ShaderDescriptor, stage: ShaderStage) -> String {
    let suffix = match stage {
        ShaderStage::Vertex => 'v',
        ShaderStage::Fragment => 'f',
    };
    format!("{}_{}.{}", descriptor, suffix, BINARY_EXTENSION)
}

/// Loads shader binaries from a fixed directory and registers them
pub struct BinaryLoader {
    shader_dir: PathBuf,
}

impl BinaryLoader {
    /// Create a loader rooted at the given shader directory
    pub fn new<P: Into<PathBuf>>(shader_dir: P) -> Self {
        Self {
            shader_dir: shader_dir.into(),
        }
    }

    /// Directory the loader resolves binaries under
    pub fn shader_dir(&self) -> &Path {
        &self.shader_dir
    }

    /// Full path of the binary for a (descriptor, stage) pair
    pub fn binary_path(&self, descriptor: ShaderDescriptor, stage: ShaderStage) -> PathBuf {
        self.shader_dir.join(binary_file_name(descriptor, stage))
    }

    /// Read the binary for a (descriptor, stage) pair and register it with
    /// the driver
    ///
    /// # Errors
    ///
    /// `Error::BinaryUnavailable` if the file is absent or unreadable.
    /// Binaries are build-time artifacts, so this is a fatal packaging
    /// defect; there is nothing to retry.
    pub fn load(
        &self,
        descriptor: ShaderDescriptor,
        stage: ShaderStage,
        driver: &mut dyn GpuDriver,
    ) -> Result<Arc<dyn ShaderBinary>> {
        let path = self.binary_path(descriptor, stage);
        let code = fs::read(&path).map_err(|e| {
            crate::gfx_error!(
                "combiner_gfx::BinaryLoader",
                "Missing shader binary for {} ({:?} stage): {} ({})",
                descriptor,
                stage,
                path.display(),
                e
            );
            Error::BinaryUnavailable {
                path: path.display().to_string(),
                detail: e.to_string(),
            }
        })?;

        crate::gfx_debug!(
            "combiner_gfx::BinaryLoader",
            "Loaded {} ({} bytes)",
            path.display(),
            code.len()
        );

        driver.register_binary(&code)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
