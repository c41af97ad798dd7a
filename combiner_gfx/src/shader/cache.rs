/// Session program cache
///
/// Memoizes built programs by descriptor: a fixed-capacity arena of
/// `CompiledProgram` plus a descriptor-to-key index. Program identities stay
/// stable for the whole session once bound into a draw sequence, so there is
/// no eviction; the arena is reclaimed in bulk at context teardown.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::gpu::GpuDriver;
use crate::shader::{BinaryLoader, CompiledProgram, ShaderDescriptor};

slotmap::new_key_type! {
    /// Stable key of a program in the session arena
    pub struct ProgramKey;
}

/// Capacity of the program arena
///
/// Exceeding it means one session requested more distinct shading
/// configurations than the backend was sized for, a configuration defect.
pub const MAX_PROGRAMS: usize = 64;

/// Descriptor-keyed program cache with a fixed-capacity arena
pub struct ProgramCache {
    programs: SlotMap<ProgramKey, Arc<CompiledProgram>>,
    by_descriptor: FxHashMap<u32, ProgramKey>,
}

impl ProgramCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            programs: SlotMap::with_capacity_and_key(MAX_PROGRAMS),
            by_descriptor: FxHashMap::default(),
        }
    }

    /// Return the program for a descriptor, building it on first request
    ///
    /// Builds at most once per descriptor per session. The capacity check
    /// runs before any build, so a capacity failure leaves the cache
    /// unchanged.
    ///
    /// # Errors
    ///
    /// `Error::PoolExhausted` when the arena is full; any build error from
    /// `CompiledProgram::build` otherwise.
    pub fn get_or_create(
        &mut self,
        descriptor: ShaderDescriptor,
        loader: &BinaryLoader,
        driver: &mut dyn GpuDriver,
    ) -> Result<Arc<CompiledProgram>> {
        if let Some(&key) = self.by_descriptor.get(&descriptor.raw()) {
            return Ok(self.programs[key].clone());
        }

        if self.programs.len() >= MAX_PROGRAMS {
            crate::gfx_error!(
                "combiner_gfx::ProgramCache",
                "Program pool exhausted ({} entries) while building {}",
                MAX_PROGRAMS,
                descriptor
            );
            return Err(Error::PoolExhausted {
                capacity: MAX_PROGRAMS,
            });
        }

        let program = Arc::new(CompiledProgram::build(descriptor, loader, driver)?);
        let key = self.programs.insert(program.clone());
        self.by_descriptor.insert(descriptor.raw(), key);

        crate::gfx_debug!(
            "combiner_gfx::ProgramCache",
            "Cached program {} ({}/{} entries)",
            descriptor,
            self.programs.len(),
            MAX_PROGRAMS
        );

        Ok(program)
    }

    /// Non-creating query: the program for a descriptor, if already built
    pub fn lookup(&self, descriptor: ShaderDescriptor) -> Option<Arc<CompiledProgram>> {
        let key = self.by_descriptor.get(&descriptor.raw())?;
        Some(self.programs[*key].clone())
    }

    /// The arena key of a built descriptor, if any
    pub fn key_of(&self, descriptor: ShaderDescriptor) -> Option<ProgramKey> {
        self.by_descriptor.get(&descriptor.raw()).copied()
    }

    /// The program under an arena key
    pub fn get(&self, key: ProgramKey) -> Option<&Arc<CompiledProgram>> {
        self.programs.get(key)
    }

    /// Number of programs built this session
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether no program has been built yet
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl Default for ProgramCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
