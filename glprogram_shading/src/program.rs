//! Compiling, linking and owning a GPU program.
//!
//! A [`ShaderProgram`] goes through the following states:
//!
//! ```text
//! Empty --build--> Building --(every stage compiled, link ok)--> Linked
//!                  Building --(a stage or the link failed)-----> Failed
//! Linked | Failed | Empty --release--> Empty
//! ```
//!
//! `Linked` and `Failed` are final for a build attempt. Building again requires a
//! [`release`](ShaderProgram::release) first.

use std::collections::HashSet;
use std::num::NonZeroU32;

use crate::driver::{RawId, ShaderDriver};
use crate::error::{BuildError, StageFailure};
use crate::source::{load_or_empty, SourceProvider};
use crate::stage::{StageKind, StageSource};

/// Name of a successfully linked program.
///
/// Only a successful build can produce one, so holding a `ProgramHandle` means the program linked.
/// Deleting the program is the job of the [`ShaderProgram`] it came from, never of the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(NonZeroU32);

impl ProgramHandle {
    pub fn id(self) -> RawId {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    Empty,
    Building,
    Linked,
    Failed,
}

enum StageError {
    Allocation,
    Failed(StageFailure),
}

/// A compiled stage. The shader object is deleted when this goes out of scope.
struct CompiledStage<D: ShaderDriver> {
    driver: D,
    kind: StageKind,
    id: RawId,
}

impl<D: ShaderDriver> CompiledStage<D> {
    /// Compiles `source`. On failure the shader object has already been deleted when this
    /// returns.
    fn compile(driver: &D, source: &StageSource) -> Result<Self, StageError> {
        let id = driver.create_shader(source.kind);
        if id == 0 {
            return Err(StageError::Allocation);
        }

        let stage = Self { driver: driver.clone(), kind: source.kind, id };
        driver.compile_shader(id, source.text);

        if driver.compile_status(id) {
            Ok(stage)
        } else {
            Err(StageError::Failed(StageFailure {
                stage: source.kind,
                diagnostic: driver.shader_info_log(id),
            }))
        }
    }
}

impl<D: ShaderDriver> Drop for CompiledStage<D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// A GPU program built from shader stages, together with the driver that owns it.
///
/// The program object is deleted exactly once, either by [`release`](Self::release) or when the
/// `ShaderProgram` is dropped.
pub struct ShaderProgram<D: ShaderDriver> {
    driver: D,
    handle: Option<ProgramHandle>,
    state: ProgramState,
    diagnostic: Option<BuildError>,
    attached: Vec<StageKind>,
}

impl<D: ShaderDriver> ShaderProgram<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            handle: None,
            state: ProgramState::Empty,
            diagnostic: None,
            attached: Vec::new(),
        }
    }

    /// Builds a program from a vertex and a fragment stage, returning it only if it linked.
    pub fn from_sources(driver: D, vertex: &str, fragment: &str) -> Result<Self, BuildError> {
        let mut program = Self::new(driver);
        program.build(vertex, fragment)?;
        Ok(program)
    }

    pub fn handle(&self) -> Option<ProgramHandle> {
        self.handle
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    pub fn is_usable(&self) -> bool {
        self.handle.is_some()
    }

    /// The error of the last failed build, until the next [`release`](Self::release).
    pub fn diagnostic(&self) -> Option<&BuildError> {
        self.diagnostic.as_ref()
    }

    /// Stages attached to the program during the last link attempt, in attachment order.
    pub fn attached_stages(&self) -> &[StageKind] {
        &self.attached
    }

    /// Compiles `vertex` and `fragment` and links them.
    ///
    /// Empty or malformed source is handed to the compiler as is; its verdict decides. Both
    /// stages are always compiled, so a single call reports every faulty stage.
    pub fn build(&mut self, vertex: &str, fragment: &str) -> Result<ProgramHandle, BuildError> {
        self.build_stages(&[StageSource::vertex(vertex), StageSource::fragment(fragment)])
    }

    /// Reads both stages through `provider` and builds them.
    ///
    /// A source that cannot be read is built as empty text, so the failure comes back as the
    /// compiler's diagnostic for that stage.
    pub fn load_shaders<P: SourceProvider + ?Sized>(
        &mut self,
        provider: &P,
        vertex_id: &str,
        fragment_id: &str,
    ) -> Result<ProgramHandle, BuildError> {
        let vertex = load_or_empty(provider, vertex_id);
        let fragment = load_or_empty(provider, fragment_id);
        self.build(&vertex, &fragment)
    }

    /// Compiles every stage in `stages` and links them into one program.
    ///
    /// Stage objects never outlive this call, whatever the outcome. On failure no program object
    /// survives either, and the error is kept for [`diagnostic`](Self::diagnostic).
    pub fn build_stages(&mut self, stages: &[StageSource]) -> Result<ProgramHandle, BuildError> {
        if self.state != ProgramState::Empty {
            return Err(BuildError::AlreadyBuilt);
        }
        check_stage_set(stages)?;

        self.state = ProgramState::Building;
        match self.compile_and_link(stages) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.state = ProgramState::Linked;
                Ok(handle)
            }
            Err(err) => {
                self.diagnostic = Some(err.clone());
                self.state = ProgramState::Failed;
                Err(err)
            }
        }
    }

    fn compile_and_link(&mut self, stages: &[StageSource]) -> Result<ProgramHandle, BuildError> {
        let mut compiled = Vec::with_capacity(stages.len());
        let mut failures = Vec::new();

        for source in stages {
            match CompiledStage::compile(&self.driver, source) {
                Ok(stage) => compiled.push(stage),
                Err(StageError::Failed(failure)) => failures.push(failure),
                Err(StageError::Allocation) => return Err(BuildError::AllocationFailed("shader")),
            }
        }

        if !failures.is_empty() {
            return Err(BuildError::from_failures(failures));
        }

        let id = self.driver.create_program();
        let id = NonZeroU32::new(id).ok_or(BuildError::AllocationFailed("program"))?;

        for stage in &compiled {
            self.driver.attach_shader(id.get(), stage.id);
            self.attached.push(stage.kind);
        }

        self.driver.link_program(id.get());
        let linked = self.driver.link_status(id.get());
        let log = if linked { None } else { Some(self.driver.program_info_log(id.get())) };

        for stage in &compiled {
            self.driver.detach_shader(id.get(), stage.id);
        }
        drop(compiled);

        match log {
            None => Ok(ProgramHandle(id)),
            Some(diagnostic) => {
                self.driver.delete_program(id.get());
                Err(BuildError::LinkFailed { diagnostic })
            }
        }
    }

    /// Makes this program the active one. Does nothing unless the program linked.
    pub fn set_used(&self) {
        if let Some(handle) = self.handle {
            self.driver.use_program(handle.id());
        }
    }

    /// Deletes the program object, if any, and returns to [`ProgramState::Empty`]. Calling this
    /// more than once is harmless.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.driver.delete_program(handle.id());
        }
        self.state = ProgramState::Empty;
        self.diagnostic = None;
        self.attached.clear();
    }
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.release();
    }
}

fn check_stage_set(stages: &[StageSource]) -> Result<(), BuildError> {
    if stages.is_empty() {
        return Err(BuildError::NoStages);
    }

    let mut seen = HashSet::new();
    for source in stages {
        if !seen.insert(source.kind) {
            return Err(BuildError::DuplicateStage(source.kind));
        }
    }

    Ok(())
}
