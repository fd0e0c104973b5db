use crate::stage::StageKind;

/// A stage that the driver refused to compile, with the compiler's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: StageKind,
    pub diagnostic: String,
}

/// Why a [`ShaderProgram`](crate::program::ShaderProgram) could not be built.
///
/// Diagnostics are the driver's text, untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// `stage` is the first stage that failed, in submission order. Every later failure from the
    /// same build is in `others`.
    #[error("{stage} stage failed to compile:\n{diagnostic}{}", more_failures(.others))]
    StageCompileFailed {
        stage: StageKind,
        diagnostic: String,
        others: Vec<StageFailure>,
    },
    #[error("program failed to link:\n{diagnostic}")]
    LinkFailed { diagnostic: String },
    #[error("the driver could not allocate a {0} object")]
    AllocationFailed(&'static str),
    #[error("program has already been built; release it before building again")]
    AlreadyBuilt,
    #[error("a program needs at least one stage")]
    NoStages,
    #[error("more than one {0} stage was supplied")]
    DuplicateStage(StageKind),
}

impl BuildError {
    /// Wraps the compile failures of one build attempt, in submission order.
    ///
    /// `failures` must not be empty.
    pub(crate) fn from_failures(mut failures: Vec<StageFailure>) -> Self {
        let StageFailure { stage, diagnostic } = failures.remove(0);
        BuildError::StageCompileFailed { stage, diagnostic, others: failures }
    }

    /// Every stage that failed to compile, whichever variant carries them.
    pub fn stage_failures(&self) -> Vec<(StageKind, &str)> {
        match self {
            BuildError::StageCompileFailed { stage, diagnostic, others } => {
                let mut all = vec![(*stage, diagnostic.as_str())];
                all.extend(others.iter().map(|f| (f.stage, f.diagnostic.as_str())));
                all
            }
            _ => Vec::new(),
        }
    }

    /// The linker's log, if this is a link failure.
    pub fn link_diagnostic(&self) -> Option<&str> {
        match self {
            BuildError::LinkFailed { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }
}

fn more_failures(others: &[StageFailure]) -> String {
    if others.is_empty() {
        return String::new();
    }

    let names: Vec<&str> = others.iter().map(|f| f.stage.name()).collect();
    format!("\n(also failed: {})", names.join(", "))
}
