use std::fmt;
use std::path::Path;

/// The pipeline stage a piece of shader source is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
    Geometry,
    Compute,
}

impl StageKind {
    pub const ALL: [StageKind; 4] = [
        StageKind::Vertex,
        StageKind::Fragment,
        StageKind::Geometry,
        StageKind::Compute,
    ];

    /// Lower-case name, as used in diagnostics and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
            StageKind::Geometry => "geometry",
            StageKind::Compute => "compute",
        }
    }

    /// Guesses the stage from a file extension (`.vert`, `.frag`, `.geom`, `.comp` and their
    /// two-letter forms).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "vert" | "vs" => Some(StageKind::Vertex),
            "frag" | "fs" => Some(StageKind::Fragment),
            "geom" | "gs" => Some(StageKind::Geometry),
            "comp" | "cs" => Some(StageKind::Compute),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source text for one stage. The text is borrowed only for as long as the build needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSource<'a> {
    pub kind: StageKind,
    pub text: &'a str,
}

impl<'a> StageSource<'a> {
    pub fn new(kind: StageKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    pub fn vertex(text: &'a str) -> Self {
        Self::new(StageKind::Vertex, text)
    }

    pub fn fragment(text: &'a str) -> Self {
        Self::new(StageKind::Fragment, text)
    }
}
