// artifact.rs — A generated artifact headed for the target repository.

use std::path::PathBuf;

/// One output artifact: where it goes and what goes there.
///
/// Produced by the renderer, consumed once by the injector/orchestrator,
/// then discarded. For the primary artifact `body` is the managed-region
/// body (the injector wraps it in markers); for secondary artifacts it is
/// the whole file content and `managed` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the target repository root.
    pub path: PathBuf,

    /// Generated content.
    pub body: String,

    /// Marker pair delimiting the managed region (primary artifact only).
    pub managed: Option<ManagedRegion>,
}

/// The sentinel lines delimiting a managed region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedRegion {
    pub begin: String,
    pub end: String,
}

impl Artifact {
    /// A whole-file artifact with no managed region.
    pub fn owned(path: impl Into<PathBuf>, body: impl Into<String>) -> Self {
        Artifact {
            path: path.into(),
            body: body.into(),
            managed: None,
        }
    }

    /// A marker-managed artifact (the primary rules document).
    pub fn managed(
        path: impl Into<PathBuf>,
        body: impl Into<String>,
        begin: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Artifact {
            path: path.into(),
            body: body.into(),
            managed: Some(ManagedRegion {
                begin: begin.into(),
                end: end.into(),
            }),
        }
    }
}
