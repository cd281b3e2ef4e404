//! Client-side orchestration for the translation workspace.
//!
//! Owns the per-modality sessions, the shared busy/error state and the
//! request coordinators that drive the remote service.

pub mod coordinator;
pub mod operation;
pub mod session;

pub use coordinator::{Workspace, WorkspaceState};
pub use operation::{DispatchError, DispatchPermit, OperationState, SharedOperation};
pub use session::{ImageSession, Modality, PdfSession, PreviewFile, SpeechSession, TextSession};
