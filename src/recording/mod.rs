//! Audio recording feature for lingo.
//!
//! Provides microphone capture with mono downmix and in-memory WAV
//! finalization for the speech translation workflow.

pub mod alsa;
pub mod capture;

pub use capture::{AudioClip, AudioRecorder, CaptureError};
