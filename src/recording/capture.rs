//! Microphone capture and WAV encoding.
//!
//! This module handles audio input device management and PCM sample capture.
//! Audio is captured from a configured input device at its native sample
//! rate, converted to mono, accumulated as ordered fragments, and finalized
//! into a single in-memory WAV clip when recording stops.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use hound::WavWriter;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::alsa::suppress_stderr;

/// Failures of the capture controller.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Input device missing or inaccessible, usually a permissions problem
    #[error("Microphone access denied. Please allow microphone access in your system settings.")]
    PermissionDenied,
    /// Any other device or stream failure
    #[error("Audio device error: {0}")]
    Device(String),
    /// Start requested while a capture handle already exists
    #[error("Recording already in progress")]
    AlreadyRecording,
    /// WAV encoding failed at finalize
    #[error("Failed to encode recording: {0}")]
    Encode(String),
}

/// A finalized mono WAV recording, ready for upload.
///
/// Produced at most once per start/stop cycle. The clip is handed to the
/// caller by value; dispatching it consumes it.
#[derive(Debug)]
pub struct AudioClip {
    bytes: Vec<u8>,
    sample_rate: u32,
    sample_count: usize,
}

impl AudioClip {
    /// Upload file name the service receives for every clip.
    pub const FILE_NAME: &'static str = "recording.wav";

    /// Encodes mono PCM samples into a WAV clip.
    ///
    /// # Errors
    /// - If WAV encoding fails
    pub fn from_samples(samples: &[i16], sample_rate: u32) -> Result<Self, CaptureError> {
        let wav_spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut bytes = Vec::new();
        let mut writer = WavWriter::new(Cursor::new(&mut bytes), wav_spec)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| CaptureError::Encode(e.to_string()))?;
        }

        writer
            .finalize()
            .map_err(|e| CaptureError::Encode(e.to_string()))?;

        Ok(Self {
            bytes,
            sample_rate,
            sample_count: samples.len(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn duration_secs(&self) -> f32 {
        self.sample_count as f32 / self.sample_rate as f32
    }
}

/// Ordered PCM fragments accumulated during one recording.
///
/// The stream callback appends one fragment per invocation; finalize
/// concatenates them in arrival order.
#[derive(Debug, Default)]
struct FragmentBuffer {
    fragments: Vec<Vec<i16>>,
}

impl FragmentBuffer {
    fn push(&mut self, fragment: Vec<i16>) {
        self.fragments.push(fragment);
    }

    fn sample_count(&self) -> usize {
        self.fragments.iter().map(Vec::len).sum()
    }

    fn concat(self) -> Vec<i16> {
        let mut samples = Vec::with_capacity(self.sample_count());
        for fragment in self.fragments {
            samples.extend_from_slice(&fragment);
        }
        samples
    }
}

/// Live capture resources, existing only between start and stop.
struct CaptureHandle {
    /// Active audio input stream (kept alive during recording)
    stream: cpal::Stream,
    fragments: Arc<Mutex<FragmentBuffer>>,
    /// Actual recording sample rate from the device
    sample_rate: u32,
}

/// Records audio from a specified or default input device.
///
/// Captures at the device's native sample rate, converts multi-channel audio
/// to mono by averaging channels, and finalizes to an in-memory WAV clip.
/// One clip per start/stop cycle; stopping without recording is a no-op.
pub struct AudioRecorder {
    /// Device name or "default" to use the system default device
    device_name: String,
    /// Desired sample rate in Hz (actual may differ based on device)
    requested_sample_rate: u32,
    handle: Option<CaptureHandle>,
}

impl AudioRecorder {
    pub fn new(device_name: String, requested_sample_rate: u32) -> Self {
        Self {
            device_name,
            requested_sample_rate,
            handle: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.handle.is_some()
    }

    /// Starts capturing from the configured input device.
    ///
    /// # Errors
    /// - If a recording is already in progress
    /// - If the device is unavailable (reported as permission denial)
    /// - If device configuration or stream creation fails
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.handle.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        // Get device while suppressing ALSA library warnings
        let device = suppress_stderr(|| {
            let host = cpal::default_host();

            if self.device_name == "default" {
                host.default_input_device()
                    .ok_or(CaptureError::PermissionDenied)
            } else {
                find_device_by_name(&host, &self.device_name)
            }
        })?;

        let device_name = device
            .name()
            .unwrap_or_else(|_| "Unknown device".to_string());
        tracing::info!("Recording device: {}", device_name);

        let device_config = device.default_input_config().map_err(|e| match e {
            cpal::DefaultStreamConfigError::DeviceNotAvailable => CaptureError::PermissionDenied,
            other => CaptureError::Device(other.to_string()),
        })?;
        let sample_rate = device_config.sample_rate().0;
        let num_channels = device_config.channels() as usize;

        if sample_rate != self.requested_sample_rate {
            tracing::warn!(
                "Requested sample rate {}Hz but device uses {}Hz. Recording at device rate.",
                self.requested_sample_rate,
                sample_rate
            );
        }

        tracing::debug!(
            "Device configuration: {}Hz, {} channels",
            sample_rate,
            num_channels
        );

        let fragments = Arc::new(Mutex::new(FragmentBuffer::default()));
        let fragments_arc = Arc::clone(&fragments);

        let stream = device
            .build_input_stream(
                &device_config.into(),
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let fragment = downmix_to_mono(data, num_channels);
                    if !fragment.is_empty() {
                        fragments_arc.lock().unwrap().push(fragment);
                    }
                },
                |err| {
                    tracing::error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| match e {
                cpal::BuildStreamError::DeviceNotAvailable => CaptureError::PermissionDenied,
                other => CaptureError::Device(other.to_string()),
            })?;

        stream.play().map_err(|e| match e {
            cpal::PlayStreamError::DeviceNotAvailable => CaptureError::PermissionDenied,
            other => CaptureError::Device(other.to_string()),
        })?;

        self.handle = Some(CaptureHandle {
            stream,
            fragments,
            sample_rate,
        });

        tracing::debug!("Audio stream started");
        Ok(())
    }

    /// Stops capturing and finalizes the recording into a WAV clip.
    ///
    /// The microphone stream is released before anything else on every path.
    /// Returns `Ok(None)` when no recording was in progress or when no
    /// samples were captured.
    ///
    /// # Errors
    /// - If WAV encoding fails
    pub fn stop(&mut self) -> Result<Option<AudioClip>, CaptureError> {
        let Some(handle) = self.handle.take() else {
            tracing::debug!("Stop requested with no active recording");
            return Ok(None);
        };

        let CaptureHandle {
            stream,
            fragments,
            sample_rate,
        } = handle;
        drop(stream);

        let buffer = std::mem::take(&mut *fragments.lock().unwrap());
        let samples = buffer.concat();

        if samples.is_empty() {
            tracing::warn!("Recording stopped with no samples captured");
            return Ok(None);
        }

        let duration_secs = samples.len() as f32 / sample_rate as f32;
        tracing::info!(
            "Recording stopped: {:.2}s ({} samples at {}Hz)",
            duration_secs,
            samples.len(),
            sample_rate
        );

        AudioClip::from_samples(&samples, sample_rate).map(Some)
    }
}

/// Converts interleaved multi-channel audio to mono by averaging channels.
fn downmix_to_mono(data: &[i16], num_channels: usize) -> Vec<i16> {
    match num_channels {
        // Mono: use samples directly
        1 => data.to_vec(),
        2 => {
            // Stereo: average pairs of samples
            let mut mono = Vec::with_capacity(data.len() / 2);
            for chunk in data.chunks_exact(2) {
                let left = chunk[0] as i32;
                let right = chunk[1] as i32;
                mono.push(((left + right) / 2) as i16);
            }
            mono
        }
        _ => {
            // Multi-channel: average all channels per sample
            let mut mono = Vec::with_capacity(data.len() / num_channels.max(1));
            for chunk in data.chunks_exact(num_channels) {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                mono.push((sum / num_channels as i32) as i16);
            }
            mono
        }
    }
}

/// Finds an audio input device by name or numeric index.
///
/// # Errors
/// - If devices cannot be enumerated
/// - If no device with the specified name/index is found
fn find_device_by_name(host: &cpal::Host, device_spec: &str) -> Result<cpal::Device, CaptureError> {
    // Try to parse as a numeric index first
    if let Ok(index) = device_spec.parse::<usize>() {
        let devices: Vec<_> = host
            .input_devices()
            .map_err(|e| CaptureError::Device(format!("Failed to enumerate devices: {e}")))?
            .collect();

        if index < devices.len() {
            return Ok(devices.into_iter().nth(index).unwrap());
        } else {
            return Err(CaptureError::Device(format!(
                "Device index {} is out of range (0-{})",
                index,
                devices.len().saturating_sub(1)
            )));
        }
    }

    // Try to find by name
    let devices = host
        .input_devices()
        .map_err(|e| CaptureError::Device(format!("Failed to enumerate devices: {e}")))?;

    for device in devices {
        if let Ok(name) = device.name() {
            if name == device_spec {
                return Ok(device);
            }
        }
    }

    Err(CaptureError::Device(format!(
        "Audio input device '{device_spec}' not found. Use 'lingo list-devices' to see available devices."
    )))
}
