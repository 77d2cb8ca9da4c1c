//! Clip playback backends

// Default output device through rodio
pub mod rodio_sink;
