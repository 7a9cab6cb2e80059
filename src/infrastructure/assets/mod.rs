//! Cluster asset infrastructure

mod ffmpeg;
mod library;

pub use ffmpeg::FfmpegEncoder;
pub use library::ClusterLibrary;
