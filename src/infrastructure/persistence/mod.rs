//! Persistence Layer - 持久化层

pub mod fs;

pub use fs::FsAudioCache;
