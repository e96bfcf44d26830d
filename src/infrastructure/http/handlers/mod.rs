//! HTTP Handlers

mod audio;
mod cache;
mod ping;
mod speak;
mod speakers;

pub use audio::*;
pub use cache::*;
pub use ping::*;
pub use speak::*;
pub use speakers::*;
