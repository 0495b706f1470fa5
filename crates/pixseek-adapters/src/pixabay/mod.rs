//! Pixabay image search adapter.

mod client;
mod wire;

pub use client::{
    ImageType, Orientation, PixabayClient, PixabayConfig, DEFAULT_ENDPOINT, PER_PAGE_RANGE,
};
