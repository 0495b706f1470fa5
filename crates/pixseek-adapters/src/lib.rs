//! Pixseek Adapters - External adapters for pixseek.
//!
//! This crate provides adapters for:
//! - The Pixabay image search API as a [`ResultSource`](pixseek_core::ResultSource)

pub mod pixabay;

pub use pixabay::{
    ImageType, Orientation, PixabayClient, PixabayConfig, DEFAULT_ENDPOINT, PER_PAGE_RANGE,
};
