//! A pure Rust baseline sequential JPEG decoder.
//!
//! This crate decodes JPEG streams using baseline DCT (SOF0) coding with
//! 8-bit samples, one (grayscale) or three (YCbCr) components, no chroma
//! sub-sampling and optional restart markers, producing a row major
//! grayscale or interleaved RGB raster.
//!
//! # Example
//! ```no_run
//! use baseline_jpeg::Decoder;
//!
//! let file = std::fs::read("an_image.jpg").unwrap();
//!
//! let mut decoder = Decoder::new();
//! let pixels = decoder.decode_buffer(&file).unwrap();
//!
//! let info = decoder.info().unwrap();
//! println!("{}x{}x{}", info.width, info.height, info.components);
//! ```
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade; wire up
//! any logger and raise its level for marker (`Debug`) or MCU (`Trace`)
//! traces.
#![allow(clippy::needless_return, clippy::similar_names)]
#![warn(clippy::correctness, clippy::perf, clippy::pedantic)]

#[macro_use]
extern crate log;

pub use crate::decoder::{Decoder, ImageInfo};
pub use crate::errors::DecodeErrors;
pub use crate::misc::ColorSpace;

mod bitstream;
mod color_convert;
mod components;
mod decoder;
pub mod errors;
mod headers;
mod huffman;
mod idct;
mod marker;
mod mcu;
mod misc;
