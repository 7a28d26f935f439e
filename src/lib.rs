//! A real-time Mandelbrot set viewer.
//!
//! The fractal itself is computed per pixel by a fragment shader
//! (`res/mandelbrot.frag.wgsl`); the host side owns the GPU objects, turns key
//! presses into a [`view::View`], and sends it to the shader every frame.

pub mod app;
pub mod backend;
pub mod buffer;
pub mod command_buffer;
pub mod command_encoder;
pub mod config;
pub mod error;
pub mod files;
pub mod geometry;
pub mod gpu;
pub mod handle;
pub mod input;
pub mod resources;
pub mod screen;
pub mod var;
pub mod view;
pub mod viewer;

#[cfg(test)]
pub(crate) mod testing;
