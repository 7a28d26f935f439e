//! The part of the complex plane being looked at.

use bytemuck::{Pod, Zeroable};

use crate::screen;

/// Fraction of the visible extent moved by one pan or zoom step.
const STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    MoreIterations,
    FewerIterations,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub max_iterations: u32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            max_iterations: 30,
        }
    }
}

impl View {
    /// Panning covers the same share of the screen at every zoom level.
    pub fn pan_step(&self) -> f32 {
        STEP / self.scale
    }

    pub fn zoom_step(&self) -> f32 {
        STEP * self.scale
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PanUp => self.y += self.pan_step(),
            Command::PanDown => self.y -= self.pan_step(),
            Command::PanLeft => self.x -= self.pan_step(),
            Command::PanRight => self.x += self.pan_step(),
            Command::ZoomIn => self.scale += self.zoom_step(),
            Command::ZoomOut => self.scale -= self.zoom_step(),
            Command::MoreIterations => self.max_iterations = self.max_iterations.saturating_add(1),
            Command::FewerIterations => self.max_iterations = self.max_iterations.saturating_sub(1),
        }
    }

    /// Visible interval of the real axis.
    pub fn real_range(&self) -> [f32; 2] {
        [-2.0 / self.scale + self.x, 1.0 / self.scale + self.x]
    }

    /// Visible interval of the imaginary axis.
    pub fn imaginary_range(&self) -> [f32; 2] {
        [-1.0 / self.scale + self.y, 1.0 / self.scale + self.y]
    }

    pub fn uniforms(&self, screen_size: screen::Size) -> Uniforms {
        Uniforms {
            screen_size: screen_size.as_f32(),
            real_range: self.real_range(),
            imaginary_range: self.imaginary_range(),
            max_iterations: self.max_iterations,
            _padding: 0,
        }
    }
}

/// [`bytemuck`]-compatible mirror of `Parameters` in the fragment shader.
///
/// WGSL rounds the struct up to the 8 byte alignment of its `vec2<f32>` members, hence the padding.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Uniforms {
    pub screen_size: [f32; 2],
    pub real_range: [f32; 2],
    pub imaginary_range: [f32; 2],
    pub max_iterations: u32,
    pub _padding: u32,
}
