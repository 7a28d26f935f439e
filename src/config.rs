use std::{path::PathBuf, time::Duration};

use crate::{screen, view::View};

#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    /// Inner size of the window, in physical pixels.
    pub size: screen::Size,
    /// Pause between frames.
    pub frame_delay: Duration,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub view: View,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "MandelbrotGL".to_string(),
            size: screen::Size {
                width: 800,
                height: 600,
            },
            frame_delay: Duration::from_millis(30),
            vertex_shader: PathBuf::from("res/mandelbrot.vert.wgsl"),
            fragment_shader: PathBuf::from("res/mandelbrot.frag.wgsl"),
            view: View::default(),
        }
    }
}
