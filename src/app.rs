use std::rc::Rc;

use log::{debug, info};

use crate::{
    config::Config,
    error::Result,
    files,
    geometry::RECTANGLE,
    gpu::{Gpu, RawHandle},
    handle::Owned,
    input::Input,
    resources, screen,
    view::View,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything drawn each frame. Fields drop in declaration order, the reverse of creation.
pub struct Scene {
    shader_program: Owned<RawHandle>,
    vertex_array: Owned<RawHandle>,
    rectangle_buffer: Owned<RawHandle>,
}

impl Scene {
    pub fn build<G: Gpu + 'static>(gpu: &Rc<G>, config: &Config) -> Result<Self> {
        let rectangle_buffer = resources::create_rectangle_buffer(gpu)?;
        let vertex_array = resources::create_rectangle_vertex_array(gpu, &rectangle_buffer)?;
        let shader_program = resources::create_shader_program(
            gpu,
            &files::read_file(&config.vertex_shader)?,
            &files::read_file(&config.fragment_shader)?,
        )?;

        Ok(Self {
            shader_program,
            vertex_array,
            rectangle_buffer,
        })
    }
}

pub struct App<G> {
    scene: Scene,
    gpu: Rc<G>,
    view: View,
    screen_size: screen::Size,
}

impl<G: Gpu + 'static> App<G> {
    /// `screen_size` is the size of the surface drawn to, which the window system may have
    /// changed from `config.size`.
    pub fn new(gpu: Rc<G>, config: &Config, screen_size: screen::Size) -> Result<Self> {
        let scene = Scene::build(&gpu, config)?;
        info!(
            "scene ready: buffer {}, vertex array {}, program {}",
            scene.rectangle_buffer.raw(),
            scene.vertex_array.raw(),
            scene.shader_program.raw()
        );

        Ok(Self {
            scene,
            gpu,
            view: config.view,
            screen_size,
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn handle(&mut self, input: Input) -> Flow {
        match input {
            Input::Command(command) => {
                self.view.apply(command);
                debug!("{:?} -> {:?}", command, self.view);
                Flow::Continue
            }
            Input::Quit => Flow::Exit,
        }
    }

    /// Send the current view to the shader and draw the rectangle.
    pub fn frame(&self) -> Result<()> {
        let uniforms = self.view.uniforms(self.screen_size);
        self.gpu.draw(
            self.scene.shader_program.raw(),
            self.scene.vertex_array.raw(),
            &uniforms,
            0..RECTANGLE.len() as u32,
        )
    }
}
