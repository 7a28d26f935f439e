//! Factories for the GPU objects the viewer draws with.

use std::rc::Rc;

use log::debug;

use crate::{
    error::{Error, Result},
    geometry::RECTANGLE,
    gpu::{Gpu, RawHandle, ShaderStage, NULL},
    handle::Owned,
};

fn allocated(raw: RawHandle, what: &'static str) -> Result<RawHandle> {
    if raw == NULL {
        Err(Error::Allocation(what))
    } else {
        debug!("created {} {}", what, raw);
        Ok(raw)
    }
}

pub fn create_rectangle_buffer<G: Gpu + 'static>(gpu: &Rc<G>) -> Result<Owned<RawHandle>> {
    let raw = allocated(gpu.create_buffer(), "buffer")?;
    let buffer = {
        let gpu = Rc::clone(gpu);
        Owned::new(raw, move |raw| gpu.delete_buffer(raw))
    };

    gpu.write_vertices(buffer.raw(), &RECTANGLE);

    Ok(buffer)
}

pub fn create_rectangle_vertex_array<G: Gpu + 'static>(
    gpu: &Rc<G>,
    rectangle_buffer: &Owned<RawHandle>,
) -> Result<Owned<RawHandle>> {
    let raw = allocated(gpu.create_vertex_array(), "vertex array object")?;
    let vertex_array = {
        let gpu = Rc::clone(gpu);
        Owned::new(raw, move |raw| gpu.delete_vertex_array(raw))
    };

    gpu.bind_vertex_buffer(vertex_array.raw(), rectangle_buffer.raw());

    Ok(vertex_array)
}

pub fn create_shader<G: Gpu + 'static>(
    gpu: &Rc<G>,
    source: &str,
    stage: ShaderStage,
) -> Result<Owned<RawHandle>> {
    let raw = allocated(gpu.create_shader(stage), "shader")?;
    let shader = {
        let gpu = Rc::clone(gpu);
        Owned::new(raw, move |raw| gpu.delete_shader(raw))
    };

    gpu.shader_source(shader.raw(), source);
    gpu.compile_shader(shader.raw()).map_err(|log| Error::ShaderCompilation { stage, log })?;

    Ok(shader)
}

/// Compile both stages and link them. The stage objects only live for the duration of this call.
pub fn create_shader_program<G: Gpu + 'static>(
    gpu: &Rc<G>,
    vertex_shader_source: &str,
    fragment_shader_source: &str,
) -> Result<Owned<RawHandle>> {
    let raw = allocated(gpu.create_program(), "shader program")?;
    let shader_program = {
        let gpu = Rc::clone(gpu);
        Owned::new(raw, move |raw| gpu.delete_program(raw))
    };

    let vertex_shader = create_shader(gpu, vertex_shader_source, ShaderStage::Vertex)?;
    let fragment_shader = create_shader(gpu, fragment_shader_source, ShaderStage::Fragment)?;

    gpu.attach_shader(shader_program.raw(), vertex_shader.raw());
    gpu.attach_shader(shader_program.raw(), fragment_shader.raw());
    gpu.link_program(shader_program.raw()).map_err(Error::ProgramLink)?;

    gpu.detach_shader(shader_program.raw(), vertex_shader.raw());
    gpu.detach_shader(shader_program.raw(), fragment_shader.raw());

    Ok(shader_program)
}
