/*!
The graphics API in handle form.

Every object lives behind a [`RawHandle`]; [`NULL`] is never a valid object, so
an allocation that returns it has failed. Handles have to be released with the
matching `delete_*` call. Use [`handle::Owned`](crate::handle::Owned) (via
[`resources`](crate::resources)) rather than calling `delete_*` directly.
*/

use std::{fmt, ops::Range};

use crate::{error::Result, geometry::Vertex, view::Uniforms};

pub type RawHandle = u32;

pub const NULL: RawHandle = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The function a shader of this stage must define.
    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex_main",
            ShaderStage::Fragment => "fragment_main",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

pub trait Gpu {
    fn create_buffer(&self) -> RawHandle;
    fn write_vertices(&self, buffer: RawHandle, vertices: &[Vertex]);
    fn delete_buffer(&self, buffer: RawHandle);

    fn create_vertex_array(&self) -> RawHandle;
    /// Source attribute 0 of `vertex_array` from `buffer`.
    fn bind_vertex_buffer(&self, vertex_array: RawHandle, buffer: RawHandle);
    fn delete_vertex_array(&self, vertex_array: RawHandle);

    fn create_shader(&self, stage: ShaderStage) -> RawHandle;
    fn shader_source(&self, shader: RawHandle, source: &str);
    /// `Err` carries the compiler's log.
    fn compile_shader(&self, shader: RawHandle) -> std::result::Result<(), String>;
    fn delete_shader(&self, shader: RawHandle);

    fn create_program(&self) -> RawHandle;
    fn attach_shader(&self, program: RawHandle, shader: RawHandle);
    /// `Err` carries the linker's log.
    fn link_program(&self, program: RawHandle) -> std::result::Result<(), String>;
    fn detach_shader(&self, program: RawHandle, shader: RawHandle);
    fn delete_program(&self, program: RawHandle);

    /// Clear the next frame, draw `vertices` from `vertex_array` with `program`, and present.
    fn draw(
        &self,
        program: RawHandle,
        vertex_array: RawHandle,
        uniforms: &Uniforms,
        vertices: Range<u32>,
    ) -> Result<()>;
}
