//! Test doubles: a `Gpu` that records what is done to it, and shader files on disk.

use std::{cell::RefCell, fs, ops::Range, path::PathBuf};

use fnv::FnvHashMap;
use tempfile::TempDir;

use crate::{
    error::{Error, Result},
    geometry::Vertex,
    gpu::{Gpu, RawHandle, ShaderStage, NULL},
    view::Uniforms,
};

pub const VERTEX_SOURCE: &str = include_str!("../res/mandelbrot.vert.wgsl");
pub const FRAGMENT_SOURCE: &str = include_str!("../res/mandelbrot.frag.wgsl");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Buffer,
    VertexArray,
    Shader,
    Program,
}

enum Object {
    Buffer(Vec<Vertex>),
    VertexArray(Option<RawHandle>),
    Shader(ShaderStage),
    Program { attached: Vec<RawHandle>, linked: bool },
}

impl Object {
    fn kind(&self) -> Kind {
        match self {
            Object::Buffer(_) => Kind::Buffer,
            Object::VertexArray(_) => Kind::VertexArray,
            Object::Shader(_) => Kind::Shader,
            Object::Program { .. } => Kind::Program,
        }
    }
}

#[derive(Default)]
struct State {
    last_handle: RawHandle,
    live: FnvHashMap<RawHandle, Object>,
    released: Vec<(Kind, RawHandle)>,
    fail_allocation: Option<Kind>,
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    fail_draw: bool,
    draws: Vec<Uniforms>,
}

/// Panics on releasing a handle twice, or with the wrong `delete_*` call.
#[derive(Default)]
pub struct RecordingGpu {
    state: RefCell<State>,
}

impl RecordingGpu {
    /// The next allocation of `kind` returns [`NULL`].
    pub fn fail_allocation(&self, kind: Kind) {
        self.state.borrow_mut().fail_allocation = Some(kind);
    }

    pub fn fail_compile(&self, stage: ShaderStage) {
        self.state.borrow_mut().fail_compile = Some(stage);
    }

    pub fn fail_link(&self) {
        self.state.borrow_mut().fail_link = true;
    }

    pub fn fail_draw(&self) {
        self.state.borrow_mut().fail_draw = true;
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn released(&self) -> Vec<(Kind, RawHandle)> {
        self.state.borrow().released.clone()
    }

    pub fn released_of(&self, kind: Kind) -> usize {
        self.state
            .borrow()
            .released
            .iter()
            .filter(|(released, _)| *released == kind)
            .count()
    }

    pub fn draws(&self) -> Vec<Uniforms> {
        self.state.borrow().draws.clone()
    }

    pub fn vertices(&self, buffer: RawHandle) -> Vec<Vertex> {
        match self.state.borrow().live.get(&buffer) {
            Some(Object::Buffer(vertices)) => vertices.clone(),
            _ => panic!("{} is not a live buffer", buffer),
        }
    }

    pub fn bound_buffer(&self, vertex_array: RawHandle) -> Option<RawHandle> {
        match self.state.borrow().live.get(&vertex_array) {
            Some(Object::VertexArray(buffer)) => *buffer,
            _ => panic!("{} is not a live vertex array", vertex_array),
        }
    }

    pub fn attached(&self, program: RawHandle) -> Vec<RawHandle> {
        match self.state.borrow().live.get(&program) {
            Some(Object::Program { attached, .. }) => attached.clone(),
            _ => panic!("{} is not a live program", program),
        }
    }

    pub fn is_linked(&self, program: RawHandle) -> bool {
        match self.state.borrow().live.get(&program) {
            Some(Object::Program { linked, .. }) => *linked,
            _ => panic!("{} is not a live program", program),
        }
    }

    fn allocate(&self, object: Object) -> RawHandle {
        let mut state = self.state.borrow_mut();
        if state.fail_allocation == Some(object.kind()) {
            state.fail_allocation = None;
            return NULL;
        }
        state.last_handle += 1;
        let handle = state.last_handle;
        state.live.insert(handle, object);
        handle
    }

    fn delete(&self, kind: Kind, handle: RawHandle) {
        let mut state = self.state.borrow_mut();
        match state.live.remove(&handle) {
            Some(object) => assert_eq!(object.kind(), kind, "wrong release for {}", handle),
            None => panic!("{:?} {} released twice or never created", kind, handle),
        }
        state.released.push((kind, handle));
    }
}

impl Gpu for RecordingGpu {
    fn create_buffer(&self) -> RawHandle {
        self.allocate(Object::Buffer(Vec::new()))
    }

    fn write_vertices(&self, buffer: RawHandle, vertices: &[Vertex]) {
        if let Some(Object::Buffer(contents)) = self.state.borrow_mut().live.get_mut(&buffer) {
            *contents = vertices.to_vec();
        }
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        self.delete(Kind::Buffer, buffer)
    }

    fn create_vertex_array(&self) -> RawHandle {
        self.allocate(Object::VertexArray(None))
    }

    fn bind_vertex_buffer(&self, vertex_array: RawHandle, buffer: RawHandle) {
        if let Some(Object::VertexArray(bound)) = self.state.borrow_mut().live.get_mut(&vertex_array)
        {
            *bound = Some(buffer);
        }
    }

    fn delete_vertex_array(&self, vertex_array: RawHandle) {
        self.delete(Kind::VertexArray, vertex_array)
    }

    fn create_shader(&self, stage: ShaderStage) -> RawHandle {
        self.allocate(Object::Shader(stage))
    }

    fn shader_source(&self, _shader: RawHandle, _source: &str) {}

    fn compile_shader(&self, shader: RawHandle) -> std::result::Result<(), String> {
        let state = self.state.borrow();
        match state.live.get(&shader) {
            Some(Object::Shader(stage)) if state.fail_compile == Some(*stage) => {
                Err(format!("{} stage rejected", stage))
            }
            Some(Object::Shader(_)) => Ok(()),
            _ => Err(format!("{} is not a shader", shader)),
        }
    }

    fn delete_shader(&self, shader: RawHandle) {
        self.delete(Kind::Shader, shader)
    }

    fn create_program(&self) -> RawHandle {
        self.allocate(Object::Program {
            attached: Vec::new(),
            linked: false,
        })
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        if let Some(Object::Program { attached, .. }) =
            self.state.borrow_mut().live.get_mut(&program)
        {
            attached.push(shader);
        }
    }

    fn link_program(&self, program: RawHandle) -> std::result::Result<(), String> {
        let mut state = self.state.borrow_mut();
        let fail = state.fail_link;
        match state.live.get_mut(&program) {
            Some(Object::Program { .. }) if fail => Err("entry point not found".to_string()),
            Some(Object::Program { attached, linked }) if attached.len() == 2 => {
                *linked = true;
                Ok(())
            }
            _ => Err(format!("{} can't be linked", program)),
        }
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        if let Some(Object::Program { attached, .. }) =
            self.state.borrow_mut().live.get_mut(&program)
        {
            attached.retain(|attached| *attached != shader);
        }
    }

    fn delete_program(&self, program: RawHandle) {
        self.delete(Kind::Program, program)
    }

    fn draw(
        &self,
        program: RawHandle,
        vertex_array: RawHandle,
        uniforms: &Uniforms,
        vertices: Range<u32>,
    ) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_draw {
            return Err(Error::Surface(wgpu::SurfaceError::OutOfMemory));
        }
        assert!(matches!(
            state.live.get(&program),
            Some(Object::Program { linked: true, .. })
        ));
        assert!(matches!(
            state.live.get(&vertex_array),
            Some(Object::VertexArray(Some(_)))
        ));
        assert_eq!(vertices, 0..6);
        state.draws.push(*uniforms);
        Ok(())
    }
}

/// Write `contents` to `name` inside `dir`.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}
