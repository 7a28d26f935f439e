/*!
[`Gpu`] on top of `wgpu`.

`wgpu` objects are values, not names, so this backend keeps a handle table per
object kind and hands out the keys. A "vertex array" is just the buffer that
feeds attribute 0; the attribute layout itself is fixed ([`Vertex::LAYOUT`]).
Shader compilation and program linking run inside validation error scopes, so
a bad shader comes back as an `Err` carrying the validator's message instead
of tripping the device's uncaptured error handler.
*/

use std::{cell::RefCell, ops::Range};

use bytemuck::Zeroable;
use fnv::FnvHashMap;
use log::{debug, trace, warn};
use winit::window::Window;

use crate::{
    buffer::{self, Buffer},
    command_buffer,
    command_encoder::CommandEncoderExt,
    error::{Error, Result},
    geometry::Vertex,
    gpu::{Gpu, RawHandle, ShaderStage, NULL},
    var::{self, Var},
    view::Uniforms,
};

const CLEAR_COLOUR: wgpu::Color = wgpu::Color::BLACK;

struct Shader {
    stage: ShaderStage,
    source: String,
    module: Option<wgpu::ShaderModule>,
}

struct Linked {
    pipeline: wgpu::RenderPipeline,
    uniforms: Var<Uniforms>,
    bind_group: wgpu::BindGroup,
}

#[derive(Default)]
struct Program {
    attached: Vec<RawHandle>,
    linked: Option<Linked>,
}

#[derive(Default)]
struct Objects {
    last_handle: RawHandle,
    /// `None` until vertex data is written.
    buffers: FnvHashMap<RawHandle, Option<Buffer<Vertex>>>,
    vertex_arrays: FnvHashMap<RawHandle, Option<RawHandle>>,
    shaders: FnvHashMap<RawHandle, Shader>,
    programs: FnvHashMap<RawHandle, Program>,
}

impl Objects {
    /// [`NULL`] once the handle space is used up.
    fn next_handle(&mut self) -> RawHandle {
        match self.last_handle.checked_add(1) {
            Some(handle) => {
                self.last_handle = handle;
                handle
            }
            None => NULL,
        }
    }
}

fn attached_module<'a>(
    shaders: &'a FnvHashMap<RawHandle, Shader>,
    attached: &[RawHandle],
    stage: ShaderStage,
) -> std::result::Result<&'a wgpu::ShaderModule, String> {
    let shader = attached
        .iter()
        .filter_map(|handle| shaders.get(handle))
        .find(|shader| shader.stage == stage)
        .ok_or_else(|| format!("no {} shader attached", stage))?;
    shader
        .module
        .as_ref()
        .ok_or_else(|| format!("{} shader is not compiled", stage))
}

pub struct WgpuBackend {
    objects: RefCell<Objects>,
    uniforms_layout: wgpu::BindGroupLayout,
    surface_configuration: wgpu::SurfaceConfiguration,
    surface: wgpu::Surface,
    queue: wgpu::Queue,
    device: wgpu::Device,
}

impl WgpuBackend {
    /// Set up a device that presents to `window`.
    ///
    /// # Safety
    ///
    /// `window` must outlive the returned backend.
    pub unsafe fn new(window: &Window) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let surface = instance.create_surface(window);

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(Error::Adapter)?;
        debug!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let format = *surface
            .get_supported_formats(&adapter)
            .first()
            .ok_or(Error::UnsupportedSurface)?;

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            // Double buffered, synchronised to the display.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &surface_configuration);

        let uniforms_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("parameters-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        Ok(Self {
            objects: RefCell::new(Objects::default()),
            uniforms_layout,
            surface_configuration,
            surface,
            queue,
            device,
        })
    }
}

impl Gpu for WgpuBackend {
    fn create_buffer(&self) -> RawHandle {
        let mut objects = self.objects.borrow_mut();
        let handle = objects.next_handle();
        if handle != NULL {
            objects.buffers.insert(handle, None);
        }
        handle
    }

    fn write_vertices(&self, buffer: RawHandle, vertices: &[Vertex]) {
        let mut objects = self.objects.borrow_mut();
        let Some(slot) = objects.buffers.get_mut(&buffer) else {
            warn!("write to unknown buffer {}", buffer);
            return;
        };

        if let Some(existing) = slot
            .as_ref()
            .filter(|existing| existing.len() >= vertices.len())
        {
            existing.write(&self.queue, vertices);
            return;
        }

        let replacement = buffer::Builder::new(vertices)
            .with_label("vertex-buffer")
            .with_usage(wgpu::BufferUsages::VERTEX)
            .create(&self.device);
        if let Some(previous) = slot.replace(replacement) {
            previous.destroy();
        }
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        trace!("deleting buffer {}", buffer);
        if let Some(Some(contents)) = self.objects.borrow_mut().buffers.remove(&buffer) {
            contents.destroy();
        }
    }

    fn create_vertex_array(&self) -> RawHandle {
        let mut objects = self.objects.borrow_mut();
        let handle = objects.next_handle();
        if handle != NULL {
            objects.vertex_arrays.insert(handle, None);
        }
        handle
    }

    fn bind_vertex_buffer(&self, vertex_array: RawHandle, buffer: RawHandle) {
        match self.objects.borrow_mut().vertex_arrays.get_mut(&vertex_array) {
            Some(bound) => *bound = Some(buffer),
            None => warn!("bind to unknown vertex array {}", vertex_array),
        }
    }

    fn delete_vertex_array(&self, vertex_array: RawHandle) {
        trace!("deleting vertex array {}", vertex_array);
        self.objects.borrow_mut().vertex_arrays.remove(&vertex_array);
    }

    fn create_shader(&self, stage: ShaderStage) -> RawHandle {
        let mut objects = self.objects.borrow_mut();
        let handle = objects.next_handle();
        if handle != NULL {
            objects.shaders.insert(
                handle,
                Shader {
                    stage,
                    source: String::new(),
                    module: None,
                },
            );
        }
        handle
    }

    fn shader_source(&self, shader: RawHandle, source: &str) {
        match self.objects.borrow_mut().shaders.get_mut(&shader) {
            Some(shader) => shader.source = source.to_owned(),
            None => warn!("source for unknown shader {}", shader),
        }
    }

    fn compile_shader(&self, shader: RawHandle) -> std::result::Result<(), String> {
        let mut objects = self.objects.borrow_mut();
        let shader = objects
            .shaders
            .get_mut(&shader)
            .ok_or_else(|| format!("{} is not a shader", shader))?;

        let label = format!("{}-shader", shader.stage);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(shader.source.as_str().into()),
        });
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(error.to_string());
        }

        shader.module = Some(module);
        Ok(())
    }

    fn delete_shader(&self, shader: RawHandle) {
        trace!("deleting shader {}", shader);
        self.objects.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> RawHandle {
        let mut objects = self.objects.borrow_mut();
        let handle = objects.next_handle();
        if handle != NULL {
            objects.programs.insert(handle, Program::default());
        }
        handle
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        match self.objects.borrow_mut().programs.get_mut(&program) {
            Some(program) => program.attached.push(shader),
            None => warn!("attach to unknown program {}", program),
        }
    }

    fn link_program(&self, program: RawHandle) -> std::result::Result<(), String> {
        let mut objects = self.objects.borrow_mut();
        let Objects {
            shaders, programs, ..
        } = &mut *objects;
        let program = programs
            .get_mut(&program)
            .ok_or_else(|| format!("{} is not a program", program))?;

        let vertex = attached_module(shaders, &program.attached, ShaderStage::Vertex)?;
        let fragment = attached_module(shaders, &program.attached, ShaderStage::Fragment)?;

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("mandelbrot-pipeline-layout"),
                bind_group_layouts: &[&self.uniforms_layout],
                push_constant_ranges: &[],
            });
        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("mandelbrot-pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: vertex,
                    entry_point: ShaderStage::Vertex.entry_point(),
                    buffers: &[Vertex::LAYOUT],
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: fragment,
                    entry_point: ShaderStage::Fragment.entry_point(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_configuration.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                multiview: None,
            });
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(error.to_string());
        }

        let uniforms = var::Builder::new(Uniforms::zeroed())
            .with_label("parameters")
            .create(&self.device);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("parameters-bind-group"),
            layout: &self.uniforms_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.binding_resource(),
            }],
        });

        let linked = Linked {
            pipeline,
            uniforms,
            bind_group,
        };
        if let Some(previous) = program.linked.replace(linked) {
            previous.uniforms.destroy();
        }
        Ok(())
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        if let Some(program) = self.objects.borrow_mut().programs.get_mut(&program) {
            program.attached.retain(|attached| *attached != shader);
        }
    }

    fn delete_program(&self, program: RawHandle) {
        trace!("deleting program {}", program);
        let removed = self.objects.borrow_mut().programs.remove(&program);
        if let Some(Program {
            linked: Some(linked),
            ..
        }) = removed
        {
            linked.uniforms.destroy();
        }
    }

    fn draw(
        &self,
        program: RawHandle,
        vertex_array: RawHandle,
        uniforms: &Uniforms,
        vertices: Range<u32>,
    ) -> Result<()> {
        let objects = self.objects.borrow();
        let linked = objects
            .programs
            .get(&program)
            .and_then(|program| program.linked.as_ref())
            .ok_or_else(|| Error::Invalid(format!("{} is not a linked program", program)))?;
        let buffer = objects
            .vertex_arrays
            .get(&vertex_array)
            .copied()
            .flatten()
            .and_then(|buffer| objects.buffers.get(&buffer))
            .and_then(Option::as_ref)
            .ok_or_else(|| {
                Error::Invalid(format!("vertex array {} has no vertex data", vertex_array))
            })?;
        if vertices.end as usize > buffer.len() {
            return Err(Error::Invalid(format!(
                "drawing vertices {:?} from a buffer of {}",
                vertices,
                buffer.len()
            )));
        }

        linked.uniforms.write(&self.queue, *uniforms);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("{}, reconfiguring surface", error);
                self.surface
                    .configure(&self.device, &self.surface_configuration);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("timed out waiting for the next frame");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (command_buffer, ()) = command_buffer::create(&self.device, "frame", |command_encoder| {
            command_encoder.with_cleared_pass(
                "mandelbrot-pass",
                &surface_texture_view,
                CLEAR_COLOUR,
                |render_pass| {
                    render_pass.set_pipeline(&linked.pipeline);
                    render_pass.set_bind_group(0, &linked.bind_group, &[]);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(vertices, 0..1);
                },
            )
        });

        self.queue.submit([command_buffer]);
        surface_texture.present();
        Ok(())
    }
}
