/*!
Typed `wgpu` buffers.

A [`Buffer<A>`] only ever holds `A`s: it's created from a `&[A]` and written
with `&[A]`, with [`bytemuck`] doing the cast to bytes.
*/

use std::{marker::PhantomData, ops::RangeBounds};

use wgpu::util::DeviceExt;

pub struct Buffer<A> {
    buffer: wgpu::Buffer,
    len: usize,
    phantom_data: PhantomData<A>,
}

impl<A: bytemuck::Pod + bytemuck::Zeroable> Buffer<A> {
    /// Overwrite the start of the buffer. `contents` must fit.
    pub fn write(&self, queue: &wgpu::Queue, contents: &[A]) {
        debug_assert!(contents.len() <= self.len);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(contents));
    }

    /// Number of `A`s the buffer was created with.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn slice<S: RangeBounds<wgpu::BufferAddress>>(&self, bounds: S) -> wgpu::BufferSlice {
        self.buffer.slice(bounds)
    }

    pub fn destroy(self) {
        self.buffer.destroy()
    }
}

pub struct Builder<'a, A> {
    label: Option<&'a str>,
    contents: &'a [A],
    usage: wgpu::BufferUsages,
}

impl<'a, A: bytemuck::Pod + bytemuck::Zeroable> Builder<'a, A> {
    pub fn new(contents: &'a [A]) -> Self {
        Self {
            label: None,
            contents,
            usage: wgpu::BufferUsages::COPY_DST,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_usage(mut self, usage: wgpu::BufferUsages) -> Self {
        self.usage |= usage;
        self
    }

    pub fn create(self, device: &wgpu::Device) -> Buffer<A> {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: self.label,
            contents: bytemuck::cast_slice(self.contents),
            usage: self.usage,
        });

        Buffer {
            buffer,
            len: self.contents.len(),
            phantom_data: PhantomData,
        }
    }
}
