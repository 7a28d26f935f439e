pub trait CommandEncoderExt {
    fn with_render_pass<'pass, A>(
        &'pass mut self,
        descriptor: &wgpu::RenderPassDescriptor<'pass, '_>,
        function: impl FnOnce(&mut wgpu::RenderPass<'pass>) -> A,
    ) -> A;

    /// A render pass that clears `view` to `colour` before running `function`.
    fn with_cleared_pass<'pass, A>(
        &'pass mut self,
        label: &str,
        view: &'pass wgpu::TextureView,
        colour: wgpu::Color,
        function: impl FnOnce(&mut wgpu::RenderPass<'pass>) -> A,
    ) -> A;
}

impl CommandEncoderExt for wgpu::CommandEncoder {
    fn with_render_pass<'pass, A>(
        &'pass mut self,
        descriptor: &wgpu::RenderPassDescriptor<'pass, '_>,
        function: impl FnOnce(&mut wgpu::RenderPass<'pass>) -> A,
    ) -> A {
        let mut render_pass = self.begin_render_pass(descriptor);
        function(&mut render_pass)
    }

    fn with_cleared_pass<'pass, A>(
        &'pass mut self,
        label: &str,
        view: &'pass wgpu::TextureView,
        colour: wgpu::Color,
        function: impl FnOnce(&mut wgpu::RenderPass<'pass>) -> A,
    ) -> A {
        self.with_render_pass(
            &wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colour),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            },
            function,
        )
    }
}
