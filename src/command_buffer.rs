/// Record a command buffer with `function`.
pub fn create<A>(
    device: &wgpu::Device,
    label: &str,
    function: impl FnOnce(&mut wgpu::CommandEncoder) -> A,
) -> (wgpu::CommandBuffer, A) {
    let mut command_encoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
    command_encoder.push_debug_group(label);
    let result = function(&mut command_encoder);
    command_encoder.pop_debug_group();
    (command_encoder.finish(), result)
}
