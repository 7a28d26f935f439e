//! The window and its event loop.

use std::{
    rc::Rc,
    time::{Duration, Instant},
};

use log::{error, info};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoop},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
};

use crate::{
    app::{App, Flow},
    backend::WgpuBackend,
    config::Config,
    error::Result,
    input,
};

/// Top left corner that puts a `window_size` window in the middle of a monitor.
pub fn centered_position(
    monitor_position: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window_size: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| (i64::from(monitor) - i64::from(window)) / 2;
    PhysicalPosition::new(
        monitor_position.x + offset(monitor_size.width, window_size.width) as i32,
        monitor_position.y + offset(monitor_size.height, window_size.height) as i32,
    )
}

fn create_window(event_loop: &EventLoop<()>, config: &Config) -> Result<Window> {
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(PhysicalSize::from(config.size))
        .with_resizable(false)
        .build(event_loop)?;

    if let Some(monitor) = window.current_monitor() {
        window.set_outer_position(centered_position(
            monitor.position(),
            monitor.size(),
            window.outer_size(),
        ));
    }

    Ok(window)
}

/// Open the window and run until it's closed or a frame fails.
///
/// Returns once everything acquired here has been released.
pub fn run(config: &Config) -> Result<()> {
    let mut event_loop = EventLoop::new();
    let window = create_window(&event_loop, config)?;

    // SAFETY: `gpu` and every clone of it (held by `app`) are dropped before `window`.
    let gpu = Rc::new(unsafe { WgpuBackend::new(&window)? });
    let mut app = App::new(Rc::clone(&gpu), config, window.inner_size().into())?;

    let frame_delay: Duration = config.frame_delay;
    let mut running = true;

    event_loop.run_return(|event, _, control_flow| {
        if !running {
            *control_flow = ControlFlow::Exit;
            return;
        }

        match event {
            Event::NewEvents(StartCause::Init | StartCause::ResumeTimeReached { .. }) => {
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                if let Some(input) = input::translate(&event) {
                    if app.handle(input) == Flow::Exit {
                        info!("quit requested");
                        running = false;
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            Event::RedrawRequested(window_id) if window_id == window.id() => match app.frame() {
                Ok(()) => *control_flow = ControlFlow::WaitUntil(Instant::now() + frame_delay),
                Err(error) => {
                    error!("{}", error);
                    running = false;
                    *control_flow = ControlFlow::Exit;
                }
            },
            _ => {}
        }
    });

    Ok(())
}
