use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

use crate::view::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

pub fn command_for_key(key: VirtualKeyCode) -> Option<Command> {
    match key {
        VirtualKeyCode::W => Some(Command::PanUp),
        VirtualKeyCode::S => Some(Command::PanDown),
        VirtualKeyCode::A => Some(Command::PanLeft),
        VirtualKeyCode::D => Some(Command::PanRight),
        VirtualKeyCode::Z => Some(Command::ZoomIn),
        VirtualKeyCode::X => Some(Command::ZoomOut),
        VirtualKeyCode::R => Some(Command::MoreIterations),
        VirtualKeyCode::E => Some(Command::FewerIterations),
        _ => None,
    }
}

/// Key presses and window closing; everything else is ignored.
pub fn translate(event: &WindowEvent<'_>) -> Option<Input> {
    match event {
        WindowEvent::CloseRequested => Some(Input::Quit),
        WindowEvent::KeyboardInput {
            input:
                KeyboardInput {
                    state: ElementState::Pressed,
                    virtual_keycode: Some(key),
                    ..
                },
            ..
        } => command_for_key(*key).map(Input::Command),
        _ => None,
    }
}
