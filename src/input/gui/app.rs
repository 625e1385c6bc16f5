//! Main GUI application loop.

use anyhow::{Context, Result};
use log::error;
use winit::{
    dpi::PhysicalSize,
    event::{DeviceEvent, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::config::ExplorerConfig;
use crate::controllers::explorer::Explorer;
use crate::controllers::interactive::events::input::InputEvent;
use crate::input::gui::events::{mouse_motion, translate_window_event};
use crate::presenters::pixels::device::PixelsDevice;

/// Opens the explorer window and runs until it is closed.
pub fn run_gui(config: &ExplorerConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;

    // Leak the window to get a 'static reference for pixels
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
            .build(&event_loop)
            .context("failed to create window")?,
    ));

    let device = PixelsDevice::new(window).context("failed to create pixels surface")?;
    let mut explorer = Some(Explorer::start(config, device)?);

    // Frames are drawn continuously so new images show up without waiting
    // for input.
    event_loop.set_control_flow(ControlFlow::Poll);

    event_loop
        .run(move |event, elwt| {
            let Some(app) = explorer.as_mut() else {
                return;
            };
            let mut exit = false;

            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                    WindowEvent::CloseRequested => exit = true,
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = app.frame() {
                            error!("Render failed: {}", err);
                            exit = true;
                        }
                    }
                    WindowEvent::Resized(size) => {
                        if let Err(err) = app
                            .render_loop_mut()
                            .device_mut()
                            .resize_surface(size.width, size.height)
                        {
                            error!("Failed to resize surface: {}", err);
                        }

                        app.dispatch(InputEvent::Resize {
                            width: size.width,
                            height: size.height,
                        });
                    }
                    other => {
                        if let Some(input) = translate_window_event(&other) {
                            // Export tasks run detached.
                            app.dispatch(input);
                        }
                    }
                },
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => {
                    if let Some(input) = mouse_motion(delta, app.render_loop().cursor_grabbed()) {
                        app.dispatch(input);
                    }
                }
                Event::AboutToWait => window.request_redraw(),
                _ => {}
            }

            if exit {
                if let Some(app) = explorer.take() {
                    app.shutdown();
                }
                elwt.exit();
            }
        })
        .context("event loop failed")?;

    Ok(())
}
