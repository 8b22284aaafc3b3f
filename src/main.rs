use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use glam::Vec3;
use log::{info, warn};
use serde::Serialize;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glcam::cli::Cli;
use glcam::{Clock, Controller3Df, MatrixCalc, PositionCamera, RenderSurface, WinitInputBridge};

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const POSE_REPORT_INTERVAL_MS: u64 = 1000;

/// Final camera state, printed as JSON on exit so a session can be resumed
/// with `--pose`.
#[derive(Debug, Serialize)]
struct PoseDump {
    position: String,
    zoom_factor: f32,
    fov_deg: f32,
}

struct WindowSurface(Arc<Window>);

impl RenderSurface for WindowSurface {
    fn size(&self) -> (u32, u32) {
        let s = self.0.inner_size();
        (s.width, s.height)
    }

    fn is_focused(&self) -> bool {
        self.0.has_focus()
    }

    fn request_redraw(&self) {
        self.0.request_redraw();
    }
}

struct App {
    window: Option<WindowSurface>,
    controller: Controller3Df,
    bridge: WinitInputBridge,
    clock: Clock,
    report_accum_ms: u64,
}

impl App {
    fn new(cli: &Cli) -> Self {
        let mut camera = PositionCamera::new(Vec3::ZERO, Vec3::new(0.0, 100.0, 100.0));
        if let Some(pose) = &cli.pose {
            if !camera.set_position_camera(pose) {
                warn!("could not parse --pose {:?}, using the default pose", pose);
            }
        }
        camera.set_zoom_bounds(cli.zoom_min, cli.zoom_max, camera.zoom_scaling());

        let mut matrix = MatrixCalc::new();
        matrix.set_perspective_mode(!cli.ortho);
        matrix.set_model_axis_flip_y(cli.flip_y);
        matrix.set_model_axis_positive_z_away(cli.z_away);

        Self {
            window: None,
            controller: Controller3Df::new(camera, matrix),
            bridge: WinitInputBridge::new(),
            clock: Clock::new(),
            report_accum_ms: 0,
        }
    }

    fn dump_pose(&self) {
        let dump = PoseDump {
            position: self.controller.camera.string_position_camera(),
            zoom_factor: self.controller.camera.zoom_factor(),
            fov_deg: self.controller.matrix.fov().to_degrees(),
        };
        match serde_json::to_string(&dump) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("pose dump failed: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("glcam viewer")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => WindowSurface(Arc::new(w)),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.controller.sync_surface(&window);
            self.clock.reset();
            self.window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.bridge.process_event(&event, &mut self.controller);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.dump_pose();
                event_loop.exit();
            }
            WindowEvent::Focused(true) => {
                // elapsed time while unfocused must not land in one tick
                self.clock.reset();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let elapsed = self.clock.tick_ms();
                let moved = self.controller.tick(elapsed);

                self.report_accum_ms += elapsed;
                if moved && self.report_accum_ms >= POSE_REPORT_INTERVAL_MS {
                    self.report_accum_ms = 0;
                    info!(
                        "pose {} zoom {:.3} pm {:?}",
                        self.controller.camera.string_position_camera(),
                        self.controller.camera.zoom_factor(),
                        self.controller.matrix.projection_model_matrix().col(3),
                    );
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            if window.is_focused() {
                window.request_redraw();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&cli);

    println!("glcam viewer - drag to rotate/translate, wheel to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
