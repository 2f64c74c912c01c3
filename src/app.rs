use crate::settings::RemoteSettings;
use anyhow::Result;
use eogcal_render::MarkerRenderer;
use eogcal_sequencer::{CalibrationSequencer, SequencerEvent};
use eogcal_timing::{HighPrecisionTimer, Timer};
use log::{debug, error, info, trace, warn};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

type Sequencer = CalibrationSequencer<HighPrecisionTimer, MarkerRenderer>;

/// Window shell: one sequencer tick and one frame per redraw.
pub struct App {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    sequencer: Sequencer,
    remote: RemoteSettings,
    fullscreen: bool,
    current_size: Option<PhysicalSize<u32>>,
    scale_factor: f64,
    refresh_rate: Option<f64>,
    last_frame: Option<Duration>,
    manual_events: i32,

    should_exit: bool,
}

impl App {
    pub fn new(sequencer: Sequencer, remote: RemoteSettings, fullscreen: bool) -> Self {
        Self {
            window: None,
            pixels: None,
            sequencer,
            remote,
            fullscreen,
            current_size: None,
            scale_factor: 1.0,
            refresh_rate: None,
            last_frame: None,
            manual_events: 0,
            should_exit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        info!(
            "eogcal {} on {}/{}",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        warn!("Press SPACE to start or stop the calibration, ESC to exit");

        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn create_window_and_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let primary_monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .ok_or_else(|| anyhow::anyhow!("No monitor available"))?;

        self.refresh_rate = primary_monitor
            .refresh_rate_millihertz()
            .map(|rate| rate as f64 / 1000.0);

        let mut window_attributes = Window::default_attributes().with_title("EOG calibration");
        window_attributes = if self.fullscreen {
            window_attributes
                .with_fullscreen(Some(Fullscreen::Borderless(Some(primary_monitor))))
                .with_resizable(false)
        } else {
            window_attributes.with_inner_size(LogicalSize::new(1280.0, 720.0))
        };

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let physical_size = window.inner_size();
        self.scale_factor = window.scale_factor();
        self.current_size = Some(physical_size);

        info!(
            "Display {}×{}, scale {:.2}, refresh {}",
            physical_size.width,
            physical_size.height,
            self.scale_factor,
            self.refresh_rate
                .map_or("unknown".to_string(), |r| format!("{r:.1} Hz")),
        );

        let surface_texture =
            SurfaceTexture::new(physical_size.width, physical_size.height, window.clone());
        self.pixels = Some(Pixels::new(
            physical_size.width,
            physical_size.height,
            surface_texture,
        )?);

        self.sequencer
            .marker_mut()
            .resize(physical_size.width, physical_size.height);
        self.sequencer
            .resize_pattern(physical_size.width as f32, physical_size.height as f32);

        window.set_cursor_visible(false);
        window.request_redraw();
        self.window = Some(window);

        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let Some(pixels) = self.pixels.as_mut() else {
            return Ok(());
        };

        let now = self.sequencer.timer().now();
        let stats = self
            .sequencer
            .marker_mut()
            .render_frame(pixels.frame_mut(), now)?;
        pixels.render()?;

        if let Some(last) = self.last_frame {
            self.sequencer.timer_mut().record_frame(now.saturating_sub(last));
        }
        self.last_frame = Some(now);

        trace!(
            "clear {:.3}ms, marker {:.3}ms, total {:.3}ms, drawn {}",
            stats.clear.as_secs_f64() * 1e3,
            stats.marker.as_secs_f64() * 1e3,
            stats.total.as_secs_f64() * 1e3,
            stats.drawn,
        );
        Ok(())
    }

    fn update(&mut self) {
        for event in self.sequencer.update() {
            match event {
                SequencerEvent::Completed => info!("Calibration finished, SPACE to run again"),
                other => debug!("{other:?}"),
            }
        }
    }

    fn handle_input(&mut self, key: PhysicalKey, event_loop: &ActiveEventLoop) {
        let PhysicalKey::Code(k) = key else {
            return;
        };
        match k {
            KeyCode::Space => {
                if self.sequencer.is_running() {
                    self.sequencer.stop_calibration();
                } else {
                    self.sequencer.start_calibration();
                }
            }
            KeyCode::Escape => self.cleanup_and_exit(event_loop),
            KeyCode::KeyP => {
                let RemoteSettings {
                    experiment, subject, ..
                } = &self.remote;
                self.sequencer.setup_remote(experiment, subject);
            }
            KeyCode::KeyC => self.sequencer.connect_remote(),
            KeyCode::KeyX => self.sequencer.disconnect_remote(),
            KeyCode::KeyS => self.sequencer.start_streaming(),
            KeyCode::KeyA => self.sequencer.stop_streaming(),
            KeyCode::KeyK => self.sequencer.request_calibration(),
            KeyCode::KeyR => self.sequencer.start_remote_recording(),
            KeyCode::KeyE => self.sequencer.stop_remote_recording(),
            KeyCode::KeyM => {
                self.manual_events += 1;
                self.sequencer.send_remote_event("marker", self.manual_events);
            }
            _ => {}
        }
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        // minimised
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.current_size = Some(new_size);
        if let Some(pixels) = &mut self.pixels {
            if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                error!("Failed to resize surface: {e}");
            }
            if let Err(e) = pixels.resize_buffer(new_size.width, new_size.height) {
                error!("Failed to resize buffer: {e}");
            }
        }
        self.sequencer
            .marker_mut()
            .resize(new_size.width, new_size.height);
        self.sequencer
            .resize_pattern(new_size.width as f32, new_size.height as f32);
        info!("Display resized to {}×{}", new_size.width, new_size.height);
    }

    fn cleanup_and_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.sequencer.stop_calibration();
        if let Some(window) = &self.window {
            window.set_cursor_visible(true);
        }

        let stats = self.sequencer.timer().frame_stats();
        info!(
            "Frames: mean {:.3}ms, jitter {:.3}ms, min {:.3}ms, max {:.3}ms, {:.1} fps",
            stats.average_frame_time_ns / 1e6,
            stats.jitter_ns / 1e6,
            stats.min_frame_time_ns / 1e6,
            stats.max_frame_time_ns / 1e6,
            stats.effective_fps,
        );

        self.should_exit = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window_and_surface(event_loop) {
                error!("Failed to create window and surface: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.cleanup_and_exit(event_loop),
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    error!("Render failed: {e:#}");
                    self.cleanup_and_exit(event_loop);
                    return;
                }
                if let Some(win) = &self.window {
                    win.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() && !event.repeat => {
                self.handle_input(event.physical_key, event_loop);
            }
            WindowEvent::Resized(sz) => self.handle_resize(sz),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
                if let Some(window) = &self.window {
                    self.handle_resize(window.inner_size());
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
        }
    }
}
