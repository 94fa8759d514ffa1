//! Demo binary: a spinning hero ship over the grid backdrop, with pan-free
//! zoom on the mouse wheel and the full bloom pipeline on screen.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use glowline::demo::hero_shapes;
use glowline::{Renderer, Scene, Sprite, Viewport, ViewportOptions, WgpuContext};

const TICK_RATE: f32 = 60.0;
const TICK_DURATION: f32 = 1.0 / TICK_RATE;
/// A stalled frame advances at most this many logic ticks at once.
const MAX_TICKS_PER_FRAME: u32 = 5;

struct DemoApp {
    window: Option<Arc<Window>>,
    ctx: Option<WgpuContext>,
    renderer: Option<Renderer>,
    scene: Scene,
    viewport: Viewport,
    start_time: Instant,
    last_tick: Instant,
    tick_debt: f32,
}

impl DemoApp {
    fn new() -> Self {
        let mut scene = Scene::new();
        scene.insert(
            "play",
            Sprite {
                scale: 100.0,
                ..Sprite::with_shapes(hero_shapes())
            },
        );

        let now = Instant::now();
        Self {
            window: None,
            ctx: None,
            renderer: None,
            scene,
            viewport: Viewport::new(ViewportOptions::default(), 1280.0, 720.0),
            start_time: now,
            last_tick: now,
            tick_debt: 0.0,
        }
    }

    fn update_logic(&mut self) {
        let now = Instant::now();
        self.tick_debt += now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let mut ticks = (self.tick_debt / TICK_DURATION) as u32;
        if ticks > MAX_TICKS_PER_FRAME {
            ticks = MAX_TICKS_PER_FRAME;
            self.tick_debt = 0.0;
        } else {
            self.tick_debt -= ticks as f32 * TICK_DURATION;
        }

        for _ in 0..ticks {
            if let Some(play) = self.scene.get_mut("play") {
                play.rotation += 0.04;
            }
        }
        self.viewport.update(&mut self.scene);
    }

    fn render_frame(&mut self) {
        let (Some(ctx), Some(renderer)) = (&self.ctx, &mut self.renderer) else {
            return;
        };
        let Some(surface) = &ctx.surface else {
            return;
        };

        let frame = match surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame)
            | wgpu::CurrentSurfaceTexture::Suboptimal(frame) => frame,
            status => {
                log::warn!("surface frame unavailable: {status:?}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let time = self.start_time.elapsed().as_secs_f32();
        renderer.draw(ctx, &self.scene, &self.viewport.camera, time, &view);
        frame.present();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("glowline")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let size = window.inner_size();
        let ctx = match pollster::block_on(WgpuContext::new(window, size.width, size.height)) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("renderer initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let output_format = ctx.surface_format().unwrap_or(wgpu::TextureFormat::Bgra8Unorm);
        let settings = self.viewport.options.render_settings();
        match Renderer::new(&ctx, output_format, settings) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("renderer initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }
        self.ctx = Some(ctx);

        self.viewport
            .resize(size.width as f32, size.height as f32);
        let now = Instant::now();
        self.start_time = now;
        self.last_tick = now;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(ctx) = &mut self.ctx {
                    ctx.resize(size.width, size.height);
                }
                self.viewport.resize(size.width as f32, size.height as f32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.viewport
                    .set_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let distance = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                self.viewport.on_wheel(distance);
            }
            WindowEvent::RedrawRequested => {
                self.update_logic();
                self.render_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> glowline::errors::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = DemoApp::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
