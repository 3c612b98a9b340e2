//! Scene viewer: owns the frame loop and feeds pointer input to the orbit
//! controls. Runs in a native window or on the landing page's canvas.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::CameraSystem;
use crate::error::{Error, Result};
#[cfg(not(target_arch = "wasm32"))]
use crate::params::OrbitConfig;
use crate::params::{RenderConfig, SceneConfig};
use crate::rendering::{RenderSystem, WindowSurface};
use crate::scene::{HeroScene, Vertex};

/// Pixels of smooth scrolling that count as one wheel step
const PIXELS_PER_WHEEL_STEP: f64 = 100.0;

/// Seconds since the first call, from the platform's monotonic clock
#[cfg(not(target_arch = "wasm32"))]
fn now_s() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

#[cfg(target_arch = "wasm32")]
fn now_s() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

/// Measures the time between consecutive frames
#[derive(Debug, Default)]
pub struct FrameClock {
    last_s: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous tick (0 on the first tick)
    pub fn tick(&mut self) -> f32 {
        self.tick_at(now_s())
    }

    pub fn tick_at(&mut self, now_s: f64) -> f32 {
        let delta = self.last_s.map_or(0.0, |last| (now_s - last).max(0.0));
        self.last_s = Some(now_s);
        delta as f32
    }
}

/// GPU resources bound to the viewer's window
pub struct Gpu {
    render_system: RenderSystem,
    surface: WindowSurface,
}

impl Gpu {
    async fn new(
        window: Arc<Window>,
        render_config: &RenderConfig,
        vertices: &[Vertex],
    ) -> Result<Self> {
        let (render_system, surface) =
            RenderSystem::for_window(window, render_config, vertices).await?;
        Ok(Self {
            render_system,
            surface,
        })
    }
}

/// Progress of the viewer's GPU setup
enum GpuState {
    Pending,
    Ready(Gpu),
    Failed(Error),
}

impl GpuState {
    fn get_mut(&mut self) -> Option<&mut Gpu> {
        match self {
            GpuState::Ready(gpu) => Some(gpu),
            _ => None,
        }
    }

    fn get(&self) -> Option<&Gpu> {
        match self {
            GpuState::Ready(gpu) => Some(gpu),
            _ => None,
        }
    }

    /// Outcome reported once the event loop has stopped
    #[cfg(not(target_arch = "wasm32"))]
    fn into_result(self) -> Result<()> {
        match self {
            GpuState::Failed(e) => Err(e),
            GpuState::Pending | GpuState::Ready(_) => Ok(()),
        }
    }
}

/// Events delivered to the viewer through its event loop proxy
pub enum ViewerEvent {
    /// GPU setup finished (asynchronously on the web)
    GpuSetup(Result<Box<Gpu>>),
}

/// Main application state
pub struct Viewer {
    // Window and rendering
    window: Option<Arc<Window>>,
    gpu: GpuState,
    proxy: EventLoopProxy<ViewerEvent>,

    // Simulation
    scene: HeroScene,
    camera: CameraSystem,

    // Configuration
    render_config: RenderConfig,

    // Input and time tracking
    clock: FrameClock,
    cursor: Option<PhysicalPosition<f64>>,

    #[cfg(target_arch = "wasm32")]
    canvas: Option<web_sys::HtmlCanvasElement>,
}

impl Viewer {
    pub fn new(
        scene_config: SceneConfig,
        render_config: RenderConfig,
        proxy: EventLoopProxy<ViewerEvent>,
    ) -> Self {
        let camera = CameraSystem::new(scene_config.camera.clone(), scene_config.orbit.clone());
        Self {
            window: None,
            gpu: GpuState::Pending,
            proxy,
            scene: HeroScene::new(scene_config),
            camera,
            render_config,
            clock: FrameClock::default(),
            cursor: None,
            #[cfg(target_arch = "wasm32")]
            canvas: None,
        }
    }

    fn window_attributes(&self) -> winit::window::WindowAttributes {
        let attributes = Window::default_attributes().with_title(&self.render_config.title);

        // The canvas keeps the size the page layout gives it
        #[cfg(target_arch = "wasm32")]
        let attributes = {
            use winit::platform::web::WindowAttributesExtWebSys;
            attributes.with_canvas(self.canvas.clone())
        };

        #[cfg(not(target_arch = "wasm32"))]
        let attributes = attributes.with_inner_size(winit::dpi::LogicalSize::new(
            self.render_config.window_width,
            self.render_config.window_height,
        ));

        attributes
    }

    /// Advance the simulation by the real time since the last frame and draw it
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let delta_s = self.clock.tick();
        self.scene.update(delta_s);
        self.camera.update(delta_s);

        let Some(gpu) = self.gpu.get_mut() else {
            return;
        };

        let (width, height) = gpu.surface.size();
        let aspect_ratio = width as f32 / height.max(1) as f32;
        let (view_proj, eye) = self.camera.create_view_proj_matrix(aspect_ratio);

        gpu.render_system.update(&self.scene, view_proj, eye);

        match gpu.surface.render(&gpu.render_system) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, closing viewer");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn handle_pointer_move(&mut self, position: PhysicalPosition<f64>) {
        if let Some(previous) = self.cursor {
            let height = self
                .gpu
                .get()
                .map(|gpu| gpu.surface.size().1)
                .unwrap_or(self.render_config.window_height);
            self.camera.controls_mut().drag(
                (position.x - previous.x) as f32,
                (position.y - previous.y) as f32,
                height as f32,
            );
        }
        self.cursor = Some(position);
    }
}

impl ApplicationHandler<ViewerEvent> for Viewer {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(Arc::clone(&window));

        let proxy = self.proxy.clone();
        let render_config = self.render_config.clone();
        let vertices = self.scene.mesh().vertices.clone();
        let setup = async move {
            let result = Gpu::new(window, &render_config, &vertices)
                .await
                .map(Box::new);
            if proxy.send_event(ViewerEvent::GpuSetup(result)).is_err() {
                log::warn!("Viewer closed before rendering was ready");
            }
        };

        // Adapter requests cannot block the browser's main thread
        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(setup);

        #[cfg(not(target_arch = "wasm32"))]
        pollster::block_on(setup);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::GpuSetup(Ok(gpu)) => {
                log::info!("Hero scene ready");
                self.gpu = GpuState::Ready(*gpu);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            ViewerEvent::GpuSetup(Err(e)) => {
                log::error!("Failed to initialize rendering: {}", e);
                self.gpu = GpuState::Failed(e);
                // The web page keeps a blank canvas
                if cfg!(not(target_arch = "wasm32")) {
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if cfg!(not(target_arch = "wasm32")) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.get_mut() {
                    gpu.surface
                        .resize(&mut gpu.render_system, size.width, size.height);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.camera.controls_mut().begin_drag(),
                ElementState::Released => self.camera.controls_mut().end_drag(),
            },
            WindowEvent::CursorMoved { position, .. } => self.handle_pointer_move(position),
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.camera.controls_mut().end_drag();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_WHEEL_STEP) as f32,
                };
                self.camera.controls_mut().zoom(steps);
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

/// Open the hero scene in a native window and run until it is closed
#[cfg(not(target_arch = "wasm32"))]
pub fn run(scene_config: SceneConfig, render_config: RenderConfig) -> Result<()> {
    let event_loop = EventLoop::<ViewerEvent>::with_user_event().build()?;
    let mut viewer = Viewer::new(scene_config, render_config, event_loop.create_proxy());
    event_loop.run_app(&mut viewer)?;
    viewer.gpu.into_result()
}

/// Simulation step used when replaying camera motion offline
#[cfg(not(target_arch = "wasm32"))]
const OFFLINE_STEP_S: f64 = 1.0 / 60.0;

/// Replay time after which a camera without auto-rotation is at rest
#[cfg(not(target_arch = "wasm32"))]
const CAMERA_SETTLE_S: f64 = 10.0;

/// Seconds of camera motion to replay so the view matches `time_s`
///
/// Auto-rotation repeats every full turn, so whole turns past the first one
/// are skipped. Without auto-rotation the camera is at rest once settled.
#[cfg(not(target_arch = "wasm32"))]
fn camera_replay_s(time_s: f64, orbit: &OrbitConfig) -> f64 {
    let rate = if orbit.auto_rotate {
        f64::from(orbit.auto_rotate_rate()).abs()
    } else {
        0.0
    };

    if rate > 0.0 {
        let period = std::f64::consts::TAU / rate;
        if time_s > 2.0 * period {
            period + time_s.rem_euclid(period)
        } else {
            time_s
        }
    } else {
        time_s.min(CAMERA_SETTLE_S)
    }
}

/// Scene and camera as the live viewer shows them `time_s` seconds after start
///
/// The scene is a pure function of elapsed time and advances in one call.
/// The camera is damped, so its motion is replayed in 60 Hz steps.
#[cfg(not(target_arch = "wasm32"))]
fn offline_state(scene_config: SceneConfig, time_s: f32) -> Result<(HeroScene, CameraSystem)> {
    if !time_s.is_finite() {
        return Err(Error::InvalidTime(time_s));
    }
    let time_s = time_s.max(0.0);

    let mut camera = CameraSystem::new(scene_config.camera.clone(), scene_config.orbit.clone());
    let replay_s = camera_replay_s(f64::from(time_s), &scene_config.orbit);
    let mut scene = HeroScene::new(scene_config);
    scene.update(time_s);

    let steps = (replay_s / OFFLINE_STEP_S).floor() as u64;
    for _ in 0..steps {
        camera.update(OFFLINE_STEP_S as f32);
    }
    let remainder = (replay_s - steps as f64 * OFFLINE_STEP_S) as f32;
    if remainder > 0.0 {
        camera.update(remainder);
    }

    Ok((scene, camera))
}

/// Render the scene as it looks `time_s` seconds after start, without a window
#[cfg(not(target_arch = "wasm32"))]
pub fn snapshot(
    scene_config: SceneConfig,
    render_config: &RenderConfig,
    time_s: f32,
) -> Result<image::RgbaImage> {
    let (scene, camera) = offline_state(scene_config, time_s)?;

    let width = render_config.window_width.max(1);
    let height = render_config.window_height.max(1);
    let render_system =
        pollster::block_on(RenderSystem::headless(render_config, &scene.mesh().vertices))?;

    let (view_proj, eye) = camera.create_view_proj_matrix(render_config.aspect_ratio());
    render_system.update(&scene, view_proj, eye);
    render_system.capture(width, height)
}

/// Attach the hero scene to an existing canvas and return immediately
#[cfg(target_arch = "wasm32")]
pub fn spawn_in_canvas(canvas_id: &str) -> Result<()> {
    use wasm_bindgen::JsCast;
    use winit::platform::web::EventLoopExtWebSys;

    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or_else(|| Error::CanvasNotFound(canvas_id.to_string()))?;

    let render_config = RenderConfig::embedded(
        canvas.client_width().max(0) as u32,
        canvas.client_height().max(0) as u32,
    );

    let event_loop = EventLoop::<ViewerEvent>::with_user_event().build()?;
    let mut viewer = Viewer::new(
        SceneConfig::default(),
        render_config,
        event_loop.create_proxy(),
    );
    viewer.canvas = Some(canvas);
    event_loop.spawn_app(viewer);
    Ok(())
}
