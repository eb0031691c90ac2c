use crate::app::App;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{InstanceData, OrbitCamera};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub(crate) type TickCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameContext<'a> {
    pub app: App,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub camera: OrbitCamera,
    pub instances: Vec<InstanceData>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(app: App, canvas: web::HtmlCanvasElement, gpu: Option<render::GpuState<'a>>) -> Self {
        Self {
            app,
            canvas,
            gpu,
            camera: OrbitCamera::default(),
            instances: Vec::new(),
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let mode = {
            let state = self.app.state.borrow();
            self.camera.advance(&state, dt_sec);
            state.mode()
        };
        {
            let mut scene = self.app.scene.borrow_mut();
            scene.step(mode, dt_sec);
            scene.write_instances(&mut self.instances);
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let view = self.camera.view_matrix();
            let view_proj = self.camera.projection_matrix(g.aspect()) * view;
            match g.render(view, view_proj, &self.instances) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    initial_instances: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, initial_instances).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Schedule `tick` for the next animation frame, returning the request id.
pub(crate) fn request_frame(tick: &TickCell) -> Option<i32> {
    let window = web::window()?;
    let slot = tick.borrow();
    let callback = slot.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: TickCell = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        _ = request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    _ = request_frame(&tick);
}
