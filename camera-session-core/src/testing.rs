//! Scriptable collaborators for session tests.
//!
//! Every mock is a cheap `Clone` over shared state so a test can keep a handle
//! after moving the original into a `CameraSession`.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;
use image::{Rgba, RgbaImage};

use crate::models::camera_models::{ControlKind, FacingMode, MediaConstraints, StreamDimensions};
use crate::models::error::CameraError;
use crate::models::state::SessionState;
use crate::processing::capture_buffer::CaptureBuffer;
use crate::traits::control_adapter::ControlAdapter;
use crate::traits::device_provider::{DeviceProvider, StreamHandle};
use crate::traits::preference_store::PreferenceStore;
use crate::traits::session_delegate::SessionDelegate;
use crate::traits::video_surface::VideoSurface;

#[derive(Default)]
struct ProviderState {
    default_dims: Cell<Option<StreamDimensions>>,
    script: RefCell<VecDeque<Result<StreamDimensions, String>>>,
    requests: RefCell<Vec<MediaConstraints>>,
    live: Rc<Cell<usize>>,
    ended: Rc<Cell<bool>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

#[derive(Clone, Default)]
pub(crate) struct MockProvider {
    state: Rc<ProviderState>,
}

impl MockProvider {
    pub fn new(width: u32, height: u32) -> Self {
        let provider = Self::default();
        provider.state.default_dims.set(Some(StreamDimensions::new(width, height)));
        provider
    }

    /// Queue the outcome of the next request; unscripted requests succeed.
    pub fn push_result(&self, result: Result<StreamDimensions, String>) {
        self.state.script.borrow_mut().push_back(result);
    }

    /// Hold the next request until the returned sender fires.
    pub fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.state.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn requests(&self) -> Vec<MediaConstraints> {
        self.state.requests.borrow().clone()
    }

    pub fn live_streams(&self) -> usize {
        self.state.live.get()
    }

    /// Simulate the device going away (unplugged, permission revoked).
    pub fn end_streams(&self) {
        self.state.ended.set(true);
    }
}

impl DeviceProvider for MockProvider {
    type Stream = MockStream;

    async fn request_stream(&self, constraints: &MediaConstraints) -> Result<MockStream, String> {
        self.state.requests.borrow_mut().push(*constraints);

        let gate = self.state.gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        let scripted = self.state.script.borrow_mut().pop_front();
        let dims = match scripted {
            Some(result) => result?,
            None => self
                .state
                .default_dims
                .get()
                .unwrap_or(StreamDimensions::new(1280, 720)),
        };

        let live = Rc::clone(&self.state.live);
        live.set(live.get() + 1);
        Ok(MockStream {
            dims,
            facing: constraints.facing,
            live,
            ended: Rc::clone(&self.state.ended),
            stopped: false,
        })
    }
}

pub(crate) struct MockStream {
    dims: StreamDimensions,
    facing: Option<FacingMode>,
    live: Rc<Cell<usize>>,
    ended: Rc<Cell<bool>>,
    stopped: bool,
}

impl StreamHandle for MockStream {
    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.live.set(self.live.get() - 1);
        }
    }

    fn is_live(&self) -> bool {
        !self.stopped && !self.ended.get()
    }

    fn label(&self) -> String {
        format!("mock camera {:?}", self.facing)
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Default)]
struct SurfaceState {
    bound: Cell<Option<StreamDimensions>>,
    fail_next_bind: RefCell<Option<String>>,
    fail_draw: Cell<bool>,
    draws: Cell<u32>,
}

#[derive(Clone, Default)]
pub(crate) struct MockSurface {
    state: Rc<SurfaceState>,
}

impl MockSurface {
    pub fn fail_next_bind(&self, reason: &str) {
        *self.state.fail_next_bind.borrow_mut() = Some(reason.to_string());
    }

    pub fn fail_draws(&self, fail: bool) {
        self.state.fail_draw.set(fail);
    }

    pub fn is_bound(&self) -> bool {
        self.state.bound.get().is_some()
    }

    pub fn draws(&self) -> u32 {
        self.state.draws.get()
    }
}

impl VideoSurface for MockSurface {
    type Stream = MockStream;

    async fn bind(&self, stream: &MockStream) -> Result<StreamDimensions, String> {
        if let Some(reason) = self.state.fail_next_bind.borrow_mut().take() {
            return Err(reason);
        }
        self.state.bound.set(Some(stream.dims));
        Ok(stream.dims)
    }

    fn unbind(&self) {
        self.state.bound.set(None);
    }

    fn draw_frame(&self, buffer: &mut CaptureBuffer) -> Result<(), String> {
        if self.state.fail_draw.get() {
            return Err("video element not ready".into());
        }
        let native = self.state.bound.get().ok_or_else(|| "no stream bound".to_string())?;
        let frame = RgbaImage::from_fn(native.width, native.height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 96, 255])
        });
        buffer.draw_scaled(&frame);
        self.state.draws.set(self.state.draws.get() + 1);
        Ok(())
    }
}

#[derive(Default)]
struct ControlState {
    attached: HashSet<ControlKind>,
    visible: HashMap<ControlKind, bool>,
    calls: Vec<String>,
    fail_remove: HashSet<ControlKind>,
}

#[derive(Clone, Default)]
pub(crate) struct MockControls {
    state: Rc<RefCell<ControlState>>,
}

impl MockControls {
    pub fn is_attached(&self, control: ControlKind) -> bool {
        self.state.borrow().attached.contains(&control)
    }

    pub fn is_visible(&self, control: ControlKind) -> bool {
        self.state.borrow().visible.get(&control).copied().unwrap_or(false)
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn fail_remove(&self, control: ControlKind) {
        self.state.borrow_mut().fail_remove.insert(control);
    }
}

impl ControlAdapter for MockControls {
    fn attach_control(&mut self, control: ControlKind) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("attach {:?}", control));
        state.attached.insert(control);
        Ok(())
    }

    fn set_visible(&mut self, control: ControlKind, visible: bool) {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("visible {:?} {}", control, visible));
        state.visible.insert(control, visible);
    }

    fn remove(&mut self, control: ControlKind) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("remove {:?}", control));
        if state.fail_remove.contains(&control) {
            return Err(format!("{:?} already detached", control));
        }
        state.attached.remove(&control);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct SharedPreferences {
    facing: Rc<Cell<Option<FacingMode>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl SharedPreferences {
    pub fn stored(&self) -> Option<FacingMode> {
        self.facing.get()
    }

    pub fn set_stored(&self, facing: Option<FacingMode>) {
        self.facing.set(facing);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl PreferenceStore for SharedPreferences {
    fn get_preference(&self) -> Option<FacingMode> {
        self.facing.get()
    }

    fn set_preference(&mut self, facing: FacingMode) -> Result<(), CameraError> {
        if self.fail_writes.get() {
            return Err(CameraError::StorageError("quota exceeded".into()));
        }
        self.facing.set(Some(facing));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingDelegate {
    pub states: RefCell<Vec<SessionState>>,
    pub errors: RefCell<Vec<CameraError>>,
    pub stops: Cell<u32>,
}

impl SessionDelegate for RecordingDelegate {
    fn on_state_changed(&self, state: &SessionState) {
        self.states.borrow_mut().push(*state);
    }

    fn on_error(&self, error: &CameraError) {
        self.errors.borrow_mut().push(error.clone());
    }

    fn on_stop_requested(&self) {
        self.stops.set(self.stops.get() + 1);
    }
}
