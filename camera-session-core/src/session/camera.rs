use std::mem;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::models::camera_models::{ControlKind, FacingMode};
use crate::models::captured_frame::CapturedFrame;
use crate::models::config::SessionConfiguration;
use crate::models::error::CameraError;
use crate::models::state::SessionState;
use crate::processing::capture_buffer::CaptureBuffer;
use crate::processing::frame_encoder::FrameEncoder;
use crate::processing::geometry::CaptureGeometry;
use crate::storage::preferences::MemoryPreferenceStore;
use crate::traits::control_adapter::ControlAdapter;
use crate::traits::device_provider::{DeviceProvider, StreamHandle};
use crate::traits::preference_store::PreferenceStore;
use crate::traits::session_delegate::SessionDelegate;
use crate::traits::video_surface::VideoSurface;

type StopListener = Rc<dyn Fn()>;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
///
/// Never held across an `.await` or while calling the delegate.
struct SessionInner<S> {
    state: SessionState,
    stream: Option<S>,
    buffer: Option<CaptureBuffer>,
    facing: Option<FacingMode>,
    preview_attached: bool,
    preview_visible: bool,
    switch_attached: bool,
    frames_captured: u64,
}

impl<S> SessionInner<S> {
    fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
            stream: None,
            buffer: None,
            facing: None,
            preview_attached: false,
            preview_visible: false,
            switch_attached: false,
            frames_captured: 0,
        }
    }
}

/// Holds the single-flight slot for one lifecycle operation.
///
/// Dropped without `complete_flight`, the operation's future was abandoned at
/// an await point and the half-acquired session is torn down.
struct FlightGuard<'a, P: DeviceProvider, V: VideoSurface<Stream = P::Stream>> {
    session: &'a CameraSession<P, V>,
    completed: bool,
}

impl<P: DeviceProvider, V: VideoSurface<Stream = P::Stream>> Drop for FlightGuard<'_, P, V> {
    fn drop(&mut self) {
        self.session.in_flight.store(false, Ordering::SeqCst);
        if !self.completed {
            self.session.abandon_flight();
        }
    }
}

/// Camera session orchestrator.
///
/// Generic over the device provider and the playback surface. UI controls,
/// preference persistence and the delegate are optional collaborators.
///
/// ```text
/// [DeviceProvider] → stream → [VideoSurface] ─draw─→ [CaptureBuffer] → [FrameEncoder] → CapturedFrame
///                                   │
///                           [ControlAdapter] (preview / stop / switch)
/// ```
///
/// All methods take `&self` so a session can be shared (`Rc`) between the
/// host and UI callbacks. Only one of `initialize()` / `switch_device()` may be
/// in flight at a time; a `dispose()` issued meanwhile is applied when that
/// operation completes.
pub struct CameraSession<P: DeviceProvider, V: VideoSurface<Stream = P::Stream>> {
    provider: P,
    surface: V,
    config: SessionConfiguration,
    encoder: FrameEncoder,
    inner: Mutex<SessionInner<P::Stream>>,
    preferences: Mutex<Box<dyn PreferenceStore>>,
    controls: Mutex<Option<Box<dyn ControlAdapter>>>,
    delegate: Option<Rc<dyn SessionDelegate>>,
    stop_listeners: Mutex<Vec<StopListener>>,

    // Single-flight control
    in_flight: AtomicBool,
    dispose_requested: AtomicBool,
    stop_requested: AtomicBool,
}

impl<P: DeviceProvider, V: VideoSurface<Stream = P::Stream>> CameraSession<P, V> {
    pub fn new(provider: P, surface: V, config: SessionConfiguration) -> Result<Self, CameraError> {
        config.validate().map_err(CameraError::ConfigurationFailed)?;

        Ok(Self {
            provider,
            surface,
            encoder: FrameEncoder::new(config.quality),
            config,
            inner: Mutex::new(SessionInner::new()),
            preferences: Mutex::new(Box::new(MemoryPreferenceStore::new())),
            controls: Mutex::new(None),
            delegate: None,
            stop_listeners: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            dispose_requested: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
        })
    }

    pub fn set_delegate(&mut self, delegate: Rc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn set_controls(&mut self, controls: impl ControlAdapter + 'static) {
        *self.controls.get_mut() = Some(Box::new(controls));
    }

    pub fn set_preference_store(&mut self, store: impl PreferenceStore + 'static) {
        *self.preferences.get_mut() = Box::new(store);
    }

    /// Register a listener fired after a user-driven stop has disposed the session.
    pub fn on_stop_requested(&self, callback: impl Fn() + 'static) {
        self.stop_listeners.lock().push(Rc::new(callback));
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn is_initialized(&self) -> bool {
        self.state().is_initialized()
    }

    /// Current facing preference; `None` until first resolved.
    pub fn facing(&self) -> Option<FacingMode> {
        self.inner.lock().facing
    }

    pub fn is_preview_visible(&self) -> bool {
        self.inner.lock().preview_visible
    }

    /// Geometry of the current capture buffer.
    pub fn capture_dimensions(&self) -> Result<CaptureGeometry, CameraError> {
        self.inner
            .lock()
            .buffer
            .as_ref()
            .map(CaptureBuffer::geometry)
            .ok_or(CameraError::NotInitialized)
    }

    pub fn aspect_ratio(&self) -> Result<f64, CameraError> {
        self.capture_dimensions().map(|g| g.aspect_ratio)
    }

    /// Acquire the camera. Transitions: uninitialized → initializing → active.
    ///
    /// No-op when already initialized.
    pub async fn initialize(&self) -> Result<(), CameraError> {
        if self.is_initialized() {
            log::debug!("initialize() ignored: session already initialized");
            return Ok(());
        }

        let flight = self.begin_flight()?;
        let facing = self.resolve_facing();
        self.set_state(SessionState::Initializing);

        let outcome = match self.acquire(facing).await {
            Ok((stream, geometry)) => {
                log::info!(
                    "Camera initialized: {} → capture buffer {}x{} (aspect {:.4})",
                    stream.label(),
                    geometry.width,
                    geometry.height,
                    geometry.aspect_ratio
                );
                self.install(stream, geometry, facing);
                self.mount_controls();
                self.set_state(SessionState::Active);
                Ok(())
            }
            Err(reason) => {
                log::error!("Camera acquisition failed: {}", reason);
                self.set_state(SessionState::Uninitialized);
                let error = CameraError::CameraUnavailable(reason);
                self.report_error(&error);
                Err(error)
            }
        };

        self.complete_flight(flight, outcome)
    }

    /// Snapshot the live frame and encode it for transport.
    pub fn capture(&self) -> Result<CapturedFrame, CameraError> {
        let mut inner = self.inner.lock();
        match inner.state {
            SessionState::Active => {}
            SessionState::Switching => return Err(CameraError::OperationInProgress),
            SessionState::Uninitialized | SessionState::Initializing => {
                return Err(CameraError::NotInitialized)
            }
        }

        let facing = if self.config.supports_facing_switch {
            inner.facing
        } else {
            None
        };
        if !inner.stream.as_ref().is_some_and(|stream| stream.is_live()) {
            return Err(CameraError::CaptureFailed("camera stream has ended".into()));
        }
        let buffer = inner.buffer.as_mut().ok_or(CameraError::NotInitialized)?;

        self.surface
            .draw_frame(buffer)
            .map_err(CameraError::CaptureFailed)?;
        let jpeg = self.encoder.encode(buffer.image())?;
        let (width, height) = (buffer.width(), buffer.height());

        inner.frames_captured += 1;
        let sequence = inner.frames_captured;
        drop(inner);

        log::trace!("Captured frame #{} ({} bytes)", sequence, jpeg.len());
        Ok(CapturedFrame::from_jpeg(
            &jpeg,
            sequence,
            width,
            height,
            self.encoder.quality(),
            facing,
        ))
    }

    pub fn show_preview(&self) {
        self.set_preview_visible(true);
    }

    pub fn hide_preview(&self) {
        self.set_preview_visible(false);
    }

    /// Toggle between front and back cameras.
    ///
    /// No-op unless the session is initialized on a facing-capable platform.
    /// On failure the preference is rolled back and, since the previous stream
    /// has already been released, the session is torn down: the caller must
    /// `initialize()` again.
    pub async fn switch_device(&self) -> Result<(), CameraError> {
        if !self.config.supports_facing_switch {
            log::debug!("switch_device() ignored: platform has no switchable camera");
            return Ok(());
        }
        if !self.is_initialized() {
            log::debug!("switch_device() ignored: session not initialized");
            return Ok(());
        }

        let flight = self.begin_flight()?;
        let previous = self.inner.lock().facing.unwrap_or(FacingMode::Front);
        let last_good = self.preferences.lock().get_preference().unwrap_or(previous);
        let next = previous.flipped();

        let persisted = self.preferences.lock().set_preference(next);
        if let Err(e) = persisted {
            let error = CameraError::DeviceSwitchFailed(format!("could not persist facing preference: {}", e));
            self.report_error(&error);
            return self.complete_flight(flight, Err(error));
        }
        self.inner.lock().facing = Some(next);
        self.set_state(SessionState::Switching);

        log::info!("Switching camera {:?} → {:?}", previous, next);
        self.release_stream();

        let outcome = match self.acquire(next).await {
            Ok((stream, geometry)) => {
                log::info!(
                    "Camera switched: {} → capture buffer {}x{}",
                    stream.label(),
                    geometry.width,
                    geometry.height
                );
                self.install(stream, geometry, next);
                self.set_state(SessionState::Active);
                Ok(())
            }
            Err(reason) => {
                log::error!("Camera switch to {:?} failed: {}", next, reason);
                self.inner.lock().facing = Some(last_good);
                let restored = self.preferences.lock().set_preference(last_good);
                if let Err(e) = restored {
                    log::warn!("Failed to restore facing preference: {}", e);
                }
                self.teardown();
                let error = CameraError::DeviceSwitchFailed(reason);
                self.report_error(&error);
                Err(error)
            }
        };

        self.complete_flight(flight, outcome)
    }

    /// Release every device resource. Safe to call from any state, repeatedly.
    ///
    /// While `initialize()` or `switch_device()` is in flight the teardown is
    /// deferred until that operation completes.
    pub fn dispose(&self) {
        if self.in_flight.load(Ordering::SeqCst) {
            log::debug!("Deferring dispose until the in-flight camera operation completes");
            self.dispose_requested.store(true, Ordering::SeqCst);
            return;
        }
        self.dispose_requested.store(false, Ordering::SeqCst);
        self.teardown();
    }

    /// User-driven stop: dispose, then notify stop listeners and the delegate.
    ///
    /// While an operation is in flight both the teardown and the notification
    /// wait for it to complete.
    pub fn request_stop(&self) {
        log::info!("Camera stop requested");
        if self.in_flight.load(Ordering::SeqCst) {
            log::debug!("Deferring stop until the in-flight camera operation completes");
            self.stop_requested.store(true, Ordering::SeqCst);
            self.dispose_requested.store(true, Ordering::SeqCst);
            return;
        }
        self.dispose();
        self.notify_stop();
    }

    // --- Internal helpers ---

    fn begin_flight(&self) -> Result<FlightGuard<'_, P, V>, CameraError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| CameraError::OperationInProgress)?;
        Ok(FlightGuard {
            session: self,
            completed: false,
        })
    }

    /// End a lifecycle operation, applying a dispose or stop requested meanwhile.
    fn complete_flight(
        &self,
        mut flight: FlightGuard<'_, P, V>,
        outcome: Result<(), CameraError>,
    ) -> Result<(), CameraError> {
        let disposed = self.dispose_requested.swap(false, Ordering::SeqCst);
        let stopped = self.stop_requested.swap(false, Ordering::SeqCst);
        flight.completed = true;
        drop(flight);

        if disposed {
            log::info!("Applying dispose deferred during camera operation");
            self.teardown();
        }
        if stopped {
            self.notify_stop();
        }
        if disposed {
            return outcome.and(Err(CameraError::Disposed));
        }
        outcome
    }

    /// Recover from an operation whose future was dropped before completion.
    fn abandon_flight(&self) {
        let disposed = self.dispose_requested.swap(false, Ordering::SeqCst);
        let stopped = self.stop_requested.swap(false, Ordering::SeqCst);

        if disposed || self.state().is_busy() {
            log::warn!("Camera operation abandoned before completion; releasing session");
            self.teardown();
        }
        if stopped {
            self.notify_stop();
        }
    }

    fn notify_stop(&self) {
        let listeners: Vec<StopListener> = self.stop_listeners.lock().clone();
        for listener in listeners {
            listener();
        }
        if let Some(ref delegate) = self.delegate {
            delegate.on_stop_requested();
        }
    }

    fn resolve_facing(&self) -> FacingMode {
        let current = self.inner.lock().facing;
        current
            .or_else(|| self.preferences.lock().get_preference())
            .unwrap_or(FacingMode::Front)
    }

    /// Request a stream, bind it and derive the buffer geometry.
    ///
    /// Any failure after the stream was obtained stops it before returning.
    async fn acquire(&self, facing: FacingMode) -> Result<(P::Stream, CaptureGeometry), String> {
        let constraints = self.config.constraints(facing);
        log::debug!("Requesting camera stream: {:?}", constraints);

        let mut stream = self.provider.request_stream(&constraints).await?;

        let bound = self
            .surface
            .bind(&stream)
            .await
            .map_err(|e| format!("playback failed: {}", e))
            .and_then(|dims| {
                log::debug!("Negotiated stream {}x{}", dims.width, dims.height);
                CaptureGeometry::for_stream(self.config.target_width, dims).map_err(|e| e.to_string())
            });

        match bound {
            Ok(geometry) => Ok((stream, geometry)),
            Err(reason) => {
                self.surface.unbind();
                stream.stop();
                Err(reason)
            }
        }
    }

    fn install(&self, stream: P::Stream, geometry: CaptureGeometry, facing: FacingMode) {
        let mut inner = self.inner.lock();
        inner.stream = Some(stream);
        inner.buffer = Some(CaptureBuffer::new(geometry));
        inner.facing = Some(facing);
    }

    /// Stop and drop the current stream, keeping buffer and controls.
    fn release_stream(&self) {
        let stream = self.inner.lock().stream.take();
        self.surface.unbind();
        if let Some(mut stream) = stream {
            log::debug!("Stopping camera stream {}", stream.label());
            stream.stop();
        }
    }

    fn mount_controls(&self) {
        let (mut preview_attached, mut switch_attached) = {
            let inner = self.inner.lock();
            (inner.preview_attached, inner.switch_attached)
        };

        let mut controls = self.controls.lock();
        let Some(controls) = controls.as_mut() else {
            return;
        };

        if !preview_attached {
            match controls.attach_control(ControlKind::Preview) {
                Ok(()) => preview_attached = true,
                Err(e) => log::warn!("Failed to attach camera preview: {}", e),
            }
        }
        if self.config.supports_facing_switch && !switch_attached {
            match controls.attach_control(ControlKind::SwitchButton) {
                Ok(()) => switch_attached = true,
                Err(e) => log::warn!("Failed to attach camera switch control: {}", e),
            }
        }

        if preview_attached {
            controls.set_visible(ControlKind::Preview, true);
            controls.set_visible(ControlKind::StopButton, true);
        }
        if switch_attached {
            controls.set_visible(ControlKind::SwitchButton, true);
        }

        let mut inner = self.inner.lock();
        inner.preview_attached = preview_attached;
        inner.preview_visible = preview_attached;
        inner.switch_attached = switch_attached;
    }

    fn set_preview_visible(&self, visible: bool) {
        let switch_attached = {
            let mut inner = self.inner.lock();
            if !inner.preview_attached {
                log::debug!("Preview visibility change ignored: no preview attached");
                return;
            }
            inner.preview_visible = visible;
            inner.switch_attached
        };

        if let Some(controls) = self.controls.lock().as_mut() {
            controls.set_visible(ControlKind::Preview, visible);
            controls.set_visible(ControlKind::StopButton, visible);
            if switch_attached {
                controls.set_visible(ControlKind::SwitchButton, visible);
            }
        }
    }

    /// Full teardown. Every step is best-effort so one failure cannot keep
    /// the device open.
    fn teardown(&self) {
        let (stream, preview_attached, switch_attached) = {
            let mut inner = self.inner.lock();
            let stream = inner.stream.take();
            inner.buffer = None;
            inner.preview_visible = false;
            (
                stream,
                mem::take(&mut inner.preview_attached),
                mem::take(&mut inner.switch_attached),
            )
        };

        if let Some(mut stream) = stream {
            log::info!("Releasing camera stream {}", stream.label());
            stream.stop();
        }
        self.surface.unbind();

        if let Some(controls) = self.controls.lock().as_mut() {
            if switch_attached {
                if let Err(e) = controls.remove(ControlKind::SwitchButton) {
                    log::warn!("Failed to remove camera switch control: {}", e);
                }
            }
            if preview_attached {
                controls.set_visible(ControlKind::Preview, false);
                controls.set_visible(ControlKind::StopButton, false);
                if let Err(e) = controls.remove(ControlKind::Preview) {
                    log::warn!("Failed to clear camera preview: {}", e);
                }
            }
        }

        self.set_state(SessionState::Uninitialized);
    }

    fn set_state(&self, new_state: SessionState) {
        {
            let mut inner = self.inner.lock();
            if inner.state == new_state {
                return;
            }
            inner.state = new_state;
        }
        log::debug!("Camera session state → {}", new_state.as_str());
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&new_state);
        }
    }

    fn report_error(&self, error: &CameraError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }
}

impl<P: DeviceProvider, V: VideoSurface<Stream = P::Stream>> Drop for CameraSession<P, V> {
    fn drop(&mut self) {
        self.teardown();
    }
}
