//! DOM implementation of the session's `ControlAdapter`.
//!
//! Visibility is toggled with a `hidden` class. Click handlers never call
//! into the session synchronously: they schedule the work with
//! `spawn_local`, so the session may remove the clicked element (and drop
//! its closure) without tearing down a closure that is still running.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlVideoElement};

use camera_session_core::models::camera_models::ControlKind;
use camera_session_core::traits::control_adapter::ControlAdapter;

use crate::media_devices::describe;

pub const PREVIEW_ELEMENT_ID: &str = "cameraPreview";
pub const STOP_BUTTON_ID: &str = "cameraStopBtn";
pub const SWITCH_BUTTON_ID: &str = "cameraSwitchBtn";
const HIDDEN_CLASS: &str = "hidden";

/// A click listener that unregisters itself when dropped.
struct ClickListener {
    target: Element,
    closure: Closure<dyn FnMut()>,
}

impl ClickListener {
    fn bind(target: Element, handler: Rc<dyn Fn()>) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        Ok(Self { target, closure })
    }
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to unbind click listener: {}", describe(&e));
        }
    }
}

pub struct DomControlAdapter {
    document: Document,
    video: HtmlVideoElement,
    on_stop: Rc<dyn Fn()>,
    on_switch: Rc<dyn Fn()>,
    stop_listener: Option<ClickListener>,
    switch_button: Option<ClickListener>,
}

impl DomControlAdapter {
    pub fn new(
        document: Document,
        video: HtmlVideoElement,
        on_stop: impl Fn() + 'static,
        on_switch: impl Fn() + 'static,
    ) -> Self {
        Self {
            document,
            video,
            on_stop: Rc::new(on_stop),
            on_switch: Rc::new(on_switch),
            stop_listener: None,
            switch_button: None,
        }
    }

    fn element(&self, control: ControlKind) -> Option<Element> {
        match control {
            ControlKind::Preview => self.document.get_element_by_id(PREVIEW_ELEMENT_ID),
            ControlKind::StopButton => self.document.get_element_by_id(STOP_BUTTON_ID),
            ControlKind::SwitchButton => self.switch_button.as_ref().map(|b| b.target.clone()),
        }
    }

    fn require(&self, control: ControlKind, id: &str) -> Result<Element, String> {
        self.element(control)
            .ok_or_else(|| format!("element #{} not found", id))
    }

    fn attach_preview(&mut self) -> Result<(), String> {
        let preview = self.require(ControlKind::Preview, PREVIEW_ELEMENT_ID)?;
        preview.append_child(&self.video).map_err(|e| describe(&e))?;

        // The stop control is paired with the preview and lives as long as it.
        if self.stop_listener.is_none() {
            match self.element(ControlKind::StopButton) {
                Some(stop) => {
                    let listener = ClickListener::bind(stop, Rc::clone(&self.on_stop)).map_err(|e| describe(&e))?;
                    self.stop_listener = Some(listener);
                }
                None => log::warn!("#{} not found; stop control disabled", STOP_BUTTON_ID),
            }
        }
        Ok(())
    }

    fn attach_switch_button(&mut self) -> Result<(), String> {
        if self.switch_button.is_some() {
            return Ok(());
        }
        let preview = self.require(ControlKind::Preview, PREVIEW_ELEMENT_ID)?;

        let button = self.document.create_element("button").map_err(|e| describe(&e))?;
        button.set_id(SWITCH_BUTTON_ID);
        button.set_class_name("camera-switch-btn");
        button.set_attribute("type", "button").map_err(|e| describe(&e))?;
        button.set_attribute("aria-label", "Switch camera").map_err(|e| describe(&e))?;
        button.set_text_content(Some("⟲"));

        let listener = ClickListener::bind(button, Rc::clone(&self.on_switch)).map_err(|e| describe(&e))?;
        preview.append_child(&listener.target).map_err(|e| describe(&e))?;
        self.switch_button = Some(listener);
        Ok(())
    }
}

impl ControlAdapter for DomControlAdapter {
    fn attach_control(&mut self, control: ControlKind) -> Result<(), String> {
        match control {
            ControlKind::Preview => self.attach_preview(),
            ControlKind::SwitchButton => self.attach_switch_button(),
            // Host-provided; only ever toggled.
            ControlKind::StopButton => self.require(control, STOP_BUTTON_ID).map(|_| ()),
        }
    }

    fn set_visible(&mut self, control: ControlKind, visible: bool) {
        let Some(element) = self.element(control) else {
            return;
        };
        let classes = element.class_list();
        let result = if visible {
            classes.remove_1(HIDDEN_CLASS)
        } else {
            classes.add_1(HIDDEN_CLASS)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle {:?} visibility: {}", control, describe(&e));
        }
    }

    fn remove(&mut self, control: ControlKind) -> Result<(), String> {
        match control {
            ControlKind::Preview => {
                self.stop_listener = None;
                self.video.remove();
            }
            ControlKind::SwitchButton => {
                if let Some(listener) = self.switch_button.take() {
                    listener.target.remove();
                }
            }
            ControlKind::StopButton => {}
        }
        Ok(())
    }
}
