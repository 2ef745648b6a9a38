use crate::models::camera_models::ControlKind;

/// Narrow UI adapter the session drives instead of touching a toolkit.
///
/// `attach_control(Preview)` mounts the live video into the rendering
/// surface, `attach_control(SwitchButton)` creates the facing toggle.
/// The stop control is provided by the host and only toggled.
pub trait ControlAdapter {
    fn attach_control(&mut self, control: ControlKind) -> Result<(), String>;

    fn set_visible(&mut self, control: ControlKind, visible: bool);

    /// Detach or destroy a control. Removing something absent is not an error.
    fn remove(&mut self, control: ControlKind) -> Result<(), String>;
}
