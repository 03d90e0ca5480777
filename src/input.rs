//! Host events a field listens to.
//!
//! The field only cares about two things from its environment: the size of
//! the surface and where the pointer is. Hosts turn their native events into
//! [`HostEvent`]s and hand them to [`Field::handle`](crate::Field::handle).
//!
//! On native targets, [`HostEvent::from_window_event`] translates winit
//! events. Coordinates stay in physical pixels, matching the canvas the
//! window presents.

#[cfg(not(target_arch = "wasm32"))]
use winit::event::WindowEvent;

/// A notification from the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The drawing surface changed size (pixels).
    Resize { width: f32, height: f32 },
    /// The pointer moved to an absolute surface position (pixels).
    PointerMove { x: f32, y: f32 },
}

impl HostEvent {
    /// Translate a winit window event, if it is one the field consumes.
    ///
    /// Cursor-left events are not translated; the field keeps
    /// attracting toward the last known pointer position.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::Resized(size) => Some(HostEvent::Resize {
                width: size.width as f32,
                height: size.height as f32,
            }),
            WindowEvent::CursorMoved { position, .. } => Some(HostEvent::PointerMove {
                x: position.x as f32,
                y: position.y as f32,
            }),
            _ => None,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn test_resize_translation() {
        let event = WindowEvent::Resized(PhysicalSize::new(1920, 1080));
        assert_eq!(
            HostEvent::from_window_event(&event),
            Some(HostEvent::Resize {
                width: 1920.0,
                height: 1080.0
            })
        );
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(HostEvent::from_window_event(&WindowEvent::CloseRequested), None);
        assert_eq!(HostEvent::from_window_event(&WindowEvent::Focused(true)), None);
    }
}
