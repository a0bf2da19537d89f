use std::fmt;

use flightmap_core::controller::LoadedOverlay;
use flightmap_core::overlay::OverlayKind;
use flightmap_core::viewpoint::Viewpoint;

/// The user actions the worker can be busy with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    RandomLocation,
    SaveImage,
    LoadOverlay(OverlayKind),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::RandomLocation => f.write_str("Moving to random location"),
            Action::SaveImage => f.write_str("Saving image"),
            Action::LoadOverlay(kind) => write!(f, "Loading {}", kind.label().to_lowercase()),
        }
    }
}

/// A blocking message box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Action the worker is running (None = idle).
    pub running: Option<Action>,

    pub flight_path: Option<LoadedOverlay>,
    pub coverage: Option<LoadedOverlay>,
    pub last_viewpoint: Option<Viewpoint>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub alert: Option<Alert>,
    pub show_about: bool,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    /// Shortcuts may start an action: the worker is idle and no alert
    /// covers the map.
    pub fn accepts_actions(&self) -> bool {
        !self.is_busy() && self.alert.is_none()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn overlay(&self, kind: OverlayKind) -> Option<&LoadedOverlay> {
        match kind {
            OverlayKind::FlightPath => self.flight_path.as_ref(),
            OverlayKind::Coverage => self.coverage.as_ref(),
        }
    }

    pub fn set_overlay(&mut self, overlay: LoadedOverlay) {
        match overlay.kind {
            OverlayKind::FlightPath => self.flight_path = Some(overlay),
            OverlayKind::Coverage => self.coverage = Some(overlay),
        }
    }
}
