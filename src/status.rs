//! Status indicator mappings
//!
//! Pure presentation: connection state in, label text and CSS class out.
//! The DOM writes live with each client so these stay testable off-browser.

use crate::conn_state::ConnState;

/// What a status element should show for a given connection state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub label: &'static str,
    pub css_class: &'static str,
}

/// Binary mapping used by the link panel: open or not.
pub fn panel_status(state: &ConnState) -> StatusView {
    if state.is_open() {
        StatusView {
            label: "Connecté",
            css_class: "connected",
        }
    } else {
        StatusView {
            label: "Déconnecté",
            css_class: "disconnected",
        }
    }
}

/// Three-way mapping used by the viewer: online, offline, or error.
pub fn viewer_status(state: &ConnState) -> StatusView {
    match state {
        ConnState::Open => StatusView {
            label: "En ligne",
            css_class: "online",
        },
        ConnState::Connecting | ConnState::Closed => StatusView {
            label: "Hors ligne",
            css_class: "offline",
        },
        ConnState::Error(_) => StatusView {
            label: "Erreur",
            css_class: "error",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_open_is_connected() {
        let view = panel_status(&ConnState::Open);
        assert_eq!(view.label, "Connecté");
        assert_eq!(view.css_class, "connected");
    }

    #[test]
    fn panel_everything_else_is_disconnected() {
        for state in [
            ConnState::Connecting,
            ConnState::Closed,
            ConnState::Error("boom".into()),
        ] {
            let view = panel_status(&state);
            assert_eq!(view.label, "Déconnecté", "state {state:?}");
            assert_eq!(view.css_class, "disconnected", "state {state:?}");
        }
    }

    #[test]
    fn viewer_three_way_mapping() {
        assert_eq!(viewer_status(&ConnState::Open).css_class, "online");
        assert_eq!(viewer_status(&ConnState::Open).label, "En ligne");
        assert_eq!(viewer_status(&ConnState::Connecting).css_class, "offline");
        assert_eq!(viewer_status(&ConnState::Closed).css_class, "offline");
        assert_eq!(viewer_status(&ConnState::Closed).label, "Hors ligne");
        let err = ConnState::Error("transport".into());
        assert_eq!(viewer_status(&err).css_class, "error");
        assert_eq!(viewer_status(&err).label, "Erreur");
    }
}
