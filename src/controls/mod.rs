use serde::Serialize;

use crate::paginator::NavAction;

pub const PREVIOUS_LABEL: &str = "Anterior";
pub const NEXT_LABEL: &str = "Siguiente";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Previous,
    Page(usize),
    Next,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavControl {
    pub kind: ControlKind,
    pub label: String,
    pub enabled: bool,
    pub active: bool,
}

impl NavControl {
    pub fn action(&self) -> NavAction {
        match self.kind {
            ControlKind::Previous => NavAction::Previous,
            ControlKind::Next => NavAction::Next,
            ControlKind::Page(k) => NavAction::Goto(k),
        }
    }

    /// The action to dispatch when the control is invoked; disabled controls do nothing.
    pub fn invoke(&self) -> Option<NavAction> {
        self.enabled.then(|| self.action())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavBar {
    pub controls: Vec<NavControl>,
}

impl NavBar {
    pub fn pages(&self) -> impl Iterator<Item = &NavControl> {
        self.controls
            .iter()
            .filter(|c| matches!(c.kind, ControlKind::Page(_)))
    }

    pub fn active_page(&self) -> Option<usize> {
        self.pages().find(|c| c.active).and_then(|c| match c.kind {
            ControlKind::Page(k) => Some(k),
            _ => None,
        })
    }

    pub fn find(&self, kind: ControlKind) -> Option<&NavControl> {
        self.controls.iter().find(|c| c.kind == kind)
    }
}

/// Builds previous, one button per page, then next.
pub fn rebuild(total_pages: usize, current_page: usize) -> NavBar {
    let mut controls = Vec::with_capacity(total_pages + 2);
    controls.push(NavControl {
        kind: ControlKind::Previous,
        label: PREVIOUS_LABEL.to_string(),
        enabled: current_page > 1,
        active: false,
    });
    for k in 1..=total_pages {
        controls.push(NavControl {
            kind: ControlKind::Page(k),
            label: k.to_string(),
            enabled: true,
            active: k == current_page,
        });
    }
    controls.push(NavControl {
        kind: ControlKind::Next,
        label: NEXT_LABEL.to_string(),
        enabled: current_page < total_pages,
        active: false,
    });
    NavBar { controls }
}
