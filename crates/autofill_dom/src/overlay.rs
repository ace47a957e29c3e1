use crate::page::{NodeId, PageDom};
use crate::styles::{CHECK_CLASS, CROSS_CLASS, OVERLAY_ID, SPINNER_CLASS};

/// Handles to the active status overlay and the indicator sitting on it.
/// At most one exists per page; the session runtime owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayHandle {
    overlay: NodeId,
    indicator: NodeId,
}

impl OverlayHandle {
    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    pub fn indicator(&self) -> NodeId {
        self.indicator
    }
}

/// Appends the overlay with a spinning indicator to the document body.
pub fn show_loading(page: &mut PageDom) -> OverlayHandle {
    let overlay = page.create_element("div", &[("id", OVERLAY_ID)]);
    let indicator = page.create_element("div", &[("class", SPINNER_CLASS)]);
    page.append_child(overlay, indicator);
    page.append_to_body(overlay);
    OverlayHandle { overlay, indicator }
}

/// Swaps the current indicator for the checkmark.
pub fn indicate_success(page: &mut PageDom, handle: &mut OverlayHandle) {
    swap_indicator(page, handle, CHECK_CLASS);
}

/// Swaps the current indicator for the cross.
pub fn indicate_error(page: &mut PageDom, handle: &mut OverlayHandle) {
    swap_indicator(page, handle, CROSS_CLASS);
}

fn swap_indicator(page: &mut PageDom, handle: &mut OverlayHandle, class: &str) {
    // Exactly one indicator at a time: the old node comes down before
    // the replacement goes up.
    page.detach(handle.indicator);
    let indicator = page.create_element("div", &[("class", class)]);
    page.append_child(handle.overlay, indicator);
    handle.indicator = indicator;
}

/// Detaches the indicator and then the overlay, in that order, so the
/// overlay never briefly holds a dangling child.
pub fn remove_overlay(page: &mut PageDom, handle: OverlayHandle) {
    page.detach(handle.indicator);
    page.detach(handle.overlay);
}
