//! Autofill DOM: owned mutable page model and the form/trigger/overlay
//! primitives the content-script session drives.
mod locator;
mod overlay;
mod page;
mod parse;
mod styles;
mod trigger;

pub use locator::{
    find_password_field, find_username_field, locate_login_form, resolve_enclosing_form,
    FormContext,
};
pub use overlay::{indicate_error, indicate_success, remove_overlay, show_loading, OverlayHandle};
pub use page::{ElementData, NodeId, PageDom, PageNode};
pub use styles::{CHECK_CLASS, CROSS_CLASS, OVERLAY_ID, SPINNER_CLASS, STYLE_ID, TRIGGER_CLASS};
pub use trigger::{create_trigger, fill_credentials, inject_styles, submit_form};
