use log::debug;

use crate::locator::FormContext;
use crate::page::{NodeId, PageDom};
use crate::styles::{STYLESHEET, STYLE_ID, TRIGGER_CLASS};

/// Inserts the stylesheet for the trigger and the status indicator.
/// Idempotent: a second call on the same page returns the existing node.
pub fn inject_styles(page: &mut PageDom) -> NodeId {
    if let Some(existing) = page
        .descendants(page.root())
        .find(|id| page.attr(*id, "id") == Some(STYLE_ID))
    {
        return existing;
    }

    let style = page.create_element("style", &[("id", STYLE_ID)]);
    page.append_text(style, STYLESHEET);
    let parent = page.head().or_else(|| page.body());
    match parent {
        Some(parent) => page.append_child(parent, style),
        None => {
            let root = page.root();
            page.append_child(root, style);
        }
    }
    style
}

/// Appends the labeled trigger button as the last child of the located
/// form. Repeated discovery must not duplicate it, so an existing trigger
/// inside the form is returned as-is.
pub fn create_trigger(page: &mut PageDom, ctx: &FormContext) -> NodeId {
    if let Some(existing) = page
        .descendants(ctx.form)
        .find(|id| page.attr(*id, "class") == Some(TRIGGER_CLASS))
    {
        debug!("trigger already present; skipping injection");
        return existing;
    }

    let button = page.create_element(
        "button",
        &[("type", "button"), ("class", TRIGGER_CLASS)],
    );
    page.append_text(button, "Fill login");
    page.append_child(ctx.form, button);
    button
}

/// Writes the credential pair into the located fields. The username write
/// is skipped on password-only forms.
pub fn fill_credentials(page: &mut PageDom, ctx: &FormContext, username: &str, password: &str) {
    if let Some(field) = ctx.username {
        page.set_attr(field, "value", username);
    }
    page.set_attr(ctx.password, "value", password);
}

/// Submits the located form.
pub fn submit_form(page: &mut PageDom, ctx: &FormContext) {
    page.submit(ctx.form);
}
