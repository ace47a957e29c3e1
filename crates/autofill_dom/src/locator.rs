use crate::page::{NodeId, PageDom};

/// The located login form for one page session: discovered once, reused
/// for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormContext {
    pub form: NodeId,
    /// Absent on password-only forms; autofill degrades gracefully.
    pub username: Option<NodeId>,
    pub password: NodeId,
}

/// Input types accepted as a username field.
const USERNAME_TYPES: [&str; 2] = ["email", "text"];

/// The effective `type` of an input element; inputs without the attribute
/// behave as text inputs, matching the DOM property default.
fn input_type<'a>(page: &'a PageDom, id: NodeId) -> Option<&'a str> {
    let element = page.element(id)?;
    if element.name() != "input" {
        return None;
    }
    Some(element.attr("type").unwrap_or("text"))
}

/// First password input on the page, in document order, if any.
pub fn find_password_field(page: &PageDom) -> Option<NodeId> {
    page.descendants(page.root())
        .find(|id| input_type(page, *id) == Some("password"))
}

/// First email/text input in depth-first pre-order under `root`, if any.
/// Each child's full subtree is visited before its next sibling.
pub fn find_username_field(page: &PageDom, root: NodeId) -> Option<NodeId> {
    page.descendants(root)
        .find(|id| input_type(page, *id).is_some_and(|ty| USERNAME_TYPES.contains(&ty)))
}

/// Nearest `form` ancestor of `element`, or `None` once the document root
/// is reached without finding one.
pub fn resolve_enclosing_form(page: &PageDom, element: NodeId) -> Option<NodeId> {
    page.ancestors(element)
        .find(|id| page.tag(*id) == Some("form"))
}

/// Composes the three queries into a form context. "Not found" is a
/// normal outcome here, not an error; only a missing username degrades
/// instead of aborting.
pub fn locate_login_form(page: &PageDom) -> Option<FormContext> {
    let password = find_password_field(page)?;
    let form = resolve_enclosing_form(page, password)?;
    let username = find_username_field(page, form);
    Some(FormContext {
        form,
        username,
        password,
    })
}
