use ego_tree::iter::Edge;
use ego_tree::Tree;

/// Stable handle to a node in a [`PageDom`].
pub type NodeId = ego_tree::NodeId;

/// One node of the modeled page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageNode {
    /// The document root; never has a tag or attributes.
    Document,
    Element(ElementData),
    Text(String),
}

/// Tag name and attributes of an element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    name: String,
    attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn with_attrs(name: impl Into<String>, attrs: &[(&str, &str)]) -> Self {
        let mut element = Self::new(name);
        for (key, value) in attrs {
            element.set_attr(key, value);
        }
        element
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        let key_lower = key.to_ascii_lowercase();
        if let Some(entry) = self.attrs.iter_mut().find(|(k, _)| *k == key_lower) {
            entry.1 = value.to_string();
        } else {
            self.attrs.push((key_lower, value.to_string()));
        }
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Mutable snapshot of one page, owned by a single content-script session.
///
/// Form submission has no navigation side effect in the model; submitted
/// forms are recorded and observable via [`PageDom::submissions`].
#[derive(Debug)]
pub struct PageDom {
    tree: Tree<PageNode>,
    submissions: Vec<NodeId>,
}

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: [&str; 7] = ["area", "br", "hr", "img", "input", "link", "meta"];

impl PageDom {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(PageNode::Document),
            submissions: Vec::new(),
        }
    }

    /// Parses an HTML document into a page model.
    pub fn parse(html: &str) -> Self {
        Self {
            tree: crate::parse::parse_document(html),
            submissions: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Creates a detached element; attach it with [`PageDom::append_child`].
    pub fn create_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.tree
            .orphan(PageNode::Element(ElementData::with_attrs(name, attrs)))
            .id()
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(mut node) = self.tree.get_mut(parent) {
            node.append_id(child);
        }
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let child = self.tree.orphan(PageNode::Text(text.to_string())).id();
        self.append_child(parent, child);
    }

    /// Detaches a subtree from its parent. The nodes stay in the arena but
    /// are no longer reachable from the document root.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.tree.get(id)?.value() {
            PageNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::name)
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attr(key))
    }

    pub fn set_attr(&mut self, id: NodeId, key: &str, value: &str) {
        if let Some(mut node) = self.tree.get_mut(id) {
            if let PageNode::Element(element) = node.value() {
                element.set_attr(key, value);
            }
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.tree.get(id)?.value() {
            PageNode::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.children().map(|child| child.id()))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.parent().map(|node| node.id())
    }

    /// Depth-first pre-order walk of the subtree under `root`, excluding
    /// `root` itself. Backed by ego-tree's non-recursive traversal, so
    /// pathological nesting depth cannot overflow the call stack.
    pub fn descendants(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(root)
            .into_iter()
            .flat_map(|node| node.descendants().skip(1).map(|n| n.id()))
    }

    /// Ancestor chain from `id` upward, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.ancestors().map(|n| n.id()))
    }

    /// True while the node is still attached under the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.root();
        id == root || self.tree.get(id).is_some_and(|node| {
            node.ancestors().any(|ancestor| ancestor.id() == root)
        })
    }

    /// First element named `body`, in document order.
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|id| self.tag(*id) == Some("body"))
    }

    /// First element named `head`, in document order.
    pub fn head(&self) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|id| self.tag(*id) == Some("head"))
    }

    /// Appends a detached node to the document body, falling back to the
    /// root for body-less fragments.
    pub fn append_to_body(&mut self, id: NodeId) {
        let parent = self.body().unwrap_or_else(|| self.root());
        self.append_child(parent, id);
    }

    /// Records a form submission. Navigation is outside the model, so the
    /// tree itself is left untouched.
    pub fn submit(&mut self, form: NodeId) {
        self.submissions.push(form);
    }

    pub fn submissions(&self) -> &[NodeId] {
        &self.submissions
    }

    /// Serializes the attached tree back to HTML, mostly for logging and
    /// the demo binary.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for edge in self.tree.root().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    PageNode::Document => {}
                    PageNode::Element(element) => {
                        out.push('<');
                        out.push_str(element.name());
                        for (key, value) in element.attrs() {
                            out.push(' ');
                            out.push_str(key);
                            out.push_str("=\"");
                            out.push_str(&value.replace('"', "&quot;"));
                            out.push('"');
                        }
                        out.push('>');
                    }
                    PageNode::Text(text) => {
                        out.push_str(&text.replace('<', "&lt;"));
                    }
                },
                Edge::Close(node) => {
                    if let PageNode::Element(element) = node.value() {
                        if !VOID_ELEMENTS.contains(&element.name()) {
                            out.push_str("</");
                            out.push_str(element.name());
                            out.push('>');
                        }
                    }
                }
            }
        }
        out
    }
}

impl Default for PageDom {
    fn default() -> Self {
        Self::new()
    }
}
