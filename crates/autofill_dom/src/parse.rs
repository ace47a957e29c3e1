use ego_tree::Tree;
use scraper::node::Node;
use scraper::Html;

use crate::page::{ElementData, PageNode};

/// Converts a parsed HTML document into the owned page tree.
///
/// Comments, doctypes, and processing instructions carry nothing the
/// autofill flow cares about and are dropped. The walk uses an explicit
/// work stack rather than call-stack recursion.
pub(crate) fn parse_document(html: &str) -> Tree<PageNode> {
    let document = Html::parse_document(html);
    let mut tree = Tree::new(PageNode::Document);
    let root = tree.root().id();

    let mut stack: Vec<(ego_tree::NodeRef<'_, Node>, ego_tree::NodeId)> = document
        .tree
        .root()
        .children()
        .rev()
        .map(|child| (child, root))
        .collect();

    while let Some((source, parent)) = stack.pop() {
        let converted = match source.value() {
            Node::Element(element) => {
                let mut data = ElementData::new(element.name());
                for (key, value) in element.attrs() {
                    data.set_attr(key, value);
                }
                Some(PageNode::Element(data))
            }
            Node::Text(text) => Some(PageNode::Text(text.to_string())),
            _ => None,
        };

        let Some(value) = converted else {
            continue;
        };
        let id = tree.orphan(value).id();
        if let Some(mut parent_node) = tree.get_mut(parent) {
            parent_node.append_id(id);
        }
        for child in source.children().rev() {
            stack.push((child, id));
        }
    }

    tree
}
