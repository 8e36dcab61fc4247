//! Small helpers over `markup5ever_rcdom` trees.

use std::io;
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, Attribute, LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

pub fn parse_html(html: &str) -> io::Result<RcDom> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut reader = io::Cursor::new(html.as_bytes());
    parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut reader)
}

/// Local tag name of an element node.
pub fn tag_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn attr(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn has_attr(handle: &Handle, name: &str) -> bool {
    attr(handle, name).is_some()
}

/// Set an attribute, replacing any existing value.
pub fn set_attr(handle: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &handle.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|a| &*a.name.local == name) {
            Some(existing) => existing.value = value.into(),
            None => attrs.push(Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                value: value.into(),
            }),
        }
    }
}

/// All nodes below `root` in document order, `root` excluded.
pub fn descendants(root: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        out.push(node);
    }
    out
}

pub fn find_first<F>(root: &Handle, mut pred: F) -> Option<Handle>
where
    F: FnMut(&Handle) -> bool,
{
    descendants(root).into_iter().find(|node| pred(node))
}

pub fn find_tag(root: &Handle, tag: &str) -> Option<Handle> {
    find_first(root, |node| tag_name(node) == Some(tag))
}

/// Remove `node` from its parent's children.
pub fn detach(node: &Handle) {
    if let Some(parent) = node.parent.take().and_then(|weak| weak.upgrade()) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
}

/// Move `child` to the end of `parent`'s children.
pub fn append(parent: &Handle, child: Handle) {
    detach(&child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Serialize the children of `node` (the whole document for the root).
pub fn to_html(node: &Handle) -> io::Result<String> {
    let mut out = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut out, &SerializableHandle::from(node.clone()), opts)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
