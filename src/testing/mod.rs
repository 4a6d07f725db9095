use std::cell::Cell;
use std::rc::Rc;

use crate::element::{Element, ElementTree, NodeId};

/// A course catalog page with one control of every kind
pub struct CatalogPage {
    pub tree: ElementTree,
    /// `button.btn-primary` with an action label
    pub enroll: NodeId,
    /// plain `button`
    pub bookmark: NodeId,
    /// `div.card-interactive`
    pub card: NodeId,
    /// `span` inside the card
    pub card_title: NodeId,
    /// `button.guest-allowed`
    pub preview: NodeId,
    /// `a` link, unmarked
    pub link: NodeId,
    /// `p`, unmarked
    pub text: NodeId,
    /// Total handler invocations across the page
    pub hits: Rc<Cell<u32>>,
}

/// Build the catalog page; every control gets a handler counting into `hits`
pub fn catalog_page() -> CatalogPage {
    let mut tree = ElementTree::new(Element::new("div").with_class("catalog"));
    let root = tree.root();

    let enroll = tree.append(
        root,
        Element::new("button")
            .with_class("btn-primary")
            .with_action("enroll in this course"),
    );
    let bookmark = tree.append(root, Element::new("button"));
    let card = tree.append(root, Element::new("div").with_class("card-interactive"));
    let card_title = tree.append(card, Element::new("span"));
    let preview = tree.append(root, Element::new("button").with_class("guest-allowed"));
    let link = tree.append(root, Element::new("a").with_class("link"));
    let text = tree.append(root, Element::new("p"));

    let hits = Rc::new(Cell::new(0));
    for node in [enroll, bookmark, card, preview, link, text] {
        let counter = hits.clone();
        tree.on_click(node, move |_| counter.set(counter.get() + 1));
    }

    CatalogPage {
        tree,
        enroll,
        bookmark,
        card,
        card_title,
        preview,
        link,
        text,
        hits,
    }
}
