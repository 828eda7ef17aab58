//! Mock DOM
//!
//! Models the calculator page without a browser: element tree, id lookup and
//! an event log.

use std::collections::{BTreeMap, HashMap};

use crate::keypad::Keypad;

/// Expression line element id
pub const EXPRESSION_ID: &str = "calc-expression";
/// Main display element id
pub const DISPLAY_ID: &str = "calc-display";
/// Busy indicator element id
pub const BUSY_ID: &str = "calc-busy";

/// One node of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element id, empty for anonymous nodes
    pub id: String,
    /// Tag name
    pub tag: String,
    /// Text shown by the node
    pub text: String,
    /// Attributes, ordered by name
    pub attrs: BTreeMap<String, String>,
    /// Class list in insertion order
    pub classes: Vec<String>,
    /// Hidden nodes have `visible == false`
    pub visible: bool,
    /// Child nodes
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// A visible, empty node
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_owned(),
            text: String::new(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Sets the id
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        id.clone_into(&mut self.id);
        self
    }

    /// Sets the text
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.toggle_class(class, true);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Appends a child
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Replaces the text
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    /// Adds the class when `on`, removes it otherwise
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        match (on, self.has_class(class)) {
            (true, false) => self.classes.push(class.to_owned()),
            (false, true) => self.classes.retain(|c| c != class),
            _ => {}
        }
    }

    /// Whether the class is present
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Sets or removes a boolean attribute such as `disabled`
    pub fn set_flag(&mut self, name: &str, on: bool) {
        if on {
            self.attrs.insert(name.to_owned(), String::new());
        } else {
            self.attrs.remove(name);
        }
    }

    /// An attribute value
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// DOM events the calculator page reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// A click on an element
    Click {
        /// Target element id
        element_id: String,
    },
    /// Key down on the document
    KeyDown {
        /// The `KeyboardEvent.key` value
        key: String,
    },
}

impl DomEvent {
    /// A click on `element_id`
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_owned(),
        }
    }

    /// A key down for `key`
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_owned(),
        }
    }
}

/// The calculator page, minus the browser
///
/// One element tree; ids resolve to child-index paths into it, so updates
/// made through [`element_mut`](Self::element_mut) show up in
/// [`root`](Self::root).
#[derive(Debug)]
pub struct MockDom {
    root: DomElement,
    paths: HashMap<String, Vec<usize>>,
    events: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// An empty page
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(DomElement::new("div").with_id("root"))
    }

    /// A page with the given tree
    #[must_use]
    pub fn with_root(root: DomElement) -> Self {
        let mut paths = HashMap::new();
        index_ids(&mut paths, &root, &mut Vec::new());
        Self {
            root,
            paths,
            events: Vec::new(),
        }
    }

    /// The calculator page: expression line, display, busy indicator and
    /// keypad, in that order
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut busy = DomElement::new("div")
            .with_id(BUSY_ID)
            .with_class("busy-indicator");
        busy.visible = false;

        let page = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator-app")
            .with_child(
                DomElement::new("div")
                    .with_id(EXPRESSION_ID)
                    .with_class("expression-line"),
            )
            .with_child(
                DomElement::new("div")
                    .with_id(DISPLAY_ID)
                    .with_class("display")
                    .with_text("0"),
            )
            .with_child(busy)
            .with_child(keypad.create_keypad_element());
        Self::with_root(page)
    }

    /// The whole page tree
    #[must_use]
    pub const fn root(&self) -> &DomElement {
        &self.root
    }

    /// Appends an element (and its children) under the root
    pub fn append(&mut self, element: DomElement) {
        let mut path = vec![self.root.children.len()];
        index_ids(&mut self.paths, &element, &mut path);
        self.root.children.push(element);
    }

    /// Looks up an element by id
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&DomElement> {
        self.paths
            .get(id)?
            .iter()
            .try_fold(&self.root, |node, &i| node.children.get(i))
    }

    /// Looks up an element by id for mutation
    pub fn element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        let path = self.paths.get(id)?;
        let mut node = &mut self.root;
        for &i in path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Appends to the event log
    pub fn record(&mut self, event: DomEvent) {
        self.events.push(event);
    }

    /// Every event recorded so far
    #[must_use]
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Empties the event log
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Sets an element's text; unknown ids are ignored
    pub fn set_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.element_mut(id) {
            element.set_text(text);
        }
    }

    /// An element's text by id
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }
}

// Later duplicates of an id win, as with `getElementById` on a rebuilt page
fn index_ids(paths: &mut HashMap<String, Vec<usize>>, element: &DomElement, path: &mut Vec<usize>) {
    if !element.id.is_empty() {
        paths.insert(element.id.clone(), path.clone());
    }
    for (i, child) in element.children.iter().enumerate() {
        path.push(i);
        index_ids(paths, child, path);
        path.pop();
    }
}
