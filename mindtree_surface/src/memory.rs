// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained in-memory surface: structure, attributes, focus and selection.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Size;
use smallvec::SmallVec;

use crate::surface::Surface;
use crate::types::{ElementFlags, ElementId, ElementKind, EventMask, NODE_ID_ATTR, Presentation};

/// A [`Surface`] that keeps every element in a generational arena.
///
/// Handles stay valid until the element (or an ancestor) is removed; after that they
/// are stale and every method ignores them. Slots are reused, but a reused slot carries
/// a new generation, so a stale handle never aliases a new element.
///
/// Elements report the size set through [`MemorySurface::set_size`] (zero by default),
/// widened by any minimum width. Topic elements are indexed by their
/// [`NODE_ID_ATTR`] value for [`MemorySurface::find_by_node_id`].
///
/// ## Example
///
/// ```rust
/// use kurbo::Size;
/// use mindtree_surface::{ElementKind, MemorySurface, NODE_ID_ATTR, Surface};
///
/// let mut surface = MemorySurface::new();
/// let topic = surface.create(ElementKind::Topic);
/// surface.set_attr(topic, NODE_ID_ATTR, "me42");
/// surface.set_size(topic, Size::new(120.0, 24.0));
///
/// assert_eq!(surface.find_by_node_id("me42"), Some(topic));
/// assert_eq!(surface.width(topic), 120.0);
/// ```
pub struct MemorySurface {
    /// slots
    elements: Vec<Option<Element>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    node_index: HashMap<String, ElementId>,
    focused: Option<ElementId>,
    selected: Option<ElementId>,
}

impl core::fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemorySurface")
            .field("elements_total", &self.elements.len())
            .field("elements_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .field("focused", &self.focused)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: String,
    classes: SmallVec<[String; 2]>,
    attrs: SmallVec<[(String, String); 2]>,
    presentation: Presentation,
    flags: ElementFlags,
    size: Size,
    min_width: Option<f64>,
    anchor_right: bool,
    listeners: EventMask,
}

impl Element {
    fn new(generation: u32, kind: ElementKind) -> Self {
        Self {
            generation,
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            classes: SmallVec::new(),
            attrs: SmallVec::new(),
            presentation: Presentation::default(),
            flags: ElementFlags::empty(),
            size: Size::ZERO,
            min_width: None,
            anchor_right: false,
            listeners: EventMask::empty(),
        }
    }
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            node_index: HashMap::new(),
            focused: None,
            selected: None,
        }
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements
            .get(id.idx())
            .and_then(|e| e.as_ref())
            .map(|e| e.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.iter().filter(|e| e.is_some()).count()
    }

    /// Returns true if no element is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of a live element.
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.element(id).map(|e| e.kind)
    }

    /// Parent of a live element, or `None` for detached elements and stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|e| e.parent)
    }

    /// Children of a live element, or an empty slice for stale ids.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// The element's own text, excluding descendants.
    pub fn own_text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }

    /// Class names in insertion order.
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.element(id).map(|e| e.classes.as_slice()).unwrap_or(&[])
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Value of a named attribute.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Boolean attributes of a live element.
    pub fn flags(&self, id: ElementId) -> Option<ElementFlags> {
        self.element(id).map(|e| e.flags)
    }

    /// Presentation attributes of a live element.
    pub fn presentation(&self, id: ElementId) -> Option<&Presentation> {
        self.element(id).map(|e| &e.presentation)
    }

    /// Minimum width set through [`Surface::set_min_width`].
    pub fn min_width(&self, id: ElementId) -> Option<f64> {
        self.element(id).and_then(|e| e.min_width)
    }

    /// Returns true if the element was pinned with [`Surface::set_anchor_right`].
    pub fn is_anchored_right(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|e| e.anchor_right)
    }

    /// Events currently forwarded for the element.
    pub fn listeners(&self, id: ElementId) -> EventMask {
        self.element(id).map(|e| e.listeners).unwrap_or_default()
    }

    /// Element holding input focus, if any.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Element whose text is fully selected, if any.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Record the measured size of an element.
    pub fn set_size(&mut self, id: ElementId, size: Size) {
        if let Some(e) = self.element_mut(id) {
            e.size = size;
        }
    }

    /// Measured size of a live element.
    pub fn size(&self, id: ElementId) -> Option<Size> {
        self.element(id).map(|e| e.size)
    }

    /// Look up a live element by its [`NODE_ID_ATTR`] value.
    pub fn find_by_node_id(&self, marker: &str) -> Option<ElementId> {
        self.node_index
            .get(marker)
            .copied()
            .filter(|&id| self.is_alive(id))
    }

    /// Get the next element in depth-first order, or `None` at the end of the tree.
    pub fn next_depth_first(&self, current: ElementId) -> Option<ElementId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first) = self.children_of(current).first() {
            return Some(first);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next) = self.next_sibling(node) {
                return Some(next);
            }
            node = parent;
        }
        None
    }

    /// All elements below `root` (exclusive) in depth-first order.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children_of(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children_of(id).iter().rev().copied());
        }
        out
    }

    /// Descendants of `root` (exclusive) of the given kind, in depth-first order.
    pub fn descendants_of_kind(&self, root: ElementId, kind: ElementKind) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.kind(id) == Some(kind))
            .collect()
    }

    // --- internals ---

    fn element(&self, id: ElementId) -> Option<&Element> {
        let e = self.elements.get(id.idx())?.as_ref()?;
        (e.generation == id.1).then_some(e)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let e = self.elements.get_mut(id.idx())?.as_mut()?;
        if e.generation != id.1 {
            return None;
        }
        Some(e)
    }

    /// Access an element; panics if `id` is stale.
    fn node(&self, id: ElementId) -> &Element {
        self.elements[id.idx()].as_ref().expect("dangling ElementId")
    }

    /// Access an element mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()]
            .as_mut()
            .expect("dangling ElementId")
    }

    fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.parent_of(id)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent_of(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        if self.is_alive(parent) {
            self.node_mut(parent).children.retain(|&c| c != id);
        }
        self.node_mut(id).parent = None;
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        let e = self.node(id);
        out.push_str(&e.text);
        for &c in &e.children {
            if self.is_alive(c) {
                self.collect_text(c, out);
            }
        }
    }
}

impl Surface for MemorySurface {
    type Element = ElementId;

    fn create(&mut self, kind: ElementKind) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, kind));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, kind)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        ElementId::new(idx, generation)
    }

    fn append(&mut self, parent: ElementId, child: ElementId) {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return;
        }
        // Appending an ancestor under its own descendant would detach the subtree from
        // every root; refuse like a DOM would.
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            // Children are already detached from `id`; clear the back link first.
            if self.is_alive(child) {
                self.node_mut(child).parent = None;
                self.remove(child);
            }
        }
        let marker = self
            .node(id)
            .attrs
            .iter()
            .find(|(n, _)| n == NODE_ID_ATTR)
            .map(|(_, v)| v.clone());
        if let Some(marker) = marker
            && self.node_index.get(&marker) == Some(&id)
        {
            self.node_index.remove(&marker);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn clear_children(&mut self, id: ElementId) {
        let children: Vec<ElementId> = self.children_of(id).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(e) = self.element_mut(id) {
            e.text.clear();
            e.text.push_str(text);
        }
    }

    fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        if self.is_alive(id) {
            self.collect_text(id, &mut out);
        }
        out
    }

    fn set_presentation(&mut self, id: ElementId, presentation: &Presentation) {
        let Some(e) = self.element_mut(id) else {
            return;
        };
        let current = &mut e.presentation;
        if presentation.color.is_some() {
            current.color.clone_from(&presentation.color);
        }
        if presentation.background.is_some() {
            current.background.clone_from(&presentation.background);
        }
        if presentation.font_size.is_some() {
            current.font_size.clone_from(&presentation.font_size);
        }
        if presentation.font_weight.is_some() {
            current.font_weight.clone_from(&presentation.font_weight);
        }
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(e) = self.element_mut(id)
            && !e.classes.iter().any(|c| c == class)
        {
            e.classes.push(class.into());
        }
    }

    fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        let Some(e) = self.element_mut(id) else {
            return;
        };
        match e.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => e.attrs.push((name.into(), value.into())),
        }
        if name == NODE_ID_ATTR {
            self.node_index.insert(value.into(), id);
        }
    }

    fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(e) = self.element_mut(id) {
            e.flags = flags;
        }
    }

    fn width(&self, id: ElementId) -> f64 {
        self.element(id)
            .map(|e| e.size.width.max(e.min_width.unwrap_or(0.0)))
            .unwrap_or(0.0)
    }

    fn set_min_width(&mut self, id: ElementId, width: f64) {
        if let Some(e) = self.element_mut(id) {
            e.min_width = Some(width);
        }
    }

    fn set_anchor_right(&mut self, id: ElementId) {
        if let Some(e) = self.element_mut(id) {
            e.anchor_right = true;
        }
    }

    fn focus(&mut self, id: ElementId) {
        if self.is_alive(id) {
            self.focused = Some(id);
        }
    }

    fn blur(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    fn select_all(&mut self, id: ElementId) {
        if self.is_alive(id) {
            self.selected = Some(id);
        }
    }

    fn listen(&mut self, id: ElementId, events: EventMask) {
        if let Some(e) = self.element_mut(id) {
            e.listeners |= events;
        }
    }

    fn unlisten(&mut self, id: ElementId, events: EventMask) {
        if let Some(e) = self.element_mut(id) {
            e.listeners.remove(events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn topic_with_text(s: &mut MemorySurface, text: &str) -> (ElementId, ElementId) {
        let topic = s.create(ElementKind::Topic);
        let t = s.create(ElementKind::Text);
        s.append(topic, t);
        s.set_text(t, text);
        (topic, t)
    }

    #[test]
    fn append_moves_between_parents() {
        let mut s = MemorySurface::new();
        let a = s.create(ElementKind::Group);
        let b = s.create(ElementKind::Group);
        let c = s.create(ElementKind::Topic);
        s.append(a, c);
        s.append(b, c);
        assert!(s.children_of(a).is_empty());
        assert_eq!(s.children_of(b), &[c]);
        assert_eq!(s.parent_of(c), Some(b));
    }

    #[test]
    fn append_refuses_cycles() {
        let mut s = MemorySurface::new();
        let a = s.create(ElementKind::Group);
        let b = s.create(ElementKind::Group);
        s.append(a, b);
        s.append(b, a);
        s.append(a, a);
        assert_eq!(s.parent_of(a), None);
        assert_eq!(s.children_of(a), &[b]);
    }

    #[test]
    fn remove_frees_subtree_and_invalidates_handles() {
        let mut s = MemorySurface::new();
        let root = s.create(ElementKind::Container);
        let (topic, text) = topic_with_text(&mut s, "x");
        s.append(root, topic);
        s.remove(topic);
        assert!(!s.is_alive(topic));
        assert!(!s.is_alive(text));
        assert!(s.children_of(root).is_empty());
        assert_eq!(s.len(), 1);

        // Reused slots carry a new generation.
        let fresh = s.create(ElementKind::Topic);
        assert!(s.is_alive(fresh));
        assert!(!s.is_alive(topic));
        s.set_text(topic, "stale");
        assert_eq!(s.own_text(fresh), Some(""));
    }

    #[test]
    fn clear_children_keeps_parent() {
        let mut s = MemorySurface::new();
        let root = s.create(ElementKind::Container);
        for _ in 0..3 {
            let g = s.create(ElementKind::Group);
            s.append(root, g);
        }
        s.clear_children(root);
        assert!(s.is_alive(root));
        assert!(s.children_of(root).is_empty());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn text_content_concatenates_in_tree_order() {
        let mut s = MemorySurface::new();
        let (topic, _) = topic_with_text(&mut s, "Topic");
        let icons = s.create(ElementKind::Icons);
        s.append(topic, icons);
        for glyph in ["a", "b"] {
            let i = s.create(ElementKind::Icon);
            s.set_text(i, glyph);
            s.append(icons, i);
        }
        assert_eq!(s.text_content(topic), "Topicab");
    }

    #[test]
    fn node_index_tracks_live_topics_only() {
        let mut s = MemorySurface::new();
        let (topic, _) = topic_with_text(&mut s, "x");
        s.set_attr(topic, NODE_ID_ATTR, "me1");
        assert_eq!(s.find_by_node_id("me1"), Some(topic));
        s.remove(topic);
        assert_eq!(s.find_by_node_id("me1"), None);
    }

    #[test]
    fn presentation_merges_present_fields() {
        let mut s = MemorySurface::new();
        let t = s.create(ElementKind::Topic);
        s.set_presentation(
            t,
            &Presentation {
                color: Some("red".into()),
                ..Presentation::default()
            },
        );
        s.set_presentation(
            t,
            &Presentation {
                font_weight: Some("bold".into()),
                ..Presentation::default()
            },
        );
        let p = s.presentation(t).unwrap();
        assert_eq!(p.color.as_deref(), Some("red"));
        assert_eq!(p.font_weight.as_deref(), Some("bold"));
        assert_eq!(p.background, None);
    }

    #[test]
    fn focus_and_selection_clear_on_remove() {
        let mut s = MemorySurface::new();
        let e = s.create(ElementKind::Editor);
        s.focus(e);
        s.select_all(e);
        assert_eq!(s.focused(), Some(e));
        assert_eq!(s.selected(), Some(e));
        s.remove(e);
        assert_eq!(s.focused(), None);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn blur_only_affects_the_focused_element() {
        let mut s = MemorySurface::new();
        let a = s.create(ElementKind::Editor);
        let b = s.create(ElementKind::Container);
        s.focus(a);
        s.blur(b);
        assert_eq!(s.focused(), Some(a));
        s.blur(a);
        assert_eq!(s.focused(), None);
    }

    #[test]
    fn listeners_accumulate_and_clear() {
        let mut s = MemorySurface::new();
        let e = s.create(ElementKind::Editor);
        s.listen(e, EventMask::KEY_DOWN);
        s.listen(e, EventMask::BLUR);
        assert_eq!(s.listeners(e), EventMask::KEY_DOWN | EventMask::BLUR);
        s.unlisten(e, EventMask::KEY_DOWN);
        assert_eq!(s.listeners(e), EventMask::BLUR);
    }

    #[test]
    fn width_honors_min_width() {
        let mut s = MemorySurface::new();
        let e = s.create(ElementKind::Editor);
        s.set_size(e, Size::new(40.0, 10.0));
        assert_eq!(s.width(e), 40.0);
        s.set_min_width(e, 90.0);
        assert_eq!(s.width(e), 90.0);
    }

    #[test]
    fn depth_first_traversal_visits_every_element() {
        let mut s = MemorySurface::new();
        let root = s.create(ElementKind::Container);
        let a = s.create(ElementKind::Group);
        let a1 = s.create(ElementKind::Topic);
        let b = s.create(ElementKind::Group);
        s.append(root, a);
        s.append(a, a1);
        s.append(root, b);

        assert_eq!(s.descendants(root), vec![a, a1, b]);
        assert_eq!(s.next_depth_first(root), Some(a));
        assert_eq!(s.next_depth_first(a1), Some(b));
        assert_eq!(s.next_depth_first(b), None);
        assert_eq!(s.descendants_of_kind(root, ElementKind::Group), vec![a, b]);
    }
}
