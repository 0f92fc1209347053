// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topic presenter: one node's text, style, and decorations as a visual unit.

use alloc::format;
use alloc::string::{String, ToString};

use mindtree_model::{MindNode, NodeStyle};
use mindtree_surface::{ElementFlags, ElementKind, NODE_ID_ATTR, Presentation, Surface};
use smallvec::SmallVec;

/// Glyph shown for a hyperlink indicator.
pub const LINK_GLYPH: &str = "\u{1F517}";

/// The two elements other components need from a presented topic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TopicHandles<E> {
    /// The topic element.
    pub topic: E,
    /// Its base text element; the only part an edit patches.
    pub text: E,
}

/// A presented topic and its decoration elements.
#[derive(Clone, Debug)]
pub struct TopicVisual<E> {
    /// Topic and base text.
    pub handles: TopicHandles<E>,
    /// Hyperlink indicator.
    pub link: Option<E>,
    /// One element per icon, in document order.
    pub icons: SmallVec<[E; 4]>,
    /// One element per tag, in document order.
    pub tags: SmallVec<[E; 4]>,
}

/// Surface presentation for a node style.
///
/// Font sizes are in pixels; a style without a weight renders `normal`.
pub fn presentation_for(style: &NodeStyle) -> Presentation {
    Presentation {
        color: style.color.clone(),
        background: style.background.clone(),
        font_size: style.font_size.map(|px| format!("{px}px")),
        font_weight: Some(
            style
                .font_weight
                .clone()
                .unwrap_or_else(|| "normal".to_string()),
        ),
    }
}

/// The `data-nodeid` marker for a node id.
pub fn node_marker(id: &str) -> String {
    format!("me{id}")
}

/// Present a node's topic as a detached element.
///
/// The base text comes first, then the hyperlink indicator, icons, and tags, each only when
/// present. Reads nothing but `node`'s current fields, so presenting an unchanged node
/// again produces an identical element.
pub fn present_topic<S: Surface>(
    surface: &mut S,
    node: &MindNode,
    draggable: bool,
) -> TopicVisual<S::Element> {
    let topic = surface.create(ElementKind::Topic);
    surface.set_attr(topic, NODE_ID_ATTR, &node_marker(&node.id));
    if draggable {
        surface.set_flags(topic, ElementFlags::DRAGGABLE);
    }

    let text = surface.create(ElementKind::Text);
    surface.set_text(text, &node.topic);
    surface.append(topic, text);

    if let Some(style) = &node.style {
        surface.set_presentation(topic, &presentation_for(style));
    }

    let link = node.hyper_link.as_deref().map(|href| {
        let link = surface.create(ElementKind::Link);
        surface.add_class(link, "hyper-link");
        surface.set_attr(link, "target", "_blank");
        surface.set_attr(link, "href", href);
        surface.set_text(link, LINK_GLYPH);
        surface.append(topic, link);
        link
    });

    let mut icons = SmallVec::new();
    if !node.icons.is_empty() {
        let container = surface.create(ElementKind::Icons);
        surface.add_class(container, "icons");
        for glyph in &node.icons {
            let icon = surface.create(ElementKind::Icon);
            surface.set_text(icon, glyph);
            surface.append(container, icon);
            icons.push(icon);
        }
        surface.append(topic, container);
    }

    let mut tags = SmallVec::new();
    if !node.tags.is_empty() {
        let container = surface.create(ElementKind::Tags);
        surface.add_class(container, "tags");
        for label in &node.tags {
            let tag = surface.create(ElementKind::Tag);
            surface.set_text(tag, label);
            surface.append(container, tag);
            tags.push(tag);
        }
        surface.append(topic, container);
    }

    TopicVisual {
        handles: TopicHandles { topic, text },
        link,
        icons,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindtree_surface::MemorySurface;

    fn decorated() -> MindNode {
        MindNode::new("7", "Launch")
            .with_hyper_link("https://example.com/launch")
            .with_icons(["a", "b"])
            .with_tags(["urgent", "q3"])
            .with_style(NodeStyle {
                color: Some("#333".into()),
                background: None,
                font_size: Some(18.0),
                font_weight: None,
            })
    }

    #[test]
    fn plain_topic_has_only_text() {
        let mut s = MemorySurface::new();
        let v = present_topic(&mut s, &MindNode::new("1", "Plain"), true);
        assert_eq!(s.children_of(v.handles.topic), &[v.handles.text]);
        assert_eq!(s.text_content(v.handles.topic), "Plain");
        assert!(v.link.is_none() && v.icons.is_empty() && v.tags.is_empty());
        assert_eq!(s.attr(v.handles.topic, NODE_ID_ATTR), Some("me1"));
        assert_eq!(s.flags(v.handles.topic), Some(ElementFlags::DRAGGABLE));
    }

    #[test]
    fn decorations_follow_text_in_fixed_order() {
        let mut s = MemorySurface::new();
        let v = present_topic(&mut s, &decorated(), false);
        let kinds: alloc::vec::Vec<_> = s
            .children_of(v.handles.topic)
            .iter()
            .map(|&c| s.kind(c).unwrap())
            .collect();
        assert_eq!(
            kinds,
            [
                ElementKind::Text,
                ElementKind::Link,
                ElementKind::Icons,
                ElementKind::Tags
            ]
        );
        let icon_text: alloc::vec::Vec<_> =
            v.icons.iter().map(|&i| s.own_text(i).unwrap()).collect();
        assert_eq!(icon_text, ["a", "b"]);
        let tag_text: alloc::vec::Vec<_> = v.tags.iter().map(|&t| s.own_text(t).unwrap()).collect();
        assert_eq!(tag_text, ["urgent", "q3"]);
        assert_eq!(s.flags(v.handles.topic), Some(ElementFlags::empty()));
    }

    #[test]
    fn link_indicator_carries_target() {
        let mut s = MemorySurface::new();
        let v = present_topic(&mut s, &decorated(), true);
        let link = v.link.unwrap();
        assert!(s.has_class(link, "hyper-link"));
        assert_eq!(s.attr(link, "href"), Some("https://example.com/launch"));
        assert_eq!(s.attr(link, "target"), Some("_blank"));
        assert_eq!(s.own_text(link), Some(LINK_GLYPH));
    }

    #[test]
    fn style_is_presentation_only() {
        let mut s = MemorySurface::new();
        let v = present_topic(&mut s, &decorated(), true);
        let p = s.presentation(v.handles.topic).unwrap();
        assert_eq!(p.color.as_deref(), Some("#333"));
        assert_eq!(p.font_size.as_deref(), Some("18px"));
        assert_eq!(p.font_weight.as_deref(), Some("normal"));
        assert_eq!(s.own_text(v.handles.text), Some("Launch"));
    }

    #[test]
    fn presenting_twice_is_identical() {
        let mut s = MemorySurface::new();
        let node = decorated();
        let a = present_topic(&mut s, &node, true);
        let b = present_topic(&mut s, &node, true);
        assert_eq!(
            s.text_content(a.handles.topic),
            s.text_content(b.handles.topic)
        );
        assert_eq!(
            s.presentation(a.handles.topic),
            s.presentation(b.handles.topic)
        );
        assert_eq!(s.descendants(a.handles.topic).len(), s.descendants(b.handles.topic).len());
    }
}
