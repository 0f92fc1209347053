// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine: document tree to render tree.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use mindtree_model::{Direction, MindNode, validate};
use mindtree_surface::{ElementKind, Surface};

use crate::error::LayoutError;
use crate::expander::{ExpanderState, ExpanderVisual, render_expander};
use crate::topic::{TopicHandles, TopicVisual, present_topic};

/// How the root's children are distributed around the root.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SideMode {
    /// Every branch on the left.
    LeftOnly,
    /// Every branch on the right.
    RightOnly,
    /// Branches without an explicit side are spread greedily over both sides.
    #[default]
    Balanced,
}

/// Layout configuration, owned by the map view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Side assignment for the root's children.
    pub side_mode: SideMode,
    /// Whether non-root topics can be dragged. The root never can.
    pub draggable: bool,
    /// Deepest nesting below the root the engine will walk.
    pub max_depth: usize,
    /// Reject documents with duplicate ids before laying out.
    pub check_ids: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            side_mode: SideMode::Balanced,
            draggable: true,
            max_depth: 512,
            check_ids: true,
        }
    }
}

impl LayoutConfig {
    /// Set the side mode.
    pub fn with_side_mode(mut self, side_mode: SideMode) -> Self {
        self.side_mode = side_mode;
        self
    }

    /// Enable or disable dragging of non-root topics.
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Set the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable the duplicate-id check.
    pub fn with_check_ids(mut self, check_ids: bool) -> Self {
        self.check_ids = check_ids;
        self
    }
}

/// The render node of one non-root document node.
#[derive(Clone, Debug)]
pub struct RenderNode<E> {
    /// Id of the document node.
    pub id: String,
    /// Wrapper around the node and its subtree.
    pub group: E,
    /// Row holding the topic and expander.
    pub top: E,
    /// Presented topic.
    pub topic: TopicVisual<E>,
    /// Side class on the group; only set for the root's children.
    pub side: Option<Direction>,
    /// Present iff the node has children.
    pub expander: Option<ExpanderVisual<E>>,
    /// Present iff the node has children and is expanded.
    pub children: Option<RenderChildren<E>>,
}

impl<E> RenderNode<E> {
    /// State of the expander, `None` for leaves.
    pub fn expander_state(&self) -> Option<ExpanderState> {
        self.expander.as_ref().map(|e| e.state)
    }

    fn collect_ids(&self, out: &mut Vec<String>) {
        out.push(self.id.clone());
        if let Some(children) = &self.children {
            for c in &children.nodes {
                c.collect_ids(out);
            }
        }
    }
}

/// The child-group container of an expanded node.
#[derive(Clone, Debug)]
pub struct RenderChildren<E> {
    /// Container element.
    pub element: E,
    /// Render nodes of the children, in document order.
    pub nodes: Vec<RenderNode<E>>,
}

/// Result of a layout pass.
#[derive(Clone, Debug)]
pub struct RenderTree<E> {
    /// The root topic.
    pub root: TopicVisual<E>,
    /// Render nodes of the root's children, in document order.
    pub branches: Vec<RenderNode<E>>,
    index: HashMap<String, TopicHandles<E>>,
}

impl<E: Copy> RenderTree<E> {
    /// Topic handles of a rendered node, including the root.
    ///
    /// Returns `None` for nodes hidden under a collapsed ancestor.
    pub fn find(&self, id: &str) -> Option<TopicHandles<E>> {
        self.index.get(id).copied()
    }

    /// Render node of a rendered non-root node.
    pub fn node(&self, id: &str) -> Option<&RenderNode<E>> {
        fn search<'a, E>(nodes: &'a [RenderNode<E>], id: &str) -> Option<&'a RenderNode<E>> {
            nodes.iter().find_map(|n| {
                if n.id == id {
                    Some(n)
                } else {
                    n.children.as_ref().and_then(|c| search(&c.nodes, id))
                }
            })
        }
        search(&self.branches, id)
    }

    /// Every render node with its depth below the root, depth-first.
    pub fn walk(&self) -> Vec<(usize, &RenderNode<E>)> {
        fn visit<'a, E>(
            nodes: &'a [RenderNode<E>],
            depth: usize,
            out: &mut Vec<(usize, &'a RenderNode<E>)>,
        ) {
            for n in nodes {
                out.push((depth, n));
                if let Some(c) = &n.children {
                    visit(&c.nodes, depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        visit(&self.branches, 1, &mut out);
        out
    }

    /// Ids of every rendered non-root node, depth-first.
    pub fn visible_ids(&self) -> Vec<&str> {
        self.walk().into_iter().map(|(_, n)| n.id.as_str()).collect()
    }

    /// Side class of each of the root's children, in document order.
    pub fn sides(&self) -> Vec<(&str, Option<Direction>)> {
        self.branches
            .iter()
            .map(|n| (n.id.as_str(), n.side))
            .collect()
    }

    /// Number of rendered nodes, including the root.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always false: a render tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Assign a side to every child of the root that lacks one.
///
/// Children are visited in document order; each one without a direction goes to the side
/// with the lower running count, left on ties. Explicit directions are kept and only
/// counted. Returns the final `(left, right)` counts.
///
/// Counts start from zero on every call, so running this again on an unchanged list
/// changes nothing.
pub fn balance_sides(children: &mut [MindNode]) -> (usize, usize) {
    let mut left = 0_usize;
    let mut right = 0_usize;
    for child in children {
        match child.direction {
            Some(Direction::Left) => left += 1,
            Some(Direction::Right) => right += 1,
            None if left <= right => {
                child.direction = Some(Direction::Left);
                left += 1;
            }
            None => {
                child.direction = Some(Direction::Right);
                right += 1;
            }
        }
    }
    (left, right)
}

/// Lays a document out into a pair of host-owned containers.
///
/// The root topic goes into `root_container`; the branch groups of the root's children go
/// into `branch_container`. Both are emptied at the start of every [`LayoutEngine::layout`]
/// pass.
///
/// ## Example
///
/// ```rust
/// use mindtree_layout::{LayoutConfig, LayoutEngine};
/// use mindtree_model::{Direction, MindNode};
/// use mindtree_surface::{ElementKind, MemorySurface, Surface};
///
/// let mut surface = MemorySurface::new();
/// let root_box = surface.create(ElementKind::Container);
/// let branch_box = surface.create(ElementKind::Container);
/// let engine = LayoutEngine::new(LayoutConfig::default(), root_box, branch_box);
///
/// let mut doc = MindNode::new("root", "Root")
///     .with_child(MindNode::new("1", "x"))
///     .with_child(MindNode::new("2", "y"));
///
/// let tree = engine.layout(&mut doc, &mut surface).unwrap();
/// assert_eq!(
///     tree.sides(),
///     vec![("1", Some(Direction::Left)), ("2", Some(Direction::Right))]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct LayoutEngine<E> {
    config: LayoutConfig,
    root_container: E,
    branch_container: E,
}

impl<E: Copy + Eq + core::fmt::Debug> LayoutEngine<E> {
    /// Create an engine drawing into the given containers.
    pub fn new(config: LayoutConfig, root_container: E, branch_container: E) -> Self {
        Self {
            config,
            root_container,
            branch_container,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration; takes effect on the next pass.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Container holding the root topic.
    pub fn root_container(&self) -> E {
        self.root_container
    }

    /// Container holding the branch groups.
    pub fn branch_container(&self) -> E {
        self.branch_container
    }

    /// Run a full layout pass.
    ///
    /// Discards everything previously drawn into the containers and rebuilds from `doc`.
    /// In [`SideMode::Balanced`] the root's children without a direction get one written
    /// back (see [`balance_sides`]); no other document field is touched.
    ///
    /// The document is checked before anything is drawn, so on error both containers are
    /// left empty and no element is created.
    pub fn layout<S>(
        &self,
        doc: &mut MindNode,
        surface: &mut S,
    ) -> Result<RenderTree<E>, LayoutError>
    where
        S: Surface<Element = E>,
    {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("layout", root = %doc.id, mode = ?self.config.side_mode)
                .entered();

        surface.clear_children(self.root_container);
        surface.clear_children(self.branch_container);

        if let Err(err) = self.check(doc, &doc.children, 1) {
            #[cfg(feature = "tracing")]
            tracing::warn!(err = %err, "layout rejected document");
            return Err(err);
        }
        Ok(self.draw(doc, surface))
    }

    /// Rebuild the render node of `id` in place, leaving the rest of `tree` untouched.
    ///
    /// This is the cheap path after an expand/collapse toggle: a toggle never changes the
    /// structure outside the toggled branch. The node's group element and side class are
    /// kept; its contents are rebuilt from `doc`.
    ///
    /// Returns `Ok(false)` without drawing anything when `id` is the root or is not
    /// currently rendered. The branch is checked before it is redrawn; on error neither
    /// `tree` nor the surface has changed.
    pub fn refresh_branch<S>(
        &self,
        tree: &mut RenderTree<E>,
        doc: &MindNode,
        id: &str,
        surface: &mut S,
    ) -> Result<bool, LayoutError>
    where
        S: Surface<Element = E>,
    {
        let Some(node) = doc.find(id) else {
            return Ok(false);
        };
        let Some((render, depth)) = locate(&mut tree.branches, id, 1) else {
            return Ok(false);
        };

        if let Err(err) = self.check(doc, core::slice::from_ref(node), depth) {
            #[cfg(feature = "tracing")]
            tracing::warn!(id, err = %err, "branch refresh rejected");
            return Err(err);
        }

        let mut stale = Vec::new();
        render.collect_ids(&mut stale);
        for stale_id in &stale {
            tree.index.remove(stale_id.as_str());
        }

        let group = render.group;
        let side = render.side;
        surface.clear_children(group);
        *render = self.fill_group(surface, group, side, node, depth, &mut tree.index);

        #[cfg(feature = "tracing")]
        tracing::debug!(id, depth, "branch refreshed");
        Ok(true)
    }

    /// Reject a document before anything is drawn for it.
    ///
    /// With `check_ids` the whole document goes through [`validate`]. The depth limit is
    /// then applied to the nodes about to be rendered: `nodes` at `depth` and every
    /// descendant below an expanded node.
    fn check(
        &self,
        doc: &MindNode,
        nodes: &[MindNode],
        depth: usize,
    ) -> Result<(), LayoutError> {
        if self.config.check_ids {
            validate(doc, self.config.max_depth)?;
        }
        let mut stack: Vec<(&MindNode, usize)> = nodes.iter().rev().map(|n| (n, depth)).collect();
        while let Some((node, depth)) = stack.pop() {
            if depth > self.config.max_depth {
                return Err(LayoutError::TooDeep {
                    id: node.id.clone(),
                    depth,
                });
            }
            if node.is_expanded() {
                stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
            }
        }
        Ok(())
    }

    fn draw<S>(&self, doc: &mut MindNode, surface: &mut S) -> RenderTree<E>
    where
        S: Surface<Element = E>,
    {
        let mut index = HashMap::new();
        let root = present_topic(surface, doc, false);
        surface.append(self.root_container, root.handles.topic);
        index.insert(doc.id.clone(), root.handles);

        let mut branches = Vec::with_capacity(doc.children.len());
        if doc.children.is_empty() {
            return RenderTree {
                root,
                branches,
                index,
            };
        }

        if self.config.side_mode == SideMode::Balanced {
            balance_sides(&mut doc.children);
        }

        for child in &doc.children {
            let side = match self.config.side_mode {
                SideMode::LeftOnly => Some(Direction::Left),
                SideMode::RightOnly => Some(Direction::Right),
                SideMode::Balanced => child.direction,
            };
            let render = self.build_group(surface, child, side, 1, &mut index);
            surface.append(self.branch_container, render.group);
            branches.push(render);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(rendered = index.len(), "layout complete");

        RenderTree {
            root,
            branches,
            index,
        }
    }

    fn build_group<S>(
        &self,
        surface: &mut S,
        node: &MindNode,
        side: Option<Direction>,
        depth: usize,
        index: &mut HashMap<String, TopicHandles<E>>,
    ) -> RenderNode<E>
    where
        S: Surface<Element = E>,
    {
        let group = surface.create(ElementKind::Group);
        if let Some(side) = side {
            surface.add_class(group, side.class_name());
        }
        self.fill_group(surface, group, side, node, depth, index)
    }

    /// Draw `node` into an existing, empty group element.
    ///
    /// Callers run [`LayoutEngine::check`] first; nothing here can fail.
    fn fill_group<S>(
        &self,
        surface: &mut S,
        group: E,
        side: Option<Direction>,
        node: &MindNode,
        depth: usize,
        index: &mut HashMap<String, TopicHandles<E>>,
    ) -> RenderNode<E>
    where
        S: Surface<Element = E>,
    {
        let top = surface.create(ElementKind::Top);
        let topic = present_topic(surface, node, self.config.draggable);
        surface.append(top, topic.handles.topic);
        surface.append(group, top);
        index.insert(node.id.clone(), topic.handles);

        let mut expander = None;
        let mut children = None;
        if !node.is_leaf() {
            let visual = render_expander(surface, node.expanded);
            surface.append(top, visual.element);
            if visual.state.is_expanded() {
                let element = surface.create(ElementKind::Children);
                surface.append(group, element);
                let mut nodes = Vec::with_capacity(node.children.len());
                for child in &node.children {
                    // Below the root's children the side is inherited visually, never set.
                    let render = self.build_group(surface, child, None, depth + 1, index);
                    surface.append(element, render.group);
                    nodes.push(render);
                }
                children = Some(RenderChildren { element, nodes });
            }
            expander = Some(visual);
        }

        RenderNode {
            id: node.id.clone(),
            group,
            top,
            topic,
            side,
            expander,
            children,
        }
    }
}

fn locate<'a, E>(
    nodes: &'a mut [RenderNode<E>],
    id: &str,
    depth: usize,
) -> Option<(&'a mut RenderNode<E>, usize)> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some((node, depth));
        }
        if let Some(children) = node.children.as_mut()
            && let Some(found) = locate(&mut children.nodes, id, depth + 1)
        {
            return Some(found);
        }
    }
    None
}
