// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;

use mindtree_edit::{
    CommitOutcome, EditConfig, EditController, EditError, EditInput, EditTransition, EditorAnchor,
    EventBus,
};
use mindtree_layout::{LayoutConfig, LayoutEngine, RenderTree, SideMode};
use mindtree_model::MindNode;
use mindtree_surface::{ElementKind, Surface};

use crate::error::ViewError;

/// Configuration for a [`MindMap`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MapConfig {
    /// Layout settings.
    pub layout: LayoutConfig,
    /// Edit settings. The anchor is forced to the right edge when every branch is laid out
    /// on the left.
    pub edit: EditConfig,
}

impl MapConfig {
    /// Set the layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the edit configuration.
    pub fn with_edit(mut self, edit: EditConfig) -> Self {
        self.edit = edit;
        self
    }

    /// Shorthand for the layout side mode.
    pub fn with_side_mode(mut self, side_mode: SideMode) -> Self {
        self.layout.side_mode = side_mode;
        self
    }

    fn effective_edit(&self) -> EditConfig {
        if self.layout.side_mode == SideMode::LeftOnly {
            self.edit.with_anchor(EditorAnchor::Right)
        } else {
            self.edit
        }
    }
}

/// A document bound to a surface and an event bus.
///
/// The map owns everything a layout pass or an edit needs and hands it to the layout
/// engine and the edit controller explicitly. Every operation takes `&mut self`, so a
/// layout and an edit transition never interleave.
///
/// On construction the map creates its container on the surface, holding a root box and a
/// branch box; attach [`MindMap::container`] wherever the host displays the map.
pub struct MindMap<S: Surface, B> {
    doc: MindNode,
    surface: S,
    bus: B,
    config: MapConfig,
    container: S::Element,
    engine: LayoutEngine<S::Element>,
    edit: EditController<S::Element>,
    tree: Option<RenderTree<S::Element>>,
}

impl<S: Surface, B: EventBus> core::fmt::Debug for MindMap<S, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MindMap")
            .field("root", &self.doc.id)
            .field("config", &self.config)
            .field("container", &self.container)
            .field("rendered", &self.tree.as_ref().map(RenderTree::len))
            .field("editing", &self.edit.editing_id())
            .finish_non_exhaustive()
    }
}

impl<S: Surface, B: EventBus> MindMap<S, B> {
    /// Bind `doc` to `surface` and `bus`. Nothing is laid out until [`MindMap::relayout`].
    pub fn new(doc: MindNode, mut surface: S, bus: B, config: MapConfig) -> Self {
        let container = surface.create(ElementKind::Container);
        surface.add_class(container, "map-container");
        let root_box = surface.create(ElementKind::Container);
        let branch_box = surface.create(ElementKind::Container);
        surface.append(container, root_box);
        surface.append(container, branch_box);

        Self {
            doc,
            surface,
            bus,
            config,
            container,
            engine: LayoutEngine::new(config.layout, root_box, branch_box),
            edit: EditController::new(config.effective_edit()),
            tree: None,
        }
    }

    /// Rebuild the whole render tree from the document.
    ///
    /// An open edit session is committed first, since its editor lives inside a topic the
    /// pass is about to discard. On error nothing is rendered.
    pub fn relayout(&mut self) -> Result<(), ViewError> {
        self.finish_open_edit();
        self.tree = None;
        let tree = self.engine.layout(&mut self.doc, &mut self.surface)?;
        self.tree = Some(tree);
        Ok(())
    }

    /// Open an edit session on node `id`.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), ViewError> {
        let Some(tree) = &self.tree else {
            return Err(match self.doc.find(id) {
                Some(_) => EditError::NotRendered(id.to_string()),
                None => EditError::NodeNotFound(id.to_string()),
            }
            .into());
        };
        self.edit
            .begin(id, &mut self.doc, tree, &mut self.surface, &mut self.bus)?;
        Ok(())
    }

    /// Forward an input event from the open editor.
    ///
    /// When a key press commits the session, input focus returns to the map container.
    pub fn handle_input(&mut self, input: EditInput) -> Result<EditTransition, ViewError> {
        let transition =
            self.edit
                .handle(input, &mut self.doc, &mut self.surface, &mut self.bus)?;
        if matches!(input, EditInput::Key { .. })
            && matches!(transition, EditTransition::Committed(_))
        {
            self.surface.focus(self.container);
        }
        Ok(transition)
    }

    /// Commit the open edit session, if any.
    pub fn commit_edit(&mut self) -> Result<Option<CommitOutcome>, ViewError> {
        Ok(self
            .edit
            .commit(&mut self.doc, &mut self.surface, &mut self.bus)?)
    }

    /// Flip node `id` between expanded and collapsed and redraw its branch.
    ///
    /// Returns `Ok(false)` for the root and for leaves, which cannot be toggled. An open
    /// edit session is committed first. If the branch cannot be redrawn the flag is
    /// restored and the render tree is left as it was.
    pub fn toggle(&mut self, id: &str) -> Result<bool, ViewError> {
        let Some(node) = self.doc.find(id) else {
            return Err(ViewError::NodeNotFound(id.to_string()));
        };
        if id == self.doc.id || node.is_leaf() {
            return Ok(false);
        }

        self.finish_open_edit();
        let Some(node) = self.doc.find_mut(id) else {
            return Err(ViewError::NodeNotFound(id.to_string()));
        };
        let previous = node.expanded;
        node.expanded = Some(!node.is_expanded());

        #[cfg(feature = "tracing")]
        tracing::debug!(id, expanded = node.is_expanded(), "toggled");

        if let Some(tree) = self.tree.as_mut()
            && let Err(err) = self
                .engine
                .refresh_branch(tree, &self.doc, id, &mut self.surface)
        {
            // The branch was not redrawn, so the flag goes back to match it.
            if let Some(node) = self.doc.find_mut(id) {
                node.expanded = previous;
            }
            return Err(err.into());
        }
        Ok(true)
    }

    /// Change the side mode. Takes effect on the next [`MindMap::relayout`].
    pub fn set_side_mode(&mut self, side_mode: SideMode) {
        self.config.layout.side_mode = side_mode;
        self.engine.set_config(self.config.layout);
        self.edit.set_config(self.config.effective_edit());
    }

    /// The document.
    pub fn document(&self) -> &MindNode {
        &self.doc
    }

    /// Mutable access to the document. Call [`MindMap::relayout`] after structural changes.
    pub fn document_mut(&mut self) -> &mut MindNode {
        &mut self.doc
    }

    /// The surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to forward measurements or typed text.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The event bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the event bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Current configuration.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The map container element.
    pub fn container(&self) -> S::Element {
        self.container
    }

    /// The current render tree; `None` before the first successful layout.
    pub fn tree(&self) -> Option<&RenderTree<S::Element>> {
        self.tree.as_ref()
    }

    /// The edit controller.
    pub fn editor(&self) -> &EditController<S::Element> {
        &self.edit
    }

    /// Give back the document, surface, and bus.
    pub fn into_parts(self) -> (MindNode, S, B) {
        (self.doc, self.surface, self.bus)
    }

    fn finish_open_edit(&mut self) {
        if let Err(_err) = self
            .edit
            .commit(&mut self.doc, &mut self.surface, &mut self.bus)
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(err = %_err, "open edit session dropped");
        }
    }
}
