// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edit session state machine.

use alloc::string::{String, ToString};
use core::fmt::Debug;
use core::mem;

use mindtree_layout::{RenderTree, TopicHandles};
use mindtree_model::MindNode;
use mindtree_surface::{ElementFlags, ElementKind, EventMask, Surface};

use crate::bus::{EventBus, Operation};
use crate::error::EditError;

const EDITOR_EVENTS: EventMask = EventMask::KEY_DOWN.union(EventMask::BLUR);

/// Which edge of the topic the editor is pinned to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorAnchor {
    /// Grow to the right.
    #[default]
    Left,
    /// Grow to the left; used when every branch sits left of the root.
    Right,
}

/// Edit configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EditConfig {
    /// Whether the editor asks the host for spellchecking.
    pub spellcheck: bool,
    /// The editor's minimum width is the topic width minus this inset, clamped at zero.
    pub width_inset: f64,
    /// Edge the editor is pinned to.
    pub anchor: EditorAnchor,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            spellcheck: false,
            width_inset: 8.0,
            anchor: EditorAnchor::Left,
        }
    }
}

impl EditConfig {
    /// Enable or disable spellchecking.
    pub fn with_spellcheck(mut self, spellcheck: bool) -> Self {
        self.spellcheck = spellcheck;
        self
    }

    /// Set the width inset.
    pub fn with_width_inset(mut self, width_inset: f64) -> Self {
        self.width_inset = width_inset;
        self
    }

    /// Set the anchor edge.
    pub fn with_anchor(mut self, anchor: EditorAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Keys the controller distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditKey {
    /// Enter/Return.
    Enter,
    /// Tab.
    Tab,
    /// Anything else; left to the editor.
    Other,
}

/// An input event on the open editor, forwarded by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditInput {
    /// Key pressed while the editor has focus.
    Key {
        /// Which key.
        key: EditKey,
        /// Whether shift was held.
        shift: bool,
    },
    /// The editor lost focus.
    Blur,
}

impl EditInput {
    /// Unshifted key press.
    pub const fn key(key: EditKey) -> Self {
        Self::Key { key, shift: false }
    }

    /// Shifted key press.
    pub const fn shifted(key: EditKey) -> Self {
        Self::Key { key, shift: true }
    }
}

/// Result of a committed session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Node id.
    pub id: String,
    /// Topic after the commit.
    pub topic: String,
    /// Topic when the session opened.
    pub origin: String,
    /// True iff the topic text changed. Hosts refresh cross-node links on this.
    pub changed: bool,
}

/// What an input did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditTransition {
    /// Nothing; no session was open or the input is left to the editor.
    Ignored,
    /// Shift+Enter or Shift+Tab: the editor inserts a line break and the session stays open.
    LineBreak,
    /// The session closed.
    Committed(CommitOutcome),
}

#[derive(Clone, Debug)]
struct EditSession<E> {
    node_id: String,
    origin: String,
    handles: TopicHandles<E>,
    editor: E,
}

#[derive(Clone, Debug)]
enum EditState<E> {
    Idle,
    Editing(EditSession<E>),
}

/// Owns at most one in-place edit session.
///
/// ```text
/// Idle --begin--> Editing --blur | Enter | Tab--> Idle
///                    |  ^
///                    +--+ Shift+Enter | Shift+Tab (line break)
/// ```
///
/// There is no cancel transition: every way out of a session commits. Commit trims the
/// typed text and falls back to the original text when nothing is left, so a topic never
/// becomes empty through editing.
#[derive(Clone, Debug)]
pub struct EditController<E> {
    config: EditConfig,
    state: EditState<E>,
}

impl<E> Default for EditController<E> {
    fn default() -> Self {
        Self::new(EditConfig::default())
    }
}

impl<E> EditController<E> {
    /// Create an idle controller.
    pub fn new(config: EditConfig) -> Self {
        Self {
            config,
            state: EditState::Idle,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    /// Replace the configuration; applies to the next session.
    pub fn set_config(&mut self, config: EditConfig) {
        self.config = config;
    }

    /// Returns true while a session is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// Id of the node under edit.
    pub fn editing_id(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing(s) => Some(&s.node_id),
            EditState::Idle => None,
        }
    }

    /// Topic text captured when the session opened.
    pub fn origin(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing(s) => Some(&s.origin),
            EditState::Idle => None,
        }
    }
}

impl<E: Copy + Eq + Debug> EditController<E> {
    /// The open editor element.
    pub fn editor(&self) -> Option<E> {
        match &self.state {
            EditState::Editing(s) => Some(s.editor),
            EditState::Idle => None,
        }
    }

    /// Open a session on node `id`.
    ///
    /// A no-op if `id` is already under edit. A session open on another node is committed
    /// first. The editor is created inside the node's rendered topic, pre-filled with the
    /// raw topic text, focused with all text selected, and subscribed to key and blur
    /// events. Fires [`Operation::BeginEdit`].
    pub fn begin<S, B>(
        &mut self,
        id: &str,
        doc: &mut MindNode,
        tree: &RenderTree<E>,
        surface: &mut S,
        bus: &mut B,
    ) -> Result<(), EditError>
    where
        S: Surface<Element = E>,
        B: EventBus,
    {
        if self.editing_id() == Some(id) {
            return Ok(());
        }
        if doc.find(id).is_none() {
            return Err(EditError::NodeNotFound(id.to_string()));
        }
        let Some(handles) = tree.find(id) else {
            return Err(EditError::NotRendered(id.to_string()));
        };

        if let Err(_err) = self.commit(doc, surface, bus) {
            #[cfg(feature = "tracing")]
            tracing::warn!(err = %_err, "dropped the previous session");
        }

        let Some(node) = doc.find(id) else {
            return Err(EditError::NodeNotFound(id.to_string()));
        };
        let origin = node.topic.clone();

        let editor = surface.create(ElementKind::Editor);
        surface.set_text(editor, &origin);
        let mut flags = ElementFlags::CONTENT_EDITABLE;
        if self.config.spellcheck {
            flags |= ElementFlags::SPELLCHECK;
        }
        surface.set_flags(editor, flags);
        let min_width = (surface.width(handles.topic) - self.config.width_inset).max(0.0);
        surface.set_min_width(editor, min_width);
        if self.config.anchor == EditorAnchor::Right {
            surface.set_anchor_right(editor);
        }
        surface.append(handles.topic, editor);
        surface.focus(editor);
        surface.select_all(editor);
        surface.listen(editor, EDITOR_EVENTS);

        #[cfg(feature = "tracing")]
        tracing::debug!(id, "edit session opened");

        bus.fire(Operation::BeginEdit {
            id: id.to_string(),
            topic: origin.clone(),
        });
        self.state = EditState::Editing(EditSession {
            node_id: id.to_string(),
            origin,
            handles,
            editor,
        });
        Ok(())
    }

    /// Feed an input event from the editor.
    pub fn handle<S, B>(
        &mut self,
        input: EditInput,
        doc: &mut MindNode,
        surface: &mut S,
        bus: &mut B,
    ) -> Result<EditTransition, EditError>
    where
        S: Surface<Element = E>,
        B: EventBus,
    {
        if !self.is_editing() {
            return Ok(EditTransition::Ignored);
        }
        match input {
            EditInput::Key {
                key: EditKey::Enter | EditKey::Tab,
                shift: true,
            } => Ok(EditTransition::LineBreak),
            EditInput::Key {
                key: EditKey::Enter | EditKey::Tab,
                shift: false,
            }
            | EditInput::Blur => Ok(self
                .commit(doc, surface, bus)?
                .map_or(EditTransition::Ignored, EditTransition::Committed)),
            EditInput::Key { .. } => Ok(EditTransition::Ignored),
        }
    }

    /// Close the open session, if any.
    ///
    /// Reads the editor's text, trims it, and writes it to the node's topic, or the
    /// original text if nothing is left. The editor is destroyed either way. The topic's
    /// base text element is patched only when the text changed; decorations are never
    /// touched. Fires [`Operation::FinishEdit`].
    ///
    /// If the node was removed from the document while the session was open, the editor
    /// is still destroyed but nothing is fired and [`EditError::NodeNotFound`] is
    /// returned.
    pub fn commit<S, B>(
        &mut self,
        doc: &mut MindNode,
        surface: &mut S,
        bus: &mut B,
    ) -> Result<Option<CommitOutcome>, EditError>
    where
        S: Surface<Element = E>,
        B: EventBus,
    {
        let EditState::Editing(session) = mem::replace(&mut self.state, EditState::Idle) else {
            return Ok(None);
        };

        let typed = surface.text_content(session.editor);
        surface.unlisten(session.editor, EDITOR_EVENTS);
        surface.remove(session.editor);

        let Some(node) = doc.find_mut(&session.node_id) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(id = %session.node_id, "edited node vanished before commit");
            return Err(EditError::NodeNotFound(session.node_id));
        };

        let trimmed = typed.trim();
        node.topic = if trimmed.is_empty() {
            session.origin.clone()
        } else {
            trimmed.to_string()
        };
        let changed = node.topic != session.origin;
        if changed {
            surface.set_text(session.handles.text, &node.topic);
        }
        let topic = node.topic.clone();

        #[cfg(feature = "tracing")]
        tracing::debug!(id = %session.node_id, changed, "edit session committed");

        bus.fire(Operation::FinishEdit {
            id: session.node_id.clone(),
            topic: topic.clone(),
            origin: session.origin.clone(),
        });
        Ok(Some(CommitOutcome {
            id: session.node_id,
            topic,
            origin: session.origin,
            changed,
        }))
    }
}
