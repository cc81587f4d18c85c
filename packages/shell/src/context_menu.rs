//! Right-click menu: commands, their enablement, and the actions they map to.

use crate::keymap::{Command, Keymap};
use hearth_components::ComponentRegistry;
use hearth_document::{tree, ComponentInstance, PageDocument};
use hearth_editor::{Action, EditorState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuCommand {
    Copy,
    Cut,
    Paste,
    Duplicate,
    Rename,
    Lock,
    Unlock,
    MoveUp,
    MoveDown,
    Delete,
}

impl MenuCommand {
    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::Copy => "Copy",
            MenuCommand::Cut => "Cut",
            MenuCommand::Paste => "Paste",
            MenuCommand::Duplicate => "Duplicate",
            MenuCommand::Rename => "Rename",
            MenuCommand::Lock => "Lock",
            MenuCommand::Unlock => "Unlock",
            MenuCommand::MoveUp => "Move up",
            MenuCommand::MoveDown => "Move down",
            MenuCommand::Delete => "Delete",
        }
    }

    fn shortcut_command(&self) -> Option<Command> {
        match self {
            MenuCommand::Copy => Some(Command::Copy),
            MenuCommand::Cut => Some(Command::Cut),
            MenuCommand::Paste => Some(Command::Paste),
            MenuCommand::Duplicate => Some(Command::Duplicate),
            MenuCommand::Rename => Some(Command::Rename),
            MenuCommand::Delete => Some(Command::Delete),
            MenuCommand::Lock | MenuCommand::Unlock | MenuCommand::MoveUp | MenuCommand::MoveDown => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub command: MenuCommand,
    pub label: String,
    pub enabled: bool,
    pub shortcut: Option<String>,
}

/// Items for the open context menu; empty when it is closed
pub fn context_menu_items(
    state: &EditorState,
    registry: &ComponentRegistry,
    keymap: &Keymap,
) -> Vec<MenuItem> {
    if !state.context_menu.open {
        return Vec::new();
    }

    let target = state.context_menu.target_id.as_deref();
    let commands: Vec<MenuCommand> = match target.and_then(|id| state.page.as_ref()?.find(id)) {
        None => vec![MenuCommand::Paste],
        Some(node) => vec![
            MenuCommand::Copy,
            MenuCommand::Cut,
            MenuCommand::Paste,
            MenuCommand::Duplicate,
            MenuCommand::Rename,
            if node.is_locked() {
                MenuCommand::Unlock
            } else {
                MenuCommand::Lock
            },
            MenuCommand::MoveUp,
            MenuCommand::MoveDown,
            MenuCommand::Delete,
        ],
    };

    commands
        .into_iter()
        .map(|command| MenuItem {
            command,
            label: command.label().to_string(),
            enabled: command_action(command, state, registry, target).is_some(),
            shortcut: command
                .shortcut_command()
                .and_then(|c| keymap.shortcut_for(c))
                .map(|chord| chord.to_string()),
        })
        .collect()
}

/// Action for running `command` against `target`; `None` when disabled
pub fn command_action(
    command: MenuCommand,
    state: &EditorState,
    registry: &ComponentRegistry,
    target: Option<&str>,
) -> Option<Action> {
    let page = state.page.as_ref()?;

    if command == MenuCommand::Paste {
        let (parent_id, index) = paste_position(state, registry, target)?;
        return Some(Action::Paste { parent_id, index });
    }

    let node = page.find(target?)?;
    let id = node.id.clone();
    let editable = !node.is_locked();

    match command {
        MenuCommand::Copy => Some(Action::Copy { id }),
        MenuCommand::Duplicate => Some(Action::Duplicate { id }),
        MenuCommand::Cut if editable => Some(Action::Cut { id }),
        MenuCommand::Delete if editable => Some(Action::RemoveComponent { id }),
        MenuCommand::Rename if editable => Some(Action::StartRename { id }),
        MenuCommand::Lock if editable => Some(Action::SetLocked { id, locked: true }),
        MenuCommand::Unlock if !editable => Some(Action::SetLocked { id, locked: false }),
        MenuCommand::MoveUp if editable => {
            let (parent_id, index, _) = sibling_slot(page, &id)?;
            (index > 0).then(|| Action::MoveComponent {
                id,
                new_parent_id: parent_id,
                new_index: index - 1,
            })
        }
        MenuCommand::MoveDown if editable => {
            let (parent_id, index, count) = sibling_slot(page, &id)?;
            (index + 1 < count).then(|| Action::MoveComponent {
                id,
                new_parent_id: parent_id,
                new_index: index + 1,
            })
        }
        _ => None,
    }
}

/// Where the clipboard lands relative to `target`.
///
/// Inside the target when it is an unlocked container accepting the clipboard
/// type, otherwise right after it. Without a target, at the end of the page.
pub fn paste_position(
    state: &EditorState,
    registry: &ComponentRegistry,
    target: Option<&str>,
) -> Option<(Option<String>, usize)> {
    let clipboard = state.clipboard.as_ref()?;
    let page = state.page.as_ref()?;
    let child_type = clipboard.instance.component_type.as_str();

    let Some(node) = target.and_then(|id| page.find(id)) else {
        return Some((None, page.components.len()));
    };

    if !node.is_locked() && accepts(node, registry, child_type) {
        return Some((Some(node.id.clone()), node.children().len()));
    }

    let (parent_id, index, _) = sibling_slot(page, &node.id)?;
    let parent_accepts = match parent_id.as_deref() {
        Some(parent) => accepts(page.find(parent)?, registry, child_type),
        None => true,
    };
    parent_accepts.then_some((parent_id, index + 1))
}

fn accepts(node: &ComponentInstance, registry: &ComponentRegistry, child_type: &str) -> bool {
    node.is_container()
        && registry
            .get(&node.component_type)
            .map_or(true, |entry| entry.accepts_child(child_type))
}

/// Parent, position in `order` and sibling count
fn sibling_slot(page: &PageDocument, id: &str) -> Option<(Option<String>, usize, usize)> {
    let parent_id = tree::parent_id(&page.components, id)?;
    let siblings = match &parent_id {
        Some(parent) => page.find(parent)?.ordered_children(),
        None => page.ordered_components(),
    };
    let index = siblings.iter().position(|node| node.id == id)?;
    Some((parent_id, index, siblings.len()))
}
