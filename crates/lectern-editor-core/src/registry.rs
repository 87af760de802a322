//! Ordered, immutable command registry.
//!
//! The registry owns every `Command` exactly once and arranges them into the
//! display groups the toolbar draws, in order. It is built once and shared
//! read-only; callers who want a different toolbar build a different registry.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use smol_str::SmolStr;
use thiserror::Error;

use crate::command::{Category, Command};

/// Errors detected while building a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// Two commands share an id.
    #[error("duplicate command id `{0}`")]
    DuplicateId(SmolStr),

    /// A group lists an id that was never registered.
    #[error("group {group:?} references unknown command `{id}`")]
    UnknownCommand { group: GroupKind, id: SmolStr },
}

/// Toolbar display groups, drawn in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Block,
    Inline,
    List,
    Insertion,
    History,
    Link,
}

/// A display group: an ordered run of commands.
#[derive(Debug, Clone)]
pub struct CommandGroup {
    kind: GroupKind,
    commands: Vec<Arc<Command>>,
}

impl CommandGroup {
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn commands(&self) -> &[Arc<Command>] {
        &self.commands
    }
}

/// Immutable table of toolbar commands.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<Command>>,
    by_id: HashMap<SmolStr, usize>,
    groups: Vec<CommandGroup>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry where every group owns its commands directly.
    ///
    /// A command may only appear once across all groups.
    pub fn with_groups<I, C>(groups: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (GroupKind, C)>,
        C: IntoIterator<Item = Command>,
    {
        let mut builder = Self::builder();
        for (kind, commands) in groups {
            let mut ids = Vec::new();
            for command in commands {
                ids.push(command.id().clone());
                builder = builder.command(command);
            }
            builder = builder.group(kind, ids);
        }
        builder.build()
    }

    /// Look up a command by id.
    pub fn get(&self, id: &str) -> Option<&Arc<Command>> {
        self.by_id.get(id).map(|&idx| &self.commands[idx])
    }

    /// All commands of a category, in registration order.
    pub fn list(&self, category: Category) -> impl Iterator<Item = &Arc<Command>> + '_ {
        self.commands.iter().filter(move |c| c.category() == category)
    }

    /// All commands, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Command>> + '_ {
        self.commands.iter()
    }

    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Builder for `CommandRegistry`.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: Vec<Command>,
    groups: Vec<(GroupKind, Vec<SmolStr>)>,
}

impl RegistryBuilder {
    /// Register a command.
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Append a display group listing registered command ids in order.
    ///
    /// The same id may appear in several groups.
    pub fn group<I, S>(mut self, kind: GroupKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.groups
            .push((kind, ids.into_iter().map(Into::into).collect()));
        self
    }

    pub fn build(self) -> Result<CommandRegistry, RegistryError> {
        let mut by_id = HashMap::with_capacity(self.commands.len());
        let mut commands = Vec::with_capacity(self.commands.len());
        for command in self.commands {
            if by_id.contains_key(command.id()) {
                return Err(RegistryError::DuplicateId(command.id().clone()));
            }
            by_id.insert(command.id().clone(), commands.len());
            commands.push(Arc::new(command));
        }

        let groups = self
            .groups
            .into_iter()
            .map(|(kind, ids)| {
                let commands = ids
                    .into_iter()
                    .map(|id| match by_id.get(&id) {
                        Some(&idx) => Ok(commands[idx].clone()),
                        None => Err(RegistryError::UnknownCommand { group: kind, id }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CommandGroup { kind, commands })
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;

        Ok(CommandRegistry {
            commands,
            by_id,
            groups,
        })
    }
}
