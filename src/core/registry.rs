//! Command registry.
//!
//! Ordered storage of [`CommandDefinition`]s with linear, first-match alias
//! lookup. Registration order is preserved for help output.

use super::CommandDefinition;

/// Text returned by [`CommandRegistry::help_text`] when nothing is registered.
pub const EMPTY_REGISTRY_HELP: &str = "No console commands registered.";

/// Ordered list of command definitions.
///
/// Duplicate aliases are allowed; [`resolve`](Self::resolve) returns the
/// earliest registered definition.
///
/// # Examples
///
/// ```
/// use bevy_typed_console::core::{CommandDefinition, CommandKind, CommandRegistry};
///
/// let mut registry = CommandRegistry::new();
/// registry.register(CommandDefinition::new("fly", CommandKind::Trigger));
///
/// assert!(registry.resolve("FLY").is_some());
/// assert!(registry.resolve("walk").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition at the end of the list.
    ///
    /// Returns `false` if one of its aliases is already taken by an earlier
    /// definition. The new definition is still stored but will never resolve
    /// through the shadowed alias.
    pub fn register(&mut self, definition: CommandDefinition) -> bool {
        let shadowed: Vec<&str> = definition
            .aliases()
            .filter(|alias| self.resolve(alias).is_some())
            .collect();

        if !shadowed.is_empty() {
            bevy::log::warn!(
                "Console: '{}' registered with aliases already in use: {}",
                definition.primary_alias(),
                shadowed.join(", ")
            );
        }

        let is_new = shadowed.is_empty();
        self.definitions.push(definition);
        is_new
    }

    /// Register several definitions in order.
    pub fn extend(&mut self, definitions: impl IntoIterator<Item = CommandDefinition>) {
        for definition in definitions {
            self.register(definition);
        }
    }

    /// Find the first definition with an alias matching `token`, ignoring case.
    pub fn resolve(&self, token: &str) -> Option<&CommandDefinition> {
        self.definitions.iter().find(|def| def.matches(token))
    }

    /// Build the help listing for every help-visible definition, one per line.
    pub fn help_text(&self) -> String {
        if self.definitions.is_empty() {
            return EMPTY_REGISTRY_HELP.to_string();
        }

        self.definitions
            .iter()
            .filter(|def| def.is_help_visible())
            .map(|def| def.help_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Help line for a single command, if it exists and is help-visible.
    pub fn help_for(&self, token: &str) -> Option<String> {
        self.resolve(token)
            .filter(|def| def.is_help_visible())
            .map(|def| def.help_line())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }
}

impl FromIterator<CommandDefinition> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = CommandDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CommandKind;

    fn registry() -> CommandRegistry {
        [
            CommandDefinition::new("fly", CommandKind::Trigger).description("Toggle flying"),
            CommandDefinition::new("speed", CommandKind::Float)
                .alias("spd")
                .description("Set movement speed"),
            CommandDefinition::new("debug_ai", CommandKind::Int)
                .description("AI debug level")
                .hidden(),
            CommandDefinition::new("teleport", CommandKind::Vector).description("Move a target"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let registry = registry();
        let lower = registry.resolve("fly").unwrap();
        let mixed = registry.resolve("Fly").unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(registry.resolve("SPD").unwrap().primary_alias(), "speed");
        assert!(registry.resolve("walk").is_none());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(CommandDefinition::new("go", CommandKind::Trigger)));
        assert!(!registry.register(CommandDefinition::new("go", CommandKind::Int)));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("go").unwrap().kind(), CommandKind::Trigger);
    }

    #[test]
    fn test_help_text_lists_visible_in_order() {
        let text = registry().help_text();
        assert_eq!(
            text,
            "fly - Toggle flying\nspeed - Set movement speed\nteleport - Move a target"
        );
        assert_eq!(text.matches("fly - ").count(), 1);
        assert!(!text.contains("debug_ai"));
    }

    #[test]
    fn test_help_text_empty() {
        assert_eq!(CommandRegistry::new().help_text(), EMPTY_REGISTRY_HELP);
    }

    #[test]
    fn test_help_for() {
        let registry = registry();
        assert_eq!(registry.help_for("spd"), Some("speed - Set movement speed".to_string()));
        assert_eq!(registry.help_for("debug_ai"), None);
        assert_eq!(registry.help_for("walk"), None);
    }
}
