//! Command definitions and dispatch arguments.
//!
//! A [`CommandDefinition`] carries no handler. Accepted commands are routed to
//! the typed channel selected by their [`CommandKind`].

use std::fmt;

#[cfg(feature = "persist")]
use serde::{Deserialize, Serialize};

/// The argument shape a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "persist", derive(Serialize, Deserialize))]
pub enum CommandKind {
    /// No payload. An optional sub-target is passed through.
    #[default]
    Trigger,
    /// A sub-target followed by 2, 3 or 4 numeric components.
    Vector,
    /// A single float, with or without a sub-target.
    Float,
    /// A single integer, with or without a sub-target.
    Int,
}

impl CommandKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Trigger => "trigger",
            CommandKind::Vector => "vector",
            CommandKind::Float => "float",
            CommandKind::Int => "int",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describes a console command.
///
/// Aliases are stored lowercased and matched case-insensitively. The first
/// alias is the primary one: it is shown in help and passed to subscribers as
/// the dispatch keyword.
///
/// # Examples
///
/// ```
/// use bevy_typed_console::core::{CommandDefinition, CommandKind};
///
/// let teleport = CommandDefinition::new("Teleport", CommandKind::Vector)
///     .alias("tp")
///     .description("Move an entity to a position");
///
/// assert_eq!(teleport.primary_alias(), "teleport");
/// assert!(teleport.matches("TP"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    aliases: Vec<Box<str>>,
    kind: CommandKind,
    description: String,
    help_visible: bool,
}

impl CommandDefinition {
    /// Create a new definition with its primary alias and argument kind.
    ///
    /// A blank keyword yields a definition that never matches any token.
    pub fn new(keyword: impl AsRef<str>, kind: CommandKind) -> Self {
        Self {
            aliases: vec![normalize(keyword.as_ref())],
            kind,
            description: String::new(),
            help_visible: true,
        }
    }

    /// Create a definition from an alias list.
    ///
    /// Blank aliases are skipped. Returns `None` if none remain.
    pub fn from_aliases<I, S>(aliases: I, kind: CommandKind) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases: Vec<Box<str>> = aliases
            .into_iter()
            .map(|a| normalize(a.as_ref()))
            .filter(|a| !a.is_empty())
            .collect();
        if aliases.is_empty() {
            return None;
        }
        Some(Self {
            aliases,
            kind,
            description: String::new(),
            help_visible: true,
        })
    }

    /// Add an alternative keyword. Blank aliases are ignored.
    pub fn alias(mut self, alias: impl AsRef<str>) -> Self {
        let alias = normalize(alias.as_ref());
        if !alias.is_empty() {
            self.aliases.push(alias);
        }
        self
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set whether the command is listed by `help`.
    pub fn help(mut self, visible: bool) -> Self {
        self.help_visible = visible;
        self
    }

    /// Hide the command from `help`.
    pub fn hidden(self) -> Self {
        self.help(false)
    }

    /// Get the primary (canonical) alias.
    #[inline]
    pub fn primary_alias(&self) -> &str {
        &self.aliases[0]
    }

    /// Iterate over all aliases, primary first.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(|a| a.as_ref())
    }

    /// Get the argument kind.
    #[inline]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Get the description.
    #[inline]
    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// Whether the command is listed by `help`.
    #[inline]
    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    /// Check if `token` names this command, ignoring case.
    ///
    /// The empty token never matches.
    pub fn matches(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        !token.is_empty() && self.aliases.iter().any(|alias| **alias == *token)
    }

    /// The `"{primary} - {description}"` line used by `help`.
    pub fn help_line(&self) -> String {
        format!("{} - {}", self.primary_alias(), self.description)
    }
}

fn normalize(alias: &str) -> Box<str> {
    alias.trim().to_lowercase().into_boxed_str()
}

/// Arguments passed to channel subscribers.
///
/// Holds the primary alias of the dispatched command and, when present, the
/// sub-target token that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchArgs {
    keyword: Box<str>,
    subtarget: Option<Box<str>>,
}

impl DispatchArgs {
    /// Create arguments with only a keyword.
    pub fn new(keyword: impl Into<Box<str>>) -> Self {
        Self {
            keyword: keyword.into(),
            subtarget: None,
        }
    }

    /// Create arguments with a keyword and a sub-target.
    pub fn with_subtarget(keyword: impl Into<Box<str>>, subtarget: impl Into<Box<str>>) -> Self {
        Self {
            keyword: keyword.into(),
            subtarget: Some(subtarget.into()),
        }
    }

    /// Get the command keyword (its primary alias).
    #[inline]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Get the sub-target, if one was given.
    #[inline]
    pub fn subtarget(&self) -> Option<&str> {
        self.subtarget.as_deref()
    }

    /// Get an argument by index: 0 is the keyword, 1 the sub-target.
    pub fn get(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.keyword),
            1 => self.subtarget(),
            _ => None,
        }
    }

    /// Iterate over the keyword and sub-target.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.keyword()).chain(self.subtarget())
    }
}

impl fmt::Display for DispatchArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtarget {
            Some(subtarget) => write!(f, "{} params: {}", self.keyword, subtarget),
            None => f.write_str(&self.keyword),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builder() {
        let cmd = CommandDefinition::new("Fly", CommandKind::Trigger)
            .alias("NOCLIP")
            .description("Toggle flying");

        assert_eq!(cmd.primary_alias(), "fly");
        assert_eq!(cmd.aliases().collect::<Vec<_>>(), vec!["fly", "noclip"]);
        assert_eq!(cmd.kind(), CommandKind::Trigger);
        assert_eq!(cmd.get_description(), "Toggle flying");
        assert!(cmd.is_help_visible());
        assert_eq!(cmd.help_line(), "fly - Toggle flying");
    }

    #[test]
    fn test_matches_ignores_case() {
        let cmd = CommandDefinition::new("fly", CommandKind::Trigger).alias("noclip");
        assert!(cmd.matches("fly"));
        assert!(cmd.matches("Fly"));
        assert!(cmd.matches("NoClip"));
        assert!(!cmd.matches("walk"));
    }

    #[test]
    fn test_hidden() {
        let cmd = CommandDefinition::new("secret", CommandKind::Int).hidden();
        assert!(!cmd.is_help_visible());
    }

    #[test]
    fn test_from_aliases() {
        let cmd = CommandDefinition::from_aliases(["Speed", "spd"], CommandKind::Float).unwrap();
        assert_eq!(cmd.primary_alias(), "speed");
        assert!(cmd.matches("SPD"));

        let empty: [&str; 0] = [];
        assert!(CommandDefinition::from_aliases(empty, CommandKind::Float).is_none());
    }

    #[test]
    fn test_blank_aliases_never_match() {
        assert!(CommandDefinition::from_aliases(["", "  "], CommandKind::Trigger).is_none());

        let cmd = CommandDefinition::from_aliases(["", "Fly"], CommandKind::Trigger).unwrap();
        assert_eq!(cmd.primary_alias(), "fly");

        let cmd = CommandDefinition::new("fly", CommandKind::Trigger).alias("").alias("   ");
        assert_eq!(cmd.aliases().count(), 1);
        assert!(!cmd.matches(""));

        let blank = CommandDefinition::new("  ", CommandKind::Trigger);
        assert!(!blank.matches(""));
        assert!(!blank.matches("   "));
    }

    #[test]
    fn test_dispatch_args() {
        let args = DispatchArgs::new("fly");
        assert_eq!(args.get(0), Some("fly"));
        assert_eq!(args.get(1), None);
        assert_eq!(args.to_string(), "fly");

        let args = DispatchArgs::with_subtarget("color", "bg");
        assert_eq!(args.subtarget(), Some("bg"));
        assert_eq!(args.iter().collect::<Vec<_>>(), vec!["color", "bg"]);
        assert_eq!(args.to_string(), "color params: bg");
    }
}
