//! Command line parsing and typed argument coercion.
//!
//! [`parse_line`] turns a tokenized line into an [`Action`] without touching
//! any console state, so the whole grammar can be tested in isolation. The
//! console then applies the action.
//!
//! # Grammar
//!
//! ```text
//! clear
//! help [keyword]
//! <trigger> [subtarget]
//! <vector>  <subtarget> <x> <y> [z] [w]
//! <float>   <subtarget> <value> | <value>
//! <int>     <subtarget> <value> | <value>
//! ```

use std::fmt;

use bevy::math::{Vec2, Vec3, Vec4};

use super::{CommandDefinition, CommandKind, CommandRegistry, DispatchArgs};

/// Built-in verb that clears the active buffer.
pub const CLEAR_VERB: &str = "clear";
/// Built-in verb that prints help.
pub const HELP_VERB: &str = "help";
/// Shown by `help <keyword>` when the keyword is unknown or hidden.
pub const UNKNOWN_HELP_MESSAGE: &str =
    "Unknown command. 'help' lists all commands, 'help <command>' describes one.";

/// A fully typed command invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Trigger(DispatchArgs),
    Vec2(DispatchArgs, Vec2),
    Vec3(DispatchArgs, Vec3),
    Vec4(DispatchArgs, Vec4),
    Float(DispatchArgs, f32),
    Int(DispatchArgs, i32),
}

impl Dispatch {
    /// Get the dispatch arguments.
    pub fn args(&self) -> &DispatchArgs {
        match self {
            Dispatch::Trigger(args)
            | Dispatch::Vec2(args, _)
            | Dispatch::Vec3(args, _)
            | Dispatch::Vec4(args, _)
            | Dispatch::Float(args, _)
            | Dispatch::Int(args, _) => args,
        }
    }

    /// Get the command keyword (its primary alias).
    pub fn keyword(&self) -> &str {
        self.args().keyword()
    }

    /// Format the payload, if any, for display.
    pub fn payload(&self) -> Option<String> {
        match self {
            Dispatch::Trigger(_) => None,
            Dispatch::Vec2(_, v) => Some(v.to_string()),
            Dispatch::Vec3(_, v) => Some(v.to_string()),
            Dispatch::Vec4(_, v) => Some(v.to_string()),
            Dispatch::Float(_, v) => Some(v.to_string()),
            Dispatch::Int(_, v) => Some(v.to_string()),
        }
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Some(payload) => write!(f, "{} with args {}", self.args(), payload),
            None => write!(f, "{}", self.args()),
        }
    }
}

/// What a submitted line asks the console to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Clear the active buffer and the rendered text.
    Clear,
    /// Print help text.
    Help(String),
    /// Invoke a typed channel.
    Dispatch(Dispatch),
    /// The line is not a valid command.
    Invalid,
}

/// Parse a tokenized line against the registry.
///
/// Built-in verbs are checked before registry lookup, so a registered command
/// named `clear` or `help` is unreachable.
pub fn parse_line(tokens: &[String], registry: &CommandRegistry) -> Action {
    let Some(first) = tokens.first() else {
        return Action::Invalid;
    };

    match first.as_str() {
        CLEAR_VERB => return Action::Clear,
        HELP_VERB => {
            let text = match tokens.get(1) {
                None => registry.help_text(),
                Some(keyword) => registry
                    .help_for(keyword)
                    .unwrap_or_else(|| UNKNOWN_HELP_MESSAGE.to_string()),
            };
            return Action::Help(text);
        }
        _ => {}
    }

    match registry.resolve(first) {
        Some(definition) => coerce(definition, tokens)
            .map(Action::Dispatch)
            .unwrap_or(Action::Invalid),
        None => Action::Invalid,
    }
}

/// Coerce the tokens following a resolved keyword into the definition's kind.
///
/// `tokens[0]` is the keyword itself. Returns `None` if the arguments do not
/// fit the kind.
pub fn coerce(definition: &CommandDefinition, tokens: &[String]) -> Option<Dispatch> {
    let keyword = definition.primary_alias();
    let with_subtarget = || DispatchArgs::with_subtarget(keyword, tokens[1].as_str());

    match definition.kind() {
        CommandKind::Trigger => Some(Dispatch::Trigger(match tokens.get(1) {
            Some(subtarget) => DispatchArgs::with_subtarget(keyword, subtarget.as_str()),
            None => DispatchArgs::new(keyword),
        })),
        CommandKind::Vector => {
            let components = parse_floats(tokens.get(2..)?)?;
            match components.as_slice() {
                &[x, y] => Some(Dispatch::Vec2(with_subtarget(), Vec2::new(x, y))),
                &[x, y, z] => Some(Dispatch::Vec3(with_subtarget(), Vec3::new(x, y, z))),
                &[x, y, z, w] => Some(Dispatch::Vec4(with_subtarget(), Vec4::new(x, y, z, w))),
                _ => None,
            }
        }
        CommandKind::Float => match two_stage::<f32>(tokens)? {
            (value, true) => Some(Dispatch::Float(with_subtarget(), value)),
            (value, false) => Some(Dispatch::Float(DispatchArgs::new(keyword), value)),
        },
        CommandKind::Int => match two_stage::<i32>(tokens)? {
            (value, true) => Some(Dispatch::Int(with_subtarget(), value)),
            (value, false) => Some(Dispatch::Int(DispatchArgs::new(keyword), value)),
        },
    }
}

/// Parse every token as `f32`, failing if any one does not parse.
fn parse_floats(tokens: &[String]) -> Option<Vec<f32>> {
    tokens.iter().map(|t| t.parse().ok()).collect()
}

/// Try `tokens[2]` (with `tokens[1]` as sub-target), then `tokens[1]` bare.
///
/// The flag is `true` when the value came from `tokens[2]`.
fn two_stage<T: std::str::FromStr>(tokens: &[String]) -> Option<(T, bool)> {
    if let Some(value) = tokens.get(2).and_then(|t| t.parse().ok()) {
        return Some((value, true));
    }
    tokens.get(1).and_then(|t| t.parse().ok()).map(|value| (value, false))
}
