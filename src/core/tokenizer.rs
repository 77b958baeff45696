//! Tokenizer for console input lines.
//!
//! Input is case-normalized and split on whitespace. There is no quoting: the
//! command grammar only uses keywords, sub-targets and numbers.

/// Tokenize a console line.
///
/// The line is lowercased and split on whitespace. The result always holds at
/// least one token: an empty or blank line yields a single empty token, which
/// never resolves to a command.
///
/// # Examples
///
/// ```
/// use bevy_typed_console::core::tokenize;
///
/// assert_eq!(tokenize("Color BG 1 0 0 1"), vec!["color", "bg", "1", "0", "0", "1"]);
/// assert_eq!(tokenize("   "), vec![""]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        tokens.push(String::new());
    }
    tokens
}
