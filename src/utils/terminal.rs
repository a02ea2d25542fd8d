//! Sanitizing remote text before it reaches the terminal.
//!
//! Titles, plots and error messages come from a third-party API. Escape
//! sequences in them could move the cursor or recolour the screen, so every
//! API string passes through [`sanitize_text`] before rendering.

use std::borrow::Cow;

/// Remove ANSI escape sequences and control characters, folding line breaks
/// and tabs into single spaces so the result fits on one terminal row.
///
/// # Examples
///
/// ```
/// use popcorn_tui::utils::terminal::sanitize_text;
///
/// assert_eq!(sanitize_text("\x1b[31mInception\x1b[0m"), "Inception");
/// assert_eq!(sanitize_text("Line one\nLine two"), "Line one Line two");
/// ```
pub fn sanitize_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => match chars.peek() {
                // CSI: ESC [ params final-byte
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() || next == '~' {
                            break;
                        }
                    }
                }
                // OSC: ESC ] ... BEL (or ESC \)
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\n' | '\r' | '\t' => {
                if !result.ends_with(' ') {
                    result.push(' ');
                }
            }
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    Cow::Owned(result)
}
