//! Terminal output sanitization
//!
//! Answers come from a remote model and page text comes from the wiki. Both are printed
//! verbatim to the user's terminal, so ANSI escape sequences and control characters are
//! removed first with [`strip_ansi_codes`].

/// Strips ANSI escape codes from a string
///
/// Removes ANSI CSI (Control Sequence Introducer) escape codes that could
/// affect terminal display, so remote text cannot move the cursor, clear the
/// screen or recolor the prompt.
///
/// # Examples
///
/// ```
/// use archlinux_ai_cli::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31msudo pacman -Syu\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "sudo pacman -Syu");
/// ```
///
/// # Security Note
///
/// This function removes common ANSI CSI sequences (ESC[...m for colors/styles,
/// ESC[...H for cursor movement, etc.). It also removes other control characters
/// like bell (\x07) and backspace (\x08).
pub fn strip_ansi_codes(text: &str) -> String {
    // Remove ANSI CSI sequences: ESC [ ... (letter)
    // Pattern: \x1b\[([0-9;]*)[A-Za-z]
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // Check for CSI sequence: ESC [
            if chars.peek() == Some(&'[') {
                chars.next(); // consume '['
                // Skip until we find a letter (end of CSI sequence)
                while let Some(&next_ch) = chars.peek() {
                    chars.next();
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
        }

        // Filter out other control characters (except tab, newline, carriage return)
        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}
