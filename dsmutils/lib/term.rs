//! Module containing terminal utilities

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Escape sequence that clears the screen and moves the cursor to the top-left corner.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Determines if the process is running in an interactive terminal environment
pub fn is_interactive_terminal() -> bool {
    // Check if stdin and stdout are TTYs
    let stdin_is_tty = unsafe { libc::isatty(libc::STDIN_FILENO) == 1 };
    let stdout_is_tty = unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 };

    let is_tty = stdin_is_tty && stdout_is_tty;
    let has_term = std::env::var("TERM").is_ok();

    if is_tty && !has_term {
        tracing::debug!("detected TTY without TERM environment variable");
    }

    is_tty
}

/// Determines if the process is running in an interactive terminal that understands ANSI
/// escape sequences.
pub fn is_ansi_interactive_terminal() -> bool {
    is_interactive_terminal() && term_supports_ansi(std::env::var("TERM").ok().as_deref())
}

/// Returns whether the given `TERM` value describes an ANSI-capable terminal.
///
/// A missing `TERM` is treated as capable since most TTYs without it still render colors.
pub fn term_supports_ansi(term: Option<&str>) -> bool {
    !matches!(term, Some("dumb") | Some(""))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_supports_ansi() {
        assert!(term_supports_ansi(Some("xterm-256color")));
        assert!(term_supports_ansi(None));
        assert!(!term_supports_ansi(Some("dumb")));
        assert!(!term_supports_ansi(Some("")));
    }
}
