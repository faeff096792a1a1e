//! Color and formatting utilities for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
}

/// Apply color to text when `enabled`, otherwise return it unchanged
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    paint(text, color, supports_formatting())
}

/// Check if the current environment supports ANSI colors and emojis
pub fn supports_formatting() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Disable formatting when running tests
    if cfg!(test) || std::env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    match std::env::var("TERM") {
        Ok(term) => !(term == "dumb" || term.is_empty()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_paint() {
        assert_eq!(paint("test", Colors::BRIGHT_RED, false), "test");
        assert_eq!(
            paint("test", Colors::BRIGHT_RED, true),
            "\x1b[91mtest\x1b[0m"
        );
    }

    #[test]
    #[serial]
    fn test_colorize_with_no_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        let result = colorize("test", Colors::BRIGHT_GREEN);
        assert_eq!(result, "test");
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_supports_formatting_disabled_under_test() {
        let original_term = std::env::var("TERM").ok();
        unsafe {
            std::env::set_var("TERM", "xterm-256color");
        }

        // cfg!(test) is true here
        assert!(!supports_formatting());

        unsafe {
            match original_term {
                Some(val) => std::env::set_var("TERM", val),
                None => std::env::remove_var("TERM"),
            }
        }
    }
}
