//! Discord bot token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bot authentication token with masking. The value is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BotToken {
    value: String,
}

impl BotToken {
    /// Creates a token, returning `None` for blank input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().trim_start_matches("Bot ").to_string();

        if value.is_empty() || value.contains(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bot {}", self.value)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.value.chars().count();
        if len <= 10 {
            return "*".repeat(len);
        }

        let visible_prefix: String = self.value.chars().take(4).collect();
        let visible_suffix: String = self.value.chars().skip(len - 4).collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "MTIzNDU2Nzg5MDEyMzQ1Njc4OQ.XXXXXX.YYYYYYYYYYYYYYYYYYYYYYYYYYYY";

    #[test]
    fn test_blank_token_rejected() {
        assert!(BotToken::new("   ").is_none());
        assert!(BotToken::new("two words").is_none());
    }

    #[test]
    fn test_bot_prefix_stripped() {
        let token = BotToken::new(format!("Bot {RAW}")).unwrap();
        assert_eq!(token.as_str(), RAW);
        assert_eq!(token.authorization(), format!("Bot {RAW}"));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = BotToken::new(RAW).unwrap();
        let debug_output = format!("{token:?}");

        assert!(debug_output.contains("..."));
        assert!(!debug_output.contains(RAW));
    }

    #[test]
    fn test_masking_respects_char_boundaries() {
        let token = BotToken::new("aéééééééééééz").unwrap();

        assert_eq!(token.masked(), "aééé...éééz");
        assert!(!format!("{token:?}").contains(token.as_str()));

        let short = BotToken::new("aéééééééé").unwrap();
        assert_eq!(short.masked(), "*********");
    }
}
