//! Resolution token parsing and target-height mapping.
//!
//! The CLI accepts one of four named resolution presets. Each preset maps
//! to a fixed target height handed to the encoder; the width follows from
//! the source aspect ratio (the encode keeps display aspect).

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// A named target resolution accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    R480p,
    R720p,
    R1080p,
    R2160p,
}

impl Resolution {
    /// Target height in pixels passed to the encoder.
    #[must_use]
    pub const fn height(self) -> u32 {
        match self {
            Resolution::R480p => 480,
            Resolution::R720p => 720,
            Resolution::R1080p => 1080,
            Resolution::R2160p => 2160,
        }
    }

    /// The canonical command-line token for this resolution.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Resolution::R480p => "480p",
            Resolution::R720p => "720p",
            Resolution::R1080p => "1080p",
            Resolution::R2160p => "2160p",
        }
    }

    /// All accepted tokens, in ascending height order. Used to build the
    /// validation error message.
    #[must_use]
    pub const fn accepted_tokens() -> [&'static str; 4] {
        ["480p", "720p", "1080p", "2160p"]
    }

    fn invalid(token: &str) -> CoreError {
        CoreError::InvalidResolution {
            token: token.to_string(),
            accepted: Self::accepted_tokens().join(", "),
        }
    }
}

impl FromStr for Resolution {
    type Err = CoreError;

    /// Parses a resolution token, case-insensitively.
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "480p" => Ok(Resolution::R480p),
            "720p" => Ok(Resolution::R720p),
            "1080p" => Ok(Resolution::R1080p),
            "2160p" => Ok(Resolution::R2160p),
            _ => Err(Resolution::invalid(s)),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_accepted_tokens() {
        assert_eq!("480p".parse::<Resolution>().unwrap(), Resolution::R480p);
        assert_eq!("720p".parse::<Resolution>().unwrap(), Resolution::R720p);
        assert_eq!("1080p".parse::<Resolution>().unwrap(), Resolution::R1080p);
        assert_eq!("2160p".parse::<Resolution>().unwrap(), Resolution::R2160p);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("720P".parse::<Resolution>().unwrap(), Resolution::R720p);
        assert_eq!("1080P".parse::<Resolution>().unwrap(), Resolution::R1080p);
    }

    #[test]
    fn heights_match_tokens() {
        assert_eq!(Resolution::R480p.height(), 480);
        assert_eq!(Resolution::R720p.height(), 720);
        assert_eq!(Resolution::R1080p.height(), 1080);
        assert_eq!(Resolution::R2160p.height(), 2160);
    }

    #[test]
    fn rejects_unknown_tokens_listing_accepted_values() {
        let err = "540p".parse::<Resolution>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("540p"));
        for token in Resolution::accepted_tokens() {
            assert!(message.contains(token), "missing {token} in: {message}");
        }
    }
}
