use std::fmt;

use crate::error::{Error, Result, SecurityError};

pub const DEFAULT_MAX_DEPTH: usize = 512;
pub const DEFAULT_MAX_SIZE: usize = 64 * 1024 * 1024; // 64MB
pub const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 8;

/// Configuration for parser limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth for elements, objects and arrays
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Keep XML comments as Comment children instead of dropping them
    pub retain_comments: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            retain_comments: false,
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_depth={}, max_size={}, retain_comments={}",
            self.max_depth, self.max_size, self.retain_comments
        )
    }
}

impl ParserConfig {
    pub fn with_retain_comments(mut self, retain: bool) -> Self {
        self.retain_comments = retain;
        self
    }

    pub fn validate_input_size(&self, input: &str) -> Result<()> {
        if input.len() > self.max_size {
            return Err(Error::new(SecurityError::MaxSizeExceeded {
                size: input.len(),
                max: self.max_size,
            }));
        }
        Ok(())
    }

    pub fn validate_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::new(SecurityError::MaxDepthExceeded(self.max_depth)));
        }
        Ok(())
    }
}

/// Output layout for the serializers
///
/// An `indent_spaces` of zero means compact output with no inserted
/// whitespace at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    pub indent_spaces: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_spaces: DEFAULT_INDENT,
        }
    }
}

impl FormatConfig {
    pub const fn compact() -> Self {
        Self { indent_spaces: 0 }
    }

    /// Pretty layout; zero or negative selects the default width, wide
    /// indents are capped at [`MAX_INDENT`].
    pub fn pretty(indent: i32) -> Self {
        let indent_spaces = match usize::try_from(indent) {
            Ok(0) | Err(_) => DEFAULT_INDENT,
            Ok(n) => n.min(MAX_INDENT),
        };
        Self { indent_spaces }
    }

    /// Zero or negative selects compact output.
    pub fn from_indent(indent: i32) -> Self {
        match usize::try_from(indent) {
            Ok(0) | Err(_) => Self::compact(),
            Ok(n) => Self {
                indent_spaces: n.min(MAX_INDENT),
            },
        }
    }

    pub const fn is_compact(&self) -> bool {
        self.indent_spaces == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_pretty_clamps_indent() {
        assert_eq!(FormatConfig::pretty(0).indent_spaces, 2);
        assert_eq!(FormatConfig::pretty(-4).indent_spaces, 2);
        assert_eq!(FormatConfig::pretty(1).indent_spaces, 1);
        assert_eq!(FormatConfig::pretty(8).indent_spaces, 8);
        assert_eq!(FormatConfig::pretty(20).indent_spaces, 8);
    }

    #[test]
    fn test_from_indent_selects_compact() {
        assert!(FormatConfig::from_indent(0).is_compact());
        assert!(FormatConfig::from_indent(-1).is_compact());
        assert_eq!(FormatConfig::from_indent(4).indent_spaces, 4);
        assert_eq!(FormatConfig::from_indent(99).indent_spaces, 8);
    }

    #[test]
    fn test_size_limit() {
        let config = ParserConfig {
            max_size: 4,
            ..ParserConfig::default()
        };
        assert!(config.validate_input_size("abcd").is_ok());
        let err = config.validate_input_size("abcde").err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::Security(SecurityError::MaxSizeExceeded { size: 5, max: 4 }))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig {
            max_depth: 2,
            ..ParserConfig::default()
        };
        assert!(config.validate_depth(2).is_ok());
        assert!(config.validate_depth(3).is_err());
    }
}
