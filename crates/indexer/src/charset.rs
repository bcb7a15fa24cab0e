use crate::error::{IndexerError, Result};

/// Character encoding a document file is read with.
///
/// Validated fail-fast at configuration time; an unknown name is a
/// configuration error before any I/O happens. Only UTF-8 is shipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
}

impl Charset {
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            other => Err(IndexerError::InvalidConfig(format!(
                "unsupported charset: {other}"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
        }
    }

    /// Decode raw file bytes. Failures are content errors, handled
    /// under the same abort/skip policy as parse failures.
    pub fn decode(&self, bytes: Vec<u8>) -> std::result::Result<String, std::string::FromUtf8Error> {
        match self {
            Self::Utf8 => String::from_utf8(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utf8_spellings() {
        assert_eq!(Charset::parse("utf-8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::parse("UTF-8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::parse(" utf8 ").unwrap(), Charset::Utf8);
    }

    #[test]
    fn rejects_unknown_charset() {
        let err = Charset::parse("latin-1").unwrap_err();
        assert!(matches!(err, IndexerError::InvalidConfig(_)));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert!(Charset::Utf8.decode(vec![0xff, 0xfe]).is_err());
        assert_eq!(Charset::Utf8.decode(b"ok".to_vec()).unwrap(), "ok");
    }
}
