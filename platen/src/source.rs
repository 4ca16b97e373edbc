/// Where practice text comes from, and where the untyped rest goes back to.
///
/// `load` returns raw bytes; they are normalized by the session, so a source
/// never has to care about line endings or typography.
pub trait TextSource {
    type Error: std::error::Error;

    fn load(&mut self) -> Result<Vec<u8>, Self::Error>;

    /// Persist the part of the text that was not typed
    fn save_remainder(&mut self, remainder: &[u8]) -> Result<(), Self::Error>;
}

/// In-memory source, handy for tests and piped input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    text: Vec<u8>,
    remainder: Option<Vec<u8>>,
}

impl StaticSource {
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Self {
            text: text.into(),
            remainder: None,
        }
    }

    /// The last remainder saved, if any
    pub fn remainder(&self) -> Option<&[u8]> {
        self.remainder.as_deref()
    }
}

impl TextSource for StaticSource {
    type Error = std::convert::Infallible;

    fn load(&mut self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.text.clone())
    }

    fn save_remainder(&mut self, remainder: &[u8]) -> Result<(), Self::Error> {
        self.remainder = Some(remainder.to_vec());
        Ok(())
    }
}
