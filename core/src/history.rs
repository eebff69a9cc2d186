use crate::*;

/// Read and replace access to the page address.
///
/// The browser implementation lives in the web crate, keeping every DOM call out
/// of the codec.
pub trait UrlAccess {
    fn href(&self) -> String;

    /// Replaces the current history entry without navigating.
    fn replace_href(&mut self, href: &str) -> Result<()>;
}

/// Writes `state` into the query of the current address.
pub fn store(state: &BoardState, url: &mut impl UrlAccess) -> Result<()> {
    let href = query::replace_query(&url.href(), &state.to_query())?;
    log::debug!("replacing url: {}", href);
    url.replace_href(&href)
}

/// Reads the board and counters from the current address.
pub fn load(url: &impl UrlAccess, size: Coord2) -> Decoded {
    let decoded = match query::parse_href(&url.href()) {
        Ok(href) => BoardState::from_query(href.query().unwrap_or_default(), size),
        Err(err) => Decoded {
            state: BoardState::new(size),
            restored: false,
            error: Some(err),
        },
    };
    if let Some(err) = &decoded.error {
        log::warn!("could not fully restore board from url: {}", err);
    }
    decoded
}

/// In-memory address bar that keeps every replaced href.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryUrl {
    current: String,
    replaced: Vec<String>,
}

impl MemoryUrl {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            current: href.into(),
            replaced: Vec::new(),
        }
    }

    pub fn replaced(&self) -> &[String] {
        &self.replaced
    }
}

impl UrlAccess for MemoryUrl {
    fn href(&self) -> String {
        self.current.clone()
    }

    fn replace_href(&mut self, href: &str) -> Result<()> {
        self.current = href.to_string();
        self.replaced.push(self.current.clone());
        Ok(())
    }
}
