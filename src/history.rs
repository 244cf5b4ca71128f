//! Navigation history mirroring the displayed position.
//!
//! Every pushed position becomes an entry addressed as `/?fen=<position>`.
//! Moving back or forward hands out the stored entry; restoring it must not
//! push again, otherwise back/forward would loop.

use url::form_urlencoded;

use crate::canonical::CanonicalFen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Position active when the entry was pushed. Entries created outside
    /// the explorer (e.g. the initial page load) carry only a URL.
    pub position: Option<CanonicalFen>,
    pub url: String,
}

impl HistoryEntry {
    pub fn tagged(position: CanonicalFen) -> Self {
        Self {
            url: position_url(&position),
            position: Some(position),
        }
    }

    pub fn untagged(url: impl Into<String>) -> Self {
        Self {
            position: None,
            url: url.into(),
        }
    }

    /// Raw position to restore: the tag, else the `fen` query parameter.
    pub fn fen(&self) -> Option<String> {
        match &self.position {
            Some(position) => Some(position.to_string()),
            None => fen_from_url(&self.url),
        }
    }
}

pub fn position_url(position: &CanonicalFen) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("fen", position.as_str())
        .finish();
    format!("/?{query}")
}

/// Extract the `fen` query parameter. Underscores stand for spaces.
pub fn fen_from_url(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "fen")
        .map(|(_, value)| value.replace('_', " "))
        .filter(|fen| !fen.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct HistorySync {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl Default for HistorySync {
    fn default() -> Self {
        Self::new(HistoryEntry::untagged("/"))
    }
}

// Never empty: the initial entry is always present.
#[allow(clippy::len_without_is_empty)]
impl HistorySync {
    pub fn new(initial: HistoryEntry) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Record a position change. Only `push` creates an entry; forward
    /// entries are discarded when it does.
    pub fn on_position_change(&mut self, position: &CanonicalFen, push: bool) {
        if !push {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry::tagged(position.clone()));
        self.cursor = self.entries.len() - 1;
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn back(&mut self) -> Option<HistoryEntry> {
        self.cursor = self.cursor.checked_sub(1)?;
        Some(self.current().clone())
    }

    pub fn forward(&mut self) -> Option<HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonicalize;

    fn fen(s: &str) -> CanonicalFen {
        canonicalize(s).unwrap()
    }

    #[test]
    fn url_round_trip() {
        let position = fen("8/8/8/8/8/4k3/4p3/4K3 b - - 0 1");
        let url = position_url(&position);
        assert_eq!(url, "/?fen=8%2F8%2F8%2F8%2F8%2F4k3%2F4p3%2F4K3+b+-+-+0+1");
        assert_eq!(fen_from_url(&url).as_deref(), Some(position.as_str()));
    }

    #[test]
    fn underscores_and_missing_query() {
        assert_eq!(
            fen_from_url("/?fen=4k3/8/8/8/8/8/8/4K3_w_-_-_0_1").as_deref(),
            Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1")
        );
        assert_eq!(fen_from_url("/"), None);
        assert_eq!(fen_from_url("/?xhr=1"), None);
        assert_eq!(fen_from_url("/?fen="), None);
    }

    #[test]
    fn push_only_when_asked() {
        let mut history = HistorySync::default();
        history.on_position_change(&fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1"), false);
        assert_eq!(history.len(), 1);
        history.on_position_change(&fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1"), true);
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.current().position,
            Some(fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1"))
        );
    }

    #[test]
    fn back_forward_and_truncation() {
        let a = fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1");
        let b = fen("4k3/8/8/8/8/8/8/4K2R b - - 0 1");
        let c = fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");

        let mut history = HistorySync::default();
        history.on_position_change(&a, true);
        history.on_position_change(&b, true);

        assert_eq!(history.back().unwrap().position, Some(a.clone()));
        assert_eq!(history.back().unwrap().position, None);
        assert_eq!(history.back(), None);
        assert_eq!(history.forward().unwrap().position, Some(a.clone()));

        history.on_position_change(&c, true);
        assert_eq!(history.len(), 3);
        assert_eq!(history.forward(), None);
        assert_eq!(history.back().unwrap().fen().as_deref(), Some(a.as_str()));
    }
}
