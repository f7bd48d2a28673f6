//! Presentation-side style registry
//!
//! Hosts need one rendering resource per distinct style (a decoration
//! type, a brush, a cached escape sequence). The registry caches them by
//! style key; it belongs to the host, never to the markup core.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::markup::{DocumentHighlights, Style, StyleKey};

/// Cache of host resources keyed by style
#[derive(Debug)]
pub struct StyleRegistry<R> {
    entries: HashMap<StyleKey, R>,
}

impl<R> StyleRegistry<R> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Get the resource for `key`, creating it on first use
    pub fn get_or_create<F>(&mut self, key: &StyleKey, create: F) -> Result<&R>
    where
        F: FnOnce(&Style) -> Result<R>,
    {
        if !self.entries.contains_key(key) {
            let style = key
                .to_style()
                .ok_or_else(|| Error::Message(format!("malformed style key: {key}")))?;
            let resource = create(&style)?;
            tracing::trace!(%key, "created style resource");
            self.entries.insert(key.clone(), resource);
        }
        self.entries
            .get(key)
            .ok_or_else(|| Error::Message(format!("style resource missing: {key}")))
    }

    pub fn get(&self, key: &StyleKey) -> Option<&R> {
        self.entries.get(key)
    }

    /// Registered keys that the given highlights no longer use
    ///
    /// The host clears these resources' ranges before applying the new
    /// highlights.
    pub fn stale_keys(&self, highlights: &DocumentHighlights) -> Vec<&StyleKey> {
        let mut stale: Vec<_> = self
            .entries
            .keys()
            .filter(|key| !highlights.contains(key))
            .collect();
        stale.sort();
        stale
    }

    /// Every registered resource
    pub fn iter(&self) -> impl Iterator<Item = (&StyleKey, &R)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every resource so the host can release them
    pub fn dispose_all(&mut self) -> Vec<(StyleKey, R)> {
        self.entries.drain().collect()
    }
}

impl<R> Default for StyleRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{Highlighter, Rgb};

    #[test]
    fn test_get_or_create_once() {
        let mut registry = StyleRegistry::new();
        let key = Style::color(Rgb::WHITE).with_bold().key();
        let mut calls = 0;

        for _ in 0..3 {
            let resource = registry
                .get_or_create(&key, |style| {
                    calls += 1;
                    Ok(format!("{:?}/{}", style.color, style.bold))
                })
                .unwrap();
            assert_eq!(resource, "Some(Rgb { r: 255, g: 255, b: 255 })/true");
        }
        assert_eq!(calls, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_error_is_propagated() {
        let mut registry: StyleRegistry<()> = StyleRegistry::new();
        let key = Style::default().with_italic().key();
        let result = registry.get_or_create(&key, |_| Err(Error::Message("out of handles".into())));
        assert!(matches!(result, Err(Error::Message(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_stale_keys() {
        let mut registry = StyleRegistry::new();
        let red = Style::color(Rgb::new(0xFF, 0x55, 0x55)).key();
        let bold = Style::default().with_bold().key();
        registry.get_or_create(&red, |_| Ok(1)).unwrap();
        registry.get_or_create(&bold, |_| Ok(2)).unwrap();

        let doc = Highlighter::default().highlight_document("&chi");
        assert_eq!(registry.stale_keys(&doc), vec![&bold]);
    }

    #[test]
    fn test_dispose_all() {
        let mut registry = StyleRegistry::new();
        registry
            .get_or_create(&Style::default().with_underline().key(), |_| Ok(()))
            .unwrap();
        assert_eq!(registry.dispose_all().len(), 1);
        assert!(registry.is_empty());
    }
}
