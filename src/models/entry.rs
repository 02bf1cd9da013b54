//! A borrow-level view over a single `<item>` element of a Torznab feed.

use std::collections::HashSet;

use roxmltree::{Document, Node};

/// Local name of the namespaced Torznab attribute element.
const ATTR_ELEMENT: &str = "attr";

/// Attribute name carrying category ids.
const CATEGORY_ATTR: &str = "category";

/// One `<item>` element of a fetched feed document.
///
/// This is a thin wrapper over a `roxmltree` node. It borrows the parsed
/// document and is only valid for the duration of one poll cycle.
#[derive(Debug, Clone, Copy)]
pub struct FeedEntry<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> FeedEntry<'a, 'input> {
    /// Wraps an already located `<item>` node.
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// Collects every `<item>` element of the document, in document order.
    pub fn all(doc: &'a Document<'input>) -> Vec<Self> {
        doc.descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "item")
            .map(Self::new)
            .collect()
    }

    /// The raw `<guid>` text, if present and non-empty.
    pub fn guid(&self) -> Option<&'a str> {
        self.tag_text("guid").filter(|t| !t.is_empty())
    }

    /// The `<title>` text, if present.
    pub fn title(&self) -> Option<&'a str> {
        self.tag_text("title")
    }

    /// The `<link>` text, if present.
    pub fn link(&self) -> Option<&'a str> {
        self.tag_text("link")
    }

    /// Returns the text of the first element reachable from this item by
    /// walking `path`, a `/`-separated sequence of element names.
    ///
    /// Namespace prefixes are ignored: `jackettindexer` matches a
    /// `<jackettindexer>` element in any namespace.
    pub fn tag_text(&self, path: &str) -> Option<&'a str> {
        let mut current = self.node;
        for segment in path.split('/') {
            current = current
                .children()
                .find(|n| n.is_element() && n.tag_name().name() == segment)?;
        }
        current.text()
    }

    /// Collects the `value` of every namespaced `attr` descendant whose
    /// `name` attribute equals `name`, in document order.
    pub fn attr_values(&self, name: &str) -> Vec<&'a str> {
        self.node
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == ATTR_ELEMENT)
            .filter(|n| n.attribute("name") == Some(name))
            .filter_map(|n| n.attribute("value"))
            .collect()
    }

    /// The set of category ids declared by this entry.
    pub fn categories(&self) -> HashSet<&'a str> {
        self.attr_values(CATEGORY_ATTR).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:torznab="http://torznab.com/schemas/2015/feed">
  <channel>
    <title>Indexer</title>
    <item>
      <title>Some.Release.1080p</title>
      <guid>https://indexer.example/details?id=77&amp;apikey=k</guid>
      <link>https://indexer.example/get/77</link>
      <nested><tag>deep value</tag></nested>
      <torznab:attr name="category" value="5040" />
      <torznab:attr name="category" value="5000" />
      <torznab:attr name="seeders" value="12" />
    </item>
  </channel>
</rss>"#;

    fn with_entry(f: impl FnOnce(FeedEntry<'_, '_>)) {
        let doc = Document::parse(ITEM_XML).unwrap();
        let entries = FeedEntry::all(&doc);
        assert_eq!(entries.len(), 1);
        f(entries[0]);
    }

    #[test]
    fn reads_basic_tags() {
        with_entry(|entry| {
            assert_eq!(entry.title(), Some("Some.Release.1080p"));
            assert_eq!(entry.guid(), Some("https://indexer.example/details?id=77&apikey=k"));
            assert_eq!(entry.link(), Some("https://indexer.example/get/77"));
        });
    }

    #[test]
    fn walks_nested_paths() {
        with_entry(|entry| {
            assert_eq!(entry.tag_text("nested/tag"), Some("deep value"));
            assert_eq!(entry.tag_text("nested/missing"), None);
            assert_eq!(entry.tag_text("absent"), None);
        });
    }

    #[test]
    fn collects_attr_values_in_document_order() {
        with_entry(|entry| {
            assert_eq!(entry.attr_values("category"), vec!["5040", "5000"]);
            assert_eq!(entry.attr_values("seeders"), vec!["12"]);
            assert!(entry.attr_values("grabs").is_empty());
        });
    }

    #[test]
    fn categories_are_a_set() {
        with_entry(|entry| {
            let categories = entry.categories();
            assert!(categories.contains("5040"));
            assert!(categories.contains("5000"));
            assert_eq!(categories.len(), 2);
        });
    }

    #[test]
    fn missing_guid_is_none() {
        let doc = Document::parse("<rss><channel><item><title>t</title></item></channel></rss>")
            .unwrap();
        let entries = FeedEntry::all(&doc);
        assert_eq!(entries[0].guid(), None);
    }

    #[test]
    fn all_finds_items_anywhere_in_document_order() {
        let doc = Document::parse(
            "<rss><channel><item><guid>a</guid></item><item><guid>b</guid></item></channel></rss>",
        )
        .unwrap();
        let entries = FeedEntry::all(&doc);
        let guids: Vec<_> = entries.iter().filter_map(|e| e.guid()).collect();
        assert_eq!(guids, vec!["a", "b"]);
    }
}
