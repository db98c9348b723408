use chrono::{DateTime, Utc};
use roxmltree::Node;
use serde::Serialize;

use crate::feed::parser::FeedDocument;
use crate::util::{truncate_bytes, validate_link};

/// Bytes of item markup kept for a skipped-item diagnostic.
const SKIPPED_EXCERPT_BYTES: usize = 240;

/// One search result ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub title: String,
    pub link: String,
    /// Publisher name from the item's `<source>` element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// `<pubDate>`, when present and valid RFC 2822.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

/// How the candidate item nodes were located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStrategy {
    /// `<item>` children of the root's first `<channel>`.
    ChannelItems,
    /// Every `<item>` anywhere in the document.
    AnyItem,
}

/// A candidate node that did not yield a usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Position among the candidate nodes, 0-based.
    pub index: usize,
    pub reason: String,
    /// Start of the item's markup.
    pub excerpt: String,
}

/// Everything extraction learned from a document.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub items: Vec<ResultItem>,
    pub skipped: Vec<SkippedItem>,
    pub strategy: ItemStrategy,
    /// Number of candidate nodes the strategy matched, valid or not.
    pub candidates: usize,
}

/// Extracts result items from a parsed feed.
///
/// Candidates come from `channel/item` under the root element. Only when that
/// path matches nothing are `item` elements searched for anywhere in the
/// document; the two sets are never merged.
///
/// Candidates without a resolvable link are skipped and reported in
/// [`Extraction::skipped`] without affecting the rest.
///
/// # Arguments
///
/// * `feed` - A document from [`parse_feed`](crate::feed::parse_feed), from
///   either the direct or the fallback attempt
///
/// # Returns
///
/// An [`Extraction`] with:
/// - `items` - Valid items in document order, possibly empty
/// - `skipped` - Rejected candidates with their position, reason and a markup excerpt
/// - `strategy` - Which of the two node selections was used
/// - `candidates` - How many nodes that selection matched
pub fn extract_items(feed: &FeedDocument<'_>) -> Extraction {
    let doc = feed.document();

    let mut strategy = ItemStrategy::ChannelItems;
    let mut nodes = channel_items(doc.root_element());
    if nodes.is_empty() {
        strategy = ItemStrategy::AnyItem;
        nodes = doc
            .descendants()
            .filter(|n| n.is_element() && n.has_tag_name("item"))
            .collect();
    }

    let candidates = nodes.len();
    let mut items = Vec::with_capacity(candidates);
    let mut skipped = Vec::new();

    for (index, node) in nodes.into_iter().enumerate() {
        match to_result_item(node) {
            Ok(item) => items.push(item),
            Err(reason) => {
                let markup = &doc.input_text()[node.range()];
                skipped.push(SkippedItem {
                    index,
                    reason,
                    excerpt: truncate_bytes(markup, SKIPPED_EXCERPT_BYTES).to_string(),
                });
            }
        }
    }

    Extraction {
        items,
        skipped,
        strategy,
        candidates,
    }
}

fn channel_items<'a, 'input>(root: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    match child_element(root, "channel") {
        Some(channel) => channel
            .children()
            .filter(|n| n.is_element() && n.has_tag_name("item"))
            .collect(),
        None => Vec::new(),
    }
}

fn to_result_item(node: Node<'_, '_>) -> Result<ResultItem, String> {
    let link = child_text(node, "link").ok_or_else(|| "missing <link>".to_string())?;
    validate_link(&link).map_err(|e| e.to_string())?;

    let title = child_text(node, "title").unwrap_or_else(|| link.clone());
    let source = child_text(node, "source");
    let published = child_text(node, "pubDate")
        .and_then(|raw| DateTime::parse_from_rfc2822(&raw).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Ok(ResultItem {
        title,
        link,
        source,
        published,
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.has_tag_name(name))
}

/// Text content of the first child element called `name`.
///
/// Returns `None` when the child is absent or holds only whitespace; absence
/// is never papered over with an empty string.
fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    let child = child_element(node, name)?;
    let text: String = child
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
