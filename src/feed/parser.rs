use roxmltree::{Document, ParsingOptions};
use thiserror::Error;

/// Which attempt produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// The whole body parsed as-is.
    Direct,
    /// The body parsed from `offset`, where `anchor` was found.
    Fallback { offset: usize, anchor: Anchor },
}

/// Markers the fallback looks for when the body has a non-XML preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `<?xml`, matched case-sensitively.
    Prolog,
    /// `<rss`, matched ASCII case-insensitively.
    RssRoot,
}

/// A feed document from exactly one successful parse attempt.
pub struct FeedDocument<'input> {
    doc: Document<'input>,
    stage: ParseStage,
}

impl<'input> FeedDocument<'input> {
    pub fn document(&self) -> &Document<'input> {
        &self.doc
    }

    pub fn stage(&self) -> ParseStage {
        self.stage
    }
}

impl std::fmt::Debug for FeedDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedDocument")
            .field("root", &self.doc.root_element().tag_name().name())
            .field("stage", &self.stage)
            .finish()
    }
}

/// Both parse attempts failed (or no anchor existed for the second).
#[derive(Debug, Error)]
#[error("XML parse error: {direct}")]
pub struct XmlParseError {
    /// Error from parsing the whole body.
    pub direct: roxmltree::Error,
    /// Anchor offset and error from the fallback attempt, if one was made.
    pub fallback: Option<(usize, roxmltree::Error)>,
}

/// Parses a feed body, recovering from a non-XML preamble.
///
/// First the whole body is parsed strictly. If that fails, the body is
/// searched for `<?xml`, or failing that `<rss` in any letter case, and the
/// text from that position on is parsed strictly once more. The returned
/// document records which attempt succeeded.
///
/// A DOCTYPE is accepted, as older RSS 0.91 feeds carry one. External DTDs
/// and external entities are never loaded; only internal entities expand.
///
/// # Errors
///
/// Returns [`XmlParseError`] carrying both attempts' diagnostics when neither
/// attempt yields a document.
pub fn parse_feed(body: &str) -> Result<FeedDocument<'_>, XmlParseError> {
    let direct = match attempt(body) {
        Ok(doc) => {
            return Ok(FeedDocument {
                doc,
                stage: ParseStage::Direct,
            })
        }
        Err(e) => e,
    };

    tracing::debug!(error = %direct, "Direct XML parse failed, looking for a later document start");

    let Some((offset, anchor)) = find_anchor(body) else {
        return Err(XmlParseError {
            direct,
            fallback: None,
        });
    };

    match attempt(&body[offset..]) {
        Ok(doc) => {
            tracing::debug!(offset = offset, anchor = ?anchor, "Parsed feed from fallback offset");
            Ok(FeedDocument {
                doc,
                stage: ParseStage::Fallback { offset, anchor },
            })
        }
        Err(e) => Err(XmlParseError {
            direct,
            fallback: Some((offset, e)),
        }),
    }
}

/// One strict parse.
fn attempt(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

/// Finds where a well-formed document might start inside a noisy body.
fn find_anchor(body: &str) -> Option<(usize, Anchor)> {
    if let Some(pos) = body.find("<?xml") {
        return Some((pos, Anchor::Prolog));
    }
    // A match starts on '<', which is ASCII, so `pos` is a char boundary
    body.as_bytes()
        .windows(4)
        .position(|w| w.eq_ignore_ascii_case(b"<rss"))
        .map(|pos| (pos, Anchor::RssRoot))
}
