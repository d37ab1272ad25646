// src/crawl/extract.rs
// =============================================================================
// Pulls candidate links out of an HTML page.
//
// We use the `scraper` crate to parse the HTML and select every <a> tag
// that has an href, then the `url` crate to resolve each href against the
// URL of the page it was found on (exactly like a browser would).
//
// No filtering happens here: mailto: links, external hosts and so on all
// come out. Deciding what to follow is the crawler's job (see classify.rs).
//
// Rust concepts:
// - Iterators: PageLinks::iter() is lazy, and can be called again to
//   restart from the first anchor
// - Lifetimes: the iterator borrows the parsed document ('_)
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

/// A parsed page, ready to yield absolute link URLs.
pub struct PageLinks {
    base: Url,
    document: Html,
    anchors: Selector,
}

impl PageLinks {
    /// Parses `html`. Relative hrefs resolve against `page_url`.
    pub fn parse(page_url: &Url, html: &str) -> Self {
        Self {
            base: page_url.clone(),
            document: Html::parse_document(html),
            // Constant selector, known to be valid
            anchors: Selector::parse("a[href]").expect("static anchor selector"),
        }
    }

    /// Absolute URLs for every anchor, in document order.
    ///
    /// Empty hrefs are skipped. Hrefs are trimmed before resolution and
    /// any href that cannot be resolved is silently dropped.
    pub fn iter(&self) -> impl Iterator<Item = Url> + '_ {
        self.document
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| !href.is_empty())
            .filter_map(move |href| self.base.join(href.trim()).ok())
    }
}

/// Convenience wrapper: parse and collect in one go.
pub fn extract_links(page_url: &Url, html: &str) -> Vec<Url> {
    PageLinks::parse(page_url, html).iter().collect()
}
