//! Article content processing.
//!
//! Medium ships each article's full HTML body in `<content:encoded>`; this
//! module reduces it to the short plain-text blurb shown on the site.

mod summary;

pub use summary::{collect_paragraphs, is_byline, summarize, ParagraphCollector, SUMMARY_CHARS};
