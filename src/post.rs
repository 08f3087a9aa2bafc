use serde::Serialize;

use crate::content::summarize;
use crate::feed::FeedItem;
use crate::util::strip_query;

/// One entry of the generated data file.
///
/// Field order is the key order in the YAML output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    /// Article URL without its query string
    pub link: String,
    /// Author as attributed by the feed
    pub poster: String,
    /// Publication date exactly as the feed wrote it
    pub date: String,
    /// Plain-text summary, at most 270 characters
    pub text: String,
}

impl From<FeedItem> for Post {
    fn from(item: FeedItem) -> Self {
        let text = summarize(&item.content);
        Self {
            link: strip_query(&item.link).to_string(),
            title: item.title,
            poster: item.creator,
            date: item.pub_date,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_feed_item() {
        let item = FeedItem {
            title: "Intro to RAPIDS".to_string(),
            link: "https://medium.com/x/intro?foo=1".to_string(),
            creator: "Jane Doe".to_string(),
            pub_date: "Mon, 01 Jan 2024 00:00:00 GMT".to_string(),
            content: "<p>By: Jane Doe</p><p>RAPIDS accelerates data science.</p>".to_string(),
        };

        let post = Post::from(item);
        assert_eq!(
            post,
            Post {
                title: "Intro to RAPIDS".to_string(),
                link: "https://medium.com/x/intro".to_string(),
                poster: "Jane Doe".to_string(),
                date: "Mon, 01 Jan 2024 00:00:00 GMT".to_string(),
                text: "RAPIDS accelerates data science....".to_string(),
            }
        );
    }

    #[test]
    fn test_post_without_paragraphs_has_empty_text() {
        let item = FeedItem {
            title: "Gallery".to_string(),
            link: "https://medium.com/x/gallery".to_string(),
            creator: "A".to_string(),
            pub_date: "Tue, 02 Jan 2024 00:00:00 GMT".to_string(),
            content: "<figure><img src=\"a.png\"></figure>".to_string(),
        };

        let post = Post::from(item);
        assert_eq!(post.link, "https://medium.com/x/gallery");
        assert_eq!(post.text, "");
    }
}
