use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors raised while decoding the RSS document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// A structural element on the `rss > channel` path is absent.
    #[error("Feed has no <{0}> element")]
    MissingElement(&'static str),

    /// An `<item>` lacks one of the fields every post needs.
    #[error("Feed item {item} is missing <{field}>")]
    MissingField { item: usize, field: &'static str },
}

/// One `<item>` of the channel, with the fields a post is built from.
///
/// Values are taken verbatim from the feed after XML unescaping and
/// whitespace trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// `<dc:creator>`
    pub creator: String,
    /// `<pubDate>`, not parsed
    pub pub_date: String,
    /// `<content:encoded>`, the full HTML body
    pub content: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Link,
    Creator,
    PubDate,
    Content,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Self::Title),
            b"link" => Some(Self::Link),
            b"dc:creator" => Some(Self::Creator),
            b"pubDate" => Some(Self::PubDate),
            b"content:encoded" => Some(Self::Content),
            _ => None,
        }
    }
}

#[derive(Default)]
struct ItemBuilder {
    title: Option<String>,
    link: Option<String>,
    creator: Option<String>,
    pub_date: Option<String>,
    content: Option<String>,
}

impl ItemBuilder {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Creator => &mut self.creator,
            Field::PubDate => &mut self.pub_date,
            Field::Content => &mut self.content,
        }
    }

    /// Repeated elements keep the first value seen.
    fn set(&mut self, field: Field, value: String) {
        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    fn build(self, item: usize) -> Result<FeedItem, ParseError> {
        let require = |value: Option<String>, field: &'static str| {
            value.ok_or(ParseError::MissingField { item, field })
        };

        Ok(FeedItem {
            title: require(self.title, "title")?,
            link: require(self.link, "link")?,
            creator: require(self.creator, "dc:creator")?,
            pub_date: require(self.pub_date, "pubDate")?,
            content: require(self.content, "content:encoded")?,
        })
    }
}

/// Decodes an RSS 2.0 document into its items, in document order.
///
/// Only `<item>` elements sitting directly at `rss > channel > item` are
/// collected. A channel with a single item still yields a one-element
/// vector, and a channel without items yields an empty one.
///
/// # Errors
///
/// - [`ParseError::Xml`] for malformed or truncated XML
/// - [`ParseError::MissingElement`] when `<rss>` or `<channel>` is absent
/// - [`ParseError::MissingField`] for the first item lacking a field; one bad
///   item fails the whole feed
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>, ParseError> {
    // SEC-002: quick-xml (0.37) never expands <!ENTITY> declarations; unknown
    // entity references surface as unescape errors below.
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut seen_rss = false;
    let mut seen_channel = false;

    let mut items = Vec::new();
    let mut current: Option<ItemBuilder> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                match path.len() {
                    0 if name == b"rss" => seen_rss = true,
                    1 if seen_rss && name == b"channel" => seen_channel = true,
                    2 if is_channel(&path) && name == b"item" => {
                        current = Some(ItemBuilder::default());
                    }
                    3 if current.is_some() => {
                        field = Field::from_tag(&name);
                        text.clear();
                    }
                    _ => {}
                }
                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                let qname = e.name();
                let name = qname.as_ref();
                if path.len() == 2 && is_channel(&path) && name == b"item" {
                    items.push(ItemBuilder::default().build(items.len())?);
                } else if path.len() == 3 {
                    if let (Some(builder), Some(f)) = (current.as_mut(), Field::from_tag(name)) {
                        builder.set(f, String::new());
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if field.is_some() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| ParseError::Xml(err.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(e)) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                match path.len() {
                    4 => {
                        if let (Some(builder), Some(f)) = (current.as_mut(), field.take()) {
                            builder.set(f, std::mem::take(&mut text));
                        }
                    }
                    3 => {
                        if let Some(builder) = current.take() {
                            items.push(builder.build(items.len())?);
                        }
                    }
                    _ => {}
                }
                path.pop();
            }
            Ok(Event::Eof) => {
                if !path.is_empty() {
                    return Err(ParseError::Xml(format!(
                        "unexpected end of document inside <{}>",
                        String::from_utf8_lossy(&path[path.len() - 1])
                    )));
                }
                break;
            }
            Err(e) => {
                return Err(ParseError::Xml(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !seen_rss {
        return Err(ParseError::MissingElement("rss"));
    }
    if !seen_channel {
        return Err(ParseError::MissingElement("channel"));
    }

    Ok(items)
}

fn is_channel(path: &[Vec<u8>]) -> bool {
    path.len() == 2 && path[0] == b"rss" && path[1] == b"channel"
}
