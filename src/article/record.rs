use chrono::NaiveDate;

/// One article as extracted from its page
///
/// `url` and `id` are known up front; the remaining fields stay `None` until
/// the article page has been fetched and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Sequential number within a crawl run, starting at 1
    pub id: u32,

    /// Address of the article page
    pub url: String,

    /// Headline
    pub title: Option<String>,

    /// Byline, taken from the last paragraph of the article body
    pub author: Option<String>,

    /// Publication date
    pub date: Option<NaiveDate>,

    /// Body paragraphs joined by newlines
    pub text: Option<String>,
}

impl Article {
    /// Creates an empty record for the article at `url`
    pub fn new(url: impl Into<String>, id: u32) -> Self {
        Self {
            id,
            url: url.into(),
            title: None,
            author: None,
            date: None,
            text: None,
        }
    }

    /// True once every extracted field has been filled
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.author.is_some() && self.date.is_some() && self.text.is_some()
    }

    /// File name used when persisting the raw text
    pub fn raw_file_name(&self) -> String {
        format!("{}_raw.txt", self.id)
    }
}
