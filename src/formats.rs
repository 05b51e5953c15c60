use serde::{Deserialize, Deserializer};

/// One page of the `commentThreads.list` response.
///
/// Items are kept as raw JSON values so the fetcher persists every field the
/// API returns, not only the ones the normalizer reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadPage {
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub id: Option<String>,
    pub snippet: CommentThreadSnippet,
    #[serde(default)]
    pub replies: Option<CommentReplies>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentReplies {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub author_channel_id: Option<AuthorChannelId>,
    #[serde(default)]
    pub text_original: Option<String>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorChannelId {
    #[serde(default)]
    pub value: Option<String>,
}

impl CommentThread {
    /// Top-level comment first, then replies in the order the API returned them.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        std::iter::once(&self.snippet.top_level_comment).chain(
            self.replies
                .iter()
                .flat_map(|replies| replies.comments.iter()),
        )
    }
}

pub const CSV_HEADER: [&str; 7] = [
    "id",
    "author_id",
    "text",
    "likes",
    "published_at",
    "updated_at",
    "parent_id",
];

/// Written in place of any optional column whose source field is absent.
pub const NULL_PLACEHOLDER: &str = "NULL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub likes: String,
    pub published_at: String,
    pub updated_at: String,
    pub parent_id: String,
}

pub fn or_null<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NULL_PLACEHOLDER.to_owned(), |v| v.to_string())
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        let snippet = &comment.snippet;
        Self {
            id: comment.id.clone(),
            author_id: or_null(
                snippet
                    .author_channel_id
                    .as_ref()
                    .and_then(|author| author.value.as_deref()),
            ),
            text: or_null(snippet.text_original.as_deref()),
            likes: or_null(snippet.like_count),
            published_at: or_null(snippet.published_at.as_deref()),
            updated_at: or_null(snippet.updated_at.as_deref()),
            parent_id: or_null(snippet.parent_id.as_deref()),
        }
    }
}

impl CommentRow {
    pub fn as_record(&self) -> [&str; 7] {
        [
            self.id.as_str(),
            self.author_id.as_str(),
            self.text.as_str(),
            self.likes.as_str(),
            self.published_at.as_str(),
            self.updated_at.as_str(),
            self.parent_id.as_str(),
        ]
    }
}
