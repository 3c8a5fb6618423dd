use uuid::Uuid;

use crate::stored_object;

/// Lifecycle of a draft record. A draft is only ever minted by a successful
/// generation; `Failed` marks a generation whose content could not be
/// persisted.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Created,
    Draft,
    Failed,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Created => "created",
            DraftStatus::Draft => "draft",
            DraftStatus::Failed => "failed",
        }
    }
}

stored_object!(Draft, "draft", {
    status: DraftStatus,
    word_count: usize,
    character_count: usize,
    model: String,
    input_tokens: u32,
    output_tokens: u32,
    storage_location: String
});

impl Draft {
    /// Mint a new draft record for freshly generated content. The identifier
    /// and timestamps are set here, once; counts are derived from the content
    /// and never recomputed.
    pub fn new(content: &str, model: String, input_tokens: u32, output_tokens: u32) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let storage_location = Self::storage_location_for(&id, now);

        Self {
            id,
            created_at: now,
            updated_at: now,
            status: DraftStatus::Created,
            word_count: content.split_whitespace().count(),
            character_count: content.chars().count(),
            model,
            input_tokens,
            output_tokens,
            storage_location,
        }
    }

    /// Deterministic blob location, partitioned by creation date. Retrieval
    /// reconstructs it from the record without a second lookup.
    pub fn storage_location_for(id: &str, created_at: DateTime<Utc>) -> String {
        format!("drafts/{}/{}.md", created_at.format("%Y-%m-%d"), id)
    }

    /// Parse the draft identifier back out of a blob location. Returns `None`
    /// for locations that do not follow the draft layout.
    pub fn id_from_location(location: &str) -> Option<&str> {
        location
            .strip_prefix("drafts/")?
            .rsplit('/')
            .next()?
            .strip_suffix(".md")
    }
}
