use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MAX_PROMPT_CHARS: usize = 4000;
pub const MAX_CONTEXT_CHARS: usize = 2000;
pub const MAX_AUDIENCE_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Technical,
    Creative,
    Persuasive,
}

impl Tone {
    pub const ALLOWED: &'static str = "professional, casual, technical, creative, persuasive";

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Technical => "technical",
            Tone::Creative => "creative",
            Tone::Persuasive => "persuasive",
        }
    }
}

impl FromStr for Tone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            "technical" => Ok(Tone::Technical),
            "creative" => Ok(Tone::Creative),
            "persuasive" => Ok(Tone::Persuasive),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub const ALLOWED: &'static str = "short, medium, long";

    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    /// Approximate word target handed to the model.
    pub fn target_words(&self) -> usize {
        match self {
            Length::Short => 300,
            Length::Medium => 700,
            Length::Long => 1500,
        }
    }
}

impl FromStr for Length {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Length::Short),
            "medium" => Ok(Length::Medium),
            "long" => Ok(Length::Long),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Article,
    BlogPost,
    Newsletter,
    Essay,
}

impl ContentType {
    pub const ALLOWED: &'static str = "article, blog_post, newsletter, essay";

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::BlogPost => "blog_post",
            ContentType::Newsletter => "newsletter",
            ContentType::Essay => "essay",
        }
    }
}

impl FromStr for ContentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(ContentType::Article),
            "blog_post" => Ok(ContentType::BlogPost),
            "newsletter" => Ok(ContentType::Newsletter),
            "essay" => Ok(ContentType::Essay),
            _ => Err(()),
        }
    }
}

/// Inbound request as the caller sends it. Enum fields arrive as free-form
/// strings and are checked against their allowed sets during validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGenerationRequest {
    pub prompt: String,
    pub tone: Option<String>,
    pub length: Option<String>,
    pub content_type: Option<String>,
    pub additional_context: Option<String>,
    pub target_audience: Option<String>,
}

/// Request after validation. Construction goes through
/// [`RawGenerationRequest::validate`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub tone: Tone,
    pub length: Length,
    pub content_type: ContentType,
    pub additional_context: Option<String>,
    pub target_audience: Option<String>,
}

impl RawGenerationRequest {
    /// Check every constraint and report all violations at once, so a caller
    /// can fix a bad request in one round trip. Pure; no external calls.
    pub fn validate(self) -> Result<GenerationRequest, Vec<String>> {
        let mut violations = Vec::new();

        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            violations.push("prompt must not be empty".to_string());
        } else if prompt.chars().count() > MAX_PROMPT_CHARS {
            violations.push(format!("prompt must be at most {MAX_PROMPT_CHARS} characters"));
        }

        let tone = parse_field::<Tone>("tone", self.tone.as_deref(), Tone::ALLOWED, &mut violations);
        let length = parse_field::<Length>(
            "length",
            self.length.as_deref(),
            Length::ALLOWED,
            &mut violations,
        );
        let content_type = parse_field::<ContentType>(
            "content_type",
            self.content_type.as_deref(),
            ContentType::ALLOWED,
            &mut violations,
        );

        let additional_context = normalized(self.additional_context);
        if let Some(context) = &additional_context {
            if context.chars().count() > MAX_CONTEXT_CHARS {
                violations.push(format!(
                    "additional_context must be at most {MAX_CONTEXT_CHARS} characters"
                ));
            }
        }

        let target_audience = normalized(self.target_audience);
        if let Some(audience) = &target_audience {
            if audience.chars().count() > MAX_AUDIENCE_CHARS {
                violations.push(format!(
                    "target_audience must be at most {MAX_AUDIENCE_CHARS} characters"
                ));
            }
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(GenerationRequest {
            prompt,
            tone,
            length,
            content_type,
            additional_context,
            target_audience,
        })
    }
}

/// Parse an optional enum field, recording a violation and falling back to
/// the default when the value is outside the allowed set.
fn parse_field<T: FromStr + Default>(
    field: &str,
    value: Option<&str>,
    allowed: &str,
    violations: &mut Vec<String>,
) -> T {
    match value.map(str::trim) {
        None | Some("") => T::default(),
        Some(raw) => T::from_str(raw).unwrap_or_else(|_| {
            violations.push(format!("{field} must be one of {allowed} (got '{raw}')"));
            T::default()
        }),
    }
}

fn normalized(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
