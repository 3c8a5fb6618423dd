use crate::validator::GenerationRequest;

/// Messages handed to the generation API, already composed from the
/// validated request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

pub fn render_prompt(request: &GenerationRequest) -> RenderedPrompt {
    let system = format!(
        "You are an expert content writer. Write a complete, well-structured {} \
         in Markdown. Match the requested tone exactly and respect the word target. \
         Return only the finished piece, with no commentary about the task.",
        request.content_type.as_str()
    );

    let mut instructions = vec![
        format!("Topic: {}", request.prompt),
        format!("Tone: {}", request.tone.as_str()),
        format!(
            "Target length: approximately {} words ({})",
            request.length.target_words(),
            request.length.as_str()
        ),
    ];

    if let Some(audience) = &request.target_audience {
        instructions.push(format!("Intended audience: {audience}"));
    }

    if let Some(context) = &request.additional_context {
        instructions.push(format!("Additional context:\n{context}"));
    }

    RenderedPrompt {
        system,
        user: instructions.join("\n"),
    }
}
