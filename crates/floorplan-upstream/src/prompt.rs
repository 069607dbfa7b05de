//! Prompt text sent to the room specification service.

/// System prompt: fixes the response shape the extractor expects.
pub const SYSTEM_PROMPT: &str = "You are an expert architect specializing in Indian homes, \
Vastu principles, and modern design trends. Provide room parameters as a JSON array of \
objects, each with 'name', 'x', 'y', 'dx', 'dy', 'color', and 'floor' properties. Ensure \
rooms are connected efficiently with minimal gaps. Use only valid CSS color names for the \
'color' property.";

/// User message wrapping the free-form requirements.
pub fn user_prompt(requirements: &str) -> String {
    format!(
        "Generate room parameters for a Vastu-compliant modern Indian home floor plan with {}. \
         Provide the output as a JSON array. Ensure rooms are adjacent with no large gaps \
         between them. Use only valid CSS color names for colors.",
        requirements.trim()
    )
}
