/// Strips one wrapping fenced code block, if present.
///
/// Rewrite services often wrap whole-file responses in a fenced block with a
/// language tag. Only the outermost fence lines are removed; fences inside
/// the content are part of the file and stay untouched. Unfenced responses
/// come back trimmed but otherwise unchanged.
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    // The opening line may carry a language tag ("```java"); drop the whole
    // line either way.
    let Some((_, body)) = after_open.split_once('\n') else {
        return trimmed.to_string();
    };
    let Some(body) = body.strip_suffix("```") else {
        return trimmed.to_string();
    };
    // Drop the newline that preceded the closing fence, nothing more.
    let body = body.strip_suffix('\n').unwrap_or(body);
    body.strip_suffix('\r').unwrap_or(body).to_string()
}
