//! Best-effort extraction of a name list from model output

/// Pull the JSON string array out of free-form model text.
///
/// The slice from the first `[` to the last `]` is parsed as `Vec<String>`.
/// Total over its input: anything that does not yield an array of strings
/// produces an empty list.
pub fn extract_names(content: &str) -> Vec<String> {
    let Some(start) = content.find('[') else {
        return Vec::new();
    };
    let Some(end) = content.rfind(']') else {
        return Vec::new();
    };
    if end < start {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<String>>(&content[start..=end]) {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!(error = %e, "model output is not a JSON string array");
            Vec::new()
        }
    }
}
