//! Search context formatting for the answer prompt

use crate::types::SearchHit;

/// Terminates the numbered search block
pub const CONTEXT_SENTINEL: &str = "###";

/// Context sent to the answer stage when search returned nothing
pub const FALLBACK_CONTEXT: &str =
    "Информации из открытых источников нет! Требуется хорошо подумать и дать правильный ответ!";

/// Render the first `k` hits as a numbered block
///
/// Each hit becomes `"{i}.) # {content} #\n"` with 1-based numbering, and the
/// block ends with [`CONTEXT_SENTINEL`]. The numbers are what the model cites
/// back in `sources`.
pub fn format_search_results(hits: &[SearchHit], k: usize) -> String {
    let mut context = String::new();
    for (i, hit) in hits.iter().take(k).enumerate() {
        context.push_str(&format!("{}.) # {} #\n", i + 1, hit.content));
    }
    context.push_str(CONTEXT_SENTINEL);
    context
}

/// Context for the answer stage, falling back when there are no hits
pub fn build_context(hits: &[SearchHit], k: usize) -> String {
    if hits.is_empty() {
        FALLBACK_CONTEXT.to_string()
    } else {
        format_search_results(hits, k)
    }
}
