//! Resolution of model-cited source numbers to URLs

use crate::error::{Error, Result};
use crate::types::SearchHit;

/// Map 1-based citation numbers to the URLs of the hits the model saw
///
/// `shown` is the number of hits rendered into the prompt. Zero, or any index
/// above `shown`, never referred to anything the model was given and fails
/// with [`Error::InvalidCitation`].
pub fn resolve_sources(indices: &[usize], hits: &[SearchHit], shown: usize) -> Result<Vec<String>> {
    let available = shown.min(hits.len());

    indices
        .iter()
        .map(|&index| {
            if index == 0 || index > available {
                return Err(Error::InvalidCitation { index, available });
            }
            Ok(hits[index - 1].url.clone())
        })
        .collect()
}
