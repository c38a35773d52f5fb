//! Truncated text previews with an expand affordance.

use serde::Serialize;

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub text: String,
    /// True when `text` is shorter than the source and can be expanded.
    pub truncated: bool,
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
///
/// With `expanded` set, or when the text already fits, it is returned whole.
pub fn preview(text: &str, max_chars: usize, expanded: bool) -> Preview {
    let text = text.trim();
    let cut = text.char_indices().nth(max_chars).map(|(idx, _)| idx);

    match cut {
        Some(idx) if !expanded => {
            let mut short = text[..idx].trim_end().to_string();
            short.push(ELLIPSIS);
            Preview {
                text: short,
                truncated: true,
            }
        }
        _ => Preview {
            text: text.to_string(),
            truncated: false,
        },
    }
}
