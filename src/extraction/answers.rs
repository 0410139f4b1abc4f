use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

/// `Answer <n> :` marker with an ASCII number; whitespace around the number and
/// before the colon is optional.
static ANSWER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Answer\s*([0-9]+)\s*:").expect("answer marker pattern is valid")
});

/// Splits extracted document text into `{question number -> answer}`.
///
/// Each answer body runs from the end of its marker to the start of the next
/// marker (or end of text), across line breaks, and is trimmed. When a
/// question number repeats, the later body replaces the earlier one.
pub fn extract_answers(raw_text: &str) -> BTreeMap<u32, String> {
    let markers: Vec<_> = ANSWER_MARKER.captures_iter(raw_text).collect();
    let mut answers = BTreeMap::new();

    for (idx, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let body_end = markers
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map_or(raw_text.len(), |m| m.start());
        let body = raw_text[whole.end()..body_end].trim();

        match number.as_str().parse::<u32>() {
            Ok(question) => {
                if answers.insert(question, body.to_string()).is_some() {
                    debug!(question, "Duplicate answer marker, keeping the later one");
                }
            }
            Err(e) => {
                warn!(marker = number.as_str(), error = %e, "Ignoring unparseable answer number");
            }
        }
    }

    answers
}
