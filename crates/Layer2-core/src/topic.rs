//! Topic detection from the file name

/// Fallback when no keyword matches
pub const GENERAL_TOPIC: &str = "General Programming";

/// Keyword table, checked in order; the first match wins
const TOPIC_KEYWORDS: &[(&[&str], &str)] = &[
    (&["binary", "search"], "Searching"),
    (&["sort"], "Sorting"),
    (&["linked", "list"], "Linked List"),
    (&["tree"], "Trees"),
    (&["graph"], "Graphs"),
    (&["stack", "queue"], "Stacks and Queues"),
    (&["recurs"], "Recursion"),
    (&["dynamic"], "Dynamic Programming"),
];

/// Infer a practice topic from a file name or path
///
/// Only the lowercased base name is inspected, so `binarySearchTree.ts`
/// resolves to "Searching" before the tree keyword is considered.
pub fn detect_topic(file_name: &str) -> &'static str {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .to_lowercase();

    TOPIC_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| base.contains(k)))
        .map(|(_, topic)| *topic)
        .unwrap_or(GENERAL_TOPIC)
}
