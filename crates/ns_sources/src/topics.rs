/// Query used for any topic not in the table below.
pub const DEFAULT_QUERY: &str = "India politics OR India government";

const TOPIC_QUERIES: &[(&str, &str)] = &[
    ("indian politics", DEFAULT_QUERY),
    ("indian economy", "India economy OR India GDP OR RBI"),
    ("technology", "technology OR artificial intelligence OR tech industry"),
    ("business", "business OR markets OR stocks"),
    ("sports", "sports OR cricket OR football"),
    ("world", "world news OR international relations"),
    ("science", "science OR research OR space"),
    ("health", "health OR medicine OR public health"),
];

/// Map a topic label to the provider query string.
pub fn topic_query(topic: &str) -> &'static str {
    let needle = topic.trim().to_lowercase();
    TOPIC_QUERIES
        .iter()
        .find(|(label, _)| *label == needle)
        .map(|(_, query)| *query)
        .unwrap_or(DEFAULT_QUERY)
}
