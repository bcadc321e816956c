pub const KV: &str = "kv";
pub const KNOWN_WORDS: &str = "known_words";
