//! Wake-word spotting on interim transcripts.

const WAKE_WORDS: &[&str] = &["jarvis", "जार्विस"];

/// True when the transcript mentions the assistant by name.
pub fn contains_wake_word(transcript: &str) -> bool {
    let lower = transcript.to_lowercase();
    WAKE_WORDS.iter().any(|w| lower.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_word_anywhere() {
        assert!(contains_wake_word("Hey JARVIS what time is it"));
        assert!(contains_wake_word("जार्विस समय बताओ"));
        assert!(!contains_wake_word("hey travis"));
    }
}
