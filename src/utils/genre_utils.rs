/// Genres are persisted as a bracket-delimited comma-separated string,
/// e.g. `{Jazz,Reggae}`. Stored rows predate the service, so decoding
/// must keep the legacy semantics: drop the first and last character,
/// then split on commas.
pub fn decode_genres(raw: &str) -> Vec<String> {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.as_str().split(',').map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bracketed_list() {
        assert_eq!(decode_genres("{Jazz,Reggae}"), vec!["Jazz", "Reggae"]);
    }

    #[test]
    fn decodes_single_genre() {
        assert_eq!(decode_genres("{Classical}"), vec!["Classical"]);
    }

    #[test]
    fn decode_strips_exactly_one_char_each_side() {
        // Legacy behavior: no bracket validation, just positional stripping.
        assert_eq!(decode_genres("[Rock]"), vec!["Rock"]);
        assert_eq!(decode_genres("xRocky"), vec!["Rock"]);
    }

    #[test]
    fn decode_of_empty_or_tiny_input_yields_one_empty_entry() {
        assert_eq!(decode_genres(""), vec![""]);
        assert_eq!(decode_genres("{}"), vec![""]);
        assert_eq!(decode_genres("x"), vec![""]);
    }

    #[test]
    fn decodes_multiword_genres() {
        assert_eq!(
            decode_genres("{Rock n Roll,Hip-Hop}"),
            vec!["Rock n Roll", "Hip-Hop"]
        );
    }
}
