//! Location query tokenization for the typeahead endpoint.
//!
//! The typeahead URL takes the query as a path of fixed two-character
//! uppercase segments: `london` becomes `/typeAhead/<region>/LO/ND/ON/`.

/// Re-encodes a free-text location query as the slash-delimited token the
/// typeahead endpoint expects.
///
/// Characters are counted after uppercasing. No validation of the character
/// set is done; odd input simply produces a server-side miss.
#[must_use]
pub fn tokenize_query(query: &str) -> String {
    let upper = query.to_uppercase();
    let mut token = String::with_capacity(upper.len() + upper.len() / 2);
    for (i, c) in upper.chars().enumerate() {
        token.push(c);
        if (i + 1) % 2 == 0 {
            token.push('/');
        }
    }
    token.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_length_query_splits_into_pairs() {
        assert_eq!(tokenize_query("london"), "LO/ND/ON");
    }

    #[test]
    fn odd_length_query_leaves_single_tail() {
        assert_eq!(tokenize_query("ldn"), "LD/N");
    }

    #[test]
    fn single_character() {
        assert_eq!(tokenize_query("a"), "A");
    }

    #[test]
    fn two_characters_has_no_separator() {
        assert_eq!(tokenize_query("ox"), "OX");
    }

    #[test]
    fn spaces_and_punctuation_pass_through() {
        assert_eq!(tokenize_query("st albans"), "ST/ A/LB/AN/S");
    }

    #[test]
    fn even_alphabetic_queries_have_two_char_blocks() {
        for query in ["ab", "bath", "camden", "kensington", "Manchester"] {
            let token = tokenize_query(query);
            assert!(!token.ends_with('/'), "{token}");
            assert!(
                token.split('/').all(|block| block.chars().count() == 2),
                "{query} -> {token}"
            );
        }
    }

    #[test]
    fn empty_query_yields_empty_token() {
        assert_eq!(tokenize_query(""), "");
    }
}
