use crate::models::AuthorRef;
use leptos::logging::warn;

/// Separator between display names in `Brevet::author`.
pub(crate) const NAME_SEPARATOR: &str = ", ";
/// Separator between member ids in `Brevet::id_user`.
pub(crate) const ID_SEPARATOR: &str = ",";

fn split_list<'a>(input: &'a str, sep: &str) -> Vec<&'a str> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(sep).collect()
}

/// Decode the two delimiter-joined columns into author pairs.
///
/// Rules:
/// - `author` splits on `", "`, `id_user` on `","`. Segments are kept as-is.
/// - An empty column is an empty list, not one empty entry.
/// - Counts that disagree are padded with "" on the shorter side.
pub(crate) fn decode_authors(author: &str, id_user: &str) -> Vec<AuthorRef> {
    let names = split_list(author, NAME_SEPARATOR);
    let ids = split_list(id_user, ID_SEPARATOR);

    if names.len() != ids.len() {
        warn!(
            "brevet author list has {} names but {} ids; padding the shorter side",
            names.len(),
            ids.len()
        );
    }

    let len = names.len().max(ids.len());
    (0..len)
        .map(|i| {
            AuthorRef::new(
                ids.get(i).copied().unwrap_or_default(),
                names.get(i).copied().unwrap_or_default(),
            )
        })
        .collect()
}

/// Encode author pairs back into `(author, id_user)`.
///
/// Inverse of [`decode_authors`] as long as no name contains `", "` and no id contains `","`.
pub(crate) fn encode_authors(authors: &[AuthorRef]) -> (String, String) {
    let names: Vec<&str> = authors.iter().map(|a| a.name.as_str()).collect();
    let ids: Vec<&str> = authors.iter().map(|a| a.user_id.as_str()).collect();
    (names.join(NAME_SEPARATOR), ids.join(ID_SEPARATOR))
}

/// Build the selection from a multi-select's selected options, in the order given.
///
/// Each option is `(text, data-id)`. A missing `data-id` yields an empty id.
pub(crate) fn selection_from_options<I>(options: I) -> Vec<AuthorRef>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    options
        .into_iter()
        .map(|(name, id)| AuthorRef::new(id.unwrap_or_default(), name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_positional_pairs() {
        let got = decode_authors("A, B", "1,2");
        assert_eq!(got, vec![AuthorRef::new("1", "A"), AuthorRef::new("2", "B")]);
    }

    #[test]
    fn test_decode_empty_columns() {
        assert!(decode_authors("", "").is_empty());
    }

    #[test]
    fn test_decode_pads_mismatched_counts() {
        let got = decode_authors("A, B, C", "1,2");
        assert_eq!(got.len(), 3);
        assert_eq!(got[2], AuthorRef::new("", "C"));

        let got = decode_authors("A", "1,2");
        assert_eq!(got[1], AuthorRef::new("2", ""));
    }

    #[test]
    fn test_decode_name_split_is_comma_space_only() {
        // "Doe,John" has no ", " so it stays a single name.
        let got = decode_authors("Doe,John, Smith", "1,2");
        assert_eq!(got[0].name, "Doe,John");
        assert_eq!(got[1].name, "Smith");
    }

    #[test]
    fn test_encode_joins_with_wire_separators() {
        let (author, id_user) =
            encode_authors(&[AuthorRef::new("u1", "Alice"), AuthorRef::new("u2", "Bob")]);
        assert_eq!(author, "Alice, Bob");
        assert_eq!(id_user, "u1,u2");
    }

    #[test]
    fn test_encode_inverts_decode() {
        let (author, id_user) = encode_authors(&decode_authors("Alice, Bob, Chen", "7,8,9"));
        assert_eq!(author, "Alice, Bob, Chen");
        assert_eq!(id_user, "7,8,9");
    }

    #[test]
    fn test_embedded_separator_is_not_preserved() {
        // Known limitation: a name containing ", " splits into two entries.
        let got = decode_authors("Doe, John", "1");
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn test_selection_keeps_order_and_duplicates() {
        let got = selection_from_options(vec![
            ("Bob".to_string(), Some("u2".to_string())),
            ("Alice".to_string(), Some("u1".to_string())),
            ("Bob".to_string(), Some("u2".to_string())),
            ("Ghost".to_string(), None),
        ]);
        assert_eq!(
            got,
            vec![
                AuthorRef::new("u2", "Bob"),
                AuthorRef::new("u1", "Alice"),
                AuthorRef::new("u2", "Bob"),
                AuthorRef::new("", "Ghost"),
            ]
        );
    }
}
