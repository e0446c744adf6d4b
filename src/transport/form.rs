use url::form_urlencoded;

/// Merge `overrides` into `base`, keeping `base` order.
///
/// A key present in both keeps its position from `base` and takes the value
/// from `overrides`; new keys are appended in their own order.
pub fn merge_params(
    mut base: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
) -> Vec<(String, String)> {
    for (key, value) in overrides {
        match base.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => base.push((key, value)),
        }
    }
    base
}

/// Serialize parameters with `application/x-www-form-urlencoded` rules.
pub fn serialize_form(params: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Append an already serialized query string to `url`.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_owned();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

pub(crate) fn pair(key: &str, value: impl ToString) -> (String, String) {
    (key.to_owned(), value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| pair(k, v)).collect()
    }

    #[test]
    fn merge_puts_base_first_and_overrides_in_place() {
        let merged = merge_params(
            params(&[("connection_id", "c"), ("password", "p")]),
            params(&[("mode", "blacklist-add"), ("password", "q")]),
        );
        assert_eq!(
            merged,
            params(&[
                ("connection_id", "c"),
                ("password", "q"),
                ("mode", "blacklist-add")
            ])
        );
    }

    #[test]
    fn serialize_form_escapes_values() {
        let query = serialize_form(&params(&[("receiver_name", "Popescu Gabriel"), ("a&b", "x=y")]));
        assert_eq!(query, "receiver_name=Popescu+Gabriel&a%26b=x%3Dy");
    }

    #[test]
    fn append_query_picks_separator() {
        assert_eq!(
            append_query("https://example.invalid/index.php", "a=1"),
            "https://example.invalid/index.php?a=1"
        );
        assert_eq!(
            append_query("https://example.invalid/index.php?x=0", "a=1"),
            "https://example.invalid/index.php?x=0&a=1"
        );
        assert_eq!(
            append_query("https://example.invalid/index.php", ""),
            "https://example.invalid/index.php"
        );
    }
}
