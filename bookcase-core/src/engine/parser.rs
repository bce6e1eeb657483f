//! Raw filter map → [`FilterCriteria`]

use crate::types::FilterCriteria;

/// Parse a raw attribute map into typed criteria.
///
/// Keys are case-insensitive; only `id`, `author_name`, `year`, `category`,
/// `tag` and `publisher` are recognized. A field is set only when its value
/// is non-blank, and the value is kept exactly as given. An `id` that is not
/// an unsigned integer is dropped. Later pairs overwrite earlier ones.
pub fn parse_criteria<I, K, V>(raw: I) -> FilterCriteria
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut criteria = FilterCriteria::default();

    for (key, value) in raw {
        let value = value.as_ref();
        if value.trim().is_empty() {
            continue;
        }

        match key.as_ref().to_lowercase().as_str() {
            "id" => {
                if let Ok(id) = value.parse() {
                    criteria.id = Some(id);
                }
            }
            "author_name" => criteria.author_name = Some(value.to_string()),
            "year" => criteria.year = Some(value.to_string()),
            "publisher" => criteria.publisher = Some(value.to_string()),
            "category" => criteria.category = Some(value.to_string()),
            "tag" => criteria.tag = Some(value.to_string()),
            _ => {}
        }
    }

    criteria
}
