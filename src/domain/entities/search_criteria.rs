/// OR-combined search over file records.
///
/// A record matches when any supplied criterion matches: the text query as
/// a case-insensitive substring of a searchable field, any record tag in
/// `tags`, or the record content type in `content_types`. With no criteria
/// every record matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    text: Option<String>,
    tags: Vec<String>,
    content_types: Vec<String>,
}

impl SearchCriteria {
    pub fn new(
        text: Option<String>,
        tags: Option<Vec<String>>,
        content_types: Option<Vec<String>>,
    ) -> Self {
        let text = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            text,
            tags: tags.unwrap_or_default(),
            content_types: content_types.unwrap_or_default(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn content_types(&self) -> &[String] {
        &self.content_types
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.tags.is_empty() && self.content_types.is_empty()
    }

    /// Lowercased text query, the form compared against
    /// [`crate::domain::entities::FileRecord::search_document`].
    pub fn normalized_text(&self) -> Option<String> {
        self.text.as_ref().map(|t| t.to_lowercase())
    }

    /// SQL `LIKE` pattern for the text query with `%`, `_` and `\` escaped so
    /// the query is matched literally.
    pub fn like_pattern(&self) -> Option<String> {
        self.normalized_text().map(|text| {
            let mut escaped = String::with_capacity(text.len() + 2);
            escaped.push('%');
            for c in text.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_is_no_criterion() {
        let criteria = SearchCriteria::new(Some("   ".to_string()), Some(vec![]), None);
        assert!(criteria.is_empty());
        assert!(criteria.normalized_text().is_none());
        assert!(criteria.like_pattern().is_none());
    }

    #[test]
    fn test_query_is_trimmed_and_lowercased() {
        let criteria = SearchCriteria::new(Some("  Sunset ".to_string()), None, None);
        assert!(!criteria.is_empty());
        assert_eq!(criteria.normalized_text().as_deref(), Some("sunset"));
    }

    #[test]
    fn test_tags_alone_make_a_criterion() {
        let criteria = SearchCriteria::new(None, Some(vec!["x".to_string()]), None);
        assert!(!criteria.is_empty());
        assert_eq!(criteria.tags(), ["x".to_string()]);
        assert!(criteria.content_types().is_empty());
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        let criteria = SearchCriteria::new(Some("50%_off\\".to_string()), None, None);
        assert_eq!(criteria.like_pattern().unwrap(), "%50\\%\\_off\\\\%");
    }
}
