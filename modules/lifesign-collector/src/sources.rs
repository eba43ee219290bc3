use lifesign_common::Category;

/// Provenance tag stored on records produced by the synthetic collector.
pub const SYNTHETIC_PROVENANCE: &str = "synthetic_generation";

/// Search query templates rendered per category. Ordered from most to least
/// likely to surface first-person accounts.
const QUERY_TEMPLATES: [&str; 5] = [
    "site:reddit.com {category} personal story",
    "site:twitter.com {category} help",
    "site:instagram.com {category} awareness",
    "personal blog about living with {category}",
    "forum discussion {category} support",
];

/// Render the web search queries for one category.
pub fn category_queries(category: Category) -> Vec<String> {
    QUERY_TEMPLATES
        .iter()
        .map(|t| t.replace("{category}", category.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_five_queries_per_category() {
        let queries = category_queries(Category::SelfHarm);
        assert_eq!(queries.len(), 5);
        assert_eq!(queries[0], "site:reddit.com self-harm personal story");
        assert!(queries.iter().all(|q| q.contains("self-harm")));
    }
}
