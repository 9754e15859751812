/// Content shape of a feed item, derived from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Puzzle,
    Results,
    Announcement,
}

/// Ordered keyword table for categories; the first keyword found wins.
pub const CATEGORY_KEYWORDS: &[(&str, Category)] = &[
    ("announcements", Category::Announcement),
    ("results", Category::Results),
];

/// Ordered keyword table for title markers, independent of the category table.
pub const MARKER_KEYWORDS: &[(&str, &str)] = &[
    ("results", "📊"),
    ("announcements", "📢"),
];

pub const DEFAULT_MARKER: &str = "🧩";

/// Map a title to its category by case-insensitive keyword match.
pub fn classify(title: &str) -> Category {
    first_match(CATEGORY_KEYWORDS, title).unwrap_or_default()
}

/// Display marker for a title, falling back to [`DEFAULT_MARKER`].
pub fn marker(title: &str) -> &'static str {
    first_match(MARKER_KEYWORDS, title).unwrap_or(DEFAULT_MARKER)
}

fn first_match<T: Copy>(table: &[(&str, T)], title: &str) -> Option<T> {
    let title = title.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, value)| *value)
}
