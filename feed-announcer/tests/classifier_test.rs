use feed_announcer::classifier::{CATEGORY_KEYWORDS, DEFAULT_MARKER};
use feed_announcer::{classify, marker, Category};

#[test]
fn test_keywords_map_to_categories_regardless_of_case() {
    for (keyword, category) in CATEGORY_KEYWORDS {
        for title in [
            keyword.to_string(),
            keyword.to_uppercase(),
            format!("Week 3 {} (final)", keyword),
            format!("[{}]", keyword.to_uppercase()),
        ] {
            assert_eq!(classify(&title), *category, "title: {}", title);
        }
    }
}

#[test]
fn test_unmatched_titles_default_to_puzzle() {
    assert_eq!(classify("Puzzle 7: Digits"), Category::Puzzle);
    assert_eq!(classify(""), Category::Puzzle);
    assert_eq!(marker("Puzzle 7: Digits"), DEFAULT_MARKER);
}

#[test]
fn test_scenario_titles() {
    assert_eq!(classify("Week 3 Results"), Category::Results);
    assert_eq!(marker("Week 3 Results"), "📊");
    assert_eq!(classify("Announcements"), Category::Announcement);
    assert_eq!(marker("Announcements"), "📢");
}

#[test]
fn test_category_and_marker_tables_are_independent() {
    // Each table applies its own order when a title holds both keywords
    let title = "Results and Announcements";
    assert_eq!(classify(title), Category::Announcement);
    assert_eq!(marker(title), "📊");
}

#[test]
fn test_classification_is_pure() {
    for title in ["Week 3 Results", "announcements!", "A puzzle"] {
        assert_eq!(classify(title), classify(title));
        assert_eq!(marker(title), marker(title));
    }
}
