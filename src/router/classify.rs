/// Phrases that suggest the question needs fresh web data.
pub const LIVE_SEARCH_KEYWORDS: [&str; 10] = [
    "latest",
    "current",
    "today",
    "this month",
    "recent",
    "updates",
    "news",
    "movies",
    "weather",
    "price",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Standard,
    LiveSearch,
}

/// Plain substring match on the lowercased question. No tokenization, so
/// "not the latest" and "concurrent" both route to live search.
pub fn classify(question: &str) -> Route {
    let lower = question.to_lowercase();
    if LIVE_SEARCH_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Route::LiveSearch
    } else {
        Route::Standard
    }
}
