/// Readability substitutions for the destination's markdown renderer
pub mod markdown {
    use regex::{Captures, Regex};
    use std::sync::LazyLock;

    static HEADING: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^#+[ \t]*(.*)$").unwrap());

    // An unclosed spoiler runs to the end of the text.
    static SPOILER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)>!(.*?)(?:!<|\z)").unwrap());

    /// Substitute headings like `### title` with `TITLE`, line by line
    pub fn uppercase_headings(text: &str) -> String {
        HEADING
            .replace_all(text, |caps: &Captures| caps[1].to_uppercase())
            .into_owned()
    }

    /// Substitute spoilers like `>!spoiler!<` with `||spoiler||`
    pub fn rewrite_spoilers(text: &str) -> String {
        SPOILER.replace_all(text, "||${1}||").into_owned()
    }

    pub fn sanitize(text: &str) -> String {
        rewrite_spoilers(&uppercase_headings(text))
    }
}

/// Text length utilities
pub mod text {
    pub const ELLIPSIS: &str = "...";

    /// Cut text to `limit` characters and append an ellipsis when it is longer
    pub fn trim_text(text: &str, limit: usize) -> String {
        match text.char_indices().nth(limit) {
            Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
            None => text.to_string(),
        }
    }

    /// Fit text into a destination field of `limit` characters, ellipsis included
    pub fn truncate_field(text: &str, limit: usize) -> String {
        if text.chars().count() <= limit {
            return text.to_string();
        }
        let keep = limit.saturating_sub(ELLIPSIS.len());
        let cut = text.char_indices().nth(keep).map(|(i, _)| i).unwrap_or(text.len());
        format!("{}{}", text[..cut].trim(), ELLIPSIS)
    }

    /// Replace `\r\n` and lone `\r` with `\n`
    pub fn normalize_newlines(text: &str) -> String {
        text.replace("\r\n", "\n").replace('\r', "\n")
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, Local, Utc};

    /// Render a unix timestamp as a readable UTC date
    pub fn format_timestamp(seconds: i64) -> String {
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| seconds.to_string())
    }

    /// Current local time and UTC offset, for the startup banner
    pub fn local_now() -> (String, String) {
        let now = Local::now();
        (now.format("%Y-%m-%d %H:%M:%S").to_string(), now.format("%:z").to_string())
    }
}
