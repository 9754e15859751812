use crate::classifier::Category;
use crate::table::Table;
use crate::types::{FeedItem, PipelineConfig, Result};
use crate::utils::{markdown, text};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Number of pipe-terminated cells in a results table row.
pub const RESULTS_COLUMNS: usize = 5;

/// Cell text marking the totals row, after substitution.
pub const TOTALS_MARKER: &str = "SUM";

/// Results bodies are kept at least up to this heading.
pub const RESULTS_TRIM_MARKER: &str = "Level Results";

/// Cell text replacements applied to results tables.
pub const CELL_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("Level", "#"),
    ("Gryffindor", "G"),
    ("Hufflepuff", "H"),
    ("Ravenclaw", "R"),
    ("Slytherin", "S"),
    ("Puzzle 1", "1"),
    ("Puzzle 2", "2"),
    ("Puzzle 3", "3"),
    ("Puzzle 4", "4"),
    ("Puzzle 5", "5"),
    ("Arithmancy Points", "SUM"),
    ("House", ""),
    ("House Points", "HPs"),
];

static TABLE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^(?:[ \t]*(?:[^|\n]*\|){{{}}}[ \t]*(?:\n|\z))+",
        RESULTS_COLUMNS
    ))
    .unwrap()
});

static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*{}[ \t]*$",
        r"([^|\n]*)\|".repeat(RESULTS_COLUMNS)
    ))
    .unwrap()
});

static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+(#+[ \t]*Current Points)").unwrap());

static RESULTS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", regex::escape(RESULTS_TRIM_MARKER))).unwrap()
});

static THEME_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"The theme .*?: .*").unwrap());

static SCHEDULE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^|\n]*?)\|([^|\n]*?\d, [^|\n]*?)\|([^|\n]*?\d, [^|\n]*?)\|").unwrap()
});

/// Title and body of an item after the per-category transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub title: String,
    pub body: String,
}

/// Per-category text transform applied to every item before announcing.
pub struct TextPipeline {
    config: PipelineConfig,
}

impl TextPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn transform(&self, item: &FeedItem, category: Category) -> Transformed {
        debug!("Formatting item {} as {:?}", item.id, category);

        let body = match category {
            Category::Puzzle => self.format_puzzle(&item.body),
            Category::Results => self.format_results(&item.body),
            Category::Announcement => format_announcement(&item.body),
        };

        Transformed {
            title: item.title.trim().to_string(),
            body,
        }
    }

    /// Sanitize and trim
    pub fn format_puzzle(&self, body: &str) -> String {
        text::trim_text(&markdown::sanitize(body), self.config.trim_limit)
    }

    /// Tabulate points, then sanitize and trim up to the results section
    pub fn format_results(&self, body: &str) -> String {
        let normalized = text::normalize_newlines(body);
        let tabulated = self.tabulate(&normalized);
        // Table replacement eats the blank line before the points section
        let spaced = SECTION_MARKER.replace_all(&tabulated, "\n\n${1}").into_owned();

        // Measure the marker on the same text the cut is applied to
        let sanitized = markdown::sanitize(&spaced);
        let limit = self.results_trim_limit(&sanitized);
        text::trim_text(&sanitized, limit)
    }

    /// Replace each delimited-row run in `body` with a rendered table block.
    ///
    /// A run that cannot be rendered is left as text; later runs are still
    /// tabulated.
    pub fn tabulate(&self, body: &str) -> String {
        let mut out = body.to_string();
        let mut cursor = 0;
        for _ in 0..self.config.max_table_runs {
            let Some(run) = TABLE_RUN.find_at(&out, cursor) else {
                return out;
            };
            let range = run.range();
            let block = match extract_table(run.as_str()) {
                Ok(Some(table)) => format!("```ml\n{}\n```\n", table.render()),
                // Nothing but separators
                Ok(None) => String::new(),
                Err(e) => {
                    warn!("Leaving table run untabulated: {}", e);
                    cursor = range.end;
                    continue;
                }
            };

            // Resume scanning after the spliced block
            cursor = range.start + block.len();
            out.replace_range(range, &block);
        }

        if TABLE_RUN.find_at(&out, cursor).is_some() {
            warn!(
                "Stopped after {} table runs; remaining rows left as text",
                self.config.max_table_runs
            );
        }
        out
    }

    fn results_trim_limit(&self, body: &str) -> usize {
        // Headings are uppercased by then, so match without case
        RESULTS_MARKER
            .find(body)
            .map(|m| body[..m.start()].chars().count())
            .map_or(self.config.trim_limit, |offset| offset.max(self.config.trim_limit))
    }
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Keep only the theme line and the puzzle schedule
pub fn format_announcement(body: &str) -> String {
    // Built from scratch; everything else in the body is dropped
    let mut out = String::new();
    if let Some(theme) = THEME_LINE.find(body) {
        out.push_str(theme.as_str().trim_end());
    }
    for caps in SCHEDULE_ROW.captures_iter(body) {
        out.push_str(&format!(
            "\n**{}**\n{} until {}",
            caps[1].trim(),
            caps[2].trim(),
            caps[3].trim()
        ));
    }
    out.trim_start_matches('\n').to_string()
}

/// Build a table from one run of delimited rows.
///
/// The first row is always the header. Later rows are collected up to the
/// first totals row, which becomes the footer. Returns `None` when the run
/// holds only separator rows.
pub fn extract_table(run: &str) -> Result<Option<Table>> {
    let mut rows = TABLE_ROW
        .captures_iter(run)
        .map(|caps| (1..=RESULTS_COLUMNS).map(|i| clean_cell(&caps[i])).collect::<Vec<_>>())
        .filter(|row| !is_separator_row(row));

    let Some(header) = rows.next() else {
        return Ok(None);
    };

    let mut body = Vec::new();
    let mut footer = None;
    for row in rows {
        if is_totals_row(&row) {
            footer = Some(row);
            break;
        }
        body.push(row);
    }

    Table::new(header, body, footer).map(Some)
}

fn clean_cell(cell: &str) -> String {
    let cell = cell.trim().replace("**", "").replace("__", "");
    CELL_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == cell)
        .map(|(_, to)| to.to_string())
        .unwrap_or(cell)
}

/// Every non-empty cell is a divider like `:-:` or `---`
fn is_separator_row(row: &[String]) -> bool {
    let mut cells = row.iter().filter(|cell| !cell.is_empty()).peekable();
    cells.peek().is_some()
        && cells.all(|cell| cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':'))
}

fn is_totals_row(row: &[String]) -> bool {
    row.iter().any(|cell| cell == TOTALS_MARKER)
}
