/// Placeholder written into every cell that has no value.
pub const SENTINEL: &str = "NA";

/// Output columns. `Image(n)` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    ProfileUrl,
    Title,
    Bio,
    Followers,
    PlayMedian,
    CollectMedian,
    LastPostDate,
    Email,
    Image(usize),
}

impl Column {
    #[must_use]
    pub fn header(&self) -> String {
        match self {
            Self::Name => "name".to_owned(),
            Self::ProfileUrl => "profile_url".to_owned(),
            Self::Title => "title".to_owned(),
            Self::Bio => "bio".to_owned(),
            Self::Followers => "followers".to_owned(),
            Self::PlayMedian => "play_median".to_owned(),
            Self::CollectMedian => "collect_median".to_owned(),
            Self::LastPostDate => "last_post_date".to_owned(),
            Self::Email => "email".to_owned(),
            Self::Image(n) => format!("image_{n}"),
        }
    }

    /// Columns whose values are written as numbers in spreadsheet output.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Followers | Self::PlayMedian | Self::CollectMedian
        )
    }
}

/// A rectangular table of rendered cells; every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Cell at `row` for `column`, if both exist.
    #[must_use]
    pub fn cell(&self, row: usize, column: Column) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// Renders a number without a trailing `.0` for whole values.
pub(crate) fn format_number(value: f64) -> String {
    format!("{value}")
}
