//! Row-oriented display tables for the data explorer.

use serde::{Deserialize, Serialize};

/// Row cap before a time-indexed table is uniformly downsampled for
/// display. Sampling keeps a representative view across the full range
/// instead of truncating the tail.
pub const MAX_DISPLAY_ROWS: usize = 5000;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reported when a table was downsampled, so the UI can tell the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleInfo {
    pub shown: usize,
    pub total: usize,
}

impl Table {
    pub fn new<C, S>(columns: C, rows: Vec<Vec<String>>) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Uniform-step downsampling to at most `max_rows` rows. Returns the
    /// (possibly identical) table and sampling info when rows were dropped.
    pub fn downsample(&self, max_rows: usize) -> (Table, Option<SampleInfo>) {
        let total = self.rows.len();
        if max_rows == 0 || total <= max_rows {
            return (self.clone(), None);
        }
        let step = total.div_ceil(max_rows).max(1);
        let rows: Vec<Vec<String>> = self.rows.iter().step_by(step).cloned().collect();
        let shown = rows.len();
        (
            Table {
                columns: self.columns.clone(),
                rows,
            },
            Some(SampleInfo { shown, total }),
        )
    }
}
