//! Grid configuration, fixed at construction.
//!
//! Counts are signed so negative values from JSON or JavaScript reach
//! [`GridConfig::validate`] and fail there with a descriptive
//! `InvalidConfiguration` instead of an opaque deserialization error.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default number of rows in the demo dataset.
pub const DEFAULT_TOTAL_COUNT: i64 = 10_000;
/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 35.0;
/// Default number of pinned columns.
pub const DEFAULT_STICKY_COLUMNS: i64 = 4;
/// Default number of cells per row.
pub const DEFAULT_COLUMNS_PER_ROW: i64 = 14;
/// Default width shared by all pinned columns.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;
/// Default width of every scrolling column.
pub const DEFAULT_SCROLL_COLUMN_WIDTH: u32 = 150;
/// Rows rendered beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN: i64 = 5;
/// Lower bound of the resizable pinned width.
pub const MIN_COLUMN_WIDTH: u32 = 60;
/// Upper bound of the resizable pinned width.
pub const MAX_COLUMN_WIDTH: u32 = 400;

/// Construction-time settings for a [`GridView`](crate::viewer::GridView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub total_count: i64,
    pub row_height: f64,
    pub row_gap: f64,
    pub sticky_columns: i64,
    pub columns_per_row: i64,
    pub default_column_width: u32,
    pub scroll_column_width: u32,
    pub overscan: i64,
    pub min_column_width: u32,
    pub max_column_width: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            total_count: DEFAULT_TOTAL_COUNT,
            row_height: DEFAULT_ROW_HEIGHT,
            row_gap: 0.0,
            sticky_columns: DEFAULT_STICKY_COLUMNS,
            columns_per_row: DEFAULT_COLUMNS_PER_ROW,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            scroll_column_width: DEFAULT_SCROLL_COLUMN_WIDTH,
            overscan: DEFAULT_OVERSCAN,
            min_column_width: MIN_COLUMN_WIDTH,
            max_column_width: MAX_COLUMN_WIDTH,
        }
    }
}

/// A [`GridConfig`] that passed validation, with counts converted to `usize`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedConfig {
    pub total_count: usize,
    pub row_height: f64,
    pub item_size: f64,
    pub sticky_columns: usize,
    pub columns_per_row: usize,
    pub default_column_width: u32,
    pub scroll_column_width: u32,
    pub overscan: usize,
    pub min_column_width: u32,
    pub max_column_width: u32,
}

impl GridConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed. Call [`GridConfig::validate`]
    /// to check the values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Height of one virtual item: the row plus the gap below it.
    pub fn item_size(&self) -> f64 {
        self.row_height + self.row_gap
    }

    /// Check every field and convert counts to their unsigned form.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let total_count = non_negative("totalCount", self.total_count)?;
        let sticky_columns = non_negative("stickyColumns", self.sticky_columns)?;
        let columns_per_row = non_negative("columnsPerRow", self.columns_per_row)?;
        let overscan = non_negative("overscan", self.overscan)?;

        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(GridError::invalid(format!(
                "rowHeight must be a positive number, got {}",
                self.row_height
            )));
        }
        if !self.row_gap.is_finite() || self.row_gap < 0.0 {
            return Err(GridError::invalid(format!(
                "rowGap must be zero or positive, got {}",
                self.row_gap
            )));
        }
        if sticky_columns > columns_per_row {
            return Err(GridError::invalid(format!(
                "stickyColumns ({sticky_columns}) exceeds columnsPerRow ({columns_per_row})"
            )));
        }
        if self.scroll_column_width == 0 {
            return Err(GridError::invalid("scrollColumnWidth must be positive"));
        }
        if self.min_column_width == 0 || self.min_column_width >= self.max_column_width {
            return Err(GridError::invalid(format!(
                "column width bounds must satisfy 0 < min < max, got {}..{}",
                self.min_column_width, self.max_column_width
            )));
        }
        if !(self.min_column_width..=self.max_column_width).contains(&self.default_column_width) {
            return Err(GridError::invalid(format!(
                "defaultColumnWidth ({}) outside {}..={}",
                self.default_column_width, self.min_column_width, self.max_column_width
            )));
        }

        Ok(ValidatedConfig {
            total_count,
            row_height: self.row_height,
            item_size: self.item_size(),
            sticky_columns,
            columns_per_row,
            default_column_width: self.default_column_width,
            scroll_column_width: self.scroll_column_width,
            overscan,
            min_column_width: self.min_column_width,
            max_column_width: self.max_column_width,
        })
    }
}

fn non_negative(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| GridError::invalid(format!("{field} must not be negative, got {value}")))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GridConfig::default().validate().unwrap();
        assert_eq!(config.total_count, 10_000);
        assert_eq!(config.item_size, 35.0);
        assert_eq!(config.sticky_columns, 4);
        assert_eq!(config.columns_per_row, 14);
        assert_eq!(config.overscan, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GridConfig::from_json(r#"{"totalCount": 50, "rowGap": 5}"#).unwrap();
        assert_eq!(config.total_count, 50);
        assert_eq!(config.item_size(), 40.0);
        assert_eq!(config.sticky_columns, DEFAULT_STICKY_COLUMNS);
    }

    #[test]
    fn test_malformed_json() {
        let err = GridConfig::from_json("{totalCount").unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }

    #[test]
    fn test_rejects_non_positive_row_height() {
        for row_height in [0.0, -35.0, f64::NAN] {
            let config = GridConfig {
                row_height,
                ..GridConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, GridError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_rejects_negative_counts() {
        let config = GridConfig {
            total_count: -1,
            ..GridConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("totalCount"));

        let config = GridConfig {
            sticky_columns: -2,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_sticky_beyond_columns() {
        let config = GridConfig {
            sticky_columns: 15,
            ..GridConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stickyColumns"));
    }

    #[test]
    fn test_rejects_bad_width_bounds() {
        let config = GridConfig {
            min_column_width: 400,
            max_column_width: 60,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GridConfig {
            default_column_width: 500,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_columns_sticky_is_valid() {
        let config = GridConfig {
            sticky_columns: 14,
            ..GridConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
