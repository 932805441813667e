//! Aggregator Module
//! Pure grouping operations over loaded DataFrames: group-by with sum or
//! mean, raw column extraction, and per-state totals for the map page.

use polars::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{0}' is not numeric")]
    NonNumeric(String),
}

/// Flat summary table: one label and one value per group.
#[derive(Debug, Default, Clone)]
pub struct Summary {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Enrollment total for one federal unit.
#[derive(Debug, Clone)]
pub struct StateTotal {
    pub uf: String,
    pub state: String,
    pub total: f64,
}

enum AggKind {
    Sum,
    Mean,
}

/// Stateless grouping and extraction operations.
pub struct Aggregator;

impl Aggregator {
    /// Group by a categorical column and sum a numeric column.
    pub fn group_sum(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> Result<Summary, AggregateError> {
        Self::grouped(df, group_col, value_col, AggKind::Sum)
    }

    /// Group by a categorical column and average a numeric column.
    pub fn group_mean(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> Result<Summary, AggregateError> {
        Self::grouped(df, group_col, value_col, AggKind::Mean)
    }

    /// Group by a numeric column (typically a year), average a numeric
    /// column and return `(x, y)` pairs sorted by x.
    pub fn group_mean_points(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> Result<Vec<[f64; 2]>, AggregateError> {
        Self::check_numeric(df, group_col)?;
        Self::check_numeric(df, value_col)?;

        let out = df
            .clone()
            .lazy()
            .group_by([col(group_col)])
            .agg([col(value_col).mean()])
            .sort([group_col], Default::default())
            .collect()?;

        Self::xy_points(&out, group_col, value_col)
    }

    /// Unweighted sum of a numeric column, nulls skipped.
    pub fn column_sum(df: &DataFrame, name: &str) -> Result<f64, AggregateError> {
        let values = Self::numeric_f64(df, name)?;
        Ok(values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .sum())
    }

    /// Number of distinct values in a column.
    pub fn unique_count(df: &DataFrame, name: &str) -> Result<usize, AggregateError> {
        let column = df
            .column(name)
            .map_err(|_| AggregateError::MissingColumn(name.to_string()))?;
        let unique = column.unique()?;
        Ok(unique.len())
    }

    /// Raw values of a numeric column bucketed per group, groups sorted.
    pub fn values_by_group(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> Result<Vec<(String, Vec<f64>)>, AggregateError> {
        let groups = df
            .column(group_col)
            .map_err(|_| AggregateError::MissingColumn(group_col.to_string()))?;
        let values = Self::numeric_f64(df, value_col)?;

        let mut by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for i in 0..df.height() {
            if let (Ok(g), Some(Some(v))) = (groups.get(i), values.get(i)) {
                if !g.is_null() && v.is_finite() {
                    by_group
                        .entry(g.to_string().trim_matches('"').to_string())
                        .or_default()
                        .push(*v);
                }
            }
        }
        Ok(by_group.into_iter().collect())
    }

    /// Raw `(x, y)` pairs from two numeric columns, sorted by x.
    pub fn xy_points(
        df: &DataFrame,
        x_col: &str,
        y_col: &str,
    ) -> Result<Vec<[f64; 2]>, AggregateError> {
        let xs = Self::numeric_f64(df, x_col)?;
        let ys = Self::numeric_f64(df, y_col)?;

        let mut points: Vec<[f64; 2]> = xs
            .into_iter()
            .zip(ys)
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some([x, y]),
                _ => None,
            })
            .collect();
        points.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));
        Ok(points)
    }

    /// Enrollment total per federal unit, for the map page.
    pub fn state_totals(
        df: &DataFrame,
        uf_col: &str,
        state_col: &str,
        value_col: &str,
    ) -> Result<Vec<StateTotal>, AggregateError> {
        Self::check_numeric(df, value_col)?;

        let out = df
            .clone()
            .lazy()
            .group_by([col(uf_col), col(state_col)])
            .agg([col(value_col).sum()])
            .sort([uf_col], Default::default())
            .collect()?;

        let ufs = out.column(uf_col)?;
        let states = out.column(state_col)?;
        let totals = Self::numeric_f64(&out, value_col)?;

        let mut result = Vec::with_capacity(out.height());
        for i in 0..out.height() {
            if let (Ok(uf), Ok(state), Some(Some(total))) = (ufs.get(i), states.get(i), totals.get(i))
            {
                if !uf.is_null() && !state.is_null() && total.is_finite() {
                    result.push(StateTotal {
                        uf: uf.to_string().trim_matches('"').to_string(),
                        state: state.to_string().trim_matches('"').to_string(),
                        total: *total,
                    });
                }
            }
        }
        Ok(result)
    }

    fn grouped(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
        kind: AggKind,
    ) -> Result<Summary, AggregateError> {
        Self::check_numeric(df, value_col)?;

        let expr = match kind {
            AggKind::Sum => col(value_col).sum(),
            AggKind::Mean => col(value_col).mean(),
        };
        let out = df
            .clone()
            .lazy()
            .group_by([col(group_col)])
            .agg([expr])
            .sort([group_col], Default::default())
            .collect()?;

        let groups = out.column(group_col)?;
        let values = Self::numeric_f64(&out, value_col)?;

        let mut summary = Summary::default();
        for i in 0..out.height() {
            if let (Ok(g), Some(Some(v))) = (groups.get(i), values.get(i)) {
                if !g.is_null() && v.is_finite() {
                    summary
                        .labels
                        .push(g.to_string().trim_matches('"').to_string());
                    summary.values.push(*v);
                }
            }
        }
        Ok(summary)
    }

    fn check_numeric(df: &DataFrame, name: &str) -> Result<(), AggregateError> {
        let column = df
            .column(name)
            .map_err(|_| AggregateError::MissingColumn(name.to_string()))?;
        if Self::is_numeric(column.dtype()) {
            Ok(())
        } else {
            Err(AggregateError::NonNumeric(name.to_string()))
        }
    }

    fn numeric_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AggregateError> {
        let column = df
            .column(name)
            .map_err(|_| AggregateError::MissingColumn(name.to_string()))?;
        if !Self::is_numeric(column.dtype()) {
            return Err(AggregateError::NonNumeric(name.to_string()));
        }
        let casted = column.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        Ok(ca.into_iter().collect())
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }
}
