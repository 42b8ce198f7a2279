//! Readers for the payload shapes the server embeds.
//!
//! Three shapes occur: a list of row objects (`[{date, count}, ...]`),
//! an object of parallel columns (`{labels: [...], values: [...]}`), and an
//! object of scalar counters. Numbers may arrive as JSON numbers or as
//! numeric strings (decimal fields are serialized as strings).

use crate::error::{ChartError, ChartResult};
use serde_json::Value;

/// Numeric value of a JSON number or numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Label text of a JSON string or number.
pub fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(record: &Value, field: &str, index: usize) -> ChartResult<f64> {
    let value = record
        .get(field)
        .ok_or_else(|| ChartError::missing_field(field, index))?;
    as_number(value).ok_or_else(|| ChartError::invalid_field(field, index))
}

/// Row list payload.
pub fn rows(payload: &Value) -> ChartResult<&[Value]> {
    payload
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ChartError::UnexpectedShape {
            expected: "a list of records".to_string(),
        })
}

/// Project each row to its label and the given metric fields.
///
/// Only the named fields are read. Returns the labels and one value column
/// per metric, each as long as the label column.
pub fn project_rows(
    rows: &[Value],
    label_field: &str,
    metrics: &[&str],
) -> ChartResult<(Vec<String>, Vec<Vec<f64>>)> {
    let mut labels = Vec::with_capacity(rows.len());
    let mut columns: Vec<Vec<f64>> = metrics
        .iter()
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();

    for (index, record) in rows.iter().enumerate() {
        let label = record
            .get(label_field)
            .ok_or_else(|| ChartError::missing_field(label_field, index))?;
        labels.push(as_label(label).ok_or_else(|| ChartError::invalid_field(label_field, index))?);

        for (column, metric) in columns.iter_mut().zip(metrics) {
            column.push(number_field(record, metric, index)?);
        }
    }

    Ok((labels, columns))
}

fn object(payload: &Value) -> ChartResult<&serde_json::Map<String, Value>> {
    payload.as_object().ok_or_else(|| ChartError::UnexpectedShape {
        expected: "an object".to_string(),
    })
}

/// Read a label column and value columns of equal length.
pub fn columns(
    payload: &Value,
    label_field: &str,
    value_fields: &[&str],
) -> ChartResult<(Vec<String>, Vec<Vec<f64>>)> {
    let obj = object(payload)?;

    let label_column = obj
        .get(label_field)
        .and_then(Value::as_array)
        .ok_or_else(|| ChartError::missing_field(label_field, 0))?;
    let labels = label_column
        .iter()
        .enumerate()
        .map(|(i, v)| as_label(v).ok_or_else(|| ChartError::invalid_field(label_field, i)))
        .collect::<ChartResult<Vec<_>>>()?;

    let mut columns = Vec::with_capacity(value_fields.len());
    for field in value_fields {
        let column = obj
            .get(*field)
            .and_then(Value::as_array)
            .ok_or_else(|| ChartError::missing_field(field, 0))?;
        if column.len() != labels.len() {
            return Err(ChartError::LengthMismatch {
                field: field.to_string(),
                expected: labels.len(),
                found: column.len(),
            });
        }
        let values = column
            .iter()
            .enumerate()
            .map(|(i, v)| as_number(v).ok_or_else(|| ChartError::invalid_field(field, i)))
            .collect::<ChartResult<Vec<_>>>()?;
        columns.push(values);
    }

    Ok((labels, columns))
}

/// Read named scalar counters from an object payload.
pub fn scalars(payload: &Value, fields: &[&str]) -> ChartResult<Vec<f64>> {
    let obj = object(payload)?;
    fields
        .iter()
        .map(|field| {
            let value = obj
                .get(*field)
                .ok_or_else(|| ChartError::missing_field(field, 0))?;
            as_number(value).ok_or_else(|| ChartError::invalid_field(field, 0))
        })
        .collect()
}
