//! Forecast export for downstream analysis: Parquet (one row per segment
//! entry) and pretty-printed JSON.

use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use forecast_core::aggregate::Forecast;

/// Write the forecast's per-segment entries as a Parquet file.
pub fn export_forecast_parquet<P: AsRef<Path>>(
    forecast: &Forecast,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let mut segment_ids = Vec::with_capacity(forecast.entries.len());
    let mut baseline_loads = Vec::with_capacity(forecast.entries.len());
    let mut capacities = Vec::with_capacity(forecast.entries.len());
    let mut additional_loads = Vec::with_capacity(forecast.entries.len());
    let mut over_capacity_probs = Vec::with_capacity(forecast.entries.len());

    for entry in &forecast.entries {
        segment_ids.push(entry.segment_id.0);
        baseline_loads.push(entry.baseline_load);
        capacities.push(entry.capacity);
        additional_loads.push(entry.additional_load);
        over_capacity_probs.push(entry.over_capacity_prob);
    }

    let schema = Schema::new(vec![
        Field::new("segment_id", DataType::UInt64, false),
        Field::new("baseline_load", DataType::Int64, false),
        Field::new("capacity", DataType::Int64, false),
        Field::new("additional_load", DataType::Float64, false),
        Field::new("over_capacity_prob", DataType::Float64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(segment_ids)),
        Arc::new(Int64Array::from(baseline_loads)),
        Arc::new(Int64Array::from(capacities)),
        Arc::new(Float64Array::from(additional_loads)),
        Arc::new(Float64Array::from(over_capacity_probs)),
    ];

    write_record_batch(path, schema, arrays)
}

/// Write the whole forecast as pretty-printed JSON.
pub fn export_forecast_json<P: AsRef<Path>>(
    forecast: &Forecast,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, forecast)?;
    Ok(())
}

fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
