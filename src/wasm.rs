//! JavaScript entry points taking column heights and returning rendered results.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::maximize::graphically_maximizing_chain;
use crate::partition::Partition;
use crate::search::{find_shortest_maximizing_chain, PartitionSearch};

fn partition_of(columns: &[u32]) -> Partition {
    Partition::new(columns.iter().map(|height| *height as usize).collect())
}

/// Render the moves lifting the partition with the given columns to the maximum graphical partition above it.
#[wasm_bindgen(js_name = maximizingChain)]
pub fn maximizing_chain(columns: &[u32]) -> Result<String, JsError> {
    Ok(graphically_maximizing_chain(&partition_of(columns))?.to_string())
}

/// Render each partition along a shortest ascent to a maximum graphical partition.
#[wasm_bindgen(js_name = shortestMaximizingChain)]
pub fn shortest_maximizing_chain(columns: &[u32]) -> Result<Array, JsError> {
    Ok(find_shortest_maximizing_chain(&partition_of(columns))?
        .iter()
        .map(|partition| JsValue::from_str(&partition.to_string()))
        .collect())
}

/// Render every reachable maximum graphical partition with its distance, as `partition @ distance`.
#[wasm_bindgen(js_name = reachableMaxima)]
pub fn reachable_maxima(columns: &[u32]) -> Result<Array, JsError> {
    Ok(PartitionSearch::new(&partition_of(columns))?
        .iter()
        .map(|(partition, distance)| JsValue::from_str(&format!("{partition} @ {distance}")))
        .collect())
}
