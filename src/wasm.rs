use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    Generator, GeneratorParams, Geometry, LadderConfig, Layout, Point, compute_all_results,
    generate, trace,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceView {
    path: Vec<Point>,
    final_column: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutView {
    rungs: Vec<Vec<bool>>,
    row_count: usize,
}

/// Convert a Layout to a JsValue (`{ rungs: boolean[][], rowCount }`).
fn layout_to_js(layout: &Layout) -> Result<JsValue, JsError> {
    let view = LayoutView {
        rungs: layout.to_rows(),
        row_count: layout.row_count(),
    };
    serde_wasm_bindgen::to_value(&view).map_err(|e| JsError::new(&e.to_string()))
}

fn config(column_count: u8, exclude_self: bool) -> Result<LadderConfig, JsError> {
    if column_count < 2 {
        return Err(JsError::new("columnCount must be at least 2"));
    }
    Ok(LadderConfig::new(column_count as usize, exclude_self))
}

/// Generate a board with the given seed.
/// Returns `{ rungs, rowCount }` directly usable in JavaScript.
#[wasm_bindgen]
pub fn generate_ladder(column_count: u8, exclude_self: bool, seed: u64) -> Result<JsValue, JsError> {
    let config = config(column_count, exclude_self)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let layout = generate(config, &mut rng, &GeneratorParams::default())
        .map_err(|e| JsError::new(&e.to_string()))?;

    layout_to_js(&layout)
}

/// A board plus the generator that regenerates it.
///
/// `next()` discards the current board and draws a new one; `trace` and
/// `results` always refer to the current board.
#[wasm_bindgen]
pub struct WasmLadder {
    generator: Generator<ChaCha20Rng>,
    current: Layout,
}

#[wasm_bindgen]
impl WasmLadder {
    /// Create a ladder with `column_count` columns.
    ///
    /// `column_count` must be at least 2. The `seed` determines the random sequence.
    #[wasm_bindgen(constructor)]
    pub fn new(column_count: u8, exclude_self: bool, seed: u64) -> Result<WasmLadder, JsError> {
        let config = config(column_count, exclude_self)?;
        let rng = ChaCha20Rng::seed_from_u64(seed);
        let mut generator = Generator::new(config, rng, GeneratorParams::default())
            .map_err(|e| JsError::new(&e.to_string()))?;
        let current = generator
            .next()
            .ok_or_else(|| JsError::new("generator produced no board"))?;
        Ok(WasmLadder { generator, current })
    }

    /// The current board as `{ rungs, rowCount }`.
    pub fn layout(&self) -> Result<JsValue, JsError> {
        layout_to_js(&self.current)
    }

    /// Replace the current board with a fresh one and return it.
    pub fn next(&mut self) -> Result<JsValue, JsError> {
        self.current = self
            .generator
            .next()
            .ok_or_else(|| JsError::new("generator produced no board"))?;
        layout_to_js(&self.current)
    }

    /// Trace one column through the current board.
    /// Returns `{ path: {x, y}[], finalColumn }`, with `path` alternating
    /// strictly between vertical and horizontal moves.
    pub fn trace(
        &self,
        start_column: u8,
        cell_width: f64,
        cell_height: f64,
        start_y: f64,
    ) -> Result<JsValue, JsError> {
        let start = start_column as usize;
        if start >= self.current.column_count() {
            return Err(JsError::new("startColumn out of range"));
        }
        let geometry = Geometry {
            cell_width,
            cell_height,
            start_y,
        };
        if !geometry.is_valid() {
            return Err(JsError::new(
                "cellWidth and cellHeight must be positive and finite, startY finite",
            ));
        }
        let t = trace(&self.current, start, &geometry);
        let view = TraceView {
            path: t.simplified(),
            final_column: t.final_column,
        };
        serde_wasm_bindgen::to_value(&view).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Final column for every start column of the current board.
    pub fn results(&self) -> Vec<u32> {
        compute_all_results(&self.current)
            .into_iter()
            .map(|c| c as u32)
            .collect()
    }
}
