//! Browser bindings.
//!
//! [`Viewer`] wraps [`ViewerCore`] for the JavaScript host. Every query
//! returns a JSON string the host parses and hands to its renderer; all logic
//! lives in the core so it can be tested without a browser.

#[cfg(test)]
#[path = "wasm_test.rs"]
mod wasm_test;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::camera::Viewport;
use crate::map::MapLayer;
use crate::timeline::TimelineRange;
use crate::viewer::ViewerCore;

/// The viewer as exposed to JavaScript.
#[wasm_bindgen]
pub struct Viewer {
    core: ViewerCore,
}

#[wasm_bindgen]
impl Viewer {
    /// Decode the dataset document and lay it out once.
    #[wasm_bindgen(constructor)]
    pub fn new(dataset_json: &str, min_year: i32, max_year: i32) -> Result<Viewer, JsError> {
        let core = ViewerCore::from_json(dataset_json, TimelineRange::new(min_year, max_year))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter, js_name = cursorYear)]
    pub fn cursor_year(&self) -> i32 {
        self.core.cursor_year()
    }

    #[wasm_bindgen(js_name = layoutJson)]
    pub fn layout_json(&self) -> Result<String, JsError> {
        to_json(self.core.layout())
    }

    /// Move the timeline cursor; returns the new visual state.
    #[wasm_bindgen(js_name = setCursorYear)]
    pub fn set_cursor_year(&mut self, year: i32) -> Result<String, JsError> {
        to_json(self.core.set_cursor_year(year))
    }

    #[wasm_bindgen(js_name = visualStateJson)]
    pub fn visual_state_json(&self) -> Result<String, JsError> {
        to_json(self.core.visual_state())
    }

    /// View transform centring a person, or `null` when not in the tree.
    #[wasm_bindgen(js_name = focusJson)]
    pub fn focus_json(&self, id: &str, width: f64, height: f64) -> Result<String, JsError> {
        to_json(&self.core.focus(id, Viewport::new(width, height)))
    }

    #[wasm_bindgen(js_name = searchJson)]
    pub fn search_json(&self, query: &str) -> Result<String, JsError> {
        to_json(&self.core.search(query))
    }

    #[wasm_bindgen(js_name = periodBarsJson)]
    pub fn period_bars_json(&self) -> Result<String, JsError> {
        to_json(&self.core.period_bars())
    }

    #[wasm_bindgen(js_name = mapEventsJson)]
    pub fn map_events_json(&self) -> Result<String, JsError> {
        to_json(self.core.map_events())
    }

    #[wasm_bindgen(js_name = migrationLinesJson)]
    pub fn migration_lines_json(&self) -> Result<String, JsError> {
        to_json(self.core.migration_lines())
    }

    #[wasm_bindgen(js_name = mapStateJson)]
    pub fn map_state_json(&self) -> Result<String, JsError> {
        to_json(self.core.map_state())
    }

    /// Toggle a legend layer (`birth`, `death`, `marriage`, `migration`);
    /// returns the new map state.
    #[wasm_bindgen(js_name = setMapLayer)]
    pub fn set_map_layer(&mut self, layer: &str, visible: bool) -> Result<String, JsError> {
        let layer: MapLayer = layer.parse()?;
        to_json(self.core.set_map_layer(layer, visible))
    }

    /// Place to centre the map on for a person, if it is located.
    #[wasm_bindgen(js_name = mapFocus)]
    pub fn map_focus(&self, id: &str) -> Option<String> {
        self.core.map_focus(id).map(str::to_owned)
    }

    /// Detail panel contents, or `null` for an unknown id.
    #[wasm_bindgen(js_name = detailsJson)]
    pub fn details_json(&self, id: &str) -> Result<String, JsError> {
        to_json(&self.core.details(id))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    Ok(serde_json::to_string(value)?)
}
