use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use catalog::{ShipCatalog, ShipParams};
use loading::{LoaderSample, LoadingFrame, LoadingSession};
use overlay::{PanelLayout, PanelSide, StatsTab, ViewControls, ViewMode, ship_params_from_query};
use runtime::EventBus;

mod dom;
mod views;

#[derive(Debug)]
pub struct ViewerState {
    pub session: LoadingSession,
    pub bus: EventBus,
    pub layout: PanelLayout,
    pub controls: ViewControls,
    pub catalog: Option<ShipCatalog>,
    pub params: Option<ShipParams>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            session: LoadingSession::default(),
            bus: EventBus::new(),
            layout: PanelLayout::default(),
            controls: ViewControls::default(),
            catalog: None,
            params: None,
        }
    }
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new(ViewerState::default());
}

/// Loading overlay values for one animation frame.
#[wasm_bindgen(getter_with_clone)]
#[derive(Debug, Clone)]
pub struct LoadingView {
    pub active: bool,
    pub display_progress: f64,
    pub percent: u8,
    /// Centred readout text, e.g. `"42%"`.
    pub label: String,
    pub ring_dash_offset: f64,
    pub message: String,
}

impl From<LoadingFrame> for LoadingView {
    fn from(frame: LoadingFrame) -> Self {
        Self {
            active: frame.active,
            display_progress: frame.display_progress,
            percent: frame.readout.percent,
            label: frame.readout.label(),
            ring_dash_offset: frame.readout.ring_dash_offset,
            message: frame.message,
        }
    }
}

fn flush_events(bus: &mut EventBus) {
    for event in bus.drain() {
        dom::log(&format!(
            "[frame {} @ {:.2}s] {}: {}",
            event.frame_index, event.at.0, event.kind, event.message
        ));
    }
}

fn parse_side(side: &str) -> Result<PanelSide, JsValue> {
    PanelSide::from_name(side).ok_or_else(|| JsValue::from_str(&format!("unknown panel side: {side}")))
}

fn to_js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    let catalog = ShipCatalog::builtin().map_err(to_js_err)?;
    STATE.with(|state| {
        state.borrow_mut().catalog = Some(catalog);
    });
    Ok(())
}

/// Feeds one animation frame of loader state.
///
/// Intended usage: call from `requestAnimationFrame` with the loader's
/// current `progress`/`active` and the frame delta in milliseconds.
#[wasm_bindgen]
pub fn loading_tick(progress: f64, active: bool, elapsed_ms: f64) -> LoadingView {
    STATE.with(|state| {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        let frame = s.session.advance(
            &LoaderSample::new(progress, active),
            elapsed_ms,
            &mut s.bus,
        );
        flush_events(&mut s.bus);
        frame.into()
    })
}

#[wasm_bindgen]
pub fn loading_reset() {
    STATE.with(|state| {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        s.session.reset(&mut s.bus);
        flush_events(&mut s.bus);
    });
}

/// Records the viewport width; returns true when the breakpoint changed.
#[wasm_bindgen]
pub fn set_viewport_width(width: f64) -> bool {
    STATE.with(|state| state.borrow_mut().layout.resize(width))
}

#[wasm_bindgen]
pub fn set_panel_hover(side: &str, hovered: bool) -> Result<(), JsValue> {
    let side = parse_side(side)?;
    STATE.with(|state| state.borrow_mut().layout.set_hover(side, hovered));
    Ok(())
}

/// `[left, right]` panel translation in pixels.
#[wasm_bindgen]
pub fn panel_offsets() -> Vec<f64> {
    STATE.with(|state| {
        let offsets = state.borrow().layout.offsets();
        vec![offsets.left, offsets.right]
    })
}

#[wasm_bindgen]
pub fn shows_hover_trigger(side: &str) -> Result<bool, JsValue> {
    let side = parse_side(side)?;
    Ok(STATE.with(|state| state.borrow().layout.shows_hover_trigger(side)))
}

#[wasm_bindgen]
pub fn layout_json() -> Result<String, JsValue> {
    STATE.with(|state| {
        let layout = state.borrow().layout;
        let bp = layout.breakpoint();
        serde_json::to_string(&serde_json::json!({
            "breakpoint": bp,
            "offsets": layout.offsets(),
            "left_panel_width_px": bp.left_panel_width_px(),
            "right_panel_width_px": bp.right_panel_width_px(),
            "stats_max_height_px": bp.stats_max_height_px(),
        }))
        .map_err(to_js_err)
    })
}

#[wasm_bindgen]
pub fn set_view_mode(label: &str) -> Result<bool, JsValue> {
    let mode = ViewMode::from_label(label)
        .ok_or_else(|| JsValue::from_str(&format!("unknown view mode: {label}")))?;
    Ok(STATE.with(|state| state.borrow_mut().controls.set_mode(mode)))
}

#[wasm_bindgen]
pub fn view_mode() -> String {
    STATE.with(|state| state.borrow().controls.mode.label().to_string())
}

#[wasm_bindgen]
pub fn shows_reticle() -> bool {
    STATE.with(|state| state.borrow().controls.mode.shows_reticle())
}

/// Returns the new rotation state.
#[wasm_bindgen]
pub fn toggle_rotation() -> bool {
    STATE.with(|state| state.borrow_mut().controls.toggle_rotation())
}

#[wasm_bindgen]
pub fn rotation_label() -> String {
    STATE.with(|state| state.borrow().controls.rotation_label().to_string())
}

#[wasm_bindgen]
pub fn select_stats_tab(name: &str) -> Result<(), JsValue> {
    let tab = StatsTab::from_name(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown stats tab: {name}")))?;
    STATE.with(|state| state.borrow_mut().controls.tab = tab);
    Ok(())
}

/// Contents of the active stats tab for the current ship.
#[wasm_bindgen]
pub fn stat_rows_json() -> Result<String, JsValue> {
    STATE.with(|state| {
        let s = state.borrow();
        let (catalog, params) = current_selection(&s)?;
        let view = views::ship_view(catalog, &params).map_err(to_js_err)?;
        serde_json::to_string(&views::stats_panel(s.controls.tab, view.stats)).map_err(to_js_err)
    })
}

/// Resolves `?ship=..&faction=..` against the catalog.
#[wasm_bindgen]
pub fn ship_params() -> Result<String, JsValue> {
    refresh_params_from_location()?;
    STATE.with(|state| {
        let s = state.borrow();
        let (catalog, params) = current_selection(&s)?;
        let view = views::ship_view(catalog, &params).map_err(to_js_err)?;
        if view.fell_back {
            dom::warn(&format!(
                "unknown ship/faction {:?}/{:?}; showing {}/{}",
                params.ship_id, params.faction_id, view.ship_id, view.faction_id
            ));
        }
        serde_json::to_string(&view).map_err(to_js_err)
    })
}

/// Re-resolves the ship on browser history navigation and passes the new
/// ship JSON to `callback`.
#[wasm_bindgen]
pub fn watch_ship_params(callback: js_sys::Function) -> Result<(), JsValue> {
    dom::on_popstate(move || match ship_params() {
        Ok(json) => {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                dom::warn(&format!("ship params callback failed: {:?}", err));
            }
        }
        Err(err) => dom::warn(&format!("ship params refresh failed: {:?}", err)),
    })
}

/// Replaces the built-in catalog with one fetched from `url`.
#[wasm_bindgen]
pub fn load_catalog(url: String) {
    spawn_local(async move {
        let catalog = match fetch_catalog(&url).await {
            Ok(c) => c,
            Err(err) => {
                dom::log(&format!("Failed to fetch catalog: {:?}", err));
                return;
            }
        };
        dom::log(&format!(
            "catalog loaded from {url}: {} ships, {} factions",
            catalog.ships.len(),
            catalog.factions.len()
        ));
        STATE.with(|state| {
            state.borrow_mut().catalog = Some(catalog);
        });
    });
}

fn current_selection(s: &ViewerState) -> Result<(&ShipCatalog, ShipParams), JsValue> {
    let catalog = s
        .catalog
        .as_ref()
        .ok_or_else(|| JsValue::from_str("catalog not loaded"))?;
    let params = s.params.clone().unwrap_or_else(|| catalog.default_params());
    Ok((catalog, params))
}

fn refresh_params_from_location() -> Result<(), JsValue> {
    let search = dom::location_search()?;
    STATE.with(|state| -> Result<(), JsValue> {
        let mut s = state.borrow_mut();
        let defaults = s
            .catalog
            .as_ref()
            .map(ShipCatalog::default_params)
            .ok_or_else(|| JsValue::from_str("catalog not loaded"))?;
        s.params = Some(ship_params_from_query(&search, &defaults));
        Ok(())
    })
}

async fn fetch_catalog(url: &str) -> Result<ShipCatalog, JsValue> {
    let resp = Request::get(url).send().await.map_err(to_js_err)?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "catalog request failed: HTTP {}",
            resp.status()
        )));
    }
    let text = resp.text().await.map_err(to_js_err)?;
    ShipCatalog::from_json_str(&text).map_err(to_js_err)
}
