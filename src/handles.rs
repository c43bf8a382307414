use crate::constants::DEFAULT_PRESET;
use crate::detach::{DetachQueue, Detached};
use crate::dom;
use crate::events::{self, Listener};
use crate::paint::ScenePainter;
use crate::stage::{self, Stage};
use anyhow::anyhow;
use motion_core::{AttractorConfig, AttractorId, SceneConfig, SceneId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn document() -> anyhow::Result<web::Document> {
    dom::window_document().ok_or_else(|| anyhow!("no document"))
}

/// A parallax scene bound to one surface element. Dropping it (or calling
/// `unmount`) removes its listeners and stops painting.
#[wasm_bindgen]
pub struct MotionScene {
    stage: Rc<RefCell<Stage>>,
    detached: Rc<DetachQueue>,
    id: SceneId,
    listeners: Vec<Listener>,
    mounted: bool,
}

#[wasm_bindgen]
impl MotionScene {
    /// `preset` is `"solar"` (default) or `"landscape"`.
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, preset: Option<String>) -> Result<MotionScene, JsValue> {
        let name = preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let config = SceneConfig::preset(name).map_err(to_js)?;
        Self::mount(element_id, config).map_err(to_js)
    }

    /// Mount with a JSON scene description instead of a preset.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(element_id: &str, json: &str) -> Result<MotionScene, JsValue> {
        let config = SceneConfig::from_json(json).map_err(to_js)?;
        Self::mount(element_id, config).map_err(to_js)
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.listeners.clear();
        stage::detach(&self.stage, &self.detached, Detached::Scene(self.id));
    }
}

impl MotionScene {
    fn mount(element_id: &str, config: SceneConfig) -> anyhow::Result<MotionScene> {
        let surface = dom::html_element_by_id(&document()?, element_id)?;
        let stage = stage::shared()?;
        let painter = ScenePainter::collect(&surface);
        painter.check_counts(config.layers.len(), config.particles.count(), config.pulses.len());

        let (id, detached) = {
            let mut s = stage.borrow_mut();
            let id = s.engine.mount_scene(config)?;
            s.scenes.insert(id, painter);
            (id, s.detached.clone())
        };

        let mut scene = MotionScene {
            stage: stage.clone(),
            detached,
            id,
            listeners: Vec::new(),
            mounted: true,
        };
        // on error `scene` drops here and unmounts what was registered
        scene.listeners.extend(events::pointer::wire_scene(&stage, id, &surface)?);
        scene.listeners.extend(events::orientation::wire_scene(&stage, id)?);
        log::info!("[scene] {id} mounted on #{element_id}");
        Ok(scene)
    }
}

impl Drop for MotionScene {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Pulls a control toward the pointer while hovered and springs it back on
/// leave.
#[wasm_bindgen]
pub struct MagneticControl {
    stage: Rc<RefCell<Stage>>,
    detached: Rc<DetachQueue>,
    id: AttractorId,
    listeners: Vec<Listener>,
    mounted: bool,
}

#[wasm_bindgen]
impl MagneticControl {
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str) -> Result<MagneticControl, JsValue> {
        Self::mount(element_id, AttractorConfig::default()).map_err(to_js)
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.listeners.clear();
        stage::detach(&self.stage, &self.detached, Detached::Control(self.id));
    }
}

impl MagneticControl {
    fn mount(element_id: &str, config: AttractorConfig) -> anyhow::Result<MagneticControl> {
        let el = dom::html_element_by_id(&document()?, element_id)?;
        let stage = stage::shared()?;
        let (id, detached) = {
            let mut s = stage.borrow_mut();
            let id = s.engine.mount_attractor(dom::element_rect(&el), config)?;
            s.controls.insert(id, el.clone());
            (id, s.detached.clone())
        };
        let mut control = MagneticControl {
            stage: stage.clone(),
            detached,
            id,
            listeners: Vec::new(),
            mounted: true,
        };
        control.listeners.extend(events::pointer::wire_control(&stage, id, &el)?);
        log::info!("[magnet] {id} mounted on #{element_id}");
        Ok(control)
    }
}

impl Drop for MagneticControl {
    fn drop(&mut self) {
        self.unmount();
    }
}
