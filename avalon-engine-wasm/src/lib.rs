//! WASM bindings for avalon-engine: the JSON boundary used by the web host app.
//!
//! The same handlers serve a browser running offline and a server route; both
//! pass JSON in and get JSON back, and both run the one shared engine.

use wasm_bindgen::prelude::*;

use avalon_engine::presets::{self, PRESET_NAMES};
use avalon_engine::{AvalonEngine, Deal, Module, ModuleConfiguration, ValidationResult};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct SetupRequest {
    players: u32,
    #[serde(default)]
    config: ModuleConfiguration,
}

#[derive(serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum AssignResponse {
    Dealt(Deal),
    Rejected {
        error: String,
        validation: ValidationResult,
    },
}

#[derive(serde::Serialize)]
struct ModuleInfo {
    id: String,
    label: &'static str,
    team: Option<&'static str>,
    description: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers: plain Rust so they can be exercised off-target
// ---------------------------------------------------------------------------
fn parse_request(request_json: &str) -> Result<SetupRequest, String> {
    serde_json::from_str(request_json).map_err(|e| format!("Invalid setup JSON: {e}"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {e}"))
}

pub fn handle_validate(engine: &AvalonEngine, request_json: &str) -> Result<String, String> {
    let request = parse_request(request_json)?;
    to_json(&engine.validate(request.players, &request.config))
}

pub fn handle_assign(engine: &mut AvalonEngine, request_json: &str) -> Result<String, String> {
    let request = parse_request(request_json)?;
    let response = match engine.assign(request.players, &request.config) {
        Ok(deal) => AssignResponse::Dealt(deal),
        Err(e) => {
            tracing::debug!(error = %e, "assign rejected at JSON boundary");
            AssignResponse::Rejected {
                error: e.to_string(),
                validation: engine.validate(request.players, &request.config),
            }
        }
    };
    to_json(&response)
}

pub fn handle_narrate(engine: &AvalonEngine, request_json: &str) -> Result<String, String> {
    let request = parse_request(request_json)?;
    to_json(&engine.narrate(request.players, &request.config))
}

pub fn handle_summary(engine: &AvalonEngine, request_json: &str) -> Result<String, String> {
    let request = parse_request(request_json)?;
    to_json(&engine.summary(request.players, &request.config))
}

pub fn handle_preset(name: &str) -> Result<String, String> {
    let config = presets::builtin(name)
        .map_err(|e| format!("Preset parse error: {e}"))?
        .ok_or_else(|| format!("Unknown preset: {name}"))?;
    to_json(&config)
}

fn module_catalogue() -> Vec<ModuleInfo> {
    Module::ALL
        .iter()
        .map(|m| ModuleInfo {
            id: format!("{:?}", m),
            label: m.label(),
            team: m.team().map(|t| t.label()),
            description: m.description(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// HostSession, the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct HostSession {
    engine: AvalonEngine,
}

#[wasm_bindgen]
impl HostSession {
    /// Create a session whose deals are reproducible from `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> HostSession {
        HostSession {
            engine: AvalonEngine::builder().seed(seed).build(),
        }
    }

    /// Create a session that draws seats from the browser's entropy source.
    pub fn unseeded() -> HostSession {
        HostSession {
            engine: AvalonEngine::default(),
        }
    }

    /// Validate a setup described by a JSON string.
    ///
    /// Expected JSON shape:
    /// ```json
    /// {
    ///   "players": 7,
    ///   "config": { "modules": ["Merlin", "Percival"], "lancelot": "Off" }
    /// }
    /// ```
    pub fn validate(&self, request_json: &str) -> Result<String, JsError> {
        handle_validate(&self.engine, request_json).map_err(|e| JsError::new(&e))
    }

    /// Deal seats. Returns `{"status":"dealt",...}` or
    /// `{"status":"rejected","error":...,"validation":...}`.
    pub fn assign(&mut self, request_json: &str) -> Result<String, JsError> {
        handle_assign(&mut self.engine, request_json).map_err(|e| JsError::new(&e))
    }

    /// Compile the reveal script. Returns `{"steps":[...],"notes":[...]}`.
    pub fn narrate(&self, request_json: &str) -> Result<String, JsError> {
        handle_narrate(&self.engine, request_json).map_err(|e| JsError::new(&e))
    }

    /// One-line session summary as a JSON string.
    pub fn summary(&self, request_json: &str) -> Result<String, JsError> {
        handle_summary(&self.engine, request_json).map_err(|e| JsError::new(&e))
    }

    /// Return JSON array of built-in preset names.
    pub fn presets() -> String {
        serde_json::to_string(&PRESET_NAMES).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return a built-in preset's configuration as JSON.
    pub fn preset(name: &str) -> Result<String, JsError> {
        handle_preset(name).map_err(|e| JsError::new(&e))
    }

    /// Return JSON array describing every module.
    pub fn modules() -> String {
        serde_json::to_string(&module_catalogue()).unwrap_or_else(|_| "[]".to_string())
    }
}
