// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite

pub mod types;
pub mod params;
pub mod window;
pub mod input;
pub mod ltv;
pub mod aggregator;
pub mod price_model;
pub mod summary;
pub mod engine;
pub mod error;

// Decimal revenue ledger
pub mod money;
pub mod split;
pub mod conservation;
pub mod adapter;

pub use types::*;
pub use engine::{summarize, TokenomicsEngine};
pub use error::EngineError;
pub use params::{ParameterError, SimulationParameters};
pub use window::WINDOW_SIZE;

use wasm_bindgen::prelude::*;

use input::InputError;

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn records_from_js(value: JsValue) -> Result<Vec<DailyRecord>, EngineError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| InputError::Malformed(e.to_string()).into())
}

fn params_from_js(value: JsValue) -> Result<SimulationParameters, EngineError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| ParameterError::Malformed(e.to_string()).into())
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl TokenomicsEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(records: JsValue) -> Result<TokenomicsEngine, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let records = records_from_js(records)?;
        Ok(Self::with_records(records, SimulationParameters::default()))
    }

    #[wasm_bindgen(js_name = setParameters)]
    pub fn set_parameters_js(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params = params_from_js(params)?;
        self.set_parameters(params)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setRecords)]
    pub fn set_records_js(&mut self, records: JsValue) -> Result<(), JsValue> {
        self.set_records(records_from_js(records)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = getParameters)]
    pub fn get_parameters(&self) -> JsValue {
        to_js(self.parameters())
    }

    #[wasm_bindgen(js_name = run)]
    pub fn run_js(&mut self) -> Result<JsValue, JsValue> {
        let output = self.run()?;
        Ok(to_js(output))
    }

    #[wasm_bindgen(js_name = weeklyPrices)]
    pub fn weekly_prices_js(&mut self) -> Result<JsValue, JsValue> {
        let weekly = self.weekly_prices()?;
        Ok(to_js(&weekly))
    }
}

/// Parameter set the dashboard starts from.
#[wasm_bindgen(js_name = defaultParameters)]
pub fn default_parameters() -> JsValue {
    to_js(&SimulationParameters::default())
}

/// One-shot run without keeping an engine around.
#[wasm_bindgen(js_name = summarize)]
pub fn summarize_js(records: JsValue, params: JsValue) -> Result<JsValue, JsValue> {
    let records = records_from_js(records)?;
    let params = params_from_js(params)?;
    let output = summarize(&records, &params)?;
    Ok(to_js(&output))
}
