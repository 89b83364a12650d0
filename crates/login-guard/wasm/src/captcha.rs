// File: src/captcha.rs
// Purpose: Challenge triggers callable from the gate

use js_sys::Function;
use login_guard_core::ChallengeTrigger;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    // Throws a ReferenceError if the reCAPTCHA script has not loaded.
    #[wasm_bindgen(catch, js_namespace = grecaptcha, js_name = execute)]
    fn grecaptcha_execute() -> Result<JsValue, JsValue>;
}

/// Fire-and-forget challenge trigger
pub enum Challenge {
    /// Invisible reCAPTCHA: `grecaptcha.execute()`
    Grecaptcha,
    /// A page-supplied zero-argument callback
    Callback(Function),
}

impl ChallengeTrigger for Challenge {
    fn trigger_challenge(&mut self) {
        let result = match self {
            Challenge::Grecaptcha => grecaptcha_execute().map(|_| ()),
            Challenge::Callback(f) => f.call0(&JsValue::NULL).map(|_| ()),
        };

        if let Err(e) = result {
            web_sys::console::error_2(&JsValue::from_str("login-guard: challenge trigger failed"), &e);
        }
    }
}
