//! Login Guard WASM
//!
//! Browser bindings for the login guard. Collects the form's inputs, binds the
//! submit click and per-field focus events, and runs the core gate.
//!
//! ```javascript
//! import init, { LoginGuard } from './login_guard_wasm.js';
//!
//! await init();
//! const guard = new LoginGuard({ guard_reentry: true });
//! guard.attach();
//! // reCAPTCHA expired/error callback:
//! window.onCaptchaReset = () => guard.release();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use login_guard_core::{self as guard, FieldDescriptor, GuardConfig, RuleSettings, ValidationGate};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget};

pub mod captcha;
pub mod dom;

use captcha::Challenge;
use dom::{toggle_parent_class, DomForm};

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

struct GuardState {
    gate: ValidationGate,
    form: DomForm,
    challenge: Challenge,
}

impl GuardState {
    fn submit(&mut self) -> bool {
        let GuardState {
            gate,
            form,
            challenge,
        } = self;
        gate.attempt_submit(form, challenge).triggered
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Submit gate bound to the current document
#[wasm_bindgen]
pub struct LoginGuard {
    state: Rc<RefCell<GuardState>>,
    config: GuardConfig,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl LoginGuard {
    /// Build a guard from an optional config object (missing keys use defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<LoginGuard, JsValue> {
        let config: GuardConfig = if config.is_undefined() || config.is_null() {
            GuardConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let form = DomForm::collect(&document()?, &config.field_selector, &config.error_class)?;
        let gate = ValidationGate::new(form.descriptors(), &config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(LoginGuard {
            state: Rc::new(RefCell::new(GuardState {
                gate,
                form,
                challenge: Challenge::Grecaptcha,
            })),
            config,
            listeners: Vec::new(),
        })
    }

    /// Replace `grecaptcha.execute()` with a page-supplied callback
    #[wasm_bindgen(js_name = setChallenge)]
    pub fn set_challenge(&mut self, callback: Function) -> Result<(), JsValue> {
        let mut state = self
            .state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("login guard is busy"))?;
        state.challenge = Challenge::Callback(callback);
        Ok(())
    }

    /// Bind the submit click and focus handlers. Calling it again rebinds.
    pub fn attach(&mut self) -> Result<(), JsValue> {
        self.detach();
        let document = document()?;

        for target in select_all(&document, &self.config.submit_selector)? {
            let state = Rc::clone(&self.state);
            let callback = Closure::wrap(Box::new(move |event: Event| {
                // The challenge callback submits the form; the click never does.
                event.prevent_default();
                match state.try_borrow_mut() {
                    Ok(mut state) => {
                        state.submit();
                    }
                    Err(_) => web_sys::console::warn_1(&JsValue::from_str(
                        "login-guard: submit ignored while a previous run is active",
                    )),
                }
            }) as Box<dyn FnMut(Event)>);
            self.listen(target.into(), "click", callback)?;
        }

        for element in select_all(&document, &self.config.focus_selector)? {
            let state = Rc::clone(&self.state);
            let error_class = self.config.error_class.clone();
            let index = state.borrow().form.index_of(&element);
            let focused = element.clone();
            let callback = Closure::wrap(Box::new(move |_event: Event| {
                match (index, state.try_borrow_mut()) {
                    (Some(index), Ok(mut state)) => {
                        let GuardState { gate, form, .. } = &mut *state;
                        gate.focus(index, form);
                    }
                    // Not a validated input; still clear its marker.
                    _ => toggle_parent_class(&focused, &error_class, false),
                }
            }) as Box<dyn FnMut(Event)>);
            self.listen(element.into(), "focus", callback)?;
        }

        Ok(())
    }

    /// Remove every handler bound by `attach`
    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }

    /// Run the gate once; returns true if the challenge was triggered
    #[wasm_bindgen(js_name = attemptSubmit)]
    pub fn attempt_submit(&self) -> Result<bool, JsValue> {
        let mut state = self
            .state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("login guard is busy"))?;
        Ok(state.submit())
    }

    /// Clear the error marker of the field at `index`
    #[wasm_bindgen(js_name = focusField)]
    pub fn focus_field(&self, index: usize) -> Result<(), JsValue> {
        let mut state = self
            .state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("login guard is busy"))?;
        let GuardState { gate, form, .. } = &mut *state;
        gate.focus(index, form);
        Ok(())
    }

    /// Re-arm the challenge after it expired or failed (only matters with `guard_reentry`)
    pub fn release(&self) -> Result<(), JsValue> {
        let mut state = self
            .state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("login guard is busy"))?;
        state.gate.release();
        Ok(())
    }

    #[wasm_bindgen(js_name = isErrored)]
    pub fn is_errored(&self, index: usize) -> bool {
        self.state
            .try_borrow()
            .ok()
            .and_then(|state| state.gate.state(index))
            .map_or(false, |s| s.is_errored())
    }

    #[wasm_bindgen(js_name = fieldCount)]
    pub fn field_count(&self) -> usize {
        self.state.try_borrow().map_or(0, |state| state.form.len())
    }
}

impl LoginGuard {
    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for LoginGuard {
    fn drop(&mut self) {
        self.detach();
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("login-guard: no document available"))
}

fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    guard::is_valid_email(email)
}

/// Validate one value by field name using the default rule settings
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field_js(name: &str, value: &str) -> bool {
    guard::validate_field(&FieldDescriptor::new(name), value, &RuleSettings::default())
}
