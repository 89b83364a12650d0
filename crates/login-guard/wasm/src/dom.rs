// File: src/dom.rs
// Purpose: FormView over live document inputs

use login_guard_core::{FieldDescriptor, FormView};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

/// Tracked inputs in document order, plus the class toggled on their parents.
pub struct DomForm {
    inputs: Vec<HtmlInputElement>,
    error_class: String,
}

impl DomForm {
    /// Collect every `<input>` matching `selector`. Non-input matches are skipped.
    pub fn collect(document: &Document, selector: &str, error_class: &str) -> Result<Self, JsValue> {
        let nodes = document.query_selector_all(selector)?;
        let mut inputs = Vec::with_capacity(nodes.length() as usize);

        for i in 0..nodes.length() {
            if let Some(input) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
            {
                inputs.push(input);
            }
        }

        Ok(Self {
            inputs,
            error_class: error_class.to_string(),
        })
    }

    /// Descriptors for the gate, built from each input's `name` and `id`.
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        self.inputs
            .iter()
            .map(|input| {
                let field = FieldDescriptor::new(input.name());
                let id = input.id();
                if id.is_empty() {
                    field
                } else {
                    field.with_id(id)
                }
            })
            .collect()
    }

    /// Index of a tracked input, compared by element identity.
    pub fn index_of(&self, element: &Element) -> Option<usize> {
        let target: &JsValue = element.as_ref();
        self.inputs
            .iter()
            .position(|input| AsRef::<JsValue>::as_ref(input) == target)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Add or remove `class` on the element's parent.
pub fn toggle_parent_class(element: &Element, class: &str, on: bool) {
    let Some(parent) = element.parent_element() else {
        return;
    };

    let list = parent.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };

    if let Err(e) = result {
        web_sys::console::warn_2(&JsValue::from_str("login-guard: class toggle failed"), &e);
    }
}

impl FormView for DomForm {
    fn value(&self, index: usize, _field: &FieldDescriptor) -> String {
        self.inputs
            .get(index)
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_errored(&mut self, index: usize, _field: &FieldDescriptor, errored: bool) {
        if let Some(input) = self.inputs.get(index) {
            toggle_parent_class(input, &self.error_class, errored);
        }
    }
}
