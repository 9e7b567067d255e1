// ============================================================================
// ELEMENT BUILDER - Construcción encadenada de nodos
// ============================================================================
// Las operaciones infalibles (class, text) devuelven Self; las que tocan
// atributos, hijos o listeners devuelven Result para encadenar con `?`.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::{append_child, create_element, on_click, set_attribute, set_class_name, set_text_content, toggle_attribute};

pub struct ElementBuilder(Element);

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        create_element(tag).map(Self)
    }

    /// Reemplaza todas las clases
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.0, class);
        self
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.0, text);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.0, name, value)?;
        Ok(self)
    }

    /// Atributo booleano: presente si `on` (disabled, checked, selected)
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        toggle_attribute(&self.0, name, on)?;
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.0, &child)?;
        Ok(self)
    }

    pub fn children<I>(self, children: I) -> Result<Self, JsValue>
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            append_child(&self.0, &child)?;
        }
        Ok(self)
    }

    pub fn on_click<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        on_click(&self.0, handler)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.0
    }
}
