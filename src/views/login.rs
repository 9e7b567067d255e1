// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, on_click, on_input, on_submit, set_attribute, set_text_content, ElementBuilder,
};
use crate::router::Route;
use crate::state::AppState;
use crate::viewmodels::LoginOutcome;

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let form_state = state.login.borrow();

    let title = ElementBuilder::new("h1")?.text("Iniciar sesión").build();

    let form = ElementBuilder::new("form")?.class("login-form").build();

    // Usuario
    let username_error = field_error(form_state.field_errors.username)?;
    let username_input = ElementBuilder::new("input")?
        .class("form-input")
        .attr("id", "username")?
        .attr("type", "text")?
        .attr("name", "username")?
        .attr("value", &form_state.username)?
        .flag("disabled", form_state.is_submitting())?
        .build();
    {
        let state = state.clone();
        let error_el = username_error.clone();
        on_input(&username_input, move |value| {
            if !value.is_empty() {
                set_text_content(&error_el, "");
            }
            state.login.borrow_mut().set_username(value);
        })?;
    }
    append_child(&form, &form_group("username", "Usuario:", username_input, username_error)?)?;

    // Clave
    let password_error = field_error(form_state.field_errors.password)?;
    let password_input = ElementBuilder::new("input")?
        .class("form-input")
        .attr("id", "password")?
        .attr("type", password_type(form_state.show_password))?
        .attr("name", "password")?
        .attr("value", &form_state.password)?
        .flag("disabled", form_state.is_submitting())?
        .build();
    {
        let state = state.clone();
        let error_el = password_error.clone();
        on_input(&password_input, move |value| {
            if !value.is_empty() {
                set_text_content(&error_el, "");
            }
            state.login.borrow_mut().set_password(value);
        })?;
    }

    // Mostrar clave: cambia el type del input sin re-render (conserva el foco)
    let show_checkbox = ElementBuilder::new("input")?
        .attr("id", "show-password")?
        .attr("type", "checkbox")?
        .flag("checked", form_state.show_password)?
        .build();
    {
        let state = state.clone();
        let input = password_input.clone();
        on_click(&show_checkbox, move |_| {
            let show = {
                let mut form = state.login.borrow_mut();
                form.toggle_show_password();
                form.show_password
            };
            if let Err(e) = set_attribute(&input, "type", password_type(show)) {
                log::warn!("⚠️ [LOGIN] No se pudo cambiar el tipo del input: {:?}", e);
            }
        })?;
    }
    let show_label = ElementBuilder::new("label")?
        .class("show-password")
        .attr("for", "show-password")?
        .text("Mostrar clave")
        .build();

    append_child(&form, &form_group("password", "Clave:", password_input, password_error)?)?;
    let toggle = ElementBuilder::new("div")?
        .class("form-check")
        .children([show_checkbox, show_label])?
        .build();
    append_child(&form, &toggle)?;

    if let Some(message) = form_state.error_message() {
        let banner = ElementBuilder::new("div")?
            .class("error-banner")
            .attr("role", "alert")?
            .text(message)
            .build();
        append_child(&form, &banner)?;
    }

    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .text(form_state.submit_label())
        .flag("disabled", form_state.is_submitting())?
        .build();
    append_child(&form, &submit)?;

    {
        let state = state.clone();
        on_submit(&form, move || {
            let state = state.clone();
            spawn_local(async move {
                let vm = state.login_viewmodel();
                let on_loading = {
                    let state = state.clone();
                    move || state.notify_subscribers()
                };
                match vm.submit(on_loading).await {
                    LoginOutcome::Authenticated => {
                        log::info!("✅ [LOGIN] Sesión iniciada");
                        state.navigate(Route::Dashboard);
                    }
                    LoginOutcome::Rejected | LoginOutcome::NotSubmitted => state.notify_subscribers(),
                }
            });
        })?;
    }

    let container = ElementBuilder::new("div")?
        .class("login-container")
        .child(title)?
        .child(form)?
        .build();
    let screen = ElementBuilder::new("div")?
        .class("login-screen")
        .child(container)?
        .build();
    Ok(screen)
}

fn password_type(show: bool) -> &'static str {
    if show {
        "text"
    } else {
        "password"
    }
}

fn field_error(message: Option<&'static str>) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("span")?
        .class("field-error")
        .text(message.unwrap_or_default())
        .build())
}

/// Helper para crear form group
fn form_group(id: &str, label_text: &str, input: Element, error: Element) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .children([label, input, error])?
        .build())
}
