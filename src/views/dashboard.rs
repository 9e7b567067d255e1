// ============================================================================
// DASHBOARD VIEW - Tabla de solicitudes + paginación
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_select_change, ElementBuilder};
use crate::models::Solicitud;
use crate::services::clipboard::copy_to_clipboard;
use crate::state::{AppState, LoadState};
use crate::viewmodels::{DashboardState, PageSize, PageView, COPY_FEEDBACK_MS};
use crate::views::apply_dashboard_effect;

const COLUMNS: [&str; 5] = ["Nombre", "Empresa", "Email", "Detalle", ""];

/// Renderizar dashboard (solo se monta con sesión, ver guard)
pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let dashboard = state.dashboard.borrow();

    if dashboard.solicitudes.is_idle() {
        spawn_refresh(state);
    }

    let container = ElementBuilder::new("main")?
        .class("dashboard")
        .child(ElementBuilder::new("h1")?.text("Spagio - Panel Administrativo").build())?
        .child(
            ElementBuilder::new("p")?
                .class("subtitle")
                .text("Solicitudes de empresas para cotizacion de boleteria NFT.")
                .build(),
        )?
        .build();

    match &dashboard.solicitudes {
        LoadState::Idle | LoadState::Loading => {
            let loading = ElementBuilder::new("p")?.class("loading").text("Loading...").build();
            append_child(&container, &loading)?;
        }
        LoadState::Failure(error) => {
            let retry = ElementBuilder::new("button")?
                .class("btn-retry")
                .attr("type", "button")?
                .text("Reintentar")
                .build();
            {
                let state = state.clone();
                on_click(&retry, move |_| {
                    spawn_refresh(&state);
                    // El fetch pasa a Loading antes de que corra este re-render
                    state.notify_subscribers();
                })?;
            }
            let banner = ElementBuilder::new("div")?
                .class("error-banner")
                .attr("role", "alert")?
                .child(ElementBuilder::new("span")?.text(&error.to_string()).build())?
                .child(retry)?
                .build();
            append_child(&container, &banner)?;
        }
        LoadState::Success(_) => {
            let view = dashboard.page_view();
            append_child(&container, &render_table(state, &dashboard, &view)?)?;
            append_child(&container, &render_pagination(state, &dashboard, &view)?)?;
        }
    }

    Ok(container)
}

fn spawn_refresh(state: &AppState) {
    let state = state.clone();
    spawn_local(async move {
        let vm = state.dashboard_viewmodel();
        let effect = vm.refresh().await;
        apply_dashboard_effect(&state, effect);
    });
}

fn render_table(
    state: &AppState,
    dashboard: &DashboardState,
    view: &PageView<'_, Solicitud>,
) -> Result<Element, JsValue> {
    let head_row = ElementBuilder::new("tr")?.build();
    for column in COLUMNS {
        append_child(&head_row, &ElementBuilder::new("th")?.text(column).build())?;
    }
    let thead = ElementBuilder::new("thead")?.child(head_row)?.build();

    let tbody = ElementBuilder::new("tbody")?.build();
    if view.visible.is_empty() {
        let empty = ElementBuilder::new("td")?
            .class("empty")
            .attr("colspan", &COLUMNS.len().to_string())?
            .text("No hay solicitudes")
            .build();
        append_child(&tbody, &ElementBuilder::new("tr")?.child(empty)?.build())?;
    }

    let now = js_sys::Date::now();
    for solicitud in view.visible {
        append_child(&tbody, &render_row(state, dashboard, solicitud, now)?)?;
    }

    Ok(ElementBuilder::new("table")?
        .class("solicitudes-table")
        .child(thead)?
        .child(tbody)?
        .build())
}

fn render_row(
    state: &AppState,
    dashboard: &DashboardState,
    solicitud: &Solicitud,
    now: f64,
) -> Result<Element, JsValue> {
    let copied = dashboard.copy_feedback.is_copied(&solicitud.email, now);
    let copy_button = ElementBuilder::new("button")?
        .class(if copied { "btn-copy copied" } else { "btn-copy" })
        .attr("type", "button")?
        .text(if copied { "Copiado" } else { "Copiar" })
        .build();
    {
        let state = state.clone();
        let email = solicitud.email.clone();
        on_click(&copy_button, move |_| mark_copied(&state, &email))?;
    }
    let email_cell = ElementBuilder::new("td")?
        .child(ElementBuilder::new("span")?.text(&solicitud.email).build())?
        .child(copy_button)?
        .build();

    let deleting = dashboard.is_deleting(solicitud.id);
    let delete_button = ElementBuilder::new("button")?
        .class("btn-delete")
        .attr("type", "button")?
        .attr("title", "Eliminar")?
        .text(if deleting { "Eliminando..." } else { "Eliminar" })
        .flag("disabled", deleting)?
        .build();
    {
        let state = state.clone();
        let id = solicitud.id;
        on_click(&delete_button, move |_| {
            let state = state.clone();
            spawn_local(async move {
                let vm = state.dashboard_viewmodel();
                let on_pending = {
                    let state = state.clone();
                    move || state.notify_subscribers()
                };
                let effect = vm.delete(id, on_pending).await;
                apply_dashboard_effect(&state, effect);
            });
        })?;
    }
    let actions = ElementBuilder::new("td")?.class("actions").child(delete_button)?.build();
    if let Some(error) = dashboard.delete_error(solicitud.id) {
        let message = ElementBuilder::new("span")?
            .class("row-error")
            .text(&error.to_string())
            .build();
        append_child(&actions, &message)?;
    }

    Ok(ElementBuilder::new("tr")?
        .child(ElementBuilder::new("td")?.text(&solicitud.name).build())?
        .child(ElementBuilder::new("td")?.text(&solicitud.company).build())?
        .child(email_cell)?
        .child(ElementBuilder::new("td")?.text(&solicitud.detail).build())?
        .child(actions)?
        .build())
}

/// Copia el email y programa el fin del feedback "Copiado"
fn mark_copied(state: &AppState, email: &str) {
    copy_to_clipboard(email);

    let ticket = state
        .dashboard
        .borrow_mut()
        .copy_feedback
        .mark_copied(email, js_sys::Date::now());

    let timeout = {
        let state = state.clone();
        let email = email.to_string();
        Timeout::new(COPY_FEEDBACK_MS as u32, move || {
            // El Timeout disparado queda en el mapa hasta el próximo copiado o el logout
            let expired = state.dashboard.borrow_mut().copy_feedback.expire(&email, ticket);
            if expired {
                state.notify_subscribers();
            }
        })
    };
    // Reemplazar el timer anterior lo cancela
    state.copy_timers.borrow_mut().insert(email.to_string(), timeout);
    state.notify_subscribers();
}

fn render_pagination(
    state: &AppState,
    dashboard: &DashboardState,
    view: &PageView<'_, Solicitud>,
) -> Result<Element, JsValue> {
    let previous = ElementBuilder::new("button")?
        .class("btn-page")
        .attr("type", "button")?
        .text("Anterior")
        .flag("disabled", !view.can_go_previous)?
        .build();
    {
        let state = state.clone();
        on_click(&previous, move |_| {
            let result = state.dashboard.borrow_mut().previous_page();
            match result {
                Ok(_) => state.notify_subscribers(),
                Err(e) => log::debug!("[PAGINATION] {}", e),
            }
        })?;
    }

    let next = ElementBuilder::new("button")?
        .class("btn-page")
        .attr("type", "button")?
        .text("Siguiente")
        .flag("disabled", !view.can_go_next)?
        .build();
    {
        let state = state.clone();
        on_click(&next, move |_| {
            let result = state.dashboard.borrow_mut().next_page();
            match result {
                Ok(_) => state.notify_subscribers(),
                Err(e) => log::debug!("[PAGINATION] {}", e),
            }
        })?;
    }

    let select = ElementBuilder::new("select")?.attr("id", "page-size")?.build();
    let selected = dashboard.page.page_size();
    for size in PageSize::ALL {
        let value = size.get().to_string();
        let option = ElementBuilder::new("option")?
            .attr("value", &value)?
            .flag("selected", size == selected)?
            .text(&value)
            .build();
        append_child(&select, &option)?;
    }
    {
        let state = state.clone();
        on_select_change(&select, move |value| {
            let Some(size) = value.parse().ok().and_then(PageSize::from_value) else {
                log::warn!("⚠️ [PAGINATION] Tamaño de página inválido: {}", value);
                return;
            };
            state.dashboard.borrow_mut().set_page_size(size);
            state.notify_subscribers();
        })?;
    }
    let size_label = ElementBuilder::new("label")?
        .attr("for", "page-size")?
        .text("Registros por página")
        .build();

    // Sin páginas no hay indicador
    let indicator = match view.label() {
        Some(label) => vec![ElementBuilder::new("span")?.class("page-indicator").text(&label).build()],
        None => Vec::new(),
    };

    Ok(ElementBuilder::new("div")?
        .class("pagination")
        .child(previous)?
        .children(indicator)?
        .children([next, size_label, select])?
        .build())
}
