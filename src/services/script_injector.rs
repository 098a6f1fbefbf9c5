// ============================================================================
// SCRIPT INJECTOR - Inserta mapbox-gl.js en <head>
// ============================================================================
// Implementación web de ScriptFetcher. Nunca se llama más de una vez por
// proceso: ScriptLoader se encarga de eso.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlHeadElement, HtmlLinkElement, HtmlScriptElement};

use super::script_loader::{FetchCallback, LoadFailure, ScriptFetcher, ScriptRequest};
use crate::utils::mapbox_ffi;

pub struct ScriptInjector;

type DoneSlot = Rc<RefCell<Option<FetchCallback>>>;

/// onload y onerror comparten la misma callback; la primera que llegue gana
fn finish(slot: &DoneSlot, result: Result<(), LoadFailure>) {
    let done = slot.borrow_mut().take();
    if let Some(done) = done {
        done(result);
    }
}

fn activate(access_token: &str) -> Result<(), LoadFailure> {
    if !mapbox_ffi::library_present() {
        return Err(LoadFailure::Unavailable("mapboxgl global missing after load".to_string()));
    }
    mapbox_ffi::set_access_token(access_token)
        .map_err(|e| LoadFailure::Unavailable(format!("{:?}", e)))
}

impl ScriptFetcher for ScriptInjector {
    fn fetch(&self, request: &ScriptRequest, done: FetchCallback) {
        // Otro bundle pudo haber cargado ya la librería
        if mapbox_ffi::library_present() {
            log::info!("🗺️ [LOADER] mapboxgl ya presente, no se inyecta script");
            done(activate(&request.access_token));
            return;
        }

        let slot: DoneSlot = Rc::new(RefCell::new(Some(done)));
        if let Err(e) = inject(request, &slot) {
            log::error!("❌ [LOADER] No se pudo inyectar el script: {:?}", e);
            finish(&slot, Err(LoadFailure::Unavailable(format!("{:?}", e))));
        }
    }
}

fn document_head() -> Result<(Document, HtmlHeadElement), JsValue> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    Ok((document, head))
}

fn inject(request: &ScriptRequest, slot: &DoneSlot) -> Result<(), JsValue> {
    let (document, head) = document_head()?;

    if let Some(stylesheet_url) = &request.stylesheet_url {
        let link: HtmlLinkElement = document.create_element("link")?.dyn_into()?;
        link.set_rel("stylesheet");
        link.set_href(stylesheet_url);
        head.append_child(&link)?;
    }

    let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_src(&request.script_url);
    script.set_async(true);

    let on_load = Closure::once_into_js({
        let slot = slot.clone();
        let access_token = request.access_token.clone();
        move || {
            log::info!("📥 [LOADER] mapbox-gl.js descargado");
            finish(&slot, activate(&access_token));
        }
    });
    let on_error = Closure::once_into_js({
        let slot = slot.clone();
        let url = request.script_url.clone();
        move |_event: web_sys::Event| {
            finish(&slot, Err(LoadFailure::Network(url)));
        }
    });
    script.set_onload(Some(on_load.unchecked_ref()));
    script.set_onerror(Some(on_error.unchecked_ref()));

    head.append_child(&script)?;
    Ok(())
}
