//! Access to browser APIs. All functions fail gracefully if an API is unavailable.

use std::{cell::RefCell, rc::Rc};

use chrono::{DateTime, Local, NaiveDate, Utc};
use r7_domain::QuerySeed;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use wasm_bindgen_futures::JsFuture;

use crate::{
    app::{App, Platform, Repository},
    timer::{REST_PRESETS, Ticker},
};

pub const EXPORT_FILE_NAME: &str = "R7_tracker_export.json";
const SHARE_TITLE: &str = "R7 Tracker";

const QUERY_KEYS: [&str; 5] = ["name", "mode", "level", "start", "days"];

pub struct Browser;

impl Platform for Browser {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn vibrate(&self, millis: u32) {
        vibrate(millis);
    }

    fn alert(&self, message: &str) {
        alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        confirm(message)
    }
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "failed to get window".to_string())
}

fn js_error(action: &str, err: &JsValue) -> String {
    format!("failed to {action}: {err:?}")
}

/// Profile values passed in the query string of the current page.
#[must_use]
pub fn query_seed() -> QuerySeed {
    let search = window().and_then(|w| {
        w.location()
            .search()
            .map_err(|err| js_error("read location", &err))
    });
    let params = search.and_then(|search| {
        web_sys::UrlSearchParams::new_with_str(&search)
            .map_err(|err| js_error("parse query", &err))
    });
    match params {
        Ok(params) => QuerySeed::from_pairs(
            QUERY_KEYS
                .iter()
                .filter_map(|key| params.get(key).map(|value| (*key, value))),
        ),
        Err(err) => {
            log::warn!("{err}");
            QuerySeed::from_pairs(Vec::<(&str, String)>::new())
        }
    }
}

/// Address of the current page with the given query parameters.
pub fn share_link(params: &[(&str, String)]) -> Result<String, String> {
    let location = window()?.location();
    let origin = location
        .origin()
        .map_err(|err| js_error("read origin", &err))?;
    let path = location
        .pathname()
        .map_err(|err| js_error("read path", &err))?;
    let query =
        web_sys::UrlSearchParams::new().map_err(|err| js_error("create query", &err))?;
    for (key, value) in params {
        query.append(key, value);
    }
    Ok(format!("{origin}{path}?{}", String::from(query.to_string())))
}

/// How a link was handed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shared {
    ShareSheet,
    Clipboard,
    Prompt,
}

/// Offers a link via the share sheet, the clipboard or a prompt for manual copying.
pub async fn share(title: &str, url: &str) -> Result<Shared, String> {
    let window = window()?;
    let navigator = JsValue::from(window.navigator());

    if let Some(share) = method(&navigator, "share") {
        let data = js_sys::Object::new();
        set(&data, "title", title)?;
        set(&data, "url", url)?;
        if let Ok(promise) = share.call1(&navigator, &data) {
            if JsFuture::from(js_sys::Promise::from(promise)).await.is_ok() {
                return Ok(Shared::ShareSheet);
            }
        }
    }

    if let Ok(clipboard) = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")) {
        if let Some(write_text) = method(&clipboard, "writeText") {
            if let Ok(promise) = write_text.call1(&clipboard, &JsValue::from_str(url)) {
                if JsFuture::from(js_sys::Promise::from(promise)).await.is_ok() {
                    return Ok(Shared::Clipboard);
                }
            }
        }
    }

    window
        .prompt_with_message_and_default("Copy the link:", url)
        .map_err(|err| js_error("show prompt", &err))?;
    Ok(Shared::Prompt)
}

fn method(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    if target.is_undefined() || target.is_null() {
        return None;
    }
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
}

fn set(target: &js_sys::Object, key: &str, value: &str) -> Result<(), String> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), &JsValue::from_str(value))
        .map(|_| ())
        .map_err(|err| js_error("build share data", &err))
}

/// Lets the user save `content` as a JSON file.
fn download_json(file_name: &str, content: &str) -> Result<(), String> {
    let document = window()?
        .document()
        .ok_or_else(|| "failed to get document".to_string())?;
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|err| js_error("create blob", &err))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| js_error("create object URL", &err))?;
    let anchor = document
        .create_element("a")
        .map_err(|err| js_error("create link", &err))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|err| js_error("create link", &err))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(|err| js_error("revoke object URL", &err))
}

/// Content of a file chosen by the user.
async fn read_file(file: &web_sys::File) -> Result<String, String> {
    JsFuture::from(file.text())
        .await
        .map_err(|err| js_error("read file", &err))?
        .as_string()
        .ok_or_else(|| "file content is not text".to_string())
}

fn vibrate(millis: u32) {
    if let Ok(window) = window() {
        let _ = window.navigator().vibrate_with_duration(millis);
    }
}

fn alert(message: &str) {
    if let Ok(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| {
            w.confirm_with_message(message)
                .map_err(|err| js_error("show confirmation", &err))
        })
        .unwrap_or(false)
}

/// Calls `callback` whenever the page is hidden or unloaded.
fn on_hide(callback: impl Fn() + 'static) -> Result<(), String> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| "failed to get document".to_string())?;
    let callback = Rc::new(callback);

    let on_page_hide = {
        let callback = callback.clone();
        Closure::<dyn Fn()>::new(move || callback())
    };
    window
        .add_event_listener_with_callback("pagehide", on_page_hide.as_ref().unchecked_ref())
        .map_err(|err| js_error("add pagehide listener", &err))?;
    on_page_hide.forget();

    let on_visibility_change = {
        let document = document.clone();
        Closure::<dyn Fn()>::new(move || {
            if document.visibility_state() == web_sys::VisibilityState::Hidden {
                callback();
            }
        })
    };
    document
        .add_event_listener_with_callback(
            "visibilitychange",
            on_visibility_change.as_ref().unchecked_ref(),
        )
        .map_err(|err| js_error("add visibilitychange listener", &err))?;
    on_visibility_change.forget();

    Ok(())
}

/// Writes the state of `app` whenever the page is hidden or unloaded.
pub fn flush_on_hide<R: Repository + 'static>(
    app: &Rc<RefCell<App<R, Browser>>>,
) -> Result<(), String> {
    let app = Rc::downgrade(app);
    on_hide(move || {
        if let Some(app) = app.upgrade() {
            if let Ok(app) = app.try_borrow() {
                app.flush();
            }
        }
    })
}

/// Drives the rest countdown and the workout clock while either is running.
///
/// `redraw` is called after every tick.
pub fn keep_ticking<R: Repository + 'static>(
    ticker: &Ticker,
    app: &Rc<RefCell<App<R, Browser>>>,
    redraw: impl Fn() + 'static,
) {
    if ticker.is_running() || !app.borrow().is_ticking() {
        return;
    }
    let app = Rc::downgrade(app);
    ticker.start(move || {
        let Some(app) = app.upgrade() else {
            return false;
        };
        let Ok(mut app) = app.try_borrow_mut() else {
            return true;
        };
        let running = app.tick();
        drop(app);
        redraw();
        running
    });
}

/// Lets the user save the tracker as [`EXPORT_FILE_NAME`].
pub fn export_file<R: Repository>(app: &App<R, Browser>) {
    let result = app
        .export()
        .map_err(|err| err.to_string())
        .and_then(|json| download_json(EXPORT_FILE_NAME, &json));
    if let Err(err) = result {
        log::error!("failed to export tracker: {err}");
        alert("Failed to export JSON");
    }
}

/// Replaces the tracker with the content of a file chosen by the user.
///
/// On failure the user is alerted and the current state is kept.
pub async fn import_file<R: Repository>(
    app: &Rc<RefCell<App<R, Browser>>>,
    file: &web_sys::File,
) -> bool {
    match read_file(file).await {
        Ok(content) => app.borrow_mut().import(&content),
        Err(err) => {
            log::warn!("{err}");
            app.borrow().import_failed();
            false
        }
    }
}

/// Hands the personal link of the current profile to the user.
pub async fn share_profile<R: Repository>(
    app: &Rc<RefCell<App<R, Browser>>>,
) -> Result<Shared, String> {
    let url = share_link(&app.borrow().share_params())?;
    let shared = share(SHARE_TITLE, &url).await?;
    if shared == Shared::Clipboard {
        alert("Link copied");
    }
    Ok(shared)
}

/// Starts the rest countdown with the duration of the preset at `preset`.
pub fn start_rest<R: Repository + 'static>(
    ticker: &Ticker,
    app: &Rc<RefCell<App<R, Browser>>>,
    preset: usize,
    redraw: impl Fn() + 'static,
) {
    let Some(&seconds) = REST_PRESETS.get(preset) else {
        return;
    };
    app.borrow_mut().start_rest(seconds);
    keep_ticking(ticker, app, redraw);
}

pub fn start_workout<R: Repository + 'static>(
    ticker: &Ticker,
    app: &Rc<RefCell<App<R, Browser>>>,
    redraw: impl Fn() + 'static,
) {
    app.borrow_mut().start_workout();
    keep_ticking(ticker, app, redraw);
}
