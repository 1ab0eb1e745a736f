// src/components/library.rs
//
// The three collection views around the workspace: the repository of
// imported pages, the history of completed runs, and the language
// settings. Importing reads each picked file into a data URL, which
// serves as both thumbnail and full-resolution source.

use crate::annotation::{HistoryItem, LanguageMode, RepositoryItem};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, File, HtmlInputElement, MouseEvent};
use yew::prelude::*;

// --- Repository view ---

#[derive(Properties, PartialEq)]
pub struct RepositoryViewProps {
    pub items: Vec<RepositoryItem>,
    pub on_select: Callback<String>,
    pub on_import: Callback<RepositoryItem>,
}

#[function_component(RepositoryView)]
pub fn repository_view(props: &RepositoryViewProps) -> Html {
    let onchange = {
        let on_import = props.on_import.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Some(files) = input.files() {
                for i in 0..files.length() {
                    if let Some(file) = files.get(i) {
                        read_image_file(file, on_import.clone());
                    }
                }
            }
            // Allow re-importing the same file later.
            input.set_value("");
        })
    };

    html! {
        <div class="library-view">
            <div class="library-header">
                <h2>{"📚 Material Warehouse"}</h2>
                <label class="import-button">
                    {"+ Import File"}
                    <input type="file" accept="image/*" multiple=true class="file-input" {onchange} />
                </label>
            </div>
            {
                if props.items.is_empty() {
                    html! {
                        <div class="library-empty">
                            <div class="empty-icon">{"🕸️"}</div>
                            <p>{"It's empty here! Add some manga."}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="library-grid">
                            { for props.items.iter().map(|item| render_page_card(props, item)) }
                        </div>
                    }
                }
            }
        </div>
    }
}

fn render_page_card(props: &RepositoryViewProps, item: &RepositoryItem) -> Html {
    let onclick = {
        let on_select = props.on_select.clone();
        let id = item.id.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
    };

    html! {
        <div key={item.id.clone()} class="page-card" {onclick}>
            <div class="page-thumbnail">
                <img src={item.thumbnail.clone()} alt={item.name.clone()} />
                <span class="page-action">{"Analyze"}</span>
            </div>
            <p class="page-name">{ &item.name }</p>
            <p class="page-date">{ format_date(item.timestamp) }</p>
        </div>
    }
}

// --- History view ---

#[derive(Properties, PartialEq)]
pub struct HistoryViewProps {
    pub items: Vec<HistoryItem>,
    pub on_select: Callback<String>,
}

#[function_component(HistoryView)]
pub fn history_view(props: &HistoryViewProps) -> Html {
    html! {
        <div class="library-view">
            <div class="library-header">
                <h2>{"🕰️ Translation History"}</h2>
            </div>
            {
                if props.items.is_empty() {
                    html! {
                        <div class="library-empty">
                            <div class="empty-icon">{"🕰️"}</div>
                            <p>{"No history yet. Start translating!"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="library-grid">
                            { for props.items.iter().enumerate().map(|(idx, item)| render_run_card(props, item, idx)) }
                        </div>
                    }
                }
            }
        </div>
    }
}

fn render_run_card(props: &HistoryViewProps, item: &HistoryItem, idx: usize) -> Html {
    let onclick = {
        let on_select = props.on_select.clone();
        let id = item.id.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
    };

    html! {
        <div key={item.id.clone()} class="run-card" {onclick}>
            <div class="run-thumbnail">
                <img src={item.thumbnail.clone()} alt="completed run" />
                <span class="run-badge">{ idx + 1 }</span>
            </div>
            <div class="run-meta">
                <span class="run-mode">{ item.language_mode.label() }</span>
                <p class="run-time">{ format_time(item.timestamp) }</p>
            </div>
        </div>
    }
}

// --- Settings view ---

#[derive(Properties, PartialEq)]
pub struct SettingsViewProps {
    pub current: LanguageMode,
    pub on_change: Callback<LanguageMode>,
}

#[function_component(SettingsView)]
pub fn settings_view(props: &SettingsViewProps) -> Html {
    html! {
        <div class="settings-view">
            <h2>{"⚙️ Language Engine"}</h2>
            <p class="settings-hint">{"Select your translation direction"}</p>
            <div class="mode-cards">
                { for LanguageMode::ALL.iter().map(|mode| render_mode_card(props, *mode)) }
            </div>
        </div>
    }
}

fn render_mode_card(props: &SettingsViewProps, mode: LanguageMode) -> Html {
    let is_active = props.current == mode;
    let onclick = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit(mode))
    };

    let class = if is_active {
        "mode-card active"
    } else {
        "mode-card"
    };

    html! {
        <div key={mode.key()} {class} {onclick}>
            <span class="mode-dot">{ if is_active { "🟢" } else { "⚪" } }</span>
            <span class="mode-label">{ mode.label() }</span>
        </div>
    }
}

// --- Import plumbing ---

/// Read one picked image into a data URL and hand the finished
/// `RepositoryItem` back through the callback. The id combines file name
/// and import time, which keeps repeated imports of the same file apart.
fn read_image_file(file: File, on_import: Callback<RepositoryItem>) {
    let name = file.name();
    let reader = match web_sys::FileReader::new() {
        Ok(reader) => reader,
        Err(_) => {
            log::error!("could not create a FileReader for {name}");
            return;
        }
    };

    let reader_handle = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_handle.result() {
            if let Some(data_url) = result.as_string() {
                let timestamp = js_sys::Date::now();
                on_import.emit(RepositoryItem {
                    id: format!("{}-{}", name, timestamp),
                    name: name.clone(),
                    thumbnail: data_url.clone(),
                    source_image: data_url,
                    timestamp,
                });
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        log::error!("could not read picked file: {:?}", e);
    }
}

fn format_date(timestamp: f64) -> String {
    js_sys::Date::new(&JsValue::from_f64(timestamp))
        .to_locale_date_string("en-US", &JsValue::UNDEFINED)
        .into()
}

fn format_time(timestamp: f64) -> String {
    js_sys::Date::new(&JsValue::from_f64(timestamp))
        .to_locale_time_string("en-US")
        .into()
}
