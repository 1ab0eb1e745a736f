// src/components/result_panel.rs
use crate::annotation::{BackgroundHint, TranslationItem};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub items: Vec<TranslationItem>,
    pub highlighted: Option<String>,
    pub on_hover: Callback<String>,
    pub on_leave: Callback<String>,
}

/// Linear view of the annotation list. Entry order mirrors the overlay's
/// marker numbering, and hovering an entry drives the same highlight the
/// overlay markers drive.
#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    if props.items.is_empty() {
        return html! {
            <div class="result-panel empty">
                <div class="empty-icon">{"💤"}</div>
                <p>{"Waiting for magic..."}</p>
            </div>
        };
    }

    html! {
        <div class="result-panel">
            <h2 class="result-header">
                { format!("✨ Translations ({})", props.items.len()) }
            </h2>
            <div class="result-entries">
                { for props.items.iter().enumerate().map(|(idx, item)| render_entry(props, item, idx)) }
            </div>
        </div>
    }
}

fn render_entry(props: &ResultPanelProps, item: &TranslationItem, idx: usize) -> Html {
    let style = item.kind.style();
    let is_highlighted = props.highlighted.as_deref() == Some(item.id.as_str());

    let onmouseenter = {
        let on_hover = props.on_hover.clone();
        let id = item.id.clone();
        Callback::from(move |_: MouseEvent| on_hover.emit(id.clone()))
    };
    let onmouseleave = {
        let on_leave = props.on_leave.clone();
        let id = item.id.clone();
        Callback::from(move |_: MouseEvent| on_leave.emit(id.clone()))
    };

    let class = if is_highlighted {
        format!("result-entry {} highlighted", style.card)
    } else {
        format!("result-entry {}", style.card)
    };

    html! {
        <div key={item.id.clone()} {class} {onmouseenter} {onmouseleave}>
            <div class="entry-head">
                <span class="entry-number">{ idx + 1 }</span>
                <span class={format!("entry-badge {}", style.badge)}>
                    { format!("{} {}", style.icon, item.kind.label()) }
                </span>
            </div>
            <p class="entry-translation">{ &item.translation }</p>
            <p class="entry-original">{ &item.original }</p>
            { render_background(item) }
        </div>
    }
}

fn render_background(item: &TranslationItem) -> Html {
    match &item.background {
        Some(BackgroundHint::Color(color)) => html! {
            <span
                class="entry-swatch"
                style={format!("background-color: {};", color)}
                title={color.clone()}
            ></span>
        },
        // No single color applies; render the distinct patterned swatch.
        Some(BackgroundHint::NonUniform) => html! {
            <span class="entry-swatch non-uniform" title="non-uniform background"></span>
        },
        None => html! {},
    }
}
