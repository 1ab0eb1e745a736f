// src/main.rs
mod annotation;
mod components;
mod geometry;
mod highlight;
mod session;
mod store;
mod translator;
mod utils;

use annotation::{LanguageMode, RepositoryItem, TranslationItem};
use components::library::{HistoryView, RepositoryView, SettingsView};
use components::overlay::TranslationOverlay;
use components::result_panel::ResultPanel;
use session::Session;
use translator::TranslateError;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Workspace,
    Repository,
    History,
    Settings,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Workspace, Tab::Repository, Tab::History, Tab::Settings];

    fn label(&self) -> &'static str {
        match self {
            Tab::Workspace => "🖼️ Workspace",
            Tab::Repository => "📚 Repository",
            Tab::History => "🕰️ History",
            Tab::Settings => "⚙️ Settings",
        }
    }
}

pub enum AppMsg {
    SwitchTab(Tab),
    Imported(RepositoryItem),
    SelectRepository(String),
    SelectHistory(String),
    TranslationFinished {
        document_id: String,
        outcome: Result<Vec<TranslationItem>, TranslateError>,
    },
    Hover(String),
    Leave(String),
    ChangeMode(LanguageMode),
    DismissError,
}

pub struct App {
    session: Session,
    active_tab: Tab,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: Session::default(),
            active_tab: Tab::Workspace,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::SwitchTab(tab) => {
                self.active_tab = tab;
                true
            }
            AppMsg::Imported(item) => {
                self.session.import(item);
                true
            }
            AppMsg::SelectRepository(id) => {
                if let Some(request) = self.session.select_repository(&id) {
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let outcome = translator::translate(&request.image, request.mode).await;
                        link.send_message(AppMsg::TranslationFinished {
                            document_id: request.document_id,
                            outcome,
                        });
                    });
                }
                self.active_tab = Tab::Workspace;
                true
            }
            AppMsg::SelectHistory(id) => {
                self.session.select_history(&id);
                self.active_tab = Tab::Workspace;
                true
            }
            AppMsg::TranslationFinished {
                document_id,
                outcome,
            } => match outcome {
                Ok(items) => {
                    let timestamp = js_sys::Date::now();
                    let run_id = format!("run-{timestamp}-{document_id}");
                    self.session
                        .complete_translation(&document_id, run_id, timestamp, items)
                }
                Err(err) => {
                    log::error!("translation failed for {document_id}: {err}");
                    self.session.fail_translation(&document_id, err.to_string())
                }
            },
            AppMsg::Hover(id) => self.session.hover(&id),
            AppMsg::Leave(id) => self.session.leave(&id),
            AppMsg::ChangeMode(mode) => {
                self.session.set_language_mode(mode);
                true
            }
            AppMsg::DismissError => self.session.dismiss_error(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="app-container">
                <header class="app-header">
                    <h1>{"Manga Translator"}</h1>
                    { self.render_tabs(ctx) }
                </header>
                <main class="app-main">
                    {
                        match self.active_tab {
                            Tab::Workspace => self.render_workspace(ctx),
                            Tab::Repository => html! {
                                <RepositoryView
                                    items={self.session.repository().items().to_vec()}
                                    on_select={ctx.link().callback(AppMsg::SelectRepository)}
                                    on_import={ctx.link().callback(AppMsg::Imported)}
                                />
                            },
                            Tab::History => html! {
                                <HistoryView
                                    items={self.session.history().items().to_vec()}
                                    on_select={ctx.link().callback(AppMsg::SelectHistory)}
                                />
                            },
                            Tab::Settings => html! {
                                <SettingsView
                                    current={self.session.language_mode()}
                                    on_change={ctx.link().callback(AppMsg::ChangeMode)}
                                />
                            },
                        }
                    }
                </main>
            </div>
        }
    }
}

impl App {
    fn render_tabs(&self, ctx: &Context<Self>) -> Html {
        html! {
            <nav class="tab-bar">
                { for Tab::ALL.iter().map(|tab| {
                    let tab = *tab;
                    let class = if self.active_tab == tab { "tab active" } else { "tab" };
                    let onclick = ctx.link().callback(move |_| AppMsg::SwitchTab(tab));
                    html! {
                        <button {class} {onclick}>{ tab.label() }</button>
                    }
                }) }
            </nav>
        }
    }

    fn render_workspace(&self, ctx: &Context<Self>) -> Html {
        let Some(image) = self.session.displayed_image() else {
            return html! {
                <div class="workspace-empty">
                    <div class="empty-icon">{"🎴"}</div>
                    <p>{"Pick a page from the repository to start translating."}</p>
                </div>
            };
        };

        let items = self.session.displayed_items().to_vec();
        let highlighted = self.session.highlighted().map(str::to_string);
        let on_hover = ctx.link().callback(AppMsg::Hover);
        let on_leave = ctx.link().callback(AppMsg::Leave);

        html! {
            <div class="workspace">
                { self.render_error_banner(ctx) }
                {
                    if self.session.loading() {
                        html! {
                            <div class="translating-notice">
                                { format!("Translating ({})...", self.session.displayed_mode().label()) }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                <div class="workspace-panels">
                    <TranslationOverlay
                        image={AttrValue::from(image.to_string())}
                        items={items.clone()}
                        highlighted={highlighted.clone()}
                        on_hover={on_hover.clone()}
                        on_leave={on_leave.clone()}
                    />
                    <ResultPanel
                        {items}
                        {highlighted}
                        {on_hover}
                        {on_leave}
                    />
                </div>
            </div>
        }
    }

    fn render_error_banner(&self, ctx: &Context<Self>) -> Html {
        let Some(message) = self.session.error() else {
            return html! {};
        };
        let dismiss = ctx.link().callback(|_| AppMsg::DismissError);
        html! {
            <div class="error-banner">
                <span>{ format!("Translation failed: {message}") }</span>
                <button class="dismiss-btn" onclick={dismiss}>{"×"}</button>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
