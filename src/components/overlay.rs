// src/components/overlay.rs
use crate::annotation::TranslationItem;
use crate::geometry::{clamped_tooltip_left, marker_anchor, RenderedSize};
use gloo::events::EventListener;
use gloo::utils::window;
use web_sys::{Element, Event, MouseEvent};
use yew::prelude::*;

/// Tooltip card width, matching the stylesheet; used to keep it inside the image.
const TOOLTIP_WIDTH: f64 = 280.0;

#[derive(Properties, PartialEq)]
pub struct TranslationOverlayProps {
    pub image: AttrValue,
    pub items: Vec<TranslationItem>,
    pub highlighted: Option<String>,
    pub on_hover: Callback<String>,
    pub on_leave: Callback<String>,
}

pub enum OverlayMsg {
    ImageLoaded,
    ViewportResized,
}

/// Renders the page image and one numbered marker per region, positioned
/// from the measured on-screen geometry. Markers do not render until the
/// first measurement exists; the measurement is refreshed only on image
/// load and on window resize.
pub struct TranslationOverlay {
    img_ref: NodeRef,
    rendered: Option<RenderedSize>,
    _resize_listener: Option<EventListener>,
}

impl Component for TranslationOverlay {
    type Message = OverlayMsg;
    type Properties = TranslationOverlayProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            img_ref: NodeRef::default(),
            rendered: None,
            _resize_listener: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let link = ctx.link().clone();
            self._resize_listener = Some(EventListener::new(&window(), "resize", move |_| {
                link.send_message(OverlayMsg::ViewportResized);
            }));
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        // A new image invalidates the measurement until its load event
        // fires; highlight and item changes leave it untouched.
        if ctx.props().image != old_props.image {
            self.rendered = None;
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            OverlayMsg::ImageLoaded | OverlayMsg::ViewportResized => {
                let measured = self.measure();
                if measured != self.rendered {
                    self.rendered = measured;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onload = ctx.link().callback(|_: Event| OverlayMsg::ImageLoaded);

        html! {
            <div class="overlay-panel">
                <div class="overlay-canvas">
                    <img
                        ref={self.img_ref.clone()}
                        class="overlay-image"
                        src={ctx.props().image.clone()}
                        alt="Original page"
                        {onload}
                    />
                    {
                        if let Some(size) = self.rendered {
                            ctx.props()
                                .items
                                .iter()
                                .enumerate()
                                .map(|(idx, item)| self.render_marker(ctx, item, idx, size))
                                .collect::<Html>()
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
        }
    }
}

impl TranslationOverlay {
    fn measure(&self) -> Option<RenderedSize> {
        let element = self.img_ref.cast::<Element>()?;
        let rect = element.get_bounding_client_rect();
        RenderedSize::from_measurement(rect.width(), rect.height())
    }

    fn render_marker(
        &self,
        ctx: &Context<Self>,
        item: &TranslationItem,
        idx: usize,
        size: RenderedSize,
    ) -> Html {
        let anchor = marker_anchor(&item.bbox, size);
        let is_highlighted = ctx.props().highlighted.as_deref() == Some(item.id.as_str());
        // Shift the tooltip off the marker's centerline just enough to
        // stay inside the image near an edge.
        let tooltip_shift = clamped_tooltip_left(anchor.left, TOOLTIP_WIDTH, size.width) - anchor.left;

        let onmouseenter = {
            let on_hover = ctx.props().on_hover.clone();
            let id = item.id.clone();
            Callback::from(move |_: MouseEvent| on_hover.emit(id.clone()))
        };
        let onmouseleave = {
            let on_leave = ctx.props().on_leave.clone();
            let id = item.id.clone();
            Callback::from(move |_: MouseEvent| on_leave.emit(id.clone()))
        };

        let marker_class = if is_highlighted {
            "region-marker highlighted"
        } else {
            "region-marker"
        };
        let tooltip_class = if is_highlighted {
            "marker-tooltip visible"
        } else {
            "marker-tooltip"
        };

        html! {
            <div
                key={item.id.clone()}
                class={marker_class}
                style={format!("top: {:.1}px; left: {:.1}px;", anchor.top, anchor.left)}
                {onmouseenter}
                {onmouseleave}
            >
                <span class="marker-number">{ idx + 1 }</span>
                <div
                    class={tooltip_class}
                    style={format!("left: calc(50% + {:.1}px);", tooltip_shift)}
                >
                    <p class="tooltip-translation">{ &item.translation }</p>
                    <div class="tooltip-meta">
                        <span class="tooltip-kind">{ item.kind.label() }</span>
                        <p class="tooltip-original">{ &item.original }</p>
                    </div>
                </div>
            </div>
        }
    }
}
