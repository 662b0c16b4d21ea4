use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use wheel_shared::constants::SHARE_TOO_LONG_ERROR;
use wheel_shared::{ScrollDirection, WheelAction};
use yew::prelude::*;

use crate::hooks::use_wheels;
use crate::persistence::ShareLink;

// How long a spin runs before the wheel settles
const SPIN_DURATION_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
struct ShareLinkPanelProps {
    share_link: ShareLink,
    wheel_count: usize,
    on_share: Callback<MouseEvent>,
}

#[function_component(ShareLinkPanel)]
fn share_link_panel(props: &ShareLinkPanelProps) -> Html {
    let body = match &props.share_link {
        ShareLink::Hidden => html! {},
        ShareLink::TooLong => html! {
            <p class="text-sm text-red-600">{SHARE_TOO_LONG_ERROR}</p>
        },
        ShareLink::Ready(url) => {
            let heading = if props.wheel_count > 1 {
                "Share a link to these wheels"
            } else {
                "Share a link to this wheel"
            };
            html! {
                <div class="flex flex-col gap-2 bg-white dark:bg-gray-800 rounded-lg p-4">
                    <h5 class="text-sm font-semibold">{heading}</h5>
                    <input class="border border-blue-700 rounded-lg p-2" readonly={true} value={url.clone()} />
                </div>
            }
        }
    };

    html! {
        <div class="flex flex-col gap-2 mb-4">
            <button class="w-full h-12 rounded-lg bg-gray-100 text-blue-800 hover:bg-blue-800 hover:text-white" onclick={props.on_share.clone()}>
                {"Share link"}
            </button>
            {body}
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let wheels = use_wheels();

    if wheels.loading {
        return html! {
            <div class="min-h-screen flex items-center justify-center text-gray-500">{"Loading..."}</div>
        };
    }

    let selected = wheels.selected_wheel().clone();
    let wheel_id = selected.id;

    let on_spin = {
        let wheels = wheels.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(turns) = wheels.spin() {
                debug!("spinning {} extra turns", turns);
                let dispatcher = wheels.dispatcher();
                Timeout::new(SPIN_DURATION_MS, move || dispatcher.dispatch(WheelAction::EndSpin)).forget();
            }
        })
    };

    let on_reset = {
        let wheels = wheels.clone();
        Callback::from(move |_: MouseEvent| wheels.dispatch(WheelAction::ResetWheel { wheel_id }))
    };

    let on_add_wheel = {
        let wheels = wheels.clone();
        Callback::from(move |_: MouseEvent| wheels.dispatch(WheelAction::create_wheel(None)))
    };

    let on_delete_wheel = {
        let wheels = wheels.clone();
        Callback::from(move |_: MouseEvent| wheels.dispatch(WheelAction::DeleteWheel { wheel_id }))
    };

    let next_wheel = wheels.state().next_wheel_id();
    let on_next_wheel = {
        let wheels = wheels.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(wheel_id) = next_wheel {
                wheels.dispatch(WheelAction::SelectWheel { wheel_id });
            }
        })
    };

    let on_names = {
        let wheels = wheels.clone();
        Callback::from(move |e: InputEvent| {
            let text = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            let labels: Vec<String> = text.split('\n').map(str::to_string).collect();
            wheels.dispatch(WheelAction::replace_segments(wheel_id, labels));
        })
    };

    let on_label = {
        let wheels = wheels.clone();
        Callback::from(move |e: InputEvent| {
            let label = e.target_unchecked_into::<HtmlInputElement>().value();
            wheels.dispatch(WheelAction::UpdateWheel { wheel_id, label });
        })
    };

    let on_share = {
        let wheels = wheels.clone();
        Callback::from(move |_: MouseEvent| wheels.dispatch(WheelAction::SetShowShareLink(true)))
    };

    let tabs = wheels.wheels().iter().map(|wheel| {
        let wheels = wheels.clone();
        let id = wheel.id;
        let onclick = Callback::from(move |_: MouseEvent| wheels.dispatch(WheelAction::SelectWheel { wheel_id: id }));
        let class = classes!(
            "px-3", "py-1", "rounded-full", "text-sm",
            if id == wheel_id { "bg-blue-800 text-white" } else { "bg-gray-100 text-gray-700" }
        );
        html! { <button key={id.to_string()} {class} {onclick}>{wheel.label.clone()}</button> }
    });

    let slide = match wheels.scroll_direction() {
        Some(ScrollDirection::Down) => "animate-slide-up",
        Some(ScrollDirection::Up) => "animate-slide-down",
        None => "",
    };

    let winner = selected
        .selected_segment()
        .filter(|_| !selected.is_spinning)
        .map(|segment| segment.label.clone());

    let names = selected
        .segments
        .iter()
        .map(|segment| segment.label.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    html! {
        <div class="min-h-screen w-full">
            <div class="mx-auto max-w-5xl p-4 grid gap-6 md:grid-cols-2">
                <div class={classes!("flex", "flex-col", "items-center", "gap-4", slide)}>
                    <input class="text-2xl font-bold text-center bg-transparent" value={selected.label.clone()} oninput={on_label} />
                    <ul class="w-full">
                        { for selected.visible_segments().map(|segment| {
                            let class = classes!(
                                "px-3", "py-1",
                                segment.removed.then_some("line-through text-gray-400"),
                                segment.selected.then_some("font-bold text-blue-800"),
                            );
                            html! { <li key={segment.id.to_string()} {class}>{segment.label.clone()}</li> }
                        }) }
                    </ul>
                    if let Some(winner) = winner {
                        <div class="text-xl font-semibold">{winner}</div>
                    }
                    <div class="flex gap-2">
                        <button class="px-6 py-3 rounded-lg bg-blue-800 text-white disabled:opacity-50" disabled={selected.is_spinning} onclick={on_spin}>{"Spin"}</button>
                        if selected.can_reset() {
                            <button class="px-6 py-3 rounded-lg bg-gray-100" onclick={on_reset}>{"Reset"}</button>
                        }
                    </div>
                </div>
                <div class="flex flex-col gap-4">
                    <div class="flex flex-wrap gap-2">
                        { for tabs }
                        <button class="px-3 py-1 rounded-full text-sm bg-gray-100" onclick={on_add_wheel}>{"+"}</button>
                        if wheels.state().has_next_wheel() {
                            <button class="px-3 py-1 rounded-full text-sm bg-gray-100" onclick={on_next_wheel}>{"Next wheel"}</button>
                        }
                        if wheels.wheels().len() > 1 {
                            <button class="px-3 py-1 rounded-full text-sm bg-red-100 text-red-700" onclick={on_delete_wheel}>{"Delete wheel"}</button>
                        }
                    </div>
                    <textarea class="w-full h-64 border rounded-lg p-2" value={names} oninput={on_names} />
                    <ShareLinkPanel
                        share_link={wheels.share_link.clone()}
                        wheel_count={wheels.wheels().len()}
                        {on_share}
                    />
                </div>
            </div>
        </div>
    }
}
