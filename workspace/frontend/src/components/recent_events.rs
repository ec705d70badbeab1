use common::RecentEvent;
use yew::prelude::*;

use crate::api_client::events::get_recent_events;
use crate::common::loading::{Loading, LoadingSize};
use crate::common::toast::ToastContext;
use crate::state::{FormAction, FormContext};

/// Shortcut list of the strongest recent earthquakes.
///
/// Picking one fills the form. A failed refresh keeps the list already shown.
#[function_component(RecentEvents)]
pub fn recent_events() -> Html {
    let form_ctx = use_context::<FormContext>().expect("FormContext not found");
    let toast_ctx = use_context::<ToastContext>().expect("ToastContext not found");
    let events = use_state(Vec::<RecentEvent>::new);
    let is_loading = use_state(|| false);

    let refresh = {
        let events = events.clone();
        let is_loading = is_loading.clone();
        let toast_ctx = toast_ctx.clone();

        use_callback((), move |_: (), _| {
            let events = events.clone();
            let is_loading = is_loading.clone();
            let toast_ctx = toast_ctx.clone();

            is_loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match get_recent_events().await {
                    Ok(fetched) => events.set(fetched),
                    Err(e) => toast_ctx.show_error(format!("Failed to load recent events: {}", e)),
                }
                is_loading.set(false);
            });
        })
    };

    // Fetch on mount
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let on_refresh = {
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    html! {
        <div class="card bg-base-100 shadow w-full max-w-2xl">
            <div class="card-body">
                <div class="flex justify-between items-center">
                    <h3 class="card-title text-lg">{"Recent Earthquakes"}</h3>
                    <button class="btn btn-sm btn-ghost" onclick={on_refresh} disabled={*is_loading}>
                        <i class="fas fa-rotate"></i>
                    </button>
                </div>
                <p class="text-sm text-gray-500">{"Pick an event to fill the form with its values."}</p>

                {if *is_loading && events.is_empty() {
                    html! { <Loading size={LoadingSize::Small} text={Some("Loading events...".to_string())} /> }
                } else if events.is_empty() {
                    html! { <p class="text-sm text-gray-400 py-4">{"No recent events available."}</p> }
                } else {
                    html! {
                        <ul class="menu bg-base-200 rounded-box">
                            {for events.iter().map(|event| {
                                let on_select = {
                                    let form_ctx = form_ctx.clone();
                                    let event = event.clone();
                                    Callback::from(move |_| {
                                        log::debug!("Selected event {}", event.id);
                                        form_ctx.dispatch(FormAction::LoadEvent(event.clone()));
                                    })
                                };
                                html! {
                                    <li key={event.id.clone()}>
                                        <a onclick={on_select}>
                                            <span class="badge badge-warning">{format!("M{:.1}", event.magnitude)}</span>
                                            <span>{&event.place}</span>
                                        </a>
                                    </li>
                                }
                            })}
                        </ul>
                    }
                }}
            </div>
        </div>
    }
}
