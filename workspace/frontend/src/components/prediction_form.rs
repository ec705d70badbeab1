use common::{FormField, SubmitError};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::prediction::predict;
use crate::common::toast::ToastContext;
use crate::state::{FormAction, FormContext};

#[function_component(PredictionForm)]
pub fn prediction_form() -> Html {
    let form_ctx = use_context::<FormContext>().expect("FormContext not found");
    let toast_ctx = use_context::<ToastContext>().expect("ToastContext not found");
    let controller = &form_ctx.controller;
    let is_loading = controller.is_loading();

    let on_submit = {
        let form_ctx = form_ctx.clone();
        let toast_ctx = toast_ctx.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut controller = form_ctx.controller.clone();
            match controller.begin_submission() {
                Ok(form) => {
                    form_ctx.dispatch(FormAction::Replace(controller));

                    let form_ctx = form_ctx.clone();
                    let toast_ctx = toast_ctx.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let outcome = predict(&form).await;
                        // Failures surface through the controller's alert banner.
                        match &outcome {
                            Ok(_) => toast_ctx.show_success("Prediction ready".to_string()),
                            Err(e) => log::warn!("Prediction failed: {}", e),
                        }
                        form_ctx.dispatch(FormAction::Complete(outcome));
                    });
                }
                Err(SubmitError::Invalid(count)) => {
                    log::debug!("Form has {} invalid field(s)", count);
                    form_ctx.dispatch(FormAction::Replace(controller));
                    toast_ctx.show_warning(format!("Please fix {} field(s)", count));
                }
                Err(SubmitError::AlreadyLoading) => {
                    log::debug!("Submit ignored while a prediction is running");
                }
            }
        })
    };

    let on_example = {
        let form_ctx = form_ctx.clone();
        Callback::from(move |_| form_ctx.dispatch(FormAction::LoadExample))
    };

    let on_reset = {
        let form_ctx = form_ctx.clone();
        Callback::from(move |_| form_ctx.dispatch(FormAction::Reset))
    };

    let on_dismiss = {
        let form_ctx = form_ctx.clone();
        Callback::from(move |_| form_ctx.dispatch(FormAction::DismissAlert))
    };

    html! {
        <div class="card bg-base-100 shadow-xl w-full max-w-2xl">
            <div class="card-body">
                <h2 class="card-title text-2xl">
                    <i class="fas fa-triangle-exclamation text-warning"></i>
                    {"Earthquake Magnitude Prediction"}
                </h2>

                {if let Some(alert) = controller.alert() {
                    html! {
                        <div class="alert alert-error mt-2">
                            <span>{alert}</span>
                            <button class="btn btn-sm btn-ghost" onclick={on_dismiss}>{"Dismiss"}</button>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <form onsubmit={on_submit} class="space-y-4 mt-2" novalidate={true}>
                    <div class="grid gap-4 sm:grid-cols-2">
                        {for FormField::ALL.iter().map(|field| {
                            let field = *field;
                            let on_input = {
                                let form_ctx = form_ctx.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    form_ctx.dispatch(FormAction::UpdateField(field, input.value()));
                                })
                            };
                            let error = controller.errors().get(field);

                            html! {
                                <div class="form-control" key={field.name()}>
                                    <label class="label" for={field.name()}>
                                        <span class="label-text">{field.label()}</span>
                                    </label>
                                    <input
                                        id={field.name()}
                                        name={field.name()}
                                        type="number"
                                        step={field.step()}
                                        class={classes!("input", "input-bordered", "w-full", error.map(|_| "input-error"))}
                                        placeholder={format!("Enter {}", field.label().to_lowercase())}
                                        value={controller.form().get(field).to_string()}
                                        oninput={on_input}
                                        disabled={is_loading}
                                    />
                                    {if let Some(error) = error {
                                        html! {
                                            <label class="label">
                                                <span class="label-text-alt text-error">{error.to_string()}</span>
                                            </label>
                                        }
                                    } else {
                                        html! {}
                                    }}
                                </div>
                            }
                        })}
                    </div>

                    <div class="flex flex-wrap gap-2 justify-end">
                        <button type="button" class="btn btn-ghost" onclick={on_reset} disabled={is_loading}>
                            {"Reset"}
                        </button>
                        <button type="button" class="btn btn-outline" onclick={on_example} disabled={is_loading}>
                            {"Use Example"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={is_loading}>
                            {if is_loading {
                                html! { <><span class="loading loading-spinner loading-sm"></span>{" Predicting..."}</> }
                            } else {
                                html! { {"Predict Magnitude"} }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
