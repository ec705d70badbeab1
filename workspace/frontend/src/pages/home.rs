use yew::prelude::*;

use crate::components::forecast_cards::ForecastCards;
use crate::components::prediction_form::PredictionForm;
use crate::components::recent_events::RecentEvents;
use crate::state::FormContext;

#[function_component(Home)]
pub fn home() -> Html {
    let form_ctx = use_context::<FormContext>().expect("FormContext not found");

    html! {
        <div class="flex flex-wrap justify-center items-start gap-8 p-6">
            <div class="flex flex-col gap-6 w-full max-w-2xl">
                <PredictionForm />
                <RecentEvents />
            </div>
            {if let Some(prediction) = form_ctx.controller.prediction() {
                html! { <ForecastCards prediction={prediction.clone()} /> }
            } else {
                html! {}
            }}
        </div>
    }
}
