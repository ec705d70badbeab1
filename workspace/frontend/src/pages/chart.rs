use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::forecast_chart::ForecastChart;
use crate::state::FormContext;
use crate::Route;

#[function_component(ChartPage)]
pub fn chart_page() -> Html {
    let form_ctx = use_context::<FormContext>().expect("FormContext not found");

    html! {
        <div class="p-6 max-w-4xl mx-auto">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex justify-between items-center">
                        <h2 class="card-title">{"Prediction Graph"}</h2>
                        <Link<Route> to={Route::Home} classes="btn btn-sm btn-ghost">{"Back to form"}</Link<Route>>
                    </div>
                    {match form_ctx.controller.prediction() {
                        Some(prediction) => html! {
                            <ForecastChart prediction={prediction.clone()} />
                        },
                        None => html! {
                            <div class="text-center py-8 text-gray-500">
                                <i class="fas fa-chart-line text-4xl mb-4 opacity-50"></i>
                                <p>{"No prediction yet."}</p>
                                <p class="text-sm mt-2">{"Submit the form to see the five day forecast here."}</p>
                            </div>
                        },
                    }}
                </div>
            </div>
        </div>
    }
}
