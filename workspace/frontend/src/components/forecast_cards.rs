use common::Prediction;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ForecastCardsProps {
    pub prediction: Prediction,
}

/// Predicted magnitude plus one card per forecast day.
#[function_component(ForecastCards)]
pub fn forecast_cards(props: &ForecastCardsProps) -> Html {
    let prediction = &props.prediction;

    html! {
        <div class="space-y-4 w-full max-w-2xl">
            <div class="stats shadow w-full bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Predicted Magnitude"}</div>
                    <div class="stat-value text-primary">{format!("{:.1}", prediction.result.magnitude)}</div>
                    <div class="stat-desc">
                        {format!("Generated {}", prediction.result.timestamp.format("%Y-%m-%d %H:%M UTC"))}
                    </div>
                    <div class="stat-actions">
                        <div class="tooltip" data-tip="Click to see the Prediction Graph">
                            <Link<Route> to={Route::Chart} classes="btn btn-sm btn-primary">
                                {"Click here"}
                            </Link<Route>>
                        </div>
                    </div>
                </div>
            </div>

            {if prediction.forecast.is_empty() {
                html! {}
            } else {
                html! {
                    <div class="space-y-2">
                        <h3 class="text-lg font-semibold">{"Next 5-Days Prediction"}</h3>
                        <div class="grid gap-4 grid-cols-2 md:grid-cols-3">
                            {for prediction.forecast.iter().map(|day| html! {
                                <div key={day.date.to_string()} class="card bg-base-100 shadow-sm">
                                    <div class="card-body items-center p-4">
                                        <p class="text-sm text-gray-500">{day.date.to_string()}</p>
                                        <p class="text-xl font-semibold">{format!("{:.1}", day.magnitude)}</p>
                                    </div>
                                </div>
                            })}
                        </div>
                    </div>
                }
            }}
        </div>
    }
}
