use common::Prediction;
use plotly::common::Mode;
use plotly::{Layout, Scatter};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

const CHART_ID: &str = "forecast-chart";
/// Headroom above and below the forecast on the magnitude axis.
const MAGNITUDE_PADDING: f64 = 0.5;

#[derive(Properties, PartialEq)]
pub struct ForecastChartProps {
    pub prediction: Prediction,
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(|e| format!("{:?}", e))
}

/// Line chart of the forecast magnitudes by day.
#[function_component(ForecastChart)]
pub fn forecast_chart(props: &ForecastChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.prediction.clone()),
        move |(container_ref, prediction)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(CHART_ID);

                let forecast = &prediction.forecast;
                let dates: Vec<String> = forecast.iter().map(|e| e.date.to_string()).collect();
                let magnitudes: Vec<f64> = forecast.iter().map(|e| e.magnitude).collect();

                let mut y_axis =
                    plotly::layout::Axis::new().title(plotly::common::Title::with_text("Magnitude"));
                if let Some((low, high)) = prediction.forecast_bounds() {
                    y_axis = y_axis.range(vec![low - MAGNITUDE_PADDING, high + MAGNITUDE_PADDING]);
                }

                let trace = Scatter::new(dates, magnitudes)
                    .mode(Mode::LinesMarkers)
                    .name("Magnitude")
                    .line(plotly::common::Line::new().color("rgb(79, 70, 229)").width(2.0));

                let layout = Layout::new()
                    .title(plotly::common::Title::with_text("Next 5-Days Prediction"))
                    .x_axis(plotly::layout::Axis::new().title(plotly::common::Title::with_text("Date")))
                    .y_axis(y_axis)
                    .height(400);

                match (to_js(&trace), to_js(&layout)) {
                    (Ok(trace_js), Ok(layout_js)) => {
                        let data_js = js_sys::Array::new();
                        data_js.push(&trace_js);
                        newPlot(CHART_ID, data_js.into(), layout_js);
                    }
                    (Err(e), _) | (_, Err(e)) => log::error!("Failed to build forecast chart: {}", e),
                }
            }
            || ()
        },
    );

    html! {
        <div ref={container_ref} style="width:100%; height:400px;"></div>
    }
}
