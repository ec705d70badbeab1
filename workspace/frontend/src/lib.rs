use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod pages;
pub mod api_client;
pub mod common;
pub mod settings;
pub mod state;

use crate::common::toast::ToastProvider;
use components::chatbot::Chatbot;
use components::navbar::Navbar;
use pages::chart::ChartPage;
use pages::home::Home;
use state::FormProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/chart")]
    Chart,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            log::trace!("Rendering prediction page");
            html! { <Home /> }
        }
        Route::Chart => {
            log::trace!("Rendering chart page");
            html! { <ChartPage /> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <h1 class="text-2xl p-6">{"404 Not Found"}</h1> }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <FormProvider>
                <BrowserRouter>
                    <div class="min-h-screen bg-base-200">
                        <Navbar />
                        <Switch<Route> render={switch} />
                        <Chatbot />
                    </div>
                </BrowserRouter>
            </FormProvider>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== QuakeCast Frontend Application Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
