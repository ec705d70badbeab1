use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    html! {
        <div class="navbar bg-primary text-primary-content">
            <div class="navbar-start">
                <Link<Route> to={Route::Home} classes="btn btn-ghost text-xl">
                    <i class="fas fa-house-crack text-warning"></i>
                    {" QuakeCast"}
                </Link<Route>>
            </div>
            <div class="navbar-end">
                <ul class="menu menu-horizontal px-1">
                    <li><Link<Route> to={Route::Home} classes="btn btn-ghost">{"Prediction"}</Link<Route>></li>
                    <li><Link<Route> to={Route::Chart} classes="btn btn-ghost">{"Chart"}</Link<Route>></li>
                </ul>
            </div>
        </div>
    }
}
