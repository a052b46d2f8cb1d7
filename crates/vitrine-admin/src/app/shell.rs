//! Root component: boot, routing guard, and the signed-in console frame.

use crate::app::routes::{Route, resolve_navigation};
use crate::components::toast::ToastHost;
use crate::core::session::{LocalStorageSession, SessionRepository};
use crate::core::store::AppStore;
use crate::features::categories::state::TreeLoadStrategy;
use crate::features::auth::view::{
    ApiProps, ChangePasswordPanel, ChangePasswordView, LoginView, PasswordRecoveryView,
    PersonalInfoPanel,
};
use crate::features::categories::view::CategoriesPanel;
use crate::features::pictures::view::PicturesDialog;
use crate::features::products::view::ProductsPanel;
use crate::services::{ApiClient, ApiCtx};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

const API_BASE_URL: &str = "/api";

/// Opt-in switch for per-parent tree loading, read once at boot.
const TREE_STRATEGY_KEY: &str = "vitrine:treeLoadStrategy";

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

fn configured_strategy() -> TreeLoadStrategy {
    use gloo::storage::{LocalStorage, Storage};
    match LocalStorage::get::<String>(TREE_STRATEGY_KEY).ok().as_deref() {
        Some("lazy") => TreeLoadStrategy::LazyPerParent,
        _ => TreeLoadStrategy::EagerFullTree,
    }
}

/// Mount the application.
///
/// The store is hydrated from `localStorage` before the first render; the
/// route guard evaluates on the initial paint, so a reload at a protected
/// route must already see the persisted token.
pub fn run_app() {
    console_error_panic_hook::set_once();
    Dispatch::<AppStore>::new()
        .reduce_mut(|store| store.hydrate(LocalStorageSession.load(), configured_strategy()));
    yew::Renderer::<VitrineApp>::new().render();
}

/// Root component.
#[function_component(VitrineApp)]
pub fn vitrine_app() -> Html {
    let api = use_memo(
        |_| {
            let client = ApiClient::new(API_BASE_URL);
            // A session restored by `run_app` is already in the store.
            client.set_token(Dispatch::<AppStore>::new().get().auth.token.clone());
            ApiCtx {
                client: Rc::new(client),
            }
        },
        (),
    );
    let api = (*api).clone();

    let token = use_selector(|store: &AppStore| store.auth.token.clone());
    let toasts = use_selector(|store: &AppStore| store.toasts.clone());
    let on_dismiss = Callback::from(|id: u64| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.dismiss_toast(id));
    });

    let render = {
        let api = api.clone();
        let token = (*token).clone();
        move |route: Route| {
            let resolved = resolve_navigation(route, token.as_deref(), now_ms());
            if resolved != route {
                return html! { <Redirect<Route> to={resolved} /> };
            }
            match route {
                Route::Landing | Route::Admin => html! { <AdminHome api={api.clone()} /> },
                Route::Login => html! { <LoginView api={api.clone()} /> },
                Route::PasswordRecovery => html! { <PasswordRecoveryView api={api.clone()} /> },
                Route::ChangePassword => html! { <ChangePasswordView api={api.clone()} /> },
                Route::NotFound => html! {
                    <main class="auth-page">
                        <div class="card">
                            <h2>{"Page not found"}</h2>
                            <Link<Route> to={Route::Landing}>{"Back to the console"}</Link<Route>>
                        </div>
                    </main>
                },
            }
        }
    };

    html! {
        <BrowserRouter>
            <Switch<Route> render={render} />
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </BrowserRouter>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ConsoleTab {
    Categories,
    Products,
    Account,
}

/// Signed-in console frame with its tab bar.
#[function_component(AdminHome)]
pub fn admin_home(props: &ApiProps) -> Html {
    let tab = use_state(|| ConsoleTab::Categories);
    let user = use_selector(|store: &AppStore| store.auth.user.clone());
    let navigator = use_navigator();

    let on_logout = {
        let api = props.api.clone();
        Callback::from(move |_| {
            LocalStorageSession.clear();
            api.client.set_token(None);
            Dispatch::<AppStore>::new().reduce_mut(|store| {
                *store = AppStore::default();
                // The strategy is boot configuration, not session state.
                store.categories.strategy = configured_strategy();
            });
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let tab_button = |target: ConsoleTab, label: &str| {
        let tab = tab.clone();
        let class = if *tab == target { "tab active" } else { "tab" };
        let onclick = Callback::from(move |_| tab.set(target));
        html! { <button class={class} onclick={onclick}>{label}</button> }
    };

    let body = match *tab {
        ConsoleTab::Categories => html! { <CategoriesPanel api={props.api.clone()} /> },
        ConsoleTab::Products => html! { <ProductsPanel api={props.api.clone()} /> },
        ConsoleTab::Account => html! {
            <>
                <PersonalInfoPanel api={props.api.clone()} />
                <ChangePasswordPanel api={props.api.clone()} />
            </>
        },
    };

    html! {
        <div class="console">
            <header class="console-header">
                <h1>{"Vitrine admin"}</h1>
                <nav>
                    {tab_button(ConsoleTab::Categories, "Categories")}
                    {tab_button(ConsoleTab::Products, "Products")}
                    {tab_button(ConsoleTab::Account, "Account")}
                </nav>
                <div class="session">
                    {if let Some(user) = &*user {
                        html! { <span class="muted">{user.email.clone()}</span> }
                    } else {
                        html! {}
                    }}
                    <button class="ghost" onclick={on_logout}>{"Sign out"}</button>
                </div>
            </header>
            <main>{body}</main>
            <PicturesDialog api={props.api.clone()} />
        </div>
    }
}
