//! Sign-in and password flow pages.

use crate::app::routes::Route;
use crate::components::message_box::MessageBox;
use crate::core::auth::decode_claims;
use crate::core::session::{LocalStorageSession, PersistedRoot, SessionRepository};
use crate::core::store::AppStore;
use crate::features::auth::logic::{is_email, password_pair_problem};
use crate::models::ToastKind;
use crate::services::ApiCtx;
use serde::Deserialize;
use vitrine_api_models::{
    ChangePasswordRequest, LoginRequest, PasswordRecoveryRequest, TokenPasswordResetRequest,
    UpdateUserRequest, User,
};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

fn input_value(event: &InputEvent) -> String {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Sign-in form.
#[function_component(LoginView)]
pub fn login_view(props: &ApiProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let login = use_selector(|store: &AppStore| store.auth.login.clone());
    let navigator = use_navigator();

    let on_email = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| email.set(input_value(&event)))
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| password.set(input_value(&event)))
    };

    let submit_disabled = !is_email(&email) || password.is_empty() || login.is_loading();
    let on_submit = {
        let email = (*email).clone();
        let password = (*password).clone();
        let api = props.api.clone();
        Callback::from(move |_| {
            let dispatch = Dispatch::<AppStore>::new();
            dispatch.reduce_mut(|store| store.auth.login.begin());
            let body = LoginRequest {
                username: email.clone(),
                password: password.clone(),
            };
            let api = api.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match api.client.login(&body).await {
                    Ok(jwt) => {
                        api.client.set_token(Some(jwt.clone()));
                        LocalStorageSession.save(&PersistedRoot::for_login(jwt.clone(), None));
                        Dispatch::<AppStore>::new()
                            .reduce_mut(|store| store.auth.apply_login(jwt, None));
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Admin);
                        }
                    }
                    Err(err) => Dispatch::<AppStore>::new()
                        .reduce_mut(|store| store.auth.login.fail(err.message)),
                }
            });
        })
    };

    html! {
        <main class="auth-page">
            <div class="card">
                <h2>{"Sign in"}</h2>
                <label class="stack">
                    <span>{"Email"}</span>
                    <input type="email" value={(*email).clone()} oninput={on_email} />
                </label>
                <label class="stack">
                    <span>{"Password"}</span>
                    <input type="password" value={(*password).clone()} oninput={on_password} />
                </label>
                {if let Some(message) = login.error() {
                    html! { <MessageBox message={message.to_string()} error=true /> }
                } else {
                    html! {}
                }}
                <div class="actions">
                    <Link<Route> to={Route::PasswordRecovery} classes="ghost">
                        {"Forgot password?"}
                    </Link<Route>>
                    <button class="solid" disabled={submit_disabled} onclick={on_submit}>
                        {if login.is_loading() { "Signing in…" } else { "Sign in" }}
                    </button>
                </div>
            </div>
        </main>
    }
}

/// Request a password-recovery email.
#[function_component(PasswordRecoveryView)]
pub fn password_recovery_view(props: &ApiProps) -> Html {
    let email = use_state(String::new);
    let recovery = use_selector(|store: &AppStore| store.auth.recovery.clone());

    let on_email = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| email.set(input_value(&event)))
    };
    let on_submit = {
        let email = (*email).clone();
        let api = props.api.clone();
        Callback::from(move |_| {
            Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.recovery.begin());
            let body = PasswordRecoveryRequest {
                email: email.clone(),
            };
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.request_password_recovery(&body).await {
                    Ok(()) => dispatch.reduce_mut(|store| store.auth.recovery.succeed(())),
                    Err(err) => dispatch.reduce_mut(|store| store.auth.recovery.fail(err.message)),
                }
            });
        })
    };

    let body = if recovery.data().is_some() {
        html! { <MessageBox message="Check your inbox for a recovery link." /> }
    } else {
        html! {
            <>
                <label class="stack">
                    <span>{"Email"}</span>
                    <input type="email" value={(*email).clone()} oninput={on_email} />
                </label>
                {if let Some(message) = recovery.error() {
                    html! { <MessageBox message={message.to_string()} error=true /> }
                } else {
                    html! {}
                }}
                <div class="actions">
                    <Link<Route> to={Route::Login} classes="ghost">{"Back to sign in"}</Link<Route>>
                    <button
                        class="solid"
                        disabled={!is_email(&email) || recovery.is_loading()}
                        onclick={on_submit}
                    >
                        {"Send recovery email"}
                    </button>
                </div>
            </>
        }
    };

    html! {
        <main class="auth-page">
            <div class="card">
                <h2>{"Password recovery"}</h2>
                {body}
            </div>
        </main>
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
struct ResetQuery {
    token: String,
    #[serde(rename = "userId")]
    user_id: String,
}

/// Set a new password from an emailed reset link.
#[function_component(ChangePasswordView)]
pub fn change_password_view(props: &ApiProps) -> Html {
    let location = use_location();
    let query = location.and_then(|location| location.query::<ResetQuery>().ok());
    let password = use_state(String::new);
    let confirmation = use_state(String::new);
    let token_check = use_selector(|store: &AppStore| store.auth.token_check.clone());
    let token_reset = use_selector(|store: &AppStore| store.auth.token_reset.clone());

    {
        let api = props.api.clone();
        use_effect_with_deps(
            move |query: &Option<ResetQuery>| {
                let dispatch = Dispatch::<AppStore>::new();
                if let Some(query) = query.clone() {
                    dispatch.reduce_mut(|store| store.auth.token_check.begin());
                    spawn_local(async move {
                        let dispatch = Dispatch::<AppStore>::new();
                        match api
                            .client
                            .check_password_token(&query.token, &query.user_id)
                            .await
                        {
                            Ok(()) => {
                                dispatch.reduce_mut(|store| store.auth.token_check.succeed(()));
                            }
                            Err(err) => dispatch
                                .reduce_mut(|store| store.auth.token_check.fail(err.message)),
                        }
                    });
                }
                || {}
            },
            query.clone(),
        );
    }

    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| password.set(input_value(&event)))
    };
    let on_confirmation = {
        let confirmation = confirmation.clone();
        Callback::from(move |event: InputEvent| confirmation.set(input_value(&event)))
    };

    let pair_problem = password_pair_problem(&password, &confirmation);
    let on_submit = {
        let password = (*password).clone();
        let query = query.clone();
        let api = props.api.clone();
        Callback::from(move |_| {
            let Some(query) = query.clone() else {
                return;
            };
            Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.token_reset.begin());
            let body = TokenPasswordResetRequest {
                new_password: password.clone(),
                token: query.token,
                user_id: query.user_id,
            };
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.reset_password_with_token(&body).await {
                    Ok(()) => dispatch.reduce_mut(|store| store.auth.token_reset.succeed(())),
                    Err(err) => {
                        dispatch.reduce_mut(|store| store.auth.token_reset.fail(err.message));
                    }
                }
            });
        })
    };

    let body = if query.is_none() {
        html! { <MessageBox message="This reset link is incomplete." error=true /> }
    } else if let Some(message) = token_check.error() {
        html! { <MessageBox message={message.to_string()} error=true /> }
    } else if token_check.is_loading() || token_check.is_initial() {
        html! { <MessageBox message="Checking your reset link…" /> }
    } else if token_reset.data().is_some() {
        html! {
            <>
                <MessageBox message="Your password has been updated." />
                <Link<Route> to={Route::Login} classes="solid">{"Go to sign in"}</Link<Route>>
            </>
        }
    } else {
        html! {
            <>
                <label class="stack">
                    <span>{"New password"}</span>
                    <input type="password" value={(*password).clone()} oninput={on_password} />
                </label>
                <label class="stack">
                    <span>{"Repeat password"}</span>
                    <input
                        type="password"
                        value={(*confirmation).clone()}
                        oninput={on_confirmation}
                    />
                </label>
                {match (pair_problem, token_reset.error()) {
                    (Some(problem), _) if !password.is_empty() => {
                        html! { <MessageBox message={problem.to_string()} error=true /> }
                    }
                    (_, Some(message)) => {
                        html! { <MessageBox message={message.to_string()} error=true /> }
                    }
                    _ => html! {},
                }}
                <button
                    class="solid"
                    disabled={pair_problem.is_some() || token_reset.is_loading()}
                    onclick={on_submit}
                >
                    {"Set new password"}
                </button>
            </>
        }
    };

    html! {
        <main class="auth-page">
            <div class="card">
                <h2>{"Choose a new password"}</h2>
                {body}
            </div>
        </main>
    }
}

/// Change-password form for the signed-in account, shown on the console.
#[function_component(ChangePasswordPanel)]
pub fn change_password_panel(props: &ApiProps) -> Html {
    let current = use_state(String::new);
    let replacement = use_state(String::new);
    let confirmation = use_state(String::new);
    let change = use_selector(|store: &AppStore| store.auth.change_password.clone());

    let on_current = {
        let current = current.clone();
        Callback::from(move |event: InputEvent| current.set(input_value(&event)))
    };
    let on_replacement = {
        let replacement = replacement.clone();
        Callback::from(move |event: InputEvent| replacement.set(input_value(&event)))
    };
    let on_confirmation = {
        let confirmation = confirmation.clone();
        Callback::from(move |event: InputEvent| confirmation.set(input_value(&event)))
    };

    let pair_problem = password_pair_problem(&replacement, &confirmation);
    let on_submit = {
        let current = (*current).clone();
        let replacement = (*replacement).clone();
        let api = props.api.clone();
        Callback::from(move |_| {
            Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.change_password.begin());
            let body = ChangePasswordRequest {
                current_password: current.clone(),
                new_password: replacement.clone(),
            };
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.change_password(&body).await {
                    Ok(user) => dispatch.reduce_mut(|store| {
                        store.auth.change_password.succeed(());
                        store.auth.user = Some(user);
                        store.push_message(ToastKind::Success, "Password updated.");
                    }),
                    Err(err) => dispatch
                        .reduce_mut(|store| store.auth.change_password.fail(err.message)),
                }
            });
        })
    };

    html! {
        <section class="panel">
            <h3>{"Change password"}</h3>
            <label class="stack">
                <span>{"Current password"}</span>
                <input type="password" value={(*current).clone()} oninput={on_current} />
            </label>
            <label class="stack">
                <span>{"New password"}</span>
                <input type="password" value={(*replacement).clone()} oninput={on_replacement} />
            </label>
            <label class="stack">
                <span>{"Repeat new password"}</span>
                <input type="password" value={(*confirmation).clone()} oninput={on_confirmation} />
            </label>
            {if let Some(message) = change.error() {
                html! { <MessageBox message={message.to_string()} error=true /> }
            } else {
                html! {}
            }}
            <button
                class="solid"
                disabled={current.is_empty() || pair_problem.is_some() || change.is_loading()}
                onclick={on_submit}
            >
                {"Update password"}
            </button>
        </section>
    }
}

/// Personal information form for the signed-in account.
#[function_component(PersonalInfoPanel)]
pub fn personal_info_panel(props: &ApiProps) -> Html {
    let user = use_selector(|store: &AppStore| store.auth.user.clone());
    let profile = use_selector(|store: &AppStore| store.auth.profile_update.clone());
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);

    // The cached profile is empty right after a fresh login; the account id
    // lives in the token claims.
    {
        let api = props.api.clone();
        use_effect_with_deps(
            move |missing: &bool| {
                if *missing {
                    spawn_local(async move {
                        let id = Dispatch::<AppStore>::new()
                            .get()
                            .auth
                            .token
                            .as_deref()
                            .and_then(decode_claims)
                            .map(|claims| claims.user_id.to_string());
                        let Some(id) = id else {
                            return;
                        };
                        let dispatch = Dispatch::<AppStore>::new();
                        match api.client.fetch_user(&id).await {
                            Ok(user) => {
                                dispatch.reduce_mut(|store| store.auth.user = Some(user));
                            }
                            Err(err) => dispatch.reduce_mut(|store| {
                                store.push_message(ToastKind::Error, err.message);
                            }),
                        }
                    });
                }
                || {}
            },
            user.is_none(),
        );
    }
    {
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        use_effect_with_deps(
            move |user: &Option<User>| {
                if let Some(user) = user {
                    first_name.set(user.first_name.clone());
                    last_name.set(user.last_name.clone());
                }
                || {}
            },
            (*user).clone(),
        );
    }

    let on_first = {
        let first_name = first_name.clone();
        Callback::from(move |event: InputEvent| first_name.set(input_value(&event)))
    };
    let on_last = {
        let last_name = last_name.clone();
        Callback::from(move |event: InputEvent| last_name.set(input_value(&event)))
    };

    let submit_disabled = user.is_none()
        || first_name.trim().is_empty()
        || last_name.trim().is_empty()
        || profile.is_loading();
    let on_submit = {
        let first_name = (*first_name).clone();
        let last_name = (*last_name).clone();
        let api = props.api.clone();
        Callback::from(move |_| {
            let dispatch = Dispatch::<AppStore>::new();
            let Some(id) = dispatch.get().auth.user.as_ref().map(|user| user.id.clone()) else {
                return;
            };
            dispatch.reduce_mut(|store| store.auth.profile_update.begin());
            let body = UpdateUserRequest {
                first_name: first_name.trim().to_string(),
                last_name: last_name.trim().to_string(),
            };
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.update_user(&id, &body).await {
                    Ok(user) => {
                        dispatch.reduce_mut(|store| {
                            store.auth.apply_profile(user.clone());
                            store.push_message(ToastKind::Success, "Profile updated.");
                        });
                        if let Some(token) = dispatch.get().auth.token.clone() {
                            LocalStorageSession.save(&PersistedRoot::for_login(token, Some(user)));
                        }
                    }
                    Err(err) => dispatch.reduce_mut(|store| {
                        store.auth.profile_update.fail(err.message.clone());
                        store.push_message(ToastKind::Error, err.message);
                    }),
                }
            });
        })
    };

    html! {
        <section class="panel">
            <h3>{"Personal information"}</h3>
            <label class="stack">
                <span>{"First name"}</span>
                <input value={(*first_name).clone()} oninput={on_first} />
            </label>
            <label class="stack">
                <span>{"Last name"}</span>
                <input value={(*last_name).clone()} oninput={on_last} />
            </label>
            {if let Some(message) = profile.error() {
                html! { <MessageBox message={message.to_string()} error=true /> }
            } else {
                html! {}
            }}
            <button class="solid" disabled={submit_disabled} onclick={on_submit}>
                {if profile.is_loading() { "Saving…" } else { "Save profile" }}
            </button>
        </section>
    }
}

/// Props carrying the shared API context to a page.
#[derive(Properties, PartialEq)]
pub struct ApiProps {
    /// Shared API client handle.
    pub api: ApiCtx,
}
