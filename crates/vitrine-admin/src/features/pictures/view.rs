//! Picture gallery dialog for one product.

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::message_box::MessageBox;
use crate::core::fetch::FetchState;
use crate::core::store::AppStore;
use crate::features::auth::view::ApiProps;
use crate::models::ToastKind;
use crate::services::ApiCtx;
use vitrine_api_models::Picture;
use web_sys::{FormData, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

fn load_pictures(api: &ApiCtx, product_id: i64) {
    let mut token = 0;
    Dispatch::<AppStore>::new().reduce_mut(|store| token = store.pictures.issue_list_load());
    let api = api.clone();
    spawn_local(async move {
        let result = api
            .client
            .fetch_pictures(product_id)
            .await
            .map_err(|err| err.message);
        Dispatch::<AppStore>::new()
            .reduce_mut(|store| store.pictures.apply_list(token, product_id, result));
    });
}

fn form_from_input(input: &HtmlInputElement) -> Option<FormData> {
    let files = input.files()?;
    if files.length() == 0 {
        return None;
    }
    let form = FormData::new().ok()?;
    for index in 0..files.length() {
        let file = files.item(index)?;
        form.append_with_blob("pictures", &file).ok()?;
    }
    Some(form)
}

/// Modal gallery: list, upload, and delete pictures of one product.
#[function_component(PicturesDialog)]
pub fn pictures_dialog(props: &ApiProps) -> Html {
    let pictures = use_selector(|store: &AppStore| store.pictures.clone());

    // Hooks run on every render; the closed-dialog bailout comes after them.
    {
        let api = props.api.clone();
        use_effect_with_deps(
            move |id: &Option<i64>| {
                if let Some(id) = *id {
                    load_pictures(&api, id);
                }
                || {}
            },
            pictures.product_id,
        );
    }

    let Some(product_id) = pictures.product_id else {
        return html! {};
    };

    let on_close = Callback::from(move |_| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.pictures.close());
    });
    let on_upload = {
        let api = props.api.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(form) = form_from_input(&input) else {
                return;
            };
            input.set_value("");
            Dispatch::<AppStore>::new().reduce_mut(|store| store.pictures.uploading.begin());
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.upload_pictures(product_id, form).await {
                    Ok(_) => {
                        dispatch.reduce_mut(|store| {
                            store.pictures.uploading.succeed(());
                            store.push_message(ToastKind::Success, "Pictures uploaded.");
                        });
                        load_pictures(&api, product_id);
                    }
                    Err(err) => dispatch.reduce_mut(|store| {
                        store.pictures.uploading.fail(err.message.clone());
                        store.push_message(ToastKind::Error, err.message);
                    }),
                }
            });
        })
    };
    let on_request_delete = Callback::from(move |picture: Picture| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.pictures.request_delete(picture));
    });

    let gallery = match &pictures.list {
        FetchState::Success(list) if list.is_empty() => {
            html! { <MessageBox message="No pictures yet." /> }
        }
        FetchState::Success(list) => html! {
            <ul class="gallery">
                {for list.iter().map(|picture| {
                    let on_delete = {
                        let picture = picture.clone();
                        let on_request_delete = on_request_delete.clone();
                        Callback::from(move |_| on_request_delete.emit(picture.clone()))
                    };
                    html! {
                        <li>
                            <span>{picture.filename.clone()}</span>
                            <button class="danger ghost" onclick={on_delete}>{"Delete"}</button>
                        </li>
                    }
                })}
            </ul>
        },
        FetchState::Failure(message) => html! {
            <MessageBox message={message.clone()} error=true />
        },
        _ => html! { <MessageBox message="Loading pictures…" /> },
    };

    html! {
        <div class="dialog-overlay" role="dialog" aria-modal="true">
            <div class="card">
                <header>
                    <h3>{"Pictures"}</h3>
                </header>
                {gallery}
                <label class="stack">
                    <span>
                        {if pictures.uploading.is_loading() { "Uploading…" } else { "Add pictures" }}
                    </span>
                    <input
                        type="file"
                        multiple=true
                        accept="image/*"
                        disabled={pictures.uploading.is_loading()}
                        onchange={on_upload}
                    />
                </label>
                <div class="actions">
                    <button class="ghost" onclick={on_close}>{"Close"}</button>
                </div>
                {if let Some(pending) = pictures.confirm_delete.clone() {
                    let body = format!("Delete \"{}\"?", pending.filename);
                    let api = props.api.clone();
                    let on_confirm = Callback::from(move |_| confirm_delete(&api, product_id));
                    let on_cancel = Callback::from(move |_| {
                        Dispatch::<AppStore>::new()
                            .reduce_mut(|store| store.pictures.cancel_delete());
                    });
                    html! {
                        <ConfirmDialog
                            title="Delete picture"
                            body={body}
                            busy={pictures.deleting.is_loading()}
                            on_confirm={on_confirm}
                            on_cancel={on_cancel}
                        />
                    }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}

fn confirm_delete(api: &ApiCtx, product_id: i64) {
    let mut pending = None;
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        pending = store.pictures.take_confirmed_delete();
        if pending.is_some() {
            store.pictures.deleting.begin();
        }
    });
    let Some(picture) = pending else {
        return;
    };
    let api = api.clone();
    spawn_local(async move {
        let dispatch = Dispatch::<AppStore>::new();
        match api.client.delete_picture(picture.id).await {
            Ok(()) => {
                dispatch.reduce_mut(|store| {
                    store.pictures.deleting.succeed(());
                    store.push_message(ToastKind::Success, "Picture deleted.");
                });
                load_pictures(&api, product_id);
            }
            Err(err) => dispatch.reduce_mut(|store| {
                store.pictures.deleting.fail(err.message.clone());
                store.push_message(ToastKind::Error, err.message);
            }),
        }
    });
}
