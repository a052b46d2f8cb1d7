//! Product catalog table and the product editor.

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::message_box::MessageBox;
use crate::core::fetch::FetchState;
use crate::core::store::AppStore;
use crate::features::auth::view::ApiProps;
use crate::features::products::state::{ProductDraft, ProductField, ProductRow};
use crate::models::ToastKind;
use crate::services::ApiCtx;
use vitrine_api_models::{Category, ProductStatus};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

fn load_products(api: &ApiCtx) {
    let mut token = 0;
    Dispatch::<AppStore>::new().reduce_mut(|store| token = store.products.issue_list_load());
    let api = api.clone();
    spawn_local(async move {
        let result = api.client.fetch_products().await.map_err(|err| err.message);
        Dispatch::<AppStore>::new().reduce_mut(|store| store.products.apply_list(token, result));
    });
}

/// Product catalog panel.
#[function_component(ProductsPanel)]
pub fn products_panel(props: &ApiProps) -> Html {
    let products = use_selector(|store: &AppStore| store.products.clone());
    let api = props.api.clone();

    {
        let api = api.clone();
        use_effect_with_deps(
            move |_| {
                load_products(&api);
                || {}
            },
            (),
        );
    }

    let on_new = Callback::from(move |_| {
        Dispatch::<AppStore>::new()
            .reduce_mut(|store| store.products.open_editor(ProductDraft::default()));
    });
    let on_reload = {
        let api = api.clone();
        Callback::from(move |_| load_products(&api))
    };

    let table = match &products.list {
        FetchState::Success(rows) => html! {
            <table class="catalog">
                <thead>
                    <tr>
                        <th>{"Title"}</th>
                        <th>{"Price"}</th>
                        <th>{"Stock"}</th>
                        <th>{"Category"}</th>
                        <th>{"Created"}</th>
                        <th>{"Status"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {for rows.iter().map(|row| render_row(row, &api))}
                </tbody>
            </table>
        },
        FetchState::Failure(message) => html! {
            <MessageBox message={message.clone()} error=true />
        },
        _ => html! { <MessageBox message="Loading products…" /> },
    };

    html! {
        <section class="panel">
            <header class="panel-header">
                <h3>{"Products"}</h3>
                <div class="actions">
                    <button class="ghost" onclick={on_reload}>{"Reload"}</button>
                    <button class="solid" onclick={on_new}>{"New product"}</button>
                </div>
            </header>
            {table}
            {if products.editor.is_some() {
                html! { <ProductEditor api={props.api.clone()} /> }
            } else {
                html! {}
            }}
            {if let Some(pending) = products.confirm_delete.clone() {
                let body = format!("Delete \"{}\"? This cannot be undone.", pending.title);
                let api = props.api.clone();
                let on_confirm = Callback::from(move |_| confirm_delete(&api));
                let on_cancel = Callback::from(move |_| {
                    Dispatch::<AppStore>::new().reduce_mut(|store| store.products.cancel_delete());
                });
                html! {
                    <ConfirmDialog
                        title="Delete product"
                        body={body}
                        busy={products.deleting.is_loading()}
                        on_confirm={on_confirm}
                        on_cancel={on_cancel}
                    />
                }
            } else {
                html! {}
            }}
        </section>
    }
}

fn render_row(row: &ProductRow, api: &ApiCtx) -> Html {
    let id = row.id;
    let on_toggle = {
        let api = api.clone();
        let next = row.status.toggled();
        Callback::from(move |_| {
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.set_product_status(id, next).await {
                    Ok(()) => dispatch.reduce_mut(|store| store.products.apply_status(id, next)),
                    Err(err) => dispatch.reduce_mut(|store| {
                        store.push_message(ToastKind::Error, err.message);
                    }),
                }
            });
        })
    };
    let on_pictures = Callback::from(move |_| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.pictures.open(id));
    });
    let on_edit = {
        let api = api.clone();
        Callback::from(move |_| {
            // The table keeps rows, not full products; refetch for the form.
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.fetch_products().await {
                    Ok(products) => dispatch.reduce_mut(|store| {
                        if let Some(product) = products.iter().find(|p| p.id == id) {
                            store.products.open_editor(ProductDraft::from_product(product));
                        }
                    }),
                    Err(err) => dispatch.reduce_mut(|store| {
                        store.push_message(ToastKind::Error, err.message);
                    }),
                }
            });
        })
    };
    let on_delete = {
        let row = row.clone();
        Callback::from(move |_| {
            let row = row.clone();
            Dispatch::<AppStore>::new().reduce_mut(|store| store.products.request_delete(row));
        })
    };

    let status_label = match row.status {
        ProductStatus::Available => "Available",
        ProductStatus::NotAvailable => "Not available",
    };

    html! {
        <tr>
            <td>{row.title.clone()}</td>
            <td>{row.price_label.clone()}</td>
            <td>{row.quantity_in_stock}</td>
            <td>{row.category_label.clone()}</td>
            <td>{row.created_label.clone()}</td>
            <td>
                <button class="ghost" onclick={on_toggle}>{status_label}</button>
            </td>
            <td class="actions">
                <button class="ghost" onclick={on_pictures}>{"Pictures"}</button>
                <button class="ghost" onclick={on_edit}>{"Edit"}</button>
                <button class="danger ghost" onclick={on_delete}>{"Delete"}</button>
            </td>
        </tr>
    }
}

fn confirm_delete(api: &ApiCtx) {
    let mut pending = None;
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        pending = store.products.take_confirmed_delete();
        if pending.is_some() {
            store.products.deleting.begin();
        }
    });
    let Some(row) = pending else {
        return;
    };
    let api = api.clone();
    spawn_local(async move {
        let dispatch = Dispatch::<AppStore>::new();
        match api.client.delete_product(row.id).await {
            Ok(()) => {
                dispatch.reduce_mut(|store| {
                    store.products.deleting.succeed(());
                    store.push_message(ToastKind::Success, format!("Deleted \"{}\".", row.title));
                });
                load_products(&api);
            }
            Err(err) => dispatch.reduce_mut(|store| {
                store.products.deleting.fail(err.message.clone());
                store.push_message(ToastKind::Error, err.message);
            }),
        }
    });
}

fn field_callback(build: fn(String) -> ProductField) -> Callback<InputEvent> {
    Callback::from(move |event: InputEvent| {
        let value = event
            .target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .or_else(|| {
                event
                    .target_dyn_into::<HtmlTextAreaElement>()
                    .map(|area| area.value())
            });
        if let Some(value) = value {
            Dispatch::<AppStore>::new().reduce_mut(|store| {
                if let Some(draft) = store.products.editor.as_mut() {
                    draft.apply_field(build(value));
                }
            });
        }
    })
}

/// Modal form creating or updating one product.
#[function_component(ProductEditor)]
pub fn product_editor(props: &ApiProps) -> Html {
    let products = use_selector(|store: &AppStore| store.products.clone());
    let categories = use_selector(|store: &AppStore| store.categories.tree.clone());
    let Some(draft) = products.editor.clone() else {
        return html! {};
    };

    let on_cancel = Callback::from(move |_| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.products.close_editor());
    });
    let on_category = Callback::from(move |event: Event| {
        if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
            let value = select.value();
            Dispatch::<AppStore>::new().reduce_mut(|store| {
                if let Some(draft) = store.products.editor.as_mut() {
                    draft.apply_field(ProductField::CategoryId(value.clone()));
                }
            });
        }
    });
    let problem = draft.to_body().err();
    let on_submit = {
        let api = props.api.clone();
        let draft = draft.clone();
        Callback::from(move |_| {
            let Ok(body) = draft.to_body() else {
                return;
            };
            Dispatch::<AppStore>::new().reduce_mut(|store| store.products.saving.begin());
            let api = api.clone();
            let id = draft.id;
            spawn_local(async move {
                let saved = match id {
                    Some(id) => api.client.update_product(id, &body).await,
                    None => api.client.create_product(&body).await,
                };
                let dispatch = Dispatch::<AppStore>::new();
                match saved {
                    Ok(product) => {
                        dispatch.reduce_mut(|store| {
                            store.products.saving.succeed(());
                            store.products.close_editor();
                            store.push_message(
                                ToastKind::Success,
                                format!("Saved \"{}\".", product.title),
                            );
                        });
                        load_products(&api);
                    }
                    Err(err) => dispatch.reduce_mut(|store| {
                        store.products.saving.fail(err.message);
                    }),
                }
            });
        })
    };

    let category_options: Vec<Category> = categories.data().cloned().unwrap_or_default();

    html! {
        <div class="dialog-overlay" role="dialog" aria-modal="true">
            <div class="card wide">
                <header>
                    <h3>{if draft.id.is_some() { "Edit product" } else { "New product" }}</h3>
                </header>
                <label class="stack">
                    <span>{"Title"}</span>
                    <input
                        value={draft.title.clone()}
                        oninput={field_callback(ProductField::Title)}
                    />
                </label>
                <label class="stack">
                    <span>{"Description"}</span>
                    <textarea
                        value={draft.description.clone()}
                        oninput={field_callback(ProductField::Description)}
                    />
                </label>
                <div class="row">
                    <label class="stack">
                        <span>{"Price"}</span>
                        <input
                            value={draft.price.clone()}
                            oninput={field_callback(ProductField::Price)}
                        />
                    </label>
                    <label class="stack">
                        <span>{"In stock"}</span>
                        <input
                            value={draft.quantity_in_stock.clone()}
                            oninput={field_callback(ProductField::QuantityInStock)}
                        />
                    </label>
                </div>
                <label class="stack">
                    <span>{"Tags"}</span>
                    <input
                        value={draft.tags.clone()}
                        oninput={field_callback(ProductField::Tags)}
                    />
                </label>
                <label class="stack">
                    <span>{"Category"}</span>
                    <select onchange={on_category}>
                        <option value="" selected={draft.category_id.is_empty()}>
                            {"Choose…"}
                        </option>
                        {for category_options.iter().flat_map(flatten_categories).map(|(id, label)| {
                            html! {
                                <option value={id.clone()} selected={id == draft.category_id}>
                                    {label}
                                </option>
                            }
                        })}
                    </select>
                </label>
                {match (&problem, products.saving.error()) {
                    (_, Some(message)) => {
                        html! { <MessageBox message={message.to_string()} error=true /> }
                    }
                    (Some(message), _) if !draft.title.is_empty() => {
                        html! { <MessageBox message={message.clone()} error=true /> }
                    }
                    _ => html! {},
                }}
                <div class="actions">
                    <button class="ghost" onclick={on_cancel}>{"Cancel"}</button>
                    <button
                        class="solid"
                        disabled={problem.is_some() || products.saving.is_loading()}
                        onclick={on_submit}
                    >
                        {"Save"}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Depth-first (id, indented label) pairs for the category selector.
fn flatten_categories(root: &Category) -> Vec<(String, String)> {
    fn walk(node: &Category, depth: usize, out: &mut Vec<(String, String)>) {
        let indent = "\u{a0}\u{a0}".repeat(depth);
        out.push((node.id.clone(), format!("{indent}{}", node.label)));
        for child in &node.sub_categories {
            walk(child, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(root, 0, &mut out);
    out
}
