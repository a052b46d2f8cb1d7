//! Category manager panel and the new-category wizard.

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::message_box::MessageBox;
use crate::core::fetch::FetchState;
use crate::core::store::AppStore;
use crate::features::auth::view::ApiProps;
use crate::features::categories::logic::children_of;
use crate::features::categories::state::{CategoriesState, ROOT_PARENT, TreeLoadStrategy};
use crate::models::ToastKind;
use crate::services::ApiCtx;
use vitrine_api_models::{Category, CreateCategoryRequest};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

fn load_tree(api: &ApiCtx) {
    let mut token = 0;
    let mut strategy = TreeLoadStrategy::default();
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        strategy = store.categories.strategy;
        token = match strategy {
            TreeLoadStrategy::EagerFullTree => store.categories.issue_tree_load(),
            TreeLoadStrategy::LazyPerParent => {
                store.categories.tree.begin();
                store.categories.issue_children_load()
            }
        };
    });
    let api = api.clone();
    spawn_local(async move {
        let dispatch = Dispatch::<AppStore>::new();
        match strategy {
            TreeLoadStrategy::EagerFullTree => {
                let result = api
                    .client
                    .fetch_categories()
                    .await
                    .map_err(|err| err.message);
                dispatch.reduce_mut(|store| store.categories.apply_tree(token, result));
            }
            TreeLoadStrategy::LazyPerParent => {
                match api.client.fetch_sub_categories(ROOT_PARENT).await {
                    Ok(children) => dispatch.reduce_mut(|store| {
                        store.categories.apply_children(token, ROOT_PARENT, children);
                    }),
                    Err(err) => dispatch.reduce_mut(|store| {
                        store.categories.tree.fail(err.message);
                    }),
                }
            }
        }
    });
}

fn load_children(api: &ApiCtx, parent_id: String) {
    let mut token = 0;
    Dispatch::<AppStore>::new()
        .reduce_mut(|store| token = store.categories.issue_children_load());
    let api = api.clone();
    spawn_local(async move {
        let dispatch = Dispatch::<AppStore>::new();
        match api.client.fetch_sub_categories(&parent_id).await {
            Ok(children) => dispatch.reduce_mut(|store| {
                store.categories.apply_children(token, &parent_id, children);
            }),
            Err(err) => dispatch.reduce_mut(|store| {
                store.push_message(ToastKind::Error, err.message);
            }),
        }
    });
}

/// Category manager panel: the forest, deletion, and the creation wizard.
#[function_component(CategoriesPanel)]
pub fn categories_panel(props: &ApiProps) -> Html {
    let categories = use_selector(|store: &AppStore| store.categories.clone());
    let api = props.api.clone();

    {
        let api = api.clone();
        use_effect_with_deps(
            move |_| {
                load_tree(&api);
                || {}
            },
            (),
        );
    }

    let on_new = Callback::from(move |_| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.categories.open_new_category());
    });
    let on_reload = {
        let api = api.clone();
        Callback::from(move |_| load_tree(&api))
    };
    let on_request_delete = Callback::from(move |category: Category| {
        Dispatch::<AppStore>::new()
            .reduce_mut(|store| store.categories.request_delete(category));
    });

    let forest = match &categories.tree {
        FetchState::Success(forest) => html! {
            <ul class="category-forest">
                {for forest.iter().map(|node| {
                    render_node(node, &api, &categories, &on_request_delete)
                })}
            </ul>
        },
        FetchState::Failure(message) => html! {
            <MessageBox message={message.clone()} error=true />
        },
        _ => html! { <MessageBox message="Loading categories…" /> },
    };

    html! {
        <section class="panel">
            <header class="panel-header">
                <h3>{"Categories"}</h3>
                <div class="actions">
                    <button class="ghost" onclick={on_reload}>{"Reload"}</button>
                    <button
                        class="solid"
                        disabled={categories.is_new_category_disabled()}
                        onclick={on_new}
                    >
                        {"New category"}
                    </button>
                </div>
            </header>
            {forest}
            {if categories.new_category_open {
                html! { <NewCategoryDialog api={props.api.clone()} /> }
            } else {
                html! {}
            }}
            {if let Some(pending) = categories.confirm_delete.clone() {
                let body = format!(
                    "Delete \"{}\" and everything filed under it? This cannot be undone.",
                    pending.label
                );
                let api = props.api.clone();
                let on_confirm = Callback::from(move |_| confirm_delete(&api));
                let on_cancel = Callback::from(move |_| {
                    Dispatch::<AppStore>::new()
                        .reduce_mut(|store| store.categories.cancel_delete());
                });
                html! {
                    <ConfirmDialog
                        title="Delete category"
                        body={body}
                        busy={categories.deleting.is_loading()}
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

fn render_node(
    node: &Category,
    api: &ApiCtx,
    categories: &CategoriesState,
    on_request_delete: &Callback<Category>,
) -> Html {
    let on_delete = {
        let node = node.clone();
        let on_request_delete = on_request_delete.clone();
        Callback::from(move |_| on_request_delete.emit(node.clone()))
    };
    let expand = if categories.strategy == TreeLoadStrategy::LazyPerParent
        && node.sub_categories.is_empty()
    {
        let api = api.clone();
        let parent_id = node.id.clone();
        let on_expand =
            Callback::from(move |_| load_children(&api, parent_id.clone()));
        html! { <button class="ghost" onclick={on_expand}>{"Load children"}</button> }
    } else {
        html! {}
    };

    html! {
        <li class="category-node">
            <span class="chip">{node.label.clone()}</span>
            {expand}
            <button class="danger ghost" onclick={on_delete}>{"Delete"}</button>
            {if node.sub_categories.is_empty() {
                html! {}
            } else {
                html! {
                    <ul>
                        {for node.sub_categories.iter().map(|child| {
                            render_node(child, api, categories, on_request_delete)
                        })}
                    </ul>
                }
            }}
        </li>
    }
}

fn confirm_delete(api: &ApiCtx) {
    let mut pending = None;
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        pending = store.categories.take_confirmed_delete();
        if pending.is_some() {
            store.categories.deleting.begin();
        }
    });
    let Some(category) = pending else {
        return;
    };
    let api = api.clone();
    spawn_local(async move {
        let dispatch = Dispatch::<AppStore>::new();
        match api.client.delete_category_subtree(&category.id).await {
            Ok(()) => {
                dispatch.reduce_mut(|store| {
                    store.categories.deleting.succeed(());
                    store.push_message(
                        ToastKind::Success,
                        format!("Deleted \"{}\".", category.label),
                    );
                });
                load_tree(&api);
            }
            Err(err) => dispatch.reduce_mut(|store| {
                store.categories.deleting.fail(err.message.clone());
                store.push_message(ToastKind::Error, err.message);
            }),
        }
    });
}

/// Wizard dialog creating a category under a chosen parent chain.
#[function_component(NewCategoryDialog)]
pub fn new_category_dialog(props: &ApiProps) -> Html {
    let categories = use_selector(|store: &AppStore| store.categories.clone());
    let api = props.api.clone();

    let on_key = Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            Dispatch::<AppStore>::new()
                .reduce_mut(|store| store.categories.draft.key = input.value());
        }
    });
    let on_label = Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            Dispatch::<AppStore>::new()
                .reduce_mut(|store| store.categories.draft.label = input.value());
        }
    });
    let on_add_level = {
        let api = api.clone();
        let categories = categories.clone();
        Callback::from(move |_| {
            Dispatch::<AppStore>::new()
                .reduce_mut(|store| store.categories.append_path_step());
            // Lazily loaded forests may not hold the options for the new
            // dropdown yet.
            if categories.strategy == TreeLoadStrategy::LazyPerParent {
                let index = categories.draft.parent_ids.len();
                let parent = categories.dropdown_parent_id(index).to_string();
                if parent != ROOT_PARENT {
                    load_children(&api, parent);
                }
            }
        })
    };
    let on_remove_level = Callback::from(move |_| {
        Dispatch::<AppStore>::new()
            .reduce_mut(|store| store.categories.remove_last_path_step());
    });
    let on_cancel = Callback::from(move |_| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.categories.close_new_category());
    });
    let on_submit = {
        let api = api.clone();
        let categories = categories.clone();
        Callback::from(move |_| {
            let body = CreateCategoryRequest {
                parent_id: categories.resolved_parent_id().to_string(),
                key: categories.draft.key.trim().to_string(),
                label: categories.draft.label.trim().to_string(),
            };
            Dispatch::<AppStore>::new().reduce_mut(|store| store.categories.creating.begin());
            let api = api.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match api.client.create_category(&body).await {
                    Ok(created) => {
                        dispatch.reduce_mut(|store| {
                            store.categories.creating.succeed(());
                            store.categories.close_new_category();
                            store.push_message(
                                ToastKind::Success,
                                format!("Created \"{}\".", created.label),
                            );
                        });
                        load_tree(&api);
                    }
                    Err(err) => dispatch.reduce_mut(|store| {
                        store.categories.creating.fail(err.message);
                    }),
                }
            });
        })
    };

    let forest = categories.tree.data().cloned().unwrap_or_default();
    let chain = categories.draft.parent_ids.clone();

    html! {
        <div class="dialog-overlay" role="dialog" aria-modal="true">
            <div class="card">
                <header>
                    <h3>{"New category"}</h3>
                </header>
                <label class="stack">
                    <span>{"Key"}</span>
                    <input value={categories.draft.key.clone()} oninput={on_key} />
                </label>
                <label class="stack">
                    <span>{"Label"}</span>
                    <input value={categories.draft.label.clone()} oninput={on_label} />
                </label>
                <div class="parent-chain">
                    {for chain.iter().enumerate().map(|(index, selected)| {
                        render_chain_step(&forest, &categories, index, selected)
                    })}
                    <div class="actions">
                        <button
                            class="ghost"
                            disabled={categories.is_choose_parent_disabled()}
                            onclick={on_add_level}
                        >
                            {"Nest deeper"}
                        </button>
                        {if chain.is_empty() {
                            html! {}
                        } else {
                            html! {
                                <button class="ghost" onclick={on_remove_level}>
                                    {"Remove level"}
                                </button>
                            }
                        }}
                    </div>
                </div>
                {if let Some(message) = categories.creating.error() {
                    html! { <MessageBox message={message.to_string()} error=true /> }
                } else {
                    html! {}
                }}
                <div class="actions">
                    <button class="ghost" onclick={on_cancel}>{"Cancel"}</button>
                    <button
                        class="solid"
                        disabled={categories.is_submit_disabled()}
                        onclick={on_submit}
                    >
                        {"Create"}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn render_chain_step(
    forest: &[Category],
    categories: &CategoriesState,
    index: usize,
    selected: &str,
) -> Html {
    let parent = categories.dropdown_parent_id(index);
    let options: Vec<Category> = if parent == ROOT_PARENT {
        forest.to_vec()
    } else {
        children_of(forest, parent).map(<[Category]>::to_vec).unwrap_or_default()
    };
    let onchange = Callback::from(move |event: Event| {
        if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
            let id = select.value();
            Dispatch::<AppStore>::new()
                .reduce_mut(|store| store.categories.select_path_step(index, id));
        }
    });

    html! {
        <label class="stack">
            <span>{format!("Parent level {}", index + 1)}</span>
            <select value={selected.to_string()} onchange={onchange}>
                <option value="0" selected={selected == "0"}>{"Choose…"}</option>
                {for options.iter().map(|option| {
                    html! {
                        <option
                            value={option.id.clone()}
                            selected={option.id == selected}
                        >
                            {option.label.clone()}
                        </option>
                    }
                })}
            </select>
        </label>
    }
}
