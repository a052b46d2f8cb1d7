//! Category manager state and its pure transforms.
//!
//! # Design
//! - The tree slice is the single source of truth for the rendered forest;
//!   responses are applied through issue tokens so a slow reply can never
//!   overwrite a newer one.
//! - The creation wizard models the parent chain as a list of ids ending in a
//!   sentinel while the user is still choosing; resolution happens only at
//!   submit time.

use crate::core::fetch::FetchState;
use crate::features::categories::logic;
use vitrine_api_models::Category;

/// Placeholder id a freshly appended chain step holds until the user picks.
pub const UNSELECTED_PARENT: &str = "0";

/// Parent id naming the forest root on the wire.
pub const ROOT_PARENT: &str = "none";

/// Hard cap on rendered tree depth; deeper nodes are pruned on receipt.
pub const MAX_TREE_DEPTH: usize = 32;

/// How the manager fills in the forest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreeLoadStrategy {
    /// One request returns the whole forest.
    #[default]
    EagerFullTree,
    /// Children are fetched per expanded parent and grafted in.
    LazyPerParent,
}

/// Draft for the new-category wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    /// Parent chain, outermost first. Empty means a root category.
    pub parent_ids: Vec<String>,
    /// Machine key for the new category.
    pub key: String,
    /// Display label for the new category.
    pub label: String,
}

/// Slice of the store owned by the category manager.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoriesState {
    /// Active load strategy, fixed at boot from configuration.
    pub strategy: TreeLoadStrategy,
    /// The rendered forest.
    pub tree: FetchState<Vec<Category>>,
    /// Token of the newest issued full-tree request.
    pub issued_token: u64,
    /// Token of the newest issued per-parent children request.
    pub children_issued: u64,
    /// Wizard draft; reset when the wizard closes.
    pub draft: CategoryDraft,
    /// Whether the wizard dialog is open.
    pub new_category_open: bool,
    /// Creation request lifecycle.
    pub creating: FetchState<()>,
    /// Category pending a delete confirmation, if any.
    pub confirm_delete: Option<Category>,
    /// Deletion request lifecycle.
    pub deleting: FetchState<()>,
}

impl CategoriesState {
    /// Mark a full-tree load as in flight and return its token. Responses
    /// carrying an older token are discarded by [`apply_tree`].
    ///
    /// [`apply_tree`]: Self::apply_tree
    pub fn issue_tree_load(&mut self) -> u64 {
        self.issued_token += 1;
        self.tree.begin();
        self.issued_token
    }

    /// Apply a full-tree response. Returns `false` when the token is stale
    /// and the payload was dropped.
    pub fn apply_tree(&mut self, token: u64, result: Result<Vec<Category>, String>) -> bool {
        if token != self.issued_token {
            return false;
        }
        match result {
            Ok(forest) => self.tree.succeed(logic::sanitize_forest(forest)),
            Err(message) => self.tree.fail(message),
        }
        true
    }

    /// Mark a per-parent children load as in flight and return its token.
    pub fn issue_children_load(&mut self) -> u64 {
        self.children_issued += 1;
        self.children_issued
    }

    /// Graft a children response under `parent_id`. Returns `false` when the
    /// token is stale or the parent vanished from the forest.
    pub fn apply_children(
        &mut self,
        token: u64,
        parent_id: &str,
        children: Vec<Category>,
    ) -> bool {
        if token != self.children_issued {
            return false;
        }
        let children = logic::sanitize_forest(children);
        if parent_id == ROOT_PARENT {
            self.tree.begin();
            self.tree.succeed(children);
            return true;
        }
        match &mut self.tree {
            FetchState::Success(forest) => logic::graft_children(forest, parent_id, &children),
            _ => false,
        }
    }

    /// Open the wizard with a fresh draft.
    pub fn open_new_category(&mut self) {
        self.draft = CategoryDraft::default();
        self.creating = FetchState::Initial;
        self.new_category_open = true;
    }

    /// Close the wizard and drop the draft.
    pub fn close_new_category(&mut self) {
        self.draft = CategoryDraft::default();
        self.new_category_open = false;
    }

    /// Append an unselected step to the parent chain. A no-op while the last
    /// step is still unselected, so mashing the button cannot stack sentinels.
    pub fn append_path_step(&mut self) {
        if self
            .draft
            .parent_ids
            .last()
            .is_some_and(|id| id == UNSELECTED_PARENT)
        {
            return;
        }
        self.draft.parent_ids.push(UNSELECTED_PARENT.to_string());
    }

    /// Record the selection made in the chain step at `index`. Any deeper
    /// steps are dropped because their option lists no longer apply.
    pub fn select_path_step(&mut self, index: usize, id: String) {
        if index >= self.draft.parent_ids.len() {
            return;
        }
        self.draft.parent_ids.truncate(index + 1);
        self.draft.parent_ids[index] = id;
    }

    /// Remove the innermost chain step.
    pub fn remove_last_path_step(&mut self) {
        self.draft.parent_ids.pop();
    }

    /// Parent id whose children populate the dropdown at chain `index`:
    /// the previous chain element, or the root for the first step.
    #[must_use]
    pub fn dropdown_parent_id(&self, index: usize) -> &str {
        if index == 0 {
            return ROOT_PARENT;
        }
        self.draft
            .parent_ids
            .get(index - 1)
            .map_or(ROOT_PARENT, String::as_str)
    }

    /// Parent id the draft resolves to at submit time: the innermost selected
    /// step, or the root when the chain is empty or all-sentinel.
    #[must_use]
    pub fn resolved_parent_id(&self) -> &str {
        self.draft
            .parent_ids
            .iter()
            .rev()
            .find(|id| logic::is_valid_category_id(id))
            .map_or(ROOT_PARENT, String::as_str)
    }

    /// Whether the "add a nesting level" control is disabled: the previous
    /// step must be chosen before another can be appended.
    #[must_use]
    pub fn is_choose_parent_disabled(&self) -> bool {
        self.draft
            .parent_ids
            .last()
            .is_some_and(|id| !logic::is_valid_category_id(id))
    }

    /// Whether the wizard submit is disabled: both text fields filled, no
    /// dangling sentinel in the chain, and no create already in flight.
    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        self.draft.key.trim().is_empty()
            || self.draft.label.trim().is_empty()
            || self.is_choose_parent_disabled()
            || self.creating.is_loading()
    }

    /// Whether opening the wizard is disabled: the tree is not loaded yet or
    /// the wizard is already open.
    #[must_use]
    pub fn is_new_category_disabled(&self) -> bool {
        self.tree.data().is_none() || self.new_category_open
    }

    /// Arm the delete confirmation for `category`.
    pub fn request_delete(&mut self, category: Category) {
        self.confirm_delete = Some(category);
        self.deleting = FetchState::Initial;
    }

    /// Disarm the delete confirmation.
    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Category currently awaiting confirmation, consumed when the user
    /// confirms. `None` when nothing is armed or a delete is in flight.
    pub fn take_confirmed_delete(&mut self) -> Option<Category> {
        if self.deleting.is_loading() {
            return None;
        }
        self.confirm_delete.take()
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoriesState, ROOT_PARENT, UNSELECTED_PARENT};
    use crate::core::fetch::FetchState;
    use vitrine_api_models::Category;

    fn node(id: &str, children: Vec<Category>) -> Category {
        Category {
            id: id.to_string(),
            key: format!("key-{id}"),
            label: format!("Label {id}"),
            sub_categories: children,
        }
    }

    #[test]
    fn stale_tree_response_is_discarded() {
        let mut state = CategoriesState::default();
        let first = state.issue_tree_load();
        let second = state.issue_tree_load();

        // The older request resolves last in wall-clock order here, but it
        // must lose either way.
        assert!(!state.apply_tree(first, Ok(vec![node("old", vec![])])));
        assert!(state.tree.is_loading());
        assert!(state.apply_tree(second, Ok(vec![node("new", vec![])])));
        assert_eq!(state.tree.data().map(Vec::len), Some(1));
        assert_eq!(state.tree.data().and_then(|f| f.first()).map(|c| c.id.as_str()), Some("new"));
    }

    #[test]
    fn stale_children_response_is_discarded() {
        let mut state = CategoriesState::default();
        let token = state.issue_tree_load();
        assert!(state.apply_tree(token, Ok(vec![node("1", vec![])])));

        let old = state.issue_children_load();
        let new = state.issue_children_load();
        assert!(!state.apply_children(old, "1", vec![node("2", vec![])]));
        assert!(state.apply_children(new, "1", vec![node("3", vec![])]));
        let forest = state.tree.data().expect("forest");
        assert_eq!(forest[0].sub_categories[0].id, "3");
    }

    #[test]
    fn children_for_the_root_replace_the_forest() {
        let mut state = CategoriesState::default();
        let token = state.issue_children_load();
        assert!(state.apply_children(token, ROOT_PARENT, vec![node("1", vec![])]));
        assert_eq!(state.tree.data().map(Vec::len), Some(1));
    }

    #[test]
    fn tree_failure_carries_the_message() {
        let mut state = CategoriesState::default();
        let token = state.issue_tree_load();
        assert!(state.apply_tree(token, Err("Something went wrong. Please try again.".to_string())));
        assert!(state.tree.error().is_some());
    }

    #[test]
    fn appending_a_step_requires_the_previous_one_chosen() {
        let mut state = CategoriesState::default();
        state.open_new_category();
        state.append_path_step();
        assert_eq!(state.draft.parent_ids, vec![UNSELECTED_PARENT.to_string()]);
        assert!(state.is_choose_parent_disabled());

        // Mashing the control does not stack sentinels.
        state.append_path_step();
        assert_eq!(state.draft.parent_ids.len(), 1);

        state.select_path_step(0, "root1".to_string());
        assert!(!state.is_choose_parent_disabled());
        state.append_path_step();
        assert_eq!(state.draft.parent_ids.len(), 2);
    }

    #[test]
    fn reselecting_an_outer_step_drops_deeper_steps() {
        let mut state = CategoriesState::default();
        state.open_new_category();
        state.append_path_step();
        state.select_path_step(0, "a".to_string());
        state.append_path_step();
        state.select_path_step(1, "a-child".to_string());

        state.select_path_step(0, "b".to_string());
        assert_eq!(state.draft.parent_ids, vec!["b".to_string()]);
    }

    #[test]
    fn dropdown_parent_follows_the_previous_chain_element() {
        let mut state = CategoriesState::default();
        state.open_new_category();
        assert_eq!(state.dropdown_parent_id(0), ROOT_PARENT);

        state.append_path_step();
        state.select_path_step(0, "root1".to_string());
        state.append_path_step();
        assert_eq!(state.dropdown_parent_id(0), ROOT_PARENT);
        assert_eq!(state.dropdown_parent_id(1), "root1");
    }

    #[test]
    fn chain_resolves_to_the_innermost_selected_parent() {
        let mut state = CategoriesState::default();
        state.open_new_category();
        assert_eq!(state.resolved_parent_id(), ROOT_PARENT);

        state.append_path_step();
        assert_eq!(state.resolved_parent_id(), ROOT_PARENT);

        state.select_path_step(0, "root1".to_string());
        state.append_path_step();
        state.select_path_step(1, "leaf2".to_string());
        assert_eq!(state.resolved_parent_id(), "leaf2");

        // A trailing sentinel falls back to the last real selection.
        state.append_path_step();
        assert_eq!(state.resolved_parent_id(), "leaf2");
    }

    #[test]
    fn submit_gating_covers_fields_chain_and_inflight_create() {
        let mut state = CategoriesState::default();
        state.open_new_category();
        assert!(state.is_submit_disabled());

        state.draft.key = "boards".to_string();
        state.draft.label = "Boards".to_string();
        assert!(!state.is_submit_disabled());

        state.append_path_step();
        assert!(state.is_submit_disabled());
        state.select_path_step(0, "root1".to_string());
        assert!(!state.is_submit_disabled());

        state.creating.begin();
        assert!(state.is_submit_disabled());
    }

    #[test]
    fn wizard_close_drops_the_draft() {
        let mut state = CategoriesState::default();
        state.open_new_category();
        state.draft.key = "k".to_string();
        state.append_path_step();
        state.close_new_category();
        assert!(!state.new_category_open);
        assert!(state.draft.parent_ids.is_empty());
        assert!(state.draft.key.is_empty());
    }

    #[test]
    fn new_category_requires_a_loaded_tree_and_a_closed_wizard() {
        let mut state = CategoriesState::default();
        assert!(state.is_new_category_disabled());
        let token = state.issue_tree_load();
        assert!(state.is_new_category_disabled());
        assert!(state.apply_tree(token, Ok(vec![])));
        assert!(!state.is_new_category_disabled());

        state.open_new_category();
        assert!(state.is_new_category_disabled());
        state.close_new_category();
        assert!(!state.is_new_category_disabled());
    }

    #[test]
    fn delete_is_two_phase_and_blocked_while_in_flight() {
        let mut state = CategoriesState::default();
        assert!(state.take_confirmed_delete().is_none());

        state.request_delete(node("9", vec![]));
        state.deleting = FetchState::Loading;
        assert!(state.take_confirmed_delete().is_none());

        state.deleting = FetchState::Initial;
        let confirmed = state.take_confirmed_delete().expect("armed");
        assert_eq!(confirmed.id, "9");
        assert!(state.take_confirmed_delete().is_none());
    }

    #[test]
    fn cancel_disarms_the_delete() {
        let mut state = CategoriesState::default();
        state.request_delete(node("9", vec![]));
        state.cancel_delete();
        assert!(state.take_confirmed_delete().is_none());
    }
}
