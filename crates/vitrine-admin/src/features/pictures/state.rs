//! Picture gallery state for one product at a time.

use crate::core::fetch::FetchState;
use vitrine_api_models::Picture;

/// Slice of the store owned by the picture gallery dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PicturesState {
    /// Product whose gallery is open, `None` while the dialog is closed.
    pub product_id: Option<i64>,
    /// Gallery fetch lifecycle.
    pub list: FetchState<Vec<Picture>>,
    /// Token of the newest issued gallery request.
    pub issued_token: u64,
    /// Upload request lifecycle.
    pub uploading: FetchState<()>,
    /// Picture pending a delete confirmation, if any.
    pub confirm_delete: Option<Picture>,
    /// Deletion request lifecycle.
    pub deleting: FetchState<()>,
}

impl PicturesState {
    /// Open the gallery for `product_id` with a blank slate.
    pub fn open(&mut self, product_id: i64) {
        *self = Self {
            product_id: Some(product_id),
            ..Self::default()
        };
    }

    /// Close the gallery and drop everything it held.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Mark a gallery load as in flight and return its token.
    pub fn issue_list_load(&mut self) -> u64 {
        self.issued_token += 1;
        self.list.begin();
        self.issued_token
    }

    /// Apply a gallery response for `product_id`. Returns `false` when the
    /// token is stale or the dialog moved to another product.
    pub fn apply_list(
        &mut self,
        token: u64,
        product_id: i64,
        result: Result<Vec<Picture>, String>,
    ) -> bool {
        if token != self.issued_token || self.product_id != Some(product_id) {
            return false;
        }
        match result {
            Ok(pictures) => self.list.succeed(pictures),
            Err(message) => self.list.fail(message),
        }
        true
    }

    /// Arm the delete confirmation for `picture`.
    pub fn request_delete(&mut self, picture: Picture) {
        self.confirm_delete = Some(picture);
        self.deleting = FetchState::Initial;
    }

    /// Disarm the delete confirmation.
    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Picture currently awaiting confirmation, consumed when the user
    /// confirms.
    pub fn take_confirmed_delete(&mut self) -> Option<Picture> {
        if self.deleting.is_loading() {
            return None;
        }
        self.confirm_delete.take()
    }
}

#[cfg(test)]
mod tests {
    use super::PicturesState;
    use vitrine_api_models::Picture;

    fn picture(id: i64) -> Picture {
        Picture {
            id,
            filename: format!("img-{id}.png"),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn reopening_for_another_product_resets_the_slate() {
        let mut state = PicturesState::default();
        state.open(1);
        let token = state.issue_list_load();
        assert!(state.apply_list(token, 1, Ok(vec![picture(10)])));
        state.request_delete(picture(10));

        state.open(2);
        assert_eq!(state.product_id, Some(2));
        assert!(state.list.is_initial());
        assert!(state.confirm_delete.is_none());
    }

    #[test]
    fn responses_for_a_closed_or_switched_gallery_are_dropped() {
        let mut state = PicturesState::default();
        state.open(1);
        let token = state.issue_list_load();

        // The dialog moved on before the reply landed.
        state.open(2);
        let newer = state.issue_list_load();
        assert!(!state.apply_list(token, 1, Ok(vec![picture(10)])));
        assert!(state.apply_list(newer, 2, Ok(vec![picture(20)])));
        assert_eq!(
            state.list.data().and_then(|l| l.first()).map(|p| p.id),
            Some(20)
        );
    }

    #[test]
    fn delete_confirmation_is_two_phase() {
        let mut state = PicturesState::default();
        state.open(1);
        state.request_delete(picture(10));
        state.cancel_delete();
        assert!(state.take_confirmed_delete().is_none());

        state.request_delete(picture(11));
        assert_eq!(state.take_confirmed_delete().map(|p| p.id), Some(11));
    }
}
