//! Product catalog state and the editor draft reducer.

use crate::core::fetch::FetchState;
use crate::features::products::logic;
use vitrine_api_models::{Product, ProductBody, ProductStatus};

/// Row shape the catalog table renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRow {
    /// Product id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Display price derived from minor units.
    pub price_label: String,
    /// Items in stock.
    pub quantity_in_stock: u32,
    /// Availability.
    pub status: ProductStatus,
    /// Owning category label.
    pub category_label: String,
    /// Short creation date.
    pub created_label: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price_label: logic::price_label(product.price),
            quantity_in_stock: product.quantity_in_stock,
            status: product.status,
            category_label: product.category.label.clone(),
            created_label: logic::format_date(&product.created_at),
        }
    }
}

/// One field edit from the product form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductField {
    /// Title text.
    Title(String),
    /// Description text.
    Description(String),
    /// Raw price text as typed; parsed at submit.
    Price(String),
    /// Raw quantity text as typed; parsed at submit.
    QuantityInStock(String),
    /// Comma-separated tags.
    Tags(String),
    /// Owning category id.
    CategoryId(String),
}

/// Editor draft. Text fields stay raw until submit so partial input (an
/// empty price box, a trailing dot) never bounces back at the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product id when editing, `None` when creating.
    pub id: Option<i64>,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Raw price text.
    pub price: String,
    /// Raw quantity text.
    pub quantity_in_stock: String,
    /// Comma-separated tags.
    pub tags: String,
    /// Owning category id.
    pub category_id: String,
}

impl ProductDraft {
    /// Draft pre-filled from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            title: product.title.clone(),
            description: product.description.clone(),
            price: format!("{}.{:02}", product.price / 100, product.price % 100),
            quantity_in_stock: product.quantity_in_stock.to_string(),
            tags: product.tags.clone(),
            category_id: product.category.id.clone(),
        }
    }

    /// Apply one field edit.
    pub fn apply_field(&mut self, field: ProductField) {
        match field {
            ProductField::Title(value) => self.title = value,
            ProductField::Description(value) => self.description = value,
            ProductField::Price(value) => self.price = value,
            ProductField::QuantityInStock(value) => self.quantity_in_stock = value,
            ProductField::Tags(value) => self.tags = value,
            ProductField::CategoryId(value) => self.category_id = value,
        }
    }

    /// Validate and convert to the request body. The first problem found is
    /// returned as the display message.
    pub fn to_body(&self) -> Result<ProductBody, String> {
        if self.title.trim().is_empty() {
            return Err("Enter a title.".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Enter a description.".to_string());
        }
        if self.category_id.is_empty() || self.category_id == "0" {
            return Err("Pick a category.".to_string());
        }
        let price = logic::parse_price_minor(&self.price)?;
        let quantity_in_stock = logic::parse_quantity(&self.quantity_in_stock)?;
        Ok(ProductBody {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            quantity_in_stock,
            tags: self.tags.trim().to_string(),
            category_id: self.category_id.clone(),
        })
    }
}

/// Slice of the store owned by the product catalog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductsState {
    /// Catalog fetch lifecycle; rows are kept in table shape.
    pub list: FetchState<Vec<ProductRow>>,
    /// Token of the newest issued catalog request.
    pub issued_token: u64,
    /// Editor draft when the form is open.
    pub editor: Option<ProductDraft>,
    /// Save request lifecycle for the open editor.
    pub saving: FetchState<()>,
    /// Product row pending a delete confirmation, if any.
    pub confirm_delete: Option<ProductRow>,
    /// Deletion request lifecycle.
    pub deleting: FetchState<()>,
}

impl ProductsState {
    /// Mark a catalog load as in flight and return its token.
    pub fn issue_list_load(&mut self) -> u64 {
        self.issued_token += 1;
        self.list.begin();
        self.issued_token
    }

    /// Apply a catalog response. Returns `false` when the token is stale.
    pub fn apply_list(&mut self, token: u64, result: Result<Vec<Product>, String>) -> bool {
        if token != self.issued_token {
            return false;
        }
        match result {
            Ok(products) => self
                .list
                .succeed(products.iter().map(ProductRow::from).collect()),
            Err(message) => self.list.fail(message),
        }
        true
    }

    /// Open the editor, blank or pre-filled.
    pub fn open_editor(&mut self, draft: ProductDraft) {
        self.editor = Some(draft);
        self.saving = FetchState::Initial;
    }

    /// Close the editor and drop the draft.
    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Flip the availability of the row with `id` in place. The server is
    /// the source of truth; this mirrors its confirmed toggle.
    pub fn apply_status(&mut self, id: i64, status: ProductStatus) {
        if let FetchState::Success(rows) = &mut self.list
            && let Some(row) = rows.iter_mut().find(|row| row.id == id)
        {
            row.status = status;
        }
    }

    /// Arm the delete confirmation for `row`.
    pub fn request_delete(&mut self, row: ProductRow) {
        self.confirm_delete = Some(row);
        self.deleting = FetchState::Initial;
    }

    /// Disarm the delete confirmation.
    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Row currently awaiting confirmation, consumed when the user confirms.
    pub fn take_confirmed_delete(&mut self) -> Option<ProductRow> {
        if self.deleting.is_loading() {
            return None;
        }
        self.confirm_delete.take()
    }
}

#[cfg(test)]
mod tests {
    use super::{ProductDraft, ProductField, ProductRow, ProductsState};
    use vitrine_api_models::{Category, Product, ProductStatus};

    fn product(id: i64, price: i64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            description: "A fine product".to_string(),
            status: ProductStatus::Available,
            price,
            discount: None,
            rating: 0.0,
            quantity_in_stock: 3,
            tags: "games".to_string(),
            created_at: "2026-08-01T00:00:00Z".to_string(),
            updated_at: "2026-08-01T00:00:00Z".to_string(),
            pictures: None,
            category: Category {
                id: "7".to_string(),
                key: "boards".to_string(),
                label: "Boards".to_string(),
                sub_categories: vec![],
            },
        }
    }

    #[test]
    fn rows_carry_display_ready_fields() {
        let row = ProductRow::from(&product(1, 5_000));
        assert_eq!(row.price_label, "$50.00");
        assert_eq!(row.category_label, "Boards");
        assert_eq!(row.created_label, "2026-08-01");
    }

    #[test]
    fn stale_list_response_is_discarded() {
        let mut state = ProductsState::default();
        let old = state.issue_list_load();
        let new = state.issue_list_load();
        assert!(!state.apply_list(old, Ok(vec![product(1, 100)])));
        assert!(state.apply_list(new, Ok(vec![product(2, 100)])));
        assert_eq!(
            state.list.data().and_then(|rows| rows.first()).map(|r| r.id),
            Some(2)
        );
    }

    #[test]
    fn field_edits_land_on_the_right_draft_slot() {
        let mut draft = ProductDraft::default();
        draft.apply_field(ProductField::Title("Catan".to_string()));
        draft.apply_field(ProductField::Price("50.00".to_string()));
        draft.apply_field(ProductField::QuantityInStock("4".to_string()));
        draft.apply_field(ProductField::CategoryId("7".to_string()));
        assert_eq!(draft.title, "Catan");
        assert_eq!(draft.price, "50.00");
        assert_eq!(draft.quantity_in_stock, "4");
        assert_eq!(draft.category_id, "7");
    }

    #[test]
    fn draft_round_trips_an_existing_product() {
        let draft = ProductDraft::from_product(&product(5, 5_050));
        assert_eq!(draft.id, Some(5));
        assert_eq!(draft.price, "50.50");
        let body = draft.to_body().expect("valid draft");
        assert_eq!(body.price, 5_050);
        assert_eq!(body.quantity_in_stock, 3);
        assert_eq!(body.category_id, "7");
    }

    #[test]
    fn draft_validation_reports_the_first_problem() {
        let mut draft = ProductDraft::default();
        assert_eq!(draft.to_body().unwrap_err(), "Enter a title.");
        draft.apply_field(ProductField::Title("Catan".to_string()));
        assert_eq!(draft.to_body().unwrap_err(), "Enter a description.");
        draft.apply_field(ProductField::Description("Trade and build.".to_string()));
        assert_eq!(draft.to_body().unwrap_err(), "Pick a category.");
        // The sentinel is not a real category either.
        draft.apply_field(ProductField::CategoryId("0".to_string()));
        assert_eq!(draft.to_body().unwrap_err(), "Pick a category.");
        draft.apply_field(ProductField::CategoryId("7".to_string()));
        assert!(draft.to_body().unwrap_err().contains("price"));
        draft.apply_field(ProductField::Price("50".to_string()));
        draft.apply_field(ProductField::QuantityInStock("2".to_string()));
        assert!(draft.to_body().is_ok());
    }

    #[test]
    fn status_toggle_mirrors_the_server_confirmation() {
        let mut state = ProductsState::default();
        let token = state.issue_list_load();
        assert!(state.apply_list(token, Ok(vec![product(1, 100)])));
        state.apply_status(1, ProductStatus::NotAvailable);
        assert_eq!(
            state.list.data().and_then(|rows| rows.first()).map(|r| r.status),
            Some(ProductStatus::NotAvailable)
        );
        // Unknown ids are ignored.
        state.apply_status(99, ProductStatus::Available);
    }

    #[test]
    fn delete_confirmation_is_two_phase() {
        let mut state = ProductsState::default();
        state.request_delete(ProductRow::from(&product(1, 100)));
        let row = state.take_confirmed_delete().expect("armed");
        assert_eq!(row.id, 1);
        assert!(state.take_confirmed_delete().is_none());
    }
}
