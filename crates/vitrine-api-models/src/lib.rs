#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Vitrine catalog API.
//!
//! Every endpoint answers with a success envelope carrying its payload or a
//! failure envelope carrying an opaque error code. The `into_result` helpers
//! collapse that union so callers handle a plain `Result` and map codes to
//! display text in one place.
use serde::{Deserialize, Serialize};

/// A node in the category forest. Children are ordered by creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier, unique across the forest.
    pub id: String,
    /// Short machine-friendly code.
    pub key: String,
    /// Display name.
    pub label: String,
    /// Immediate children; empty when the node is a leaf or not yet expanded.
    #[serde(default)]
    pub sub_categories: Vec<Category>,
}

/// Availability of a product in the storefront.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProductStatus {
    /// Product is visible and purchasable.
    #[serde(rename = "AVAILABLE")]
    Available,
    /// Product is hidden from the storefront.
    #[serde(rename = "NOT_AVAILABLE")]
    NotAvailable,
}

impl ProductStatus {
    /// The opposite availability, used by the status toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Available => Self::NotAvailable,
            Self::NotAvailable => Self::Available,
        }
    }

}

/// A catalog product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable numeric identifier.
    pub id: i64,
    /// Product title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Storefront availability.
    pub status: ProductStatus,
    /// Price in minor currency units (5000 represents $50.00).
    pub price: i64,
    /// Optional discount in minor currency units.
    #[serde(default)]
    pub discount: Option<i64>,
    /// Average review rating.
    #[serde(default)]
    pub rating: f32,
    /// Units currently in stock.
    pub quantity_in_stock: u32,
    /// Comma-separated tag list.
    pub tags: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
    /// Pictures attached to the product, when the endpoint includes them.
    #[serde(default)]
    pub pictures: Option<Vec<Picture>>,
    /// Category the product is filed under.
    pub category: Category,
}

/// A picture owned by exactly one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    /// Stable numeric identifier.
    pub id: i64,
    /// Stored filename, used to build the public URL.
    pub filename: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
}

/// Admin account profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Role name (admin console requires `admin`).
    pub role: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
}

/// Credentials submitted to `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Body for `POST /auth/password-recovery` when requesting a reset email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordRecoveryRequest {
    /// Email the reset link is sent to.
    pub email: String,
}

/// Body for `POST /auth/password-recovery` when consuming a reset token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPasswordResetRequest {
    /// Replacement password.
    pub new_password: String,
    /// One-shot reset token from the email link.
    pub token: String,
    /// Account the token was issued for.
    pub user_id: String,
}

/// Body for `POST /auth/change-password` (requires a bearer token).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Password currently on the account.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Body for `PATCH /users/{id}` (requires a bearer token).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Replacement given name.
    pub first_name: String,
    /// Replacement family name.
    pub last_name: String,
}

/// Body for `POST /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    /// Parent category id, or `none` for a root category.
    pub parent_id: String,
    /// Short machine-friendly code.
    pub key: String,
    /// Display name.
    pub label: String,
}

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    /// Product title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Units in stock.
    pub quantity_in_stock: u32,
    /// Comma-separated tag list.
    pub tags: String,
    /// Category the product is filed under.
    pub category_id: String,
}

/// Body for `PATCH /products/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductStatusRequest {
    /// Replacement availability.
    pub status: ProductStatus,
}

fn envelope_result<T>(
    success: bool,
    payload: Option<T>,
    error: Option<String>,
) -> Result<T, String> {
    if success && let Some(payload) = payload {
        Ok(payload)
    } else {
        Err(error.unwrap_or_default())
    }
}

fn ack_result(success: bool, error: Option<String>) -> Result<(), String> {
    if success {
        Ok(())
    } else {
        Err(error.unwrap_or_default())
    }
}

/// Common shape of every response envelope.
pub trait Envelope {
    /// Payload carried on success.
    type Payload;

    /// Collapse the envelope into its payload or the server error code.
    ///
    /// # Errors
    /// Returns the opaque error code when the server rejected the request.
    fn into_result(self) -> Result<Self::Payload, String>;
}

/// Envelope for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Whether the credentials were accepted.
    pub success: bool,
    /// Signed admin JWT on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for LoginResponse {
    type Payload = String;

    fn into_result(self) -> Result<String, String> {
        envelope_result(self.success, self.jwt, self.error)
    }
}

/// Envelope for endpoints that answer with a bare acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AckResponse {
    /// Whether the operation was applied.
    pub success: bool,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for AckResponse {
    type Payload = ();

    fn into_result(self) -> Result<(), String> {
        ack_result(self.success, self.error)
    }
}

/// Envelope for endpoints answering with the account profile
/// (`POST /auth/change-password`, `GET /users/{id}`, `PATCH /users/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    /// Whether the operation was applied.
    pub success: bool,
    /// Updated account profile on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for UserResponse {
    type Payload = User;

    fn into_result(self) -> Result<User, String> {
        envelope_result(self.success, self.user, self.error)
    }
}

/// Envelope for `GET /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoriesResponse {
    /// Whether the forest could be read.
    pub success: bool,
    /// Full category forest on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for CategoriesResponse {
    type Payload = Vec<Category>;

    fn into_result(self) -> Result<Vec<Category>, String> {
        envelope_result(self.success, self.categories, self.error)
    }
}

/// Envelope for `GET /categories/parent/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoriesResponse {
    /// Whether the children could be read.
    pub success: bool,
    /// Immediate children of the requested parent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_categories: Option<Vec<Category>>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for SubCategoriesResponse {
    type Payload = Vec<Category>;

    fn into_result(self) -> Result<Vec<Category>, String> {
        envelope_result(self.success, self.sub_categories, self.error)
    }
}

/// Envelope for `POST /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryResponse {
    /// Whether the category was created.
    pub success: bool,
    /// The created node on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for CategoryResponse {
    type Payload = Category;

    fn into_result(self) -> Result<Category, String> {
        envelope_result(self.success, self.category, self.error)
    }
}

/// Envelope for `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductsResponse {
    /// Whether the catalog could be read.
    pub success: bool,
    /// All products on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for ProductsResponse {
    type Payload = Vec<Product>;

    fn into_result(self) -> Result<Vec<Product>, String> {
        envelope_result(self.success, self.products, self.error)
    }
}

/// Envelope for single-product endpoints (create, read, update).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    /// Whether the operation was applied.
    pub success: bool,
    /// The affected product on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for ProductResponse {
    type Payload = Product;

    fn into_result(self) -> Result<Product, String> {
        envelope_result(self.success, self.product, self.error)
    }
}

/// Envelope for `GET /products/{id}/pictures` and picture uploads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PicturesResponse {
    /// Whether the pictures could be read.
    pub success: bool,
    /// Pictures attached to the product on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pictures: Option<Vec<Picture>>,
    /// Opaque error code on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for PicturesResponse {
    type Payload = Vec<Picture>;

    fn into_result(self) -> Result<Vec<Picture>, String> {
        envelope_result(self.success, self.pictures, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AckResponse, CategoriesResponse, Category, CreateCategoryRequest, Envelope as _,
        LoginRequest, ProductBody, ProductStatus, ProductsResponse, SubCategoriesResponse,
        UpdateUserRequest,
    };

    #[test]
    fn failure_envelope_yields_error_code() {
        let parsed: CategoriesResponse =
            serde_json::from_str(r#"{"success":false,"error":"CATEGORY_NOT_FOUND"}"#)
                .expect("failure envelope should parse");
        assert_eq!(parsed.into_result(), Err("CATEGORY_NOT_FOUND".to_string()));
    }

    #[test]
    fn success_envelope_yields_payload() {
        let parsed: SubCategoriesResponse = serde_json::from_str(
            r#"{"success":true,"subCategories":[{"id":"7","key":"rpg","label":"RPG"}]}"#,
        )
        .expect("success envelope should parse");
        let children = parsed.into_result().expect("payload");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "7");
        assert!(children[0].sub_categories.is_empty());
    }

    #[test]
    fn success_flag_without_payload_is_an_error() {
        let parsed: ProductsResponse =
            serde_json::from_str(r#"{"success":true}"#).expect("envelope should parse");
        assert!(parsed.into_result().is_err());
    }

    #[test]
    fn ack_envelope_discriminates_on_success() {
        let ok: AckResponse = serde_json::from_str(r#"{"success":true}"#).expect("parse");
        assert_eq!(ok.into_result(), Ok(()));
        let err: AckResponse =
            serde_json::from_str(r#"{"success":false,"error":"EXPIRED_RESET_TOKEN"}"#)
                .expect("parse");
        assert_eq!(err.into_result(), Err("EXPIRED_RESET_TOKEN".to_string()));
    }

    #[test]
    fn login_body_carries_username_and_password() {
        let body = LoginRequest {
            username: "admin@vitrine.test".to_string(),
            password: "hunter22".to_string(),
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(
            json,
            r#"{"username":"admin@vitrine.test","password":"hunter22"}"#
        );
    }

    #[test]
    fn requests_serialize_with_wire_field_names() {
        let body = CreateCategoryRequest {
            parent_id: "leaf2".to_string(),
            key: "k".to_string(),
            label: "L".to_string(),
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(json, r#"{"parentId":"leaf2","key":"k","label":"L"}"#);

        let product = ProductBody {
            title: "t".to_string(),
            description: "d".to_string(),
            price: 5000,
            quantity_in_stock: 3,
            tags: "a,b".to_string(),
            category_id: "9".to_string(),
        };
        let json = serde_json::to_string(&product).expect("serialize");
        assert!(json.contains(r#""quantityInStock":3"#));
        assert!(json.contains(r#""categoryId":"9""#));

        let update = UpdateUserRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        let json = serde_json::to_string(&update).expect("serialize");
        assert_eq!(json, r#"{"firstName":"Ada","lastName":"Lovelace"}"#);
    }

    #[test]
    fn category_children_default_when_absent() {
        let node: Category =
            serde_json::from_str(r#"{"id":"1","key":"games","label":"Games"}"#).expect("parse");
        assert!(node.sub_categories.is_empty());
    }

    #[test]
    fn product_status_round_trips_and_toggles() {
        assert_eq!(ProductStatus::Available.toggled(), ProductStatus::NotAvailable);
        assert_eq!(ProductStatus::NotAvailable.toggled(), ProductStatus::Available);
        let parsed: ProductStatus = serde_json::from_str(r#""NOT_AVAILABLE""#).expect("parse");
        assert_eq!(parsed, ProductStatus::NotAvailable);
        let json = serde_json::to_string(&parsed).expect("serialize");
        assert_eq!(json, r#""NOT_AVAILABLE""#);
    }
}
