//! HTTP client for the storefront API.
//!
//! Every call resolves to a display-ready `Result`: envelope error codes are
//! mapped through the message table here so callers never see raw codes.

use crate::core::errors::{GENERIC_ERROR_MESSAGE, display_message};
use gloo_net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use vitrine_api_models::{
    AckResponse, CategoriesResponse, Category, CategoryResponse, ChangePasswordRequest,
    CreateCategoryRequest, Envelope, LoginRequest, LoginResponse, PasswordRecoveryRequest, Picture,
    PicturesResponse, Product, ProductBody, ProductResponse, ProductStatus, ProductStatusRequest,
    ProductsResponse, SubCategoriesResponse, TokenPasswordResetRequest, UpdateUserRequest, User,
    UserResponse,
};
use web_sys::FormData;

/// A failed API call, carrying display-ready copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status, `0` for transport failures.
    pub status: u16,
    /// Message safe to surface to the user.
    pub message: String,
}

impl ApiError {
    fn transport() -> Self {
        Self {
            status: 0,
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    fn from_code(status: u16, code: &str) -> Self {
        Self {
            status,
            message: display_message(code).to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Client bound to one API origin, holding the current bearer token.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    token: RefCell<Option<String>>,
}

impl ApiClient {
    /// Client for the given origin, e.g. `"/api"` or an absolute URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RefCell::new(None),
        }
    }

    /// Install or drop the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: Request) -> Request {
        match self.token.borrow().as_deref() {
            Some(token) => request.header("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    async fn read<E>(response: gloo_net::http::Response) -> Result<E::Payload, ApiError>
    where
        E: DeserializeOwned + Envelope,
    {
        let status = response.status();
        let envelope: E = response.json().await.map_err(|_| ApiError::transport())?;
        envelope
            .into_result()
            .map_err(|code| ApiError::from_code(status, &code))
    }

    async fn get<E>(&self, path: &str) -> Result<E::Payload, ApiError>
    where
        E: DeserializeOwned + Envelope,
    {
        let response = self
            .authorize(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|_| ApiError::transport())?;
        Self::read::<E>(response).await
    }

    async fn send<B, E>(
        &self,
        request: Request,
        body: &B,
    ) -> Result<E::Payload, ApiError>
    where
        B: Serialize,
        E: DeserializeOwned + Envelope,
    {
        let response = self
            .authorize(request)
            .json(body)
            .map_err(|_| ApiError::transport())?
            .send()
            .await
            .map_err(|_| ApiError::transport())?;
        Self::read::<E>(response).await
    }

    /// Sign in; resolves to the session JWT.
    pub async fn login(&self, body: &LoginRequest) -> Result<String, ApiError> {
        self.send::<_, LoginResponse>(Request::post(&self.url("/auth/login")), body)
            .await
    }

    /// Request a password-recovery email.
    pub async fn request_password_recovery(
        &self,
        body: &PasswordRecoveryRequest,
    ) -> Result<(), ApiError> {
        self.send::<_, AckResponse>(Request::post(&self.url("/auth/password-recovery")), body)
            .await
    }

    /// Validate an emailed reset token before showing the form.
    pub async fn check_password_token(&self, token: &str, user_id: &str) -> Result<(), ApiError> {
        self.get::<AckResponse>(&format!("/auth/check-password-token/{token}/{user_id}"))
            .await
    }

    /// Set a new password from an emailed reset token.
    pub async fn reset_password_with_token(
        &self,
        body: &TokenPasswordResetRequest,
    ) -> Result<(), ApiError> {
        self.send::<_, AckResponse>(Request::post(&self.url("/auth/password-recovery")), body)
            .await
    }

    /// Change the password of the signed-in account; resolves to the
    /// refreshed profile.
    pub async fn change_password(&self, body: &ChangePasswordRequest) -> Result<User, ApiError> {
        self.send::<_, UserResponse>(Request::post(&self.url("/auth/change-password")), body)
            .await
    }

    /// Fetch the profile of one account.
    pub async fn fetch_user(&self, id: &str) -> Result<User, ApiError> {
        self.get::<UserResponse>(&format!("/users/{id}")).await
    }

    /// Update the personal information of one account; resolves to the
    /// refreshed profile.
    pub async fn update_user(&self, id: &str, body: &UpdateUserRequest) -> Result<User, ApiError> {
        self.send::<_, UserResponse>(Request::patch(&self.url(&format!("/users/{id}"))), body)
            .await
    }

    /// Fetch the full category forest.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get::<CategoriesResponse>("/categories")
            .await
    }

    /// Fetch the immediate children of one parent (`"none"` for roots).
    pub async fn fetch_sub_categories(&self, parent_id: &str) -> Result<Vec<Category>, ApiError> {
        self.get::<SubCategoriesResponse>(&format!("/categories/parent/{parent_id}"))
            .await
    }

    /// Create a category under the given parent.
    pub async fn create_category(&self, body: &CreateCategoryRequest) -> Result<Category, ApiError> {
        self.send::<_, CategoryResponse>(Request::post(&self.url("/categories")), body)
            .await
    }

    /// Delete a category and its whole subtree.
    pub async fn delete_category_subtree(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .authorize(Request::delete(
                &self.url(&format!("/categories/sub-categories/{id}")),
            ))
            .send()
            .await
            .map_err(|_| ApiError::transport())?;
        Self::read::<AckResponse>(response).await
    }

    /// Fetch the product catalog.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get::<ProductsResponse>("/products").await
    }

    /// Create a product.
    pub async fn create_product(&self, body: &ProductBody) -> Result<Product, ApiError> {
        self.send::<_, ProductResponse>(Request::post(&self.url("/products")), body)
            .await
    }

    /// Update a product.
    pub async fn update_product(&self, id: i64, body: &ProductBody) -> Result<Product, ApiError> {
        self.send::<_, ProductResponse>(
            Request::put(&self.url(&format!("/products/{id}"))),
            body,
        )
        .await
    }

    /// Set a product's availability.
    pub async fn set_product_status(
        &self,
        id: i64,
        status: ProductStatus,
    ) -> Result<(), ApiError> {
        self.send::<_, AckResponse>(
            Request::patch(&self.url(&format!("/products/{id}/status"))),
            &ProductStatusRequest { status },
        )
        .await
    }

    /// Delete a product.
    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .authorize(Request::delete(&self.url(&format!("/products/{id}"))))
            .send()
            .await
            .map_err(|_| ApiError::transport())?;
        Self::read::<AckResponse>(response).await
    }

    /// Fetch the pictures of one product.
    pub async fn fetch_pictures(&self, product_id: i64) -> Result<Vec<Picture>, ApiError> {
        self.get::<PicturesResponse>(&format!("/products/{product_id}/pictures"))
            .await
    }

    /// Upload pictures for one product as multipart form data.
    pub async fn upload_pictures(
        &self,
        product_id: i64,
        form: FormData,
    ) -> Result<Vec<Picture>, ApiError> {
        let response = self
            .authorize(Request::post(
                &self.url(&format!("/products/{product_id}/pictures")),
            ))
            .body(form)
            .send()
            .await
            .map_err(|_| ApiError::transport())?;
        Self::read::<PicturesResponse>(response).await
    }

    /// Delete one picture.
    pub async fn delete_picture(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .authorize(Request::delete(&self.url(&format!("/pictures/{id}"))))
            .send()
            .await
            .map_err(|_| ApiError::transport())?;
        Self::read::<AckResponse>(response).await
    }
}

/// Context wrapper handing the shared client to views.
#[derive(Clone, Debug)]
pub struct ApiCtx {
    /// The shared client.
    pub client: Rc<ApiClient>,
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
