//! WooCommerce REST client (`wc/v3`), Basic auth with the store's consumer
//! key and secret.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::settings::WoocommerceSettings;
use crate::integrations::IntegrationError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PAGE_SIZE: usize = 100;

/// The subset of a Woo product the sync reads and writes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WooProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub sku: String,
    /// Woo serializes prices as strings.
    pub regular_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub manage_stock: bool,
    #[serde(default)]
    pub stock_status: Option<String>,
}

#[derive(Serialize)]
struct StockUpdate {
    stock_quantity: i32,
    manage_stock: bool,
    stock_status: &'static str,
}

pub struct WooClient {
    http: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl WooClient {
    pub fn new(settings: &WoocommerceSettings) -> Result<Self, IntegrationError> {
        let store = settings.store_url.trim_end_matches('/');
        if store.is_empty() {
            return Err(IntegrationError::Config("store URL is required".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: format!("{store}/wp-json/wc/v3"),
            consumer_key: settings.consumer_key.clone(),
            consumer_secret: settings.consumer_secret.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, IntegrationError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Status { status, body });
        }
        Ok(response.json().await?)
    }

    /// Looks a product up by SKU. Woo returns a list; an empty list means
    /// the SKU is unknown.
    pub async fn find_by_sku(&self, sku: &str) -> Result<Option<WooProduct>, IntegrationError> {
        let response = self
            .request(reqwest::Method::GET, "/products")
            .query(&[("sku", sku)])
            .send()
            .await?;
        let mut products: Vec<WooProduct> = Self::read_json(response).await?;
        Ok(if products.is_empty() {
            None
        } else {
            Some(products.remove(0))
        })
    }

    pub async fn create_product(&self, product: &WooProduct) -> Result<WooProduct, IntegrationError> {
        let response = self
            .request(reqwest::Method::POST, "/products")
            .json(product)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        product: &WooProduct,
    ) -> Result<WooProduct, IntegrationError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/products/{id}"))
            .json(product)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn update_stock(&self, id: i64, quantity: i32) -> Result<(), IntegrationError> {
        let update = StockUpdate {
            stock_quantity: quantity,
            manage_stock: true,
            stock_status: if quantity > 0 { "instock" } else { "outofstock" },
        };
        let response = self
            .request(reqwest::Method::PUT, &format!("/products/{id}"))
            .json(&update)
            .send()
            .await?;
        Self::read_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Pages through the store's catalog.
    pub async fn list_products(&self, page: usize) -> Result<Vec<WooProduct>, IntegrationError> {
        let response = self
            .request(reqwest::Method::GET, "/products")
            .query(&[("per_page", PAGE_SIZE), ("page", page)])
            .send()
            .await?;
        Self::read_json(response).await
    }
}
