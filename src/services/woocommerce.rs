//! WooCommerce catalog and stock synchronisation.

use crate::auth::AuthenticatedUser;
use crate::domain::product::{NewProduct, Product};
use crate::domain::user::{Module, Role};
use crate::dto::woocommerce::SyncReport;
use crate::integrations::woocommerce::{WooClient, WooProduct};
use crate::repository::{
    ProductListQuery, ProductReader, ProductWriter, SettingsReader, SettingsWriter,
};
use crate::services::{ServiceError, ServiceResult};

const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

fn client_for<R>(repo: &R, franchise_id: i32) -> ServiceResult<WooClient>
where
    R: SettingsReader + ?Sized,
{
    let settings = repo
        .get_woocommerce_settings(franchise_id)?
        .filter(|s| s.enabled)
        .ok_or_else(|| {
            ServiceError::Conflict("WooCommerce integration is not enabled".to_string())
        })?;
    Ok(WooClient::new(&settings)?)
}

fn to_woo_product(product: &Product) -> WooProduct {
    let price = if product.sale_price > 0.0 {
        product.sale_price
    } else {
        product.rental_price
    };
    WooProduct {
        id: None,
        name: product.name.clone(),
        sku: product.product_code.clone(),
        regular_price: format!("{price:.2}"),
        description: product.description.clone(),
        stock_quantity: Some(product.stock.available),
        manage_stock: true,
        stock_status: Some(if product.stock.available > 0 {
            "instock".to_string()
        } else {
            "outofstock".to_string()
        }),
    }
}

/// Pushes the franchise catalog to the store: create when the SKU is
/// unknown, update otherwise.
pub async fn sync_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<SyncReport>
where
    R: ProductReader + SettingsReader + SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let client = client_for(repo, franchise_id)?;

    let (_, products) = repo.list_products(ProductListQuery::new(franchise_id))?;
    let mut report = SyncReport::default();
    for product in &products {
        let payload = to_woo_product(product);
        let outcome = match client.find_by_sku(&product.product_code).await {
            Ok(Some(existing)) => match existing.id {
                Some(id) => client.update_product(id, &payload).await.map(|_| false),
                None => client.create_product(&payload).await.map(|_| true),
            },
            Ok(None) => client.create_product(&payload).await.map(|_| true),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(true) => report.created += 1,
            Ok(false) => report.updated += 1,
            Err(err) => {
                report.failed += 1;
                report
                    .errors
                    .push(format!("{}: {err}", product.product_code));
            }
        }
    }

    repo.touch_woocommerce_sync(franchise_id)?;
    Ok(report)
}

/// Pushes available stock quantities only.
pub async fn sync_stock<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<SyncReport>
where
    R: ProductReader + SettingsReader + SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let client = client_for(repo, franchise_id)?;

    let (_, products) = repo.list_products(ProductListQuery::new(franchise_id))?;
    let mut report = SyncReport::default();
    for product in &products {
        let outcome = match client.find_by_sku(&product.product_code).await {
            Ok(Some(WooProduct { id: Some(id), .. })) => {
                client.update_stock(id, product.stock.available).await
            }
            Ok(_) => {
                report.failed += 1;
                report
                    .errors
                    .push(format!("{}: SKU not in store", product.product_code));
                continue;
            }
            Err(err) => Err(err),
        };
        match outcome {
            Ok(()) => report.updated += 1,
            Err(err) => {
                report.failed += 1;
                report
                    .errors
                    .push(format!("{}: {err}", product.product_code));
            }
        }
    }

    repo.touch_woocommerce_sync(franchise_id)?;
    Ok(report)
}

/// Pulls the store catalog and upserts lightweight product rows by SKU.
pub async fn sync_from_store<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<SyncReport>
where
    R: ProductWriter + SettingsReader + SettingsWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let client = client_for(repo, franchise_id)?;

    let mut report = SyncReport::default();
    let mut rows = Vec::new();
    let mut page = 1;
    loop {
        let products = client.list_products(page).await?;
        if products.is_empty() {
            break;
        }
        for woo in products {
            if woo.sku.trim().is_empty() {
                report.failed += 1;
                report
                    .errors
                    .push(format!("{}: product has no SKU", woo.name));
                continue;
            }
            let sale_price = woo.regular_price.parse::<f64>().unwrap_or(0.0);
            rows.push(NewProduct::new(
                franchise_id,
                None,
                woo.sku,
                woo.name,
                woo.description,
                0.0,
                sale_price,
                0.0,
                woo.stock_quantity.unwrap_or(0),
                DEFAULT_LOW_STOCK_THRESHOLD,
            ));
        }
        page += 1;
    }

    let (created, updated) = repo.import_products(franchise_id, &rows)?;
    report.created = created;
    report.updated = updated;

    repo.touch_woocommerce_sync(franchise_id)?;
    Ok(report)
}
