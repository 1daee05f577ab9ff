//! Products, categories, barcodes and the stock ledger.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::product::{
    ArchiveReason, Barcode, InventoryTransaction, NewProduct, NewProductArchiveEntry, Product,
    ProductCategory, UpdateProduct,
};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::dto::product::{ArchiveRow, ImportReport};
use crate::forms::inventory::InventoryMovementForm;
use crate::forms::product::{
    CreateProductForm, GenerateBarcodesForm, ProductCategoryForm, RetireBarcodeForm,
    ScanBarcodeForm, StockAdjustmentForm,
};
use crate::repository::{
    InventoryTransactionQuery, ProductListQuery, ProductReader, ProductWriter, StockMovement,
};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult};

pub struct ProductListParams {
    pub franchise_id: Option<i32>,
    pub category_id: Option<i32>,
    pub search: Option<String>,
    pub include_archived: bool,
    pub page: usize,
}

pub fn list_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ProductListParams,
) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = ProductListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(category_id) = params.category_id {
        query = query.category(category_id);
    }
    if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }
    if params.include_archived {
        query = query.include_archived();
    }

    let (total, products) = repo.list_products(query)?;
    Ok(Paginated::new(total, page, DEFAULT_ITEMS_PER_PAGE, products))
}

pub fn get_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_product_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateProductForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let new_product = NewProduct::new(
        franchise_id,
        form.category_id,
        form.product_code,
        form.name,
        form.description,
        form.rental_price,
        form.sale_price,
        form.security_deposit,
        form.stock_total,
        form.low_stock_threshold,
    );
    if repo
        .get_product_by_code(&new_product.product_code, franchise_id)?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "product code {} already exists",
            new_product.product_code
        )));
    }
    Ok(repo.create_product(&new_product)?)
}

pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    updates: UpdateProduct,
    franchise_id: Option<i32>,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.update_product(id, franchise_id, &updates)?)
}

pub fn set_product_archived<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    archived: bool,
    franchise_id: Option<i32>,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.set_product_archived(id, franchise_id, archived)?)
}

pub fn list_low_stock<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_low_stock_products(franchise_id)?)
}

pub fn list_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<ProductCategory>>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_product_categories(franchise_id)?)
}

pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProductCategoryForm,
    franchise_id: Option<i32>,
) -> ServiceResult<ProductCategory>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.create_product_category(franchise_id, form.name.trim(), form.description.as_deref())?)
}

pub fn delete_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.delete_product_category(id, franchise_id)?)
}

/// Applies one reserve/release/confirm/return operation across all lines of
/// the form, atomically.
pub fn apply_inventory_operation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: InventoryMovementForm,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let movements: Vec<StockMovement> = form
        .items
        .iter()
        .map(|line| StockMovement {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();
    Ok(repo.move_stock(
        franchise_id,
        form.operation,
        &movements,
        form.booking_id,
        user.id(),
    )?)
}

pub fn adjust_stock<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: StockAdjustmentForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    form.validate()?;
    if form.quantity_delta == 0 {
        return Err(ServiceError::Validation(
            "quantity_delta must not be zero".to_string(),
        ));
    }
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.adjust_product_stock(
        form.product_id,
        franchise_id,
        form.quantity_delta,
        form.notes.as_deref(),
        user.id(),
    )?)
}

pub fn list_transactions<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
    product_id: Option<i32>,
    transaction_type: Option<String>,
) -> ServiceResult<Vec<InventoryTransaction>>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let mut query = InventoryTransactionQuery::new(franchise_id);
    if let Some(product_id) = product_id {
        query = query.product(product_id);
    }
    if let Some(transaction_type) = transaction_type.filter(|t| !t.trim().is_empty()) {
        query = query.transaction_type(transaction_type.trim());
    }
    Ok(repo.list_inventory_transactions(query)?)
}

/// CSV row used by both the stock export and the bulk import.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ProductCsvRow {
    product_code: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    rental_price: f64,
    sale_price: f64,
    #[serde(default)]
    security_deposit: f64,
    stock_total: i32,
    #[serde(default)]
    stock_available: i32,
    #[serde(default)]
    low_stock_threshold: i32,
}

/// Renders the franchise's stock levels as CSV.
pub fn export_stock_csv<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<String>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    let (_, products) = repo.list_products(ProductListQuery::new(franchise_id))?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for product in products {
        writer
            .serialize(ProductCsvRow {
                product_code: product.product_code,
                name: product.name,
                description: product.description,
                rental_price: product.rental_price,
                sale_price: product.sale_price,
                security_deposit: product.security_deposit,
                stock_total: product.stock.total,
                stock_available: product.stock.available,
                low_stock_threshold: product.low_stock_threshold,
            })
            .map_err(|e| ServiceError::Internal(format!("CSV export failed: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ServiceError::Internal(format!("CSV export failed: {e}")))
}

/// Bulk import, upserting on product code.
pub fn import_products_csv<R>(
    repo: &R,
    user: &AuthenticatedUser,
    data: &[u8],
    franchise_id: Option<i32>,
) -> ServiceResult<ImportReport>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let mut reader = csv::Reader::from_reader(data);
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: ProductCsvRow =
            record.map_err(|e| ServiceError::Validation(format!("invalid CSV row: {e}")))?;
        rows.push(NewProduct::new(
            franchise_id,
            None,
            row.product_code,
            row.name,
            row.description,
            row.rental_price,
            row.sale_price,
            row.security_deposit,
            row.stock_total,
            row.low_stock_threshold,
        ));
    }
    if rows.is_empty() {
        return Err(ServiceError::Validation("CSV contains no rows".to_string()));
    }

    let (created, updated) = repo.import_products(franchise_id, &rows)?;
    Ok(ImportReport { created, updated })
}

pub fn generate_barcodes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: GenerateBarcodesForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<Barcode>>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.generate_barcodes(form.product_id, franchise_id, form.count, user.id())?)
}

pub fn list_barcodes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<Barcode>>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.list_barcodes_for_product(product_id, franchise_id)?)
}

pub fn lookup_barcode<R>(
    repo: &R,
    user: &AuthenticatedUser,
    barcode_number: &str,
    franchise_id: Option<i32>,
) -> ServiceResult<Barcode>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_barcode_by_number(barcode_number, franchise_id)?
        .ok_or(ServiceError::NotFound)
}

/// Scan toggles the unit: available goes in-use against the booking, in-use
/// comes back available.
pub fn scan_barcode<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ScanBarcodeForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Barcode>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.scan_barcode(form.barcode_number.trim(), franchise_id, form.booking_id)?)
}

pub fn retire_barcode<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RetireBarcodeForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Barcode>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.retire_barcode(form.barcode_number.trim(), franchise_id, form.damaged)?)
}

pub fn archive_units<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    quantity: i32,
    reason: ArchiveReason,
    notes: Option<String>,
    franchise_id: Option<i32>,
) -> ServiceResult<crate::domain::product::ProductArchiveEntry>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    if quantity <= 0 {
        return Err(ServiceError::Validation(
            "quantity must be greater than zero".to_string(),
        ));
    }
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.archive_product_units(&NewProductArchiveEntry {
        franchise_id,
        product_id,
        quantity,
        reason,
        notes,
        archived_by: user.id(),
    })?)
}

pub fn restore_archived_units<R>(
    repo: &R,
    user: &AuthenticatedUser,
    entry_id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.restore_archived_units(entry_id, franchise_id, user.id())?)
}

pub fn list_archive<R>(
    repo: &R,
    user: &AuthenticatedUser,
    franchise_id: Option<i32>,
) -> ServiceResult<Vec<ArchiveRow>>
where
    R: ProductReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Inventory)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo
        .list_archive_entries(franchise_id)?
        .into_iter()
        .map(ArchiveRow::from)
        .collect())
}
