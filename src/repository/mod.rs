use chrono::NaiveDate;

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        booking::{
            Booking, BookingItem, BookingKind, BookingStatus, NewBooking, NewBookingItem,
            UpdateBooking,
        },
        coupon::{Coupon, NewCoupon, UpdateCoupon},
        customer::{Customer, CustomerStatus, NewCustomer, UpdateCustomer},
        delivery::{Delivery, DeliveryStatus, NewDelivery, UpdateDelivery},
        expense::{Expense, ExpenseCategory, NewExpense, NewExpenseCategory},
        franchise::{Franchise, NewFranchise, UpdateFranchise},
        laundry::{
            LaundryBatch, LaundryItem, LaundryReceiptLine, LaundryStatus, NewLaundryBatch,
            NewLaundryItem,
        },
        notification::{NewNotificationLog, NotificationLog, NotificationStatus},
        payment::{InvoiceSequence, NewPayment, Payment},
        payroll::{
            AttendanceRecord, NewAttendanceRecord, NewSalaryAdjustment, NewSalaryConfig,
            SalaryAdjustment, SalaryConfig,
        },
        pricing::{DistanceTier, NewDistanceTier, NewPackage, NewPackageVariant, Package,
            PackageVariant},
        product::{
            Barcode, InventoryOperation, InventoryTransaction, NewProduct,
            NewProductArchiveEntry, Product, ProductArchiveEntry, ProductCategory, UpdateProduct,
        },
        returns::{Return, ReturnItem, ReturnLine, ReturnStatus},
        sale::{DirectSale, DirectSaleItem, NewDirectSale, NewDirectSaleItem},
        settings::{
            BankingDetails, CompanySettings, NewBankingDetails, UpdateCompanySettings,
            WhatsappSettings, WoocommerceSettings,
        },
        user::{NewUser, UpdateUser, User},
    },
    repository::errors::{RepositoryError, RepositoryResult},
};

pub mod booking;
pub mod coupon;
pub mod customer;
pub mod delivery;
pub mod errors;
pub mod expense;
pub mod franchise;
pub mod laundry;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod notification;
pub mod payment;
pub mod payroll;
pub mod pricing;
pub mod product;
pub mod returns;
pub mod sale;
pub mod settings;
pub mod user;

/// Diesel/SQLite repository shared through `web::Data`.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        get_connection(&self.pool).map_err(RepositoryError::from)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// One product line of a stock movement request.
#[derive(Debug, Clone, Copy)]
pub struct StockMovement {
    pub product_id: i32,
    pub quantity: i32,
}

/// Headline numbers for the dashboard, all scoped to one franchise.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct DashboardStats {
    pub bookings_today: i64,
    pub bookings_this_month: i64,
    pub revenue_this_month: f64,
    pub pending_deliveries: i64,
    pub pending_returns: i64,
    pub low_stock_products: i64,
    pub customers: i64,
}

#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    pub franchise_id: i32,
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            search: None,
            status: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct ProductListQuery {
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub search: Option<String>,
    pub include_archived: bool,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            category_id: None,
            search: None,
            include_archived: false,
            pagination: None,
        }
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct InventoryTransactionQuery {
    pub franchise_id: i32,
    pub product_id: Option<i32>,
    pub transaction_type: Option<String>,
    /// Newest-first cap; the movement feed never pages.
    pub limit: i64,
}

impl InventoryTransactionQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            product_id: None,
            transaction_type: None,
            limit: 100,
        }
    }

    pub fn product(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone)]
pub struct BookingListQuery {
    pub franchise_id: i32,
    /// `true` lists quotes, `false` lists live bookings.
    pub quotes: bool,
    pub status: Option<BookingStatus>,
    pub kind: Option<BookingKind>,
    pub customer_id: Option<i32>,
    pub include_archived: bool,
    pub pagination: Option<Pagination>,
}

impl BookingListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            quotes: false,
            status: None,
            kind: None,
            customer_id: None,
            include_archived: false,
            pagination: None,
        }
    }

    pub fn quotes(mut self) -> Self {
        self.quotes = true;
        self
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(mut self, kind: BookingKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct SaleListQuery {
    pub franchise_id: i32,
    pub customer_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl SaleListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            customer_id: None,
            pagination: None,
        }
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryListQuery {
    pub franchise_id: i32,
    pub status: Option<DeliveryStatus>,
    pub booking_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl DeliveryListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            status: None,
            booking_id: None,
            assigned_to: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: DeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn booking(mut self, booking_id: i32) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    pub fn assigned_to(mut self, user_id: i32) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct ReturnListQuery {
    pub franchise_id: i32,
    pub status: Option<ReturnStatus>,
    pub booking_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl ReturnListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            status: None,
            booking_id: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: ReturnStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn booking(mut self, booking_id: i32) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct LaundryListQuery {
    pub franchise_id: i32,
    pub status: Option<LaundryStatus>,
    pub pagination: Option<Pagination>,
}

impl LaundryListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            status: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: LaundryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseListQuery {
    pub franchise_id: i32,
    pub category_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl ExpenseListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            category_id: None,
            from: None,
            to: None,
            pagination: None,
        }
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct AttendanceListQuery {
    pub franchise_id: i32,
    pub user_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl AttendanceListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            user_id: None,
            from: None,
            to: None,
        }
    }

    pub fn user(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

#[derive(Debug, Clone)]
pub struct NotificationListQuery {
    pub franchise_id: i32,
    pub booking_id: Option<i32>,
    pub status: Option<NotificationStatus>,
    pub pagination: Option<Pagination>,
}

impl NotificationListQuery {
    pub fn new(franchise_id: i32) -> Self {
        Self {
            franchise_id,
            booking_id: None,
            status: None,
            pagination: None,
        }
    }

    pub fn booking(mut self, booking_id: i32) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    pub fn status(mut self, status: NotificationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait FranchiseReader {
    fn get_franchise_by_id(&self, id: i32) -> RepositoryResult<Option<Franchise>>;
    fn get_franchise_by_code(&self, code: &str) -> RepositoryResult<Option<Franchise>>;
    fn list_franchises(&self) -> RepositoryResult<Vec<Franchise>>;
}

pub trait FranchiseWriter {
    fn create_franchise(&self, new_franchise: &NewFranchise) -> RepositoryResult<Franchise>;
    fn update_franchise(&self, id: i32, updates: &UpdateFranchise) -> RepositoryResult<Franchise>;
    /// Fails with a constraint violation while users or bookings reference the
    /// franchise.
    fn delete_franchise(&self, id: i32) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self, franchise_id: i32) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32, franchise_id: i32)
    -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    /// Assigns the next `CUST-NNNNN` code for the franchise.
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    /// Fails with a constraint violation while bookings reference the customer.
    fn delete_customer(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Product>>;
    fn get_product_by_code(
        &self,
        code: &str,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    fn list_low_stock_products(&self, franchise_id: i32) -> RepositoryResult<Vec<Product>>;
    fn list_product_categories(&self, franchise_id: i32)
    -> RepositoryResult<Vec<ProductCategory>>;
    fn list_inventory_transactions(
        &self,
        query: InventoryTransactionQuery,
    ) -> RepositoryResult<Vec<InventoryTransaction>>;
    fn get_barcode_by_number(
        &self,
        barcode_number: &str,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Barcode>>;
    fn list_barcodes_for_product(
        &self,
        product_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<Barcode>>;
    fn list_archive_entries(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<(ProductArchiveEntry, Product)>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn set_product_archived(
        &self,
        id: i32,
        franchise_id: i32,
        archived: bool,
    ) -> RepositoryResult<Product>;
    fn create_product_category(
        &self,
        franchise_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> RepositoryResult<ProductCategory>;
    fn delete_product_category(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
    /// Applies one stock operation across all listed products in a single
    /// transaction and records an audit row per product. An insufficient
    /// line rolls the whole batch back.
    fn move_stock(
        &self,
        franchise_id: i32,
        operation: InventoryOperation,
        movements: &[StockMovement],
        booking_id: Option<i32>,
        acting_user: i32,
    ) -> RepositoryResult<()>;
    /// Manual correction; positive deltas add units, negative write them off.
    fn adjust_product_stock(
        &self,
        product_id: i32,
        franchise_id: i32,
        quantity_delta: i32,
        notes: Option<&str>,
        acting_user: i32,
    ) -> RepositoryResult<Product>;
    /// Bulk import, upserting on product code. Returns (created, updated).
    fn import_products(
        &self,
        franchise_id: i32,
        rows: &[NewProduct],
    ) -> RepositoryResult<(usize, usize)>;
    /// Mints `count` sequential barcodes and grows the fleet by the same
    /// amount.
    fn generate_barcodes(
        &self,
        product_id: i32,
        franchise_id: i32,
        count: i32,
        acting_user: i32,
    ) -> RepositoryResult<Vec<Barcode>>;
    /// Scan toggles a unit: available units go in-use against the booking,
    /// in-use units come back available.
    fn scan_barcode(
        &self,
        barcode_number: &str,
        franchise_id: i32,
        booking_id: Option<i32>,
    ) -> RepositoryResult<Barcode>;
    fn retire_barcode(
        &self,
        barcode_number: &str,
        franchise_id: i32,
        damaged: bool,
    ) -> RepositoryResult<Barcode>;
    /// Writes units off into the archive, shrinking available and total stock
    /// in the same transaction.
    fn archive_product_units(
        &self,
        entry: &NewProductArchiveEntry,
    ) -> RepositoryResult<ProductArchiveEntry>;
    /// Deletes an archive entry and puts its units back into the fleet.
    fn restore_archived_units(
        &self,
        entry_id: i32,
        franchise_id: i32,
        acting_user: i32,
    ) -> RepositoryResult<()>;
}

pub trait PricingReader {
    fn list_packages_with_variants(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<(Package, Vec<PackageVariant>)>>;
    fn get_package_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(Package, Vec<PackageVariant>)>>;
    fn get_variant_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<PackageVariant>>;
    fn list_distance_tiers(&self, franchise_id: i32) -> RepositoryResult<Vec<DistanceTier>>;
}

pub trait PricingWriter {
    fn create_package(&self, new_package: &NewPackage) -> RepositoryResult<Package>;
    fn update_package(
        &self,
        id: i32,
        franchise_id: i32,
        name: &str,
        description: Option<&str>,
        is_active: bool,
    ) -> RepositoryResult<Package>;
    fn create_package_variant(
        &self,
        franchise_id: i32,
        variant: &NewPackageVariant,
    ) -> RepositoryResult<PackageVariant>;
    fn update_package_variant(
        &self,
        id: i32,
        franchise_id: i32,
        name: &str,
        base_price: f64,
        security_deposit: f64,
        is_active: bool,
    ) -> RepositoryResult<PackageVariant>;
    /// Replaces the franchise's whole tier table with the provided rows.
    fn replace_distance_tiers(
        &self,
        franchise_id: i32,
        tiers: &[NewDistanceTier],
    ) -> RepositoryResult<usize>;
}

pub trait BookingReader {
    fn get_booking_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Booking>>;
    fn get_booking_with_items(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(Booking, Vec<BookingItem>)>>;
    fn list_bookings(
        &self,
        query: BookingListQuery,
    ) -> RepositoryResult<(usize, Vec<(Booking, Customer)>)>;
    fn list_booking_items(&self, booking_id: i32) -> RepositoryResult<Vec<BookingItem>>;
}

pub trait BookingWriter {
    /// Inserts the booking with its items; rental product bookings reserve
    /// stock in the same transaction.
    fn create_booking(
        &self,
        new_booking: &NewBooking,
        items: &[NewBookingItem],
    ) -> RepositoryResult<Booking>;
    fn update_booking(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateBooking,
    ) -> RepositoryResult<Booking>;
    fn update_booking_status(
        &self,
        id: i32,
        franchise_id: i32,
        status: BookingStatus,
    ) -> RepositoryResult<Booking>;
    /// Cancels and, for undelivered rental product bookings, releases the
    /// reserved stock in the same transaction.
    fn cancel_booking(
        &self,
        id: i32,
        franchise_id: i32,
        acting_user: i32,
    ) -> RepositoryResult<Booking>;
    fn set_booking_archived(
        &self,
        id: i32,
        franchise_id: i32,
        archived: bool,
    ) -> RepositoryResult<Booking>;
    /// Marks the quote converted and inserts a fresh confirmed booking with
    /// duplicated items; rental product bookings reserve stock. One
    /// transaction.
    fn convert_quote(
        &self,
        quote_id: i32,
        franchise_id: i32,
        booking_number: &str,
        acting_user: i32,
    ) -> RepositoryResult<Booking>;
}

pub trait SaleReader {
    fn get_sale_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(DirectSale, Vec<DirectSaleItem>)>>;
    fn list_sales(
        &self,
        query: SaleListQuery,
    ) -> RepositoryResult<(usize, Vec<(DirectSale, Customer)>)>;
}

pub trait SaleWriter {
    /// Inserts the sale with its items and removes sold units from the fleet;
    /// records coupon usage when a coupon was applied. One transaction.
    fn create_sale(
        &self,
        new_sale: &NewDirectSale,
        items: &[NewDirectSaleItem],
    ) -> RepositoryResult<DirectSale>;
}

pub trait DeliveryReader {
    fn get_delivery_by_id(&self, id: i32, franchise_id: i32)
    -> RepositoryResult<Option<Delivery>>;
    fn list_deliveries(
        &self,
        query: DeliveryListQuery,
    ) -> RepositoryResult<(usize, Vec<(Delivery, Booking, Customer)>)>;
}

pub trait DeliveryWriter {
    fn create_delivery(&self, new_delivery: &NewDelivery) -> RepositoryResult<Delivery>;
    fn update_delivery(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateDelivery,
    ) -> RepositoryResult<Delivery>;
    /// Validated status move with the delivered side effects (booking status,
    /// stock confirmation, auto-created return) in the same transaction.
    /// `return_number` is consumed only when a rental gets delivered.
    fn transition_delivery(
        &self,
        id: i32,
        franchise_id: i32,
        status: DeliveryStatus,
        notes: Option<&str>,
        return_number: Option<&str>,
        acting_user: i32,
    ) -> RepositoryResult<Delivery>;
}

pub trait ReturnReader {
    fn get_return_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Return>>;
    fn list_returns(
        &self,
        query: ReturnListQuery,
    ) -> RepositoryResult<(usize, Vec<(Return, Booking, Customer)>)>;
    fn list_return_items(
        &self,
        return_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<ReturnItem>>;
    /// Delivered quantities per product that a processed return must account
    /// for.
    fn get_return_preview(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<(BookingItem, Product)>>;
}

pub trait ReturnWriter {
    /// Applies all line stock deltas, archives damaged/lost units, stores the
    /// items, optionally opens a laundry batch and marks the booking
    /// returned. One transaction.
    fn process_return(
        &self,
        id: i32,
        franchise_id: i32,
        lines: &[ReturnLine],
        send_to_laundry: bool,
        laundry_batch_number: Option<&str>,
        processed_by: i32,
    ) -> RepositoryResult<Return>;
    fn update_return_schedule(
        &self,
        id: i32,
        franchise_id: i32,
        scheduled_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> RepositoryResult<Return>;
    fn cancel_return(&self, id: i32, franchise_id: i32) -> RepositoryResult<Return>;
}

pub trait LaundryReader {
    fn get_laundry_batch_by_id(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<(LaundryBatch, Vec<LaundryItem>)>>;
    fn list_laundry_batches(
        &self,
        query: LaundryListQuery,
    ) -> RepositoryResult<(usize, Vec<LaundryBatch>)>;
}

pub trait LaundryWriter {
    fn create_laundry_batch(
        &self,
        new_batch: &NewLaundryBatch,
        items: &[NewLaundryItem],
    ) -> RepositoryResult<LaundryBatch>;
    /// Dispatches a pending batch. Manual batches move available stock into
    /// the laundry bucket; auto-created batches already did while their
    /// return was processed.
    fn send_laundry_batch(
        &self,
        id: i32,
        franchise_id: i32,
        expected_date: Option<NaiveDate>,
    ) -> RepositoryResult<LaundryBatch>;
    /// Books all items back into available stock, diverting units damaged in
    /// the wash to the damaged bucket. One transaction.
    fn receive_laundry_batch(
        &self,
        id: i32,
        franchise_id: i32,
        receipts: &[LaundryReceiptLine],
    ) -> RepositoryResult<LaundryBatch>;
    fn cancel_laundry_batch(&self, id: i32, franchise_id: i32) -> RepositoryResult<LaundryBatch>;
}

pub trait CouponReader {
    fn get_coupon_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Coupon>>;
    fn get_coupon_by_code(
        &self,
        code: &str,
        franchise_id: i32,
    ) -> RepositoryResult<Option<Coupon>>;
    fn list_coupons(&self, franchise_id: i32) -> RepositoryResult<Vec<Coupon>>;
    fn count_coupon_uses_by_customer(
        &self,
        coupon_id: i32,
        customer_id: i32,
    ) -> RepositoryResult<i64>;
}

pub trait CouponWriter {
    fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon>;
    fn update_coupon(
        &self,
        id: i32,
        franchise_id: i32,
        updates: &UpdateCoupon,
    ) -> RepositoryResult<Coupon>;
    fn delete_coupon(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
    /// Records a redemption and bumps the usage counter in one transaction.
    fn record_coupon_use(
        &self,
        coupon_id: i32,
        franchise_id: i32,
        customer_id: i32,
        booking_id: Option<i32>,
    ) -> RepositoryResult<()>;
}

pub trait PaymentReader {
    fn list_payments_for_booking(
        &self,
        booking_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Vec<Payment>>;
    fn get_invoice_sequence(&self, franchise_id: i32)
    -> RepositoryResult<Option<InvoiceSequence>>;
}

pub trait PaymentWriter {
    /// Inserts the payment and bumps the booking's paid amount in one
    /// transaction; paying past the booking total is a validation error.
    fn record_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
    fn set_invoice_sequence(
        &self,
        franchise_id: i32,
        prefix: &str,
        last_number: i32,
    ) -> RepositoryResult<InvoiceSequence>;
    /// Increments the counter and renders the next number, seeding the row
    /// with `default_prefix` when the franchise has none yet.
    fn next_invoice_number(
        &self,
        franchise_id: i32,
        default_prefix: &str,
    ) -> RepositoryResult<String>;
}

pub trait PayrollReader {
    fn list_attendance(
        &self,
        query: AttendanceListQuery,
    ) -> RepositoryResult<Vec<AttendanceRecord>>;
    fn list_salary_configs(&self, franchise_id: i32) -> RepositoryResult<Vec<SalaryConfig>>;
    fn get_salary_config_for_user(
        &self,
        user_id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<Option<SalaryConfig>>;
    fn list_salary_adjustments(
        &self,
        franchise_id: i32,
        month: &str,
    ) -> RepositoryResult<Vec<SalaryAdjustment>>;
}

pub trait PayrollWriter {
    /// Upserts on (user, date) so re-marking a day replaces the earlier
    /// record.
    fn record_attendance(
        &self,
        record: &NewAttendanceRecord,
    ) -> RepositoryResult<AttendanceRecord>;
    /// Deactivates the user's previous configuration and inserts the new one.
    fn save_salary_config(&self, config: &NewSalaryConfig) -> RepositoryResult<SalaryConfig>;
    fn create_salary_adjustment(
        &self,
        adjustment: &NewSalaryAdjustment,
    ) -> RepositoryResult<SalaryAdjustment>;
    fn delete_salary_adjustment(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
}

pub trait ExpenseReader {
    fn list_expenses(
        &self,
        query: ExpenseListQuery,
    ) -> RepositoryResult<(usize, Vec<(Expense, Option<ExpenseCategory>)>)>;
    fn list_expense_categories(&self, franchise_id: i32)
    -> RepositoryResult<Vec<ExpenseCategory>>;
    fn get_dashboard_stats(
        &self,
        franchise_id: i32,
        today: NaiveDate,
    ) -> RepositoryResult<DashboardStats>;
}

pub trait ExpenseWriter {
    fn create_expense(&self, new_expense: &NewExpense) -> RepositoryResult<Expense>;
    fn delete_expense(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
    fn create_expense_category(
        &self,
        category: &NewExpenseCategory,
    ) -> RepositoryResult<ExpenseCategory>;
    fn delete_expense_category(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
}

pub trait SettingsReader {
    fn get_company_settings(&self, franchise_id: i32)
    -> RepositoryResult<Option<CompanySettings>>;
    fn list_banking_details(&self, franchise_id: i32) -> RepositoryResult<Vec<BankingDetails>>;
    fn get_whatsapp_settings(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Option<WhatsappSettings>>;
    fn get_woocommerce_settings(
        &self,
        franchise_id: i32,
    ) -> RepositoryResult<Option<WoocommerceSettings>>;
}

pub trait SettingsWriter {
    fn save_company_settings(
        &self,
        franchise_id: i32,
        updates: &UpdateCompanySettings,
    ) -> RepositoryResult<CompanySettings>;
    /// Making the new row the default clears the flag on any previous default.
    fn create_banking_details(
        &self,
        franchise_id: i32,
        details: &NewBankingDetails,
    ) -> RepositoryResult<BankingDetails>;
    fn set_default_banking_details(
        &self,
        id: i32,
        franchise_id: i32,
    ) -> RepositoryResult<BankingDetails>;
    fn delete_banking_details(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
    fn save_whatsapp_settings(
        &self,
        franchise_id: i32,
        api_key: &str,
        base_url: &str,
        enabled: bool,
    ) -> RepositoryResult<WhatsappSettings>;
    fn save_woocommerce_settings(
        &self,
        franchise_id: i32,
        store_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        enabled: bool,
    ) -> RepositoryResult<WoocommerceSettings>;
    fn touch_woocommerce_sync(&self, franchise_id: i32) -> RepositoryResult<()>;
}

pub trait NotificationReader {
    fn list_notifications(
        &self,
        query: NotificationListQuery,
    ) -> RepositoryResult<(usize, Vec<NotificationLog>)>;
}

pub trait NotificationWriter {
    fn log_notification(&self, entry: &NewNotificationLog) -> RepositoryResult<NotificationLog>;
}
