//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDate;
use mockall::mock;

use crate::domain::booking::{
    Booking, BookingItem, BookingStatus, NewBooking, NewBookingItem, UpdateBooking,
};
use crate::domain::coupon::{Coupon, NewCoupon, UpdateCoupon};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::delivery::{Delivery, DeliveryStatus, NewDelivery, UpdateDelivery};
use crate::domain::expense::{Expense, ExpenseCategory, NewExpense, NewExpenseCategory};
use crate::domain::franchise::{Franchise, NewFranchise, UpdateFranchise};
use crate::domain::laundry::{
    LaundryBatch, LaundryItem, LaundryReceiptLine, NewLaundryBatch, NewLaundryItem,
};
use crate::domain::notification::{NewNotificationLog, NotificationLog};
use crate::domain::payment::{InvoiceSequence, NewPayment, Payment};
use crate::domain::payroll::{
    AttendanceRecord, NewAttendanceRecord, NewSalaryAdjustment, NewSalaryConfig, SalaryAdjustment,
    SalaryConfig,
};
use crate::domain::pricing::{
    DistanceTier, NewDistanceTier, NewPackage, NewPackageVariant, Package, PackageVariant,
};
use crate::domain::product::{
    Barcode, InventoryOperation, InventoryTransaction, NewProduct, NewProductArchiveEntry, Product,
    ProductArchiveEntry, ProductCategory, UpdateProduct,
};
use crate::domain::returns::{Return, ReturnItem, ReturnLine};
use crate::domain::sale::{DirectSale, DirectSaleItem, NewDirectSale, NewDirectSaleItem};
use crate::domain::settings::{
    BankingDetails, CompanySettings, NewBankingDetails, UpdateCompanySettings, WhatsappSettings,
    WoocommerceSettings,
};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AttendanceListQuery, BookingListQuery, BookingReader, BookingWriter, CouponReader,
    CouponWriter, CustomerListQuery, CustomerReader, CustomerWriter, DashboardStats,
    DeliveryListQuery, DeliveryReader, DeliveryWriter, ExpenseListQuery, ExpenseReader,
    ExpenseWriter, FranchiseReader, FranchiseWriter, InventoryTransactionQuery, LaundryListQuery,
    LaundryReader, LaundryWriter, NotificationListQuery, NotificationReader, NotificationWriter,
    PaymentReader, PaymentWriter, PayrollReader, PayrollWriter, PricingReader, PricingWriter,
    ProductListQuery, ProductReader, ProductWriter, ReturnListQuery, ReturnReader, ReturnWriter,
    SaleListQuery, SaleReader, SaleWriter, SettingsReader, SettingsWriter, StockMovement,
    UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl FranchiseReader for Repository {
        fn get_franchise_by_id(&self, id: i32) -> RepositoryResult<Option<Franchise>>;
        fn get_franchise_by_code(&self, code: &str) -> RepositoryResult<Option<Franchise>>;
        fn list_franchises(&self) -> RepositoryResult<Vec<Franchise>>;
    }

    impl FranchiseWriter for Repository {
        fn create_franchise(&self, new_franchise: &NewFranchise) -> RepositoryResult<Franchise>;
        fn update_franchise(&self, id: i32, updates: &UpdateFranchise) -> RepositoryResult<Franchise>;
        fn delete_franchise(&self, id: i32) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self, franchise_id: i32) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    }

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(
            &self,
            id: i32,
            franchise_id: i32,
            updates: &UpdateCustomer,
        ) -> RepositoryResult<Customer>;
        fn delete_customer(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_code(
            &self,
            code: &str,
            franchise_id: i32,
        ) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_low_stock_products(&self, franchise_id: i32) -> RepositoryResult<Vec<Product>>;
        fn list_product_categories(&self, franchise_id: i32) -> RepositoryResult<Vec<ProductCategory>>;
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

    impl ProductWriter for Repository {
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
        fn create_product_category<'a>(
            &self,
            franchise_id: i32,
            name: &str,
            description: Option<&'a str>,
        ) -> RepositoryResult<ProductCategory>;
        fn delete_product_category(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
        fn move_stock(
            &self,
            franchise_id: i32,
            operation: InventoryOperation,
            movements: &[StockMovement],
            booking_id: Option<i32>,
            acting_user: i32,
        ) -> RepositoryResult<()>;
        fn adjust_product_stock<'a>(
            &self,
            product_id: i32,
            franchise_id: i32,
            quantity_delta: i32,
            notes: Option<&'a str>,
            acting_user: i32,
        ) -> RepositoryResult<Product>;
        fn import_products(
            &self,
            franchise_id: i32,
            rows: &[NewProduct],
        ) -> RepositoryResult<(usize, usize)>;
        fn generate_barcodes(
            &self,
            product_id: i32,
            franchise_id: i32,
            count: i32,
            acting_user: i32,
        ) -> RepositoryResult<Vec<Barcode>>;
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
        fn archive_product_units(
            &self,
            entry: &NewProductArchiveEntry,
        ) -> RepositoryResult<ProductArchiveEntry>;
        fn restore_archived_units(
            &self,
            entry_id: i32,
            franchise_id: i32,
            acting_user: i32,
        ) -> RepositoryResult<()>;
    }

    impl PricingReader for Repository {
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

    impl PricingWriter for Repository {
        fn create_package(&self, new_package: &NewPackage) -> RepositoryResult<Package>;
        fn update_package<'a>(
            &self,
            id: i32,
            franchise_id: i32,
            name: &str,
            description: Option<&'a str>,
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
        fn replace_distance_tiers(
            &self,
            franchise_id: i32,
            tiers: &[NewDistanceTier],
        ) -> RepositoryResult<usize>;
    }

    impl BookingReader for Repository {
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

    impl BookingWriter for Repository {
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
        fn convert_quote(
            &self,
            quote_id: i32,
            franchise_id: i32,
            booking_number: &str,
            acting_user: i32,
        ) -> RepositoryResult<Booking>;
    }

    impl SaleReader for Repository {
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

    impl SaleWriter for Repository {
        fn create_sale(
            &self,
            new_sale: &NewDirectSale,
            items: &[NewDirectSaleItem],
        ) -> RepositoryResult<DirectSale>;
    }

    impl DeliveryReader for Repository {
        fn get_delivery_by_id(&self, id: i32, franchise_id: i32) -> RepositoryResult<Option<Delivery>>;
        fn list_deliveries(
            &self,
            query: DeliveryListQuery,
        ) -> RepositoryResult<(usize, Vec<(Delivery, Booking, Customer)>)>;
    }

    impl DeliveryWriter for Repository {
        fn create_delivery(&self, new_delivery: &NewDelivery) -> RepositoryResult<Delivery>;
        fn update_delivery(
            &self,
            id: i32,
            franchise_id: i32,
            updates: &UpdateDelivery,
        ) -> RepositoryResult<Delivery>;
        fn transition_delivery<'a>(
            &self,
            id: i32,
            franchise_id: i32,
            status: DeliveryStatus,
            notes: Option<&'a str>,
            return_number: Option<&'a str>,
            acting_user: i32,
        ) -> RepositoryResult<Delivery>;
    }

    impl ReturnReader for Repository {
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
        fn get_return_preview(
            &self,
            id: i32,
            franchise_id: i32,
        ) -> RepositoryResult<Vec<(BookingItem, Product)>>;
    }

    impl ReturnWriter for Repository {
        fn process_return<'a>(
            &self,
            id: i32,
            franchise_id: i32,
            lines: &[ReturnLine],
            send_to_laundry: bool,
            laundry_batch_number: Option<&'a str>,
            processed_by: i32,
        ) -> RepositoryResult<Return>;
        fn update_return_schedule<'a>(
            &self,
            id: i32,
            franchise_id: i32,
            scheduled_date: Option<NaiveDate>,
            notes: Option<&'a str>,
        ) -> RepositoryResult<Return>;
        fn cancel_return(&self, id: i32, franchise_id: i32) -> RepositoryResult<Return>;
    }

    impl LaundryReader for Repository {
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

    impl LaundryWriter for Repository {
        fn create_laundry_batch(
            &self,
            new_batch: &NewLaundryBatch,
            items: &[NewLaundryItem],
        ) -> RepositoryResult<LaundryBatch>;
        fn send_laundry_batch(
            &self,
            id: i32,
            franchise_id: i32,
            expected_date: Option<NaiveDate>,
        ) -> RepositoryResult<LaundryBatch>;
        fn receive_laundry_batch(
            &self,
            id: i32,
            franchise_id: i32,
            receipts: &[LaundryReceiptLine],
        ) -> RepositoryResult<LaundryBatch>;
        fn cancel_laundry_batch(&self, id: i32, franchise_id: i32) -> RepositoryResult<LaundryBatch>;
    }

    impl CouponReader for Repository {
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

    impl CouponWriter for Repository {
        fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon>;
        fn update_coupon(
            &self,
            id: i32,
            franchise_id: i32,
            updates: &UpdateCoupon,
        ) -> RepositoryResult<Coupon>;
        fn delete_coupon(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
        fn record_coupon_use(
            &self,
            coupon_id: i32,
            franchise_id: i32,
            customer_id: i32,
            booking_id: Option<i32>,
        ) -> RepositoryResult<()>;
    }

    impl PaymentReader for Repository {
        fn list_payments_for_booking(
            &self,
            booking_id: i32,
            franchise_id: i32,
        ) -> RepositoryResult<Vec<Payment>>;
        fn get_invoice_sequence(&self, franchise_id: i32) -> RepositoryResult<Option<InvoiceSequence>>;
    }

    impl PaymentWriter for Repository {
        fn record_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
        fn set_invoice_sequence(
            &self,
            franchise_id: i32,
            prefix: &str,
            last_number: i32,
        ) -> RepositoryResult<InvoiceSequence>;
        fn next_invoice_number(
            &self,
            franchise_id: i32,
            default_prefix: &str,
        ) -> RepositoryResult<String>;
    }

    impl PayrollReader for Repository {
        fn list_attendance(&self, query: AttendanceListQuery) -> RepositoryResult<Vec<AttendanceRecord>>;
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

    impl PayrollWriter for Repository {
        fn record_attendance(&self, record: &NewAttendanceRecord) -> RepositoryResult<AttendanceRecord>;
        fn save_salary_config(&self, config: &NewSalaryConfig) -> RepositoryResult<SalaryConfig>;
        fn create_salary_adjustment(
            &self,
            adjustment: &NewSalaryAdjustment,
        ) -> RepositoryResult<SalaryAdjustment>;
        fn delete_salary_adjustment(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
    }

    impl ExpenseReader for Repository {
        fn list_expenses(
            &self,
            query: ExpenseListQuery,
        ) -> RepositoryResult<(usize, Vec<(Expense, Option<ExpenseCategory>)>)>;
        fn list_expense_categories(&self, franchise_id: i32) -> RepositoryResult<Vec<ExpenseCategory>>;
        fn get_dashboard_stats(
            &self,
            franchise_id: i32,
            today: NaiveDate,
        ) -> RepositoryResult<DashboardStats>;
    }

    impl ExpenseWriter for Repository {
        fn create_expense(&self, new_expense: &NewExpense) -> RepositoryResult<Expense>;
        fn delete_expense(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
        fn create_expense_category(
            &self,
            category: &NewExpenseCategory,
        ) -> RepositoryResult<ExpenseCategory>;
        fn delete_expense_category(&self, id: i32, franchise_id: i32) -> RepositoryResult<()>;
    }

    impl SettingsReader for Repository {
        fn get_company_settings(&self, franchise_id: i32) -> RepositoryResult<Option<CompanySettings>>;
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

    impl SettingsWriter for Repository {
        fn save_company_settings(
            &self,
            franchise_id: i32,
            updates: &UpdateCompanySettings,
        ) -> RepositoryResult<CompanySettings>;
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

    impl NotificationReader for Repository {
        fn list_notifications(
            &self,
            query: NotificationListQuery,
        ) -> RepositoryResult<(usize, Vec<NotificationLog>)>;
    }

    impl NotificationWriter for Repository {
        fn log_notification(&self, entry: &NewNotificationLog) -> RepositoryResult<NotificationLog>;
    }
}
