//! Typed Rust client for the Cubacel Virtual Payment SOAP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for the SOAP wire format, and a client layer orchestrating requests. A
//! client authenticates once at construction, keeps the obtained session
//! ticket for its lifetime, and maps every action onto exactly one remote
//! operation. Provider declines are not errors: each operation returns a
//! normalized envelope whose `done` flag is only set when the provider
//! reported success *and* the operation's expected field came back.
//!
//! ```rust,no_run
//! use cubacel::{CubacelClient, ProductCode, RawPhoneNumber, Recharge, SdkConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cubacel::CubacelError> {
//!     let config = SdkConfig::load(None)?;
//!     let client = CubacelClient::connect(config).await?;
//!
//!     let phone = RawPhoneNumber::new("+5351234567")?;
//!     let request = Recharge::new(phone, 10.0, ProductCode::new(101))?;
//!     let outcome = client.recharge(request, None).await?;
//!     if outcome.done {
//!         println!("recharged, order {:?}", outcome.order_id);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{Action, CubacelClient, CubacelClientBuilder, CubacelError};
pub use config::{ConfigError, SdkConfig};
pub use domain::{
    AccountId, AckOutcome, BalanceOutcome, BatchOrder, BatchOrderOutcome, BatchStatusOutcome,
    CardSaleOutcome, CatalogItem, CatalogOutcome, DocumentType, Gender, Iccid, NationalityId,
    OfficeId, OrderId, PackageId, Password, PhoneNumber, ProductCode, ProvinceId, RawPhoneNumber,
    Recharge, RechargeOutcome, SaleLookupOutcome, SaleOutcome, Ticket, TouristSimCardSale,
    TouristSimSale, TransactionId, ValidationError,
};
pub use transport::{Fault, TransportError};
