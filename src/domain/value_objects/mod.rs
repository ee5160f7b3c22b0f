//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`CartId`], [`AddressId`], [`CustomerId`], [`CustomerAddressId`], [`ItemId`]
//! - [`StoreId`]: store view code scoping settings
//!
//! ## Numeric Types
//!
//! - [`Price`]: non-negative tax-inclusive amount
//! - [`Weight`], [`Quantity`]: non-negative measures with checked arithmetic
//!
//! ## Codes and Enums
//!
//! - [`CountryId`]: ISO 3166-1 alpha-2 code
//! - [`MethodCode`]: `carrier_method` shipping method key
//! - [`FreeShipping`], [`ErrorCategory`]

pub mod arithmetic;
pub mod country;
pub mod enums;
pub mod ids;
pub mod measure;
pub mod method_code;
pub mod price;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use country::CountryId;
pub use enums::{ErrorCategory, FreeShipping};
pub use ids::{AddressId, CartId, CustomerAddressId, CustomerId, ItemId, StoreId};
pub use measure::{Quantity, Weight};
pub use method_code::MethodCode;
pub use price::Price;
