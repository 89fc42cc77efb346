//! Typed field values.
//!
//! Each type rejects malformed raw input at construction; a value that
//! exists is well-formed. Reference checks (does this postcode exist?) are
//! a store concern and live in the server crate.

pub mod cvr;
pub mod email;
pub mod id;
pub mod phone;
pub mod postcode;
pub mod price;
pub mod status;

pub use cvr::{Cvr, CvrError};
pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, ShopId};
pub use phone::{Phone, PhoneError};
pub use postcode::{Postcode, PostcodeError};
pub use price::{Price, PriceError};
pub use status::{OrderStatus, OrderStatusError};
