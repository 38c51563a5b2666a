pub mod address;
pub mod form;
pub mod transform;

pub use address::{Address, ErrorPayload, LookupPayload, RawAddress};
pub use form::{Form, FormError, FormField, LookupField, PersonField};
pub use transform::transform_address;
