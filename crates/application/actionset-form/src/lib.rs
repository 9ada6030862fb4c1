pub mod domain;
pub mod error;
pub mod form_core;
pub mod kernel;
pub mod payload;
pub mod ports;
pub mod validation;
pub mod viewmodel;

pub use domain::{
    ActionEntry, EntryId, ErrorField, ErrorMap, FieldUpdate, FilterEntry, FormFields, FormState,
};
pub use error::{FormError, ValidationError, ValidationErrorKind};
pub use form_core::*;
pub use kernel::FormKernel;
pub use ports::*;
pub use viewmodel::*;
