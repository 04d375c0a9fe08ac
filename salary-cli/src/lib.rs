//! Front-end shell for the salary template engine: form validation,
//! session state, and breakdown rendering over a registry-created
//! repository.

pub mod app;
pub mod form;
pub mod session;

pub use form::{ComponentRow, TemplateForm};
pub use session::{MessageType, Session};
