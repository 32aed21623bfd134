pub mod form;
pub mod product;
pub mod site;

pub use form::*;
pub use product::*;
pub use site::*;
