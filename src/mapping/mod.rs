// Type mapping and identifier normalization
pub mod host_type;
pub mod naming;
pub mod sql_type;


pub use host_type::*;
pub use naming::*;
pub use sql_type::SqlType;
