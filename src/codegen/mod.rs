// Text artifacts: model classes and CREATE TABLE DDL
pub mod ddl;
pub mod inspect;
pub mod model;
pub mod template;


pub use ddl::*;
pub use inspect::{inspect_create_table, InspectedColumn, InspectedTable};
pub use model::*;
pub use template::StatementTemplate;
