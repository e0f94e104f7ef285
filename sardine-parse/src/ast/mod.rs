pub mod expr;
pub mod func;
pub mod import_export;
pub mod node;
pub mod pat;
pub mod stmt;
pub mod stx;
pub mod type_expr;
