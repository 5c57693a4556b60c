//! Filter-query builder for the item catalog
//!
//! Optional bounds and a free-text name fragment are folded into a single
//! parameterized `SELECT` over the `items` table. Predicate text is built only
//! from closed enums and positional placeholders; every user-supplied value
//! travels in `CompiledQuery::params`.

pub mod criteria;
pub mod predicate;

pub use criteria::{parse_criterion, FilterCriteria};
pub use predicate::{
    escape_like, CmpOp, Column, CompiledQuery, ItemQuery, Predicate, SqlValue, UNICODE_LOWER_FN,
};
