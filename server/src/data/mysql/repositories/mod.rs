//! MySQL repositories

pub mod product;

pub use product::{
    get_all_products, get_products_qty, get_products_with_filtration,
    get_products_with_limit_and_offset, get_single_product,
};
