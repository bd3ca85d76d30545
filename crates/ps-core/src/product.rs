//! Product instance → product type mapping.
//!
//! The simulation names product instances `<product_type>_<n>`, e.g.
//! `Product_1_17` is instance 17 of type `Product_1`.

/// Strip the trailing `_<instance>` suffix from a product instance id.
///
/// Ids without an underscore are their own type.
#[inline]
pub fn product_type(product: &str) -> &str {
    product.rsplit_once('_').map_or(product, |(ty, _)| ty)
}
