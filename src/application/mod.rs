pub mod catalog_service;
pub mod order_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog_service::CatalogService;
pub use order_service::OrderService;
