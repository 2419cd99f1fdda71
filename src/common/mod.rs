pub(crate) mod fix;
pub(crate) mod geo;
pub(crate) mod math;
#[cfg(test)]
mod tests;

pub use fix::Fix;
pub use geo::GeoPoint;
