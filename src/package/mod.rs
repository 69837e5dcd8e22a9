//! Package names and on-disk locations.

pub mod location;
pub mod naming;

pub use location::{discover, DiscoveredPackage, PackageLocation};
pub use naming::{is_valid_name, studly, validate_name, PackageNames};
