//! Operator Lifecycle Manager resources (operators.coreos.com/v1alpha1)

pub mod catalogsource;

pub use catalogsource::{CatalogSource, CatalogSourceSpec, SourceType};

use crate::resources::Scheme;

/// API group served by OLM
pub const GROUP: &str = "operators.coreos.com";

/// API version registered here
pub const VERSION: &str = "v1alpha1";

/// Register every kind of this group/version
pub fn add_to_scheme(scheme: &mut Scheme) {
    scheme.register::<CatalogSource>();
}
