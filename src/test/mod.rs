//! Test support: a synthetic metadata writer and shortcuts for building contexts from it.

mod builder;

pub(crate) use builder::*;

use crate::{AssemblyImage, MetadataContext, SchemaConfig};

/// Load `data` and build a context with the default configuration.
pub(crate) fn load(data: &[u8]) -> AssemblyImage<'_> {
    AssemblyImage::read(data).unwrap()
}

/// Build a context over `image` with the default configuration.
pub(crate) fn context<'a>(image: &'a AssemblyImage<'a>) -> MetadataContext<'a> {
    MetadataContext::new(image, SchemaConfig::default()).unwrap()
}
