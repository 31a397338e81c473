#![no_main]

use libfuzzer_sys::fuzz_target;
use rdschema::{build_level, AssemblyImage, MetadataContext, SchemaConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(image) = AssemblyImage::read(data) else {
        return;
    };
    if let Ok(ctx) = MetadataContext::new(&image, SchemaConfig::default()) {
        let _ = build_level(&ctx);
    }
});
