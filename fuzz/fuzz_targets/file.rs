#![no_main]

use libfuzzer_sys::fuzz_target;
use rdschema::{AssemblyImage, File};

fuzz_target!(|data: &[u8]| {
    if let Ok(file) = File::from_mem(data.to_vec()) {
        if let Ok(metadata) = file.metadata() {
            let _ = AssemblyImage::read(metadata);
        }
    }
});
