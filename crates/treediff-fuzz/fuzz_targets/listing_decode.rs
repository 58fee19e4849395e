#![no_main]
use libfuzzer_sys::fuzz_target;
use treediff_core::http::{decode_blob, decode_listing};

fuzz_target!(|data: &[u8]| {
    if let Ok(listing) = decode_listing(data, "fuzz") {
        for entry in listing.into_entries() {
            assert_eq!(entry.sha.as_str().len(), 40);
        }
    }
    let _ = decode_blob(data, "fuzz");
});
