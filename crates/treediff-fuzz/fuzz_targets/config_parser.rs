#![no_main]
use libfuzzer_sys::fuzz_target;
use treediff_core::RepositoryDescriptor;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for parsed in [
            RepositoryDescriptor::from_json_str(s),
            RepositoryDescriptor::from_yaml_str(s),
        ] {
            if let Ok(descriptor) = parsed {
                assert!(descriptor.owner_repo().is_ok());
                assert!(descriptor.ignore.iter().all(|rule| !rule.is_empty()));
            }
        }
    }
});
