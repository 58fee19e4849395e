#![no_main]
use libfuzzer_sys::fuzz_target;
use treediff_core::patterns::IgnoreFilter;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // First line is the path, the rest are rules
        let mut lines = s.lines();
        let Some(path) = lines.next() else { return };
        let filter = IgnoreFilter::new(lines);

        let ignored = filter.is_ignored(path);
        assert_eq!(ignored, filter.matching_rule(path).is_some());
        if ignored {
            // Anything under an ignored path is ignored too
            assert!(filter.is_ignored(&format!("{}/child", path)));
        }
    }
});
