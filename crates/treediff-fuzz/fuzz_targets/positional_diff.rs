#![no_main]
use libfuzzer_sys::fuzz_target;
use treediff_core::diff::{count_changes, normalized_lines, AlignedDiff, DiffStrategy, PositionalDiff};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    // Split at the first NUL; no NUL diffs against empty text
    let (local, remote) = s.split_once('\0').unwrap_or((s, ""));

    let bound = normalized_lines(local).len() + normalized_lines(remote).len();
    for strategy in [&PositionalDiff as &dyn DiffStrategy, &AlignedDiff] {
        let records = strategy.diff(local, remote);
        assert!(count_changes(&records) <= bound);
        assert!(strategy.diff(local, local).is_empty());
    }
});
