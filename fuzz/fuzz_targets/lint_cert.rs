#![no_main]

use certlint_lib::{lint_input, RunConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic, and no built-in lint may panic on any
    // certificate the parser accepts. A lint may still return Fatal itself,
    // e.g. for an RSA key it cannot decode.
    if let Ok(report) = lint_input(data, &RunConfig::default()) {
        assert!(report.panicked().is_empty(), "{:?}", report);
        assert_eq!(report.summary().total(), report.len());
        let _ = report.worst_status();
        let _ = report.to_json();
    }
});
