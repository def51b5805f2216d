#![no_main]

use libfuzzer_sys::fuzz_target;
use cpekit_naming::{bind_to_fs, unbind_fs};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let Ok(wfn) = unbind_fs(input) else {
            return;
        };

        // 한 번 바인딩된 문자열은 다시 언바인딩/바인딩해도 같아야 한다
        let bound = bind_to_fs(&wfn);
        if let Ok(again) = unbind_fs(&bound) {
            assert_eq!(bind_to_fs(&again), bound);
        }
    }
});
