#![no_main]

use libfuzzer_sys::fuzz_target;
use cpekit_naming::{bind_to_fs, bind_to_uri, unbind_uri};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(wfn) = unbind_uri(input) {
            // 검증된 WFN의 바인딩은 패닉 없이 끝나야 한다
            let _ = bind_to_uri(&wfn);
            let _ = bind_to_fs(&wfn);
        }
    }
});
