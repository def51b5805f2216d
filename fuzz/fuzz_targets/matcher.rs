#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cpekit_matcher::NameMatcher;
use cpekit_naming::{EscapeCounting, Wfn};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    exact: bool,
    source: String,
    target: String,
}

fuzz_target!(|input: FuzzInput| {
    let mode = if input.exact {
        EscapeCounting::Exact
    } else {
        EscapeCounting::Legacy
    };
    let matcher = NameMatcher::new(mode);

    // 임의 문자열 비교도 패닉 없이 끝나야 한다
    let _ = matcher.compare_strings(&input.source, &input.target);

    if let (Ok(source), Ok(target)) = (input.source.parse::<Wfn>(), input.target.parse::<Wfn>()) {
        let disjoint = matcher.is_disjoint(&source, &target);
        // 포함 관계이면 서로소일 수 없다
        assert!(!(matcher.is_subset(&source, &target) && disjoint));
        let _ = matcher.is_superset(&source, &target);
        let _ = matcher.is_equal(&source, &target);
    }
});
