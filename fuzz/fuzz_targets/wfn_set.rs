#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cpekit_naming::{Attribute, LogicalValue, Wfn, bind_to_fs, bind_to_uri};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// (속성 인덱스, 값) 대입 목록 (최대 16개로 제한)
    assignments: Vec<(u8, FuzzValue)>,
}

#[derive(Arbitrary, Debug)]
enum FuzzValue {
    Any,
    NotApplicable,
    Text(String),
    Unset,
}

fuzz_target!(|input: FuzzInput| {
    let mut wfn = Wfn::new();

    for (index, value) in input.assignments.into_iter().take(16) {
        let attribute = Attribute::ALL[usize::from(index) % Attribute::ALL.len()];
        let before = wfn.get(attribute).clone();

        let result = match value {
            FuzzValue::Any => wfn.set(attribute, LogicalValue::Any),
            FuzzValue::NotApplicable => wfn.set(attribute, LogicalValue::NotApplicable),
            FuzzValue::Text(text) => wfn.set(attribute, text),
            FuzzValue::Unset => wfn.set(attribute, None::<String>),
        };

        // 실패한 대입은 기존 값을 바꾸지 않는다
        if result.is_err() {
            assert_eq!(wfn.get(attribute), &before);
        }
    }

    let _ = bind_to_uri(&wfn);
    let _ = bind_to_fs(&wfn);
});
