//! 매처 벤치마크
//!
//! 문자열 비교와 이름 단위 판정 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use cpekit_matcher::NameMatcher;
use cpekit_naming::{EscapeCounting, Wfn};

fn bench_compare_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_strings");

    for mode in [EscapeCounting::Legacy, EscapeCounting::Exact] {
        let matcher = NameMatcher::new(mode);
        group.bench_with_input(BenchmarkId::new("trailing_star", mode), &matcher, |b, m| {
            b.iter(|| {
                m.compare_strings(
                    black_box("internet_explorer*"),
                    black_box("internet_explorer_8"),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("question_run", mode), &matcher, |b, m| {
            b.iter(|| {
                m.compare_strings(black_box("??\\.4\\.0"), black_box("7\\.4\\.0"))
            })
        });
    }

    group.finish();
}

/// 패턴 1개를 후보 이름 count개에 대조
fn bench_matches_name(c: &mut Criterion) {
    let matcher = NameMatcher::default();
    let pattern: Wfn = "cpe:2.3:a:microsoft:internet_explorer:8.*:*:*:*:*:*:*:*"
        .parse()
        .unwrap();

    let mut group = c.benchmark_group("matches_name");
    for count in [10usize, 100, 1000] {
        let candidates: Vec<Wfn> = (0..count)
            .map(|i| {
                format!("cpe:2.3:a:microsoft:internet_explorer:{}.0.{i}:*:*:*:*:*:*:*", i % 12)
                    .parse()
                    .unwrap()
            })
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &candidates, |b, names| {
            b.iter(|| {
                names
                    .iter()
                    .filter(|name| matcher.matches_name(black_box(&pattern), name))
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compare_strings, bench_matches_name);
criterion_main!(benches);
