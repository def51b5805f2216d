//! 이름 처리 벤치마크
//!
//! URI / Formatted String 언바인딩과 바인딩 성능을 측정합니다.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use cpekit_naming::{Wfn, bind_to_fs, bind_to_uri, unbind_fs, unbind_uri};

const FS_NAMES: [&str; 5] = [
    "cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*",
    "cpe:2.3:o:linux:linux_kernel:5.15.0:*:*:*:*:*:x64:*",
    "cpe:2.3:a:hp:insight_diagnostics:7.4.0.1570:-:*:*:online:win2003:x64:*",
    "cpe:2.3:a:at\\&t:foo\\:bar:1.0*:*:*:*:*:*:*:*",
    "cpe:2.3:a:apache:http_server:2.4.??:*:*:*:*:*:*:*",
];

const URI_NAMES: [&str; 4] = [
    "cpe:/a:microsoft:internet_explorer:8.0.6001:beta::sp2",
    "cpe:/a:hp:insight_diagnostics:7.4.0.1570::~~online~win2003~x64~",
    "cpe:/o:linux:linux_kernel:5.15",
    "cpe:/a:at%26t:foo%7ebar:1.%02",
];

fn bench_unbinding(c: &mut Criterion) {
    let mut group = c.benchmark_group("unbinding");

    group.throughput(Throughput::Elements(FS_NAMES.len() as u64));
    group.bench_function("formatted_string", |b| {
        b.iter(|| {
            for name in FS_NAMES {
                unbind_fs(black_box(name)).unwrap();
            }
        })
    });

    group.throughput(Throughput::Elements(URI_NAMES.len() as u64));
    group.bench_function("uri", |b| {
        b.iter(|| {
            for name in URI_NAMES {
                unbind_uri(black_box(name)).unwrap();
            }
        })
    });

    group.finish();
}

fn bench_binding(c: &mut Criterion) {
    let names: Vec<Wfn> = FS_NAMES.iter().map(|n| unbind_fs(n).unwrap()).collect();

    let mut group = c.benchmark_group("binding");
    group.throughput(Throughput::Elements(names.len() as u64));

    group.bench_function("to_formatted_string", |b| {
        b.iter(|| {
            for wfn in &names {
                black_box(bind_to_fs(black_box(wfn)));
            }
        })
    });

    group.bench_function("to_uri", |b| {
        b.iter(|| {
            for wfn in &names {
                black_box(bind_to_uri(black_box(wfn)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_unbinding, bench_binding);
criterion_main!(benches);
