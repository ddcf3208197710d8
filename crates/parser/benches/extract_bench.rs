//! 추출 엔진 벤치마크
//!
//! 내장 패턴 세트로 캡처된 명령 출력을 처리하는 속도를 측정합니다.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hwinfo_parser::device::fields;
use hwinfo_parser::{PatternCatalog, extract_all, extract_one, merge_by_key};

const LSPCI_NNMM: &str = include_str!("../tests/fixtures/lspci-nnm.out");
const LSPCI_VV: &str = include_str!("../tests/fixtures/lspci-vv.out");
const LSPCI_N: &str = include_str!("../tests/fixtures/lspci-n.out");
const CPUINFO: &str = include_str!("../tests/fixtures/cpuinfo");
const DMIDECODE: &str = include_str!("../tests/fixtures/dmidecode.out");

fn bench_catalog_build(c: &mut Criterion) {
    c.bench_function("catalog_builtin", |b| {
        b.iter(|| PatternCatalog::builtin().unwrap())
    });
}

fn bench_lspci(c: &mut Criterion) {
    let catalog = PatternCatalog::builtin().unwrap();

    let mut group = c.benchmark_group("lspci");

    // 한 줄에 장치 하나
    group.throughput(Throughput::Bytes(LSPCI_NNMM.len() as u64));
    group.bench_function("nnmm", |b| {
        b.iter(|| extract_all(catalog.lspci_nnmm(), black_box(LSPCI_NNMM)))
    });

    // -vv + -n 병합 경로
    group.throughput(Throughput::Bytes((LSPCI_VV.len() + LSPCI_N.len()) as u64));
    group.bench_function("vv_n_merge", |b| {
        b.iter(|| {
            let vv = extract_all(catalog.lspci_vv(), black_box(LSPCI_VV));
            let n = extract_all(catalog.lspci_n(), black_box(LSPCI_N));
            merge_by_key(vv.into_iter().chain(n), fields::BUS_ID).unwrap()
        })
    });

    group.finish();
}

fn bench_host_info(c: &mut Criterion) {
    let catalog = PatternCatalog::builtin().unwrap();

    let mut group = c.benchmark_group("host");

    group.throughput(Throughput::Bytes(CPUINFO.len() as u64));
    group.bench_function("cpuinfo", |b| {
        b.iter(|| extract_all(catalog.cpuinfo(), black_box(CPUINFO)))
    });

    group.throughput(Throughput::Bytes(DMIDECODE.len() as u64));
    group.bench_function("dmidecode", |b| {
        b.iter(|| extract_one(catalog.dmidecode(), black_box(DMIDECODE)).unwrap())
    });

    // 64 논리 프로세서 규모
    let many_cpus = CPUINFO.repeat(32);
    group.throughput(Throughput::Bytes(many_cpus.len() as u64));
    group.bench_function("cpuinfo_64_processors", |b| {
        b.iter(|| extract_all(catalog.cpuinfo(), black_box(&many_cpus)))
    });

    group.finish();
}

criterion_group!(benches, bench_catalog_build, bench_lspci, bench_host_info);
criterion_main!(benches);
