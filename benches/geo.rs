use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use pcapng_gps::data::*;
use pcapng_gps::{OptionCode, PacketIterator};

fn gps_record() -> Vec<u8> {
    let mut v = Vec::with_capacity(KISMET_GPS_V1_LEN);
    v.extend_from_slice(&KISMET_PEN.to_le_bytes());
    v.push(KISMET_GPS_MAGIC);
    v.push(KISMET_GPS_VERSION);
    v.extend_from_slice(&16u16.to_le_bytes());
    v.extend_from_slice(&0x0eu32.to_le_bytes());
    for fixed in &[
        float_to_fixed3_7(-122.4194).unwrap(),
        float_to_fixed3_7(37.7749).unwrap(),
        float_to_fixed6_4(15.0).unwrap(),
    ] {
        v.extend_from_slice(&fixed.to_le_bytes());
    }
    v
}

fn push_block(buf: &mut Vec<u8>, block_type: u32, body: &[u8]) {
    let len = (body.len() as u32 + 12).to_le_bytes();
    buf.extend_from_slice(&block_type.to_le_bytes());
    buf.extend_from_slice(&len);
    buf.extend_from_slice(body);
    buf.extend_from_slice(&len);
}

/// SHB, IDB, and `count` packets each carrying a Kismet GPS option
fn gps_capture(count: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut shb = Vec::new();
    shb.extend_from_slice(&0x1a2b_3c4du32.to_le_bytes());
    shb.extend_from_slice(&[1, 0, 0, 0]);
    shb.extend_from_slice(&[0xff; 8]);
    push_block(&mut buf, 0x0a0d_0d0a, &shb);
    push_block(&mut buf, 1, &[127, 0, 0, 0, 0xff, 0xff, 0, 0]);
    let gps = gps_record();
    let mut epb = Vec::new();
    epb.extend_from_slice(&[0; 12]);
    epb.extend_from_slice(&64u32.to_le_bytes());
    epb.extend_from_slice(&64u32.to_le_bytes());
    epb.extend_from_slice(&[0x55; 64]);
    epb.extend_from_slice(&2989u16.to_le_bytes());
    epb.extend_from_slice(&(gps.len() as u16).to_le_bytes());
    epb.extend_from_slice(&gps);
    epb.extend_from_slice(&[0; 4]);
    for _ in 0..count {
        push_block(&mut buf, 6, &epb);
    }
    buf
}

fn bench_fixed_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point");
    group.bench_function("float_to_fixed3_7", |b| {
        b.iter(|| float_to_fixed3_7(criterion::black_box(-122.4194)))
    });
    group.bench_function("fixed3_7_to_float", |b| {
        b.iter(|| fixed3_7_to_float(criterion::black_box(575_806_000)))
    });
    group.bench_function("float_to_fixed6_4", |b| {
        b.iter(|| float_to_fixed6_4(criterion::black_box(15.0)))
    });
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let record = gps_record();
    c.bench_function("kismet_gps extract", |b| {
        b.iter(|| KismetGpsV1::extract(OptionCode::Custom2989, 24, &record, false))
    });
}

fn bench_packet_iterator(c: &mut Criterion) {
    let bytes = gps_capture(1000);
    let mut group = c.benchmark_group("packet_iterator");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("gps 1000 packets", |b| {
        b.iter(|| {
            let packets = PacketIterator::from_slice(&bytes).expect("pcap-ng capture");
            let n = packets
                .filter_map(Result::ok)
                .filter(|p| p.header.iter_kismet_gps().any(|r| r.is_ok()))
                .count();
            assert_eq!(n, 1000);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_fixed_point, bench_extract, bench_packet_iterator);
criterion_main!(benches);
