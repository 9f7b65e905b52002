// Criterion benchmarks for lexitrie-traverse.
//
// Builds a synthetic two-level trie in memory (no dictionary file needed)
// and measures a full postorder walk over it.
//
// Run:
//   cargo bench -p lexitrie-traverse

use criterion::{Criterion, criterion_group, criterion_main};
use lexitrie_format::{DynamicTrieReader, ExtendableBuffer};
use lexitrie_traverse::{ReadingHelper, TrieStats};

const FLAGS_INNER: u8 = 0xC0;
const FLAGS_LEAF: u8 = 0xD0;

fn push_s24(buf: &mut Vec<u8>, value: i32) {
    let magnitude = value.unsigned_abs();
    let mut bytes = [(magnitude >> 16) as u8, (magnitude >> 8) as u8, magnitude as u8];
    if value < 0 {
        bytes[0] |= 0x80;
    }
    buf.extend_from_slice(&bytes);
}

fn push_array_size(buf: &mut Vec<u8>, count: usize) {
    if count < 0x80 {
        buf.push(count as u8);
    } else {
        buf.push(0x80 | (count >> 8) as u8);
        buf.push(count as u8);
    }
}

/// Root array of `width` inner nodes, each with `fanout` leaves.
fn build_wide_trie(width: usize, fanout: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    push_array_size(&mut buf, width);
    let mut fields = Vec::with_capacity(width);
    for i in 0..width {
        let head = buf.len() as i32;
        buf.push(FLAGS_INNER);
        push_s24(&mut buf, 0);
        buf.push(b'a' + (i % 26) as u8);
        fields.push((head, buf.len()));
        push_s24(&mut buf, 0);
    }
    push_s24(&mut buf, 0);

    for (parent, field) in fields {
        let child_head = buf.len();
        let offset = (child_head - field) as i32;
        buf[field..field + 3].copy_from_slice(&offset.to_be_bytes()[1..]);

        push_array_size(&mut buf, fanout);
        for j in 0..fanout {
            let head = buf.len() as i32;
            buf.push(FLAGS_LEAF);
            push_s24(&mut buf, parent - head);
            buf.push(b'a' + (j % 26) as u8);
            buf.push(128);
            push_s24(&mut buf, 0);
        }
        push_s24(&mut buf, 0);
    }
    buf
}

fn bench_postorder(c: &mut Criterion) {
    let data = build_wide_trie(200, 100);
    let buffer = ExtendableBuffer::new(&data);

    c.bench_function("postorder_walk_20k_nodes", |b| {
        b.iter(|| {
            let mut helper = ReadingHelper::new(DynamicTrieReader::new(&buffer));
            helper.init_with_node_array_pos(0);
            let mut stats = TrieStats::default();
            let completed = helper.traverse_all_nodes_in_postorder_depth_first(&mut stats);
            assert!(completed);
            std::hint::black_box(stats.node_count)
        })
    });
}

criterion_group!(benches, bench_postorder);
criterion_main!(benches);
