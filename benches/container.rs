//! Container performance benchmarks: typing with tokenization and layout.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tagtext::{Attachment, Container, ContainerOptions, TagWidget, TextBuffer};

const SENTENCE: &str = "the quick brown fox jumps over the lazy dog ";

fn typing(c: &mut Criterion) {
    c.bench_function("container_type_sentence_tokenized", |b| {
        b.iter_batched(
            Container::default,
            |mut container| {
                for ch in SENTENCE.chars() {
                    container
                        .insert_text(ch.encode_utf8(&mut [0; 4]))
                        .unwrap();
                }
                black_box(container)
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("container_type_sentence_plain", |b| {
        b.iter_batched(
            || Container::new(ContainerOptions::default().with_auto_tokenize(false)),
            |mut container| {
                for ch in SENTENCE.chars() {
                    container
                        .insert_text(ch.encode_utf8(&mut [0; 4]))
                        .unwrap();
                }
                black_box(container)
            },
            BatchSize::SmallInput,
        );
    });

    let long_text = SENTENCE.repeat(50);
    c.bench_function("container_paste_450_words", |b| {
        b.iter_batched(
            Container::default,
            |mut container| {
                container.insert_text(black_box(&long_text)).unwrap();
                black_box(container)
            },
            BatchSize::SmallInput,
        );
    });
}

fn layout(c: &mut Criterion) {
    let mut container = Container::new(ContainerOptions::default().with_auto_tokenize(false));
    container.set_text(&SENTENCE.repeat(100)).unwrap();
    for _ in 0..100 {
        container
            .insert(Attachment::new(TagWidget::new("tag")))
            .unwrap();
    }

    c.bench_function("container_layout_100_tags", |b| {
        b.iter(|| {
            container.set_width(black_box(79));
            container.set_width(black_box(80));
            black_box(container.layout_if_needed().line_fragments().len())
        });
    });
}

fn buffer_edits(c: &mut Criterion) {
    let text = SENTENCE.repeat(200);
    c.bench_function("textbuffer_bracketed_edits", |b| {
        b.iter_batched(
            || TextBuffer::with_text(&text),
            |mut buffer| {
                buffer.begin_editing();
                for i in 0..100 {
                    buffer.replace(i * 10..i * 10 + 3, "xyz").unwrap();
                }
                buffer.end_editing();
                black_box(buffer.take_changes())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, typing, layout, buffer_edits);
criterion_main!(benches);
