//! Performance benchmarks for bubble layout
//!
//! Measures wrapping plus geometry for event texts of increasing length, and
//! a full relayout of a wired item.
//! Run with: cargo bench

use std::sync::Arc;

use chat_event::adapters::mock::{InMemoryAvatars, InMemoryDirectory, RecordingChannel};
use chat_event::adapters::{PlainTextBlock, UnicodeMeasurer};
use chat_event::config::{ItemConfig, LayoutMetrics};
use chat_event::events::NotificationBus;
use chat_event::models::{ChatEventType, EventInfo, MemberLink};
use chat_event::ui::layout::{LayoutEngine, ReadHeads};
use chat_event::ui::theme::Theme;
use chat_event::{ChatEventItem, Services};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ratatui::layout::Size;

/// Generate an event text mentioning `members` people.
fn generate_event(members: usize) -> EventInfo {
    let names: Vec<String> = (0..members).map(|i| format!("Member{}", i)).collect();
    let mut info = EventInfo::new(
        ChatEventType::AddMembers,
        format!("You added {} to the group", names.join(", ")),
    );
    for name in &names {
        info = info.with_member_link(MemberLink::new(name.as_str(), format!("{}@uin", name)));
    }
    info
}

/// Benchmark wrapping and geometry without an item around it
fn bench_compute_bubble(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_bubble");
    let engine = LayoutEngine::new(&LayoutMetrics::compact());

    for members in [1, 10, 50, 200].iter() {
        let info = generate_event(*members);
        group.throughput(Throughput::Bytes(info.text.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(members), &info, |b, info| {
            let mut text = PlainTextBlock::from_event(info);
            b.iter(|| {
                black_box(engine.compute_bubble(
                    Size::new(120, 0),
                    &mut text,
                    Some(&[14, 19]),
                    ReadHeads::default(),
                ))
            });
        });
    }

    group.finish();
}

/// Benchmark a full relayout, including the panel decision
fn bench_item_relayout(c: &mut Criterion) {
    let mut group = c.benchmark_group("item_relayout");
    let directory = InMemoryDirectory::new();
    directory.set_admin("g@chat", true);
    let services = Services {
        directory: Arc::new(directory),
        avatars: Arc::new(InMemoryAvatars::new()),
        channel: Arc::new(RecordingChannel::new()),
        measurer: Arc::new(UnicodeMeasurer),
        theme: Arc::new(Theme::default()),
        bus: NotificationBus::new(),
    };
    let config = ItemConfig::default().with_metrics(LayoutMetrics::compact());

    for width in [40u16, 80, 160].iter() {
        let mut item = ChatEventItem::new(
            1,
            0,
            "g@chat",
            EventInfo::new(
                ChatEventType::GroupInvite,
                "You created the group. Add an avatar and a description.",
            ),
            services.clone(),
            config.clone(),
        );
        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, width| {
            b.iter(|| {
                item.resize(Size::new(*width, 0));
                black_box(item.height())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_bubble, bench_item_relayout);
criterion_main!(benches);
