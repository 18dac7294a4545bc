// Criterion benchmarks for Kyun Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kyun_match::core::{classify_swipe, Deck, DeckController, SwipeGesture};
use kyun_match::models::{Profile, SwipeDirection};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn create_profile(id: usize) -> Profile {
    Profile {
        id: id.to_string(),
        name: format!("User {}", id),
        age: 20 + (id % 10) as u8,
        bio: String::new(),
        video_url: "/videos/sample.mp4".to_string(),
        location: String::new(),
        tags: vec![],
    }
}

fn bench_classify_swipe(c: &mut Criterion) {
    c.bench_function("classify_swipe", |b| {
        b.iter(|| classify_swipe(black_box(121.5), black_box(120.0)));
    });
}

fn bench_gesture_drag(c: &mut Criterion) {
    c.bench_function("gesture_drag_60_moves", |b| {
        b.iter(|| {
            let mut gesture = SwipeGesture::default();
            gesture.start(black_box(200.0), true);
            for step in 0..60 {
                gesture.move_to(200.0 + step as f64 * 3.0);
                black_box(gesture.motion());
            }
            gesture.end()
        });
    });
}

fn bench_deck_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_cycle");

    for deck_size in [3, 10, 100, 1000].iter() {
        let seed: Vec<Profile> = (0..*deck_size).map(create_profile).collect();

        group.bench_with_input(BenchmarkId::new("swipe_through", deck_size), deck_size, |b, _| {
            b.iter(|| {
                let mut controller =
                    DeckController::new(black_box(seed.clone()), StdRng::seed_from_u64(1));
                while controller.resolve_swipe(SwipeDirection::Accept).is_some() {}
                controller.reshuffle();
                controller
            });
        });
    }

    group.finish();
}

fn bench_reshuffle(c: &mut Criterion) {
    let seed: Vec<Profile> = (0..100).map(create_profile).collect();
    let mut deck = Deck::new(seed);
    let mut rng = StdRng::seed_from_u64(7);

    c.bench_function("reshuffle_100_profiles", |b| {
        b.iter(|| {
            deck.reshuffle(&mut rng);
            black_box(deck.cursor())
        });
    });
}

criterion_group!(
    benches,
    bench_classify_swipe,
    bench_gesture_drag,
    bench_deck_cycle,
    bench_reshuffle
);

criterion_main!(benches);
