use mystery_guess::{
    zero_player, AutomatedPlayer, GameConfig, Identifier, IntervalTracker, LevelTable, Player, PlayerId, Relation,
};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .sample_size(20)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        consolidating_eight_player_round,
        sampling_narrow_interval,
        sampling_deep_level,
        playing_zero_player_match,
}

fn round(mystery: i128, players: u8) -> Vec<Identifier> {
    (0..players)
        .map(|seat| {
            let value = (seat as i128 - 4) * 97;
            Identifier::new(PlayerId::new(seat), Relation::classify(value, mystery), value)
        })
        .collect()
}

fn consolidating_eight_player_round(c: &mut criterion::Criterion) {
    let level = LevelTable::standard().get(10).unwrap();
    let batch = round(13, 8);
    c.bench_function("consolidate an 8-player round", |b| {
        b.iter(|| {
            let mut tracker = IntervalTracker::new(level);
            tracker.set_owner(PlayerId::new(0));
            tracker.consolidate(&batch)
        })
    });
}

fn sampling_narrow_interval(c: &mut criterion::Criterion) {
    let level = LevelTable::standard().get(0).unwrap();
    c.bench_function("guess inside a 1000-wide interval", |b| {
        let mut bot = AutomatedPlayer::with_seed("Bench", level, 1);
        b.iter(|| {
            bot.reset();
            bot.put(-500, 500);
            bot.get()
        })
    });
}

fn sampling_deep_level(c: &mut criterion::Criterion) {
    let level = LevelTable::standard().get(100).unwrap();
    c.bench_function("guess at level 100", |b| {
        let mut bot = AutomatedPlayer::with_seed("Bench", level, 2);
        b.iter(|| {
            bot.reset();
            bot.get()
        })
    });
}

fn playing_zero_player_match(c: &mut criterion::Criterion) {
    let config = GameConfig::default().with_level(4).with_seed(17);
    c.bench_function("play a 4-bot match at level 4", |b| {
        b.iter(|| {
            let mut engine = zero_player(config.clone(), 4).unwrap();
            engine.run().unwrap()
        })
    });
}
