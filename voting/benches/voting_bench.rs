use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use agora_nullables::{NullClock, NullDelegate};
use agora_power::Whitelist;
use agora_types::{Address, BlockNumber, Pct, Timestamp};
use agora_voting::{Choice, VoteSettings, WhitelistVoting};

fn addr(n: usize) -> Address {
    Address::new(format!("agr_member_{n:05}"))
}

/// Whitelist engine with `members` addresses, one open vote, everyone voted.
fn populated_engine(members: usize) -> (WhitelistVoting, NullClock) {
    let listed: Vec<Address> = (0..members).map(addr).collect();
    let whitelist = Whitelist::with_members(&listed, BlockNumber::new(1)).unwrap();
    let mut engine = WhitelistVoting::new(whitelist);
    engine
        .initialize(VoteSettings::new(
            Pct::percent(50),
            Pct::percent(20),
            300,
        ))
        .unwrap();

    let clock = NullClock::new(1000, 2);
    let mut delegate = NullDelegate::new();
    engine
        .create_vote(
            &addr(0),
            Vec::new(),
            Vec::new(),
            Timestamp::EPOCH,
            Timestamp::EPOCH,
            false,
            Choice::None,
            clock.context(),
            &mut delegate,
        )
        .unwrap();
    for i in 0..members {
        let choice = if i % 3 == 0 { Choice::Nay } else { Choice::Yea };
        engine
            .vote(&addr(i), 0, choice, false, clock.context(), &mut delegate)
            .unwrap();
    }
    (engine, clock)
}

fn bench_cast_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("cast_vote");

    for members in [10, 100, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("re_vote", members),
            &members,
            |b, &members| {
                let (engine, clock) = populated_engine(members);
                let mut delegate = NullDelegate::new();
                let mut engine = engine;
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    let choice = if flip { Choice::Abstain } else { Choice::Yea };
                    engine
                        .vote(
                            black_box(&addr(1)),
                            0,
                            choice,
                            false,
                            clock.context(),
                            &mut delegate,
                        )
                        .unwrap();
                    // Keep the event log from growing across iterations.
                    black_box(engine.take_events());
                });
            },
        );
    }

    group.finish();
}

fn bench_can_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("can_execute");

    for members in [10, 100, 1_000] {
        let (engine, clock) = populated_engine(members);
        group.bench_with_input(
            BenchmarkId::new("evaluate", members),
            &members,
            |b, _| {
                b.iter(|| black_box(engine.can_execute(black_box(0), clock.now())));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cast_vote, bench_can_execute);
criterion_main!(benches);
