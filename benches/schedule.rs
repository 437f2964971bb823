use chrono::NaiveDateTime;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use crontab_next::{Entry, Schedule};

const EXPRESSIONS: &[&str] = &[
    "@hourly",
    "* * * * *",
    "*/10 * * * *",
    "0 */2 * * *",
    "15,45 9-17 * * mon-fri",
    "0 0 29 2 *",
    "0 0 13 * 5",
];

const NOW: &[&str] = &["1999-12-31T23:59:00", "2012-10-19T08:05:00", "2024-02-29T00:00:00"];
const TAKE_SAMPLES: usize = 1_000;

pub fn new_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("new");
    for expression in EXPRESSIONS {
        group.bench_with_input(BenchmarkId::from_parameter(expression), expression, |b, e| {
            b.iter(|| Schedule::new(*e).unwrap())
        });

        let line = format!("{expression} /usr/bin/backup --all");
        group.bench_with_input(BenchmarkId::from_parameter(&line), &line, |b, l| {
            b.iter(|| Entry::new(l.as_str()).unwrap())
        });
    }
    group.finish();
}

pub fn upcoming_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("upcoming");
    for expression in EXPRESSIONS {
        for now_str in NOW {
            let now = NaiveDateTime::parse_from_str(now_str, "%Y-%m-%dT%H:%M:%S").unwrap();
            let schedule = Schedule::new(*expression).unwrap();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{now_str}/{expression}")),
                &(now, &schedule),
                |b, (now, schedule)| b.iter(|| schedule.upcoming(now)),
            );
        }
    }
    group.finish();
}

pub fn iter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    for expression in EXPRESSIONS {
        for now_str in NOW {
            let now = NaiveDateTime::parse_from_str(now_str, "%Y-%m-%dT%H:%M:%S").unwrap();
            let schedule = Schedule::new(*expression).unwrap();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{now_str}/{expression}")),
                &(now, &schedule),
                |b, (now, schedule)| b.iter(|| schedule.iter(now).take(TAKE_SAMPLES).count()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, new_benchmark, upcoming_benchmark, iter_benchmark);
criterion_main!(benches);
