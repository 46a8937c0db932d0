use bank_ledger::config::{CustomerSettings, Settings};
use bank_ledger::ledger::AccountKind;
use bank_ledger::run::run;
use criterion::{criterion_group, criterion_main, Criterion};

fn settings(workers: usize) -> Settings {
    Settings {
        workers,
        customers: vec![
            (101, "maru123", AccountKind::Savings),
            (102, "aditi123", AccountKind::Current),
            (103, "rahul123", AccountKind::Privilege),
        ]
        .into_iter()
        .map(|(id, password, kind)| CustomerSettings {
            id,
            name: format!("customer {}", id),
            password: password.to_string(),
            account: Some(kind),
            opening_balance: None,
        })
        .collect(),
    }
}

fn operations(repeat: usize) -> String {
    format!(
        "type,customer,credential,amount\n{}",
        r#"deposit,    101,    maru123,    1.0
        deposit,    102,    aditi123,   2.0
        badly formated record
        withdrawal, 101,    maru123,    1.5
        withdrawal, 103,    rahul123,   3.0
        deposit,    103,    wrong,      1.0
"#
        .repeat(repeat)
    )
}

pub fn bench_apply_6000_lines(c: &mut Criterion) {
    c.bench_function("apply_operations_6_000", |b| {
        let data = operations(1_000);
        let settings = settings(4);

        b.iter(|| run(&settings, std::io::Cursor::new(data.clone()), std::io::sink()))
    });
}

pub fn bench_apply_120000_lines(c: &mut Criterion) {
    c.bench_function("apply_operations_120_000", |b| {
        let data = operations(20_000);
        let settings = settings(4);

        b.iter(|| run(&settings, std::io::Cursor::new(data.clone()), std::io::sink()))
    });
}

criterion_group!(benches, bench_apply_6000_lines, bench_apply_120000_lines);
criterion_main!(benches);
