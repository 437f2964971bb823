use crontab_next::{Crontab, Entry, Result};

#[test]
fn crontab() {
    let crontab = Crontab::parse(
        "# nightly maintenance
        SHELL=/bin/sh
        30 3 * * * /usr/bin/backup --all
        @hourly /usr/bin/health-check",
    );
    assert_eq!(crontab.entries().len(), 2);

    // Next run of every entry, closest first
    let now = chrono::Local::now().naive_local();
    for run in crontab.upcoming_runs(&now) {
        println!("{} in {}m: {}", run.at, run.until.num_minutes(), run.entry.command());
    }
}

#[test]
fn entry() -> Result<()> {
    let entry = Entry::new("*/15 9-17 * * mon-fri /usr/bin/sync --fast")?;

    assert_eq!(entry.command(), "/usr/bin/sync --fast");
    assert!(entry.upcoming_from_now().is_some());

    Ok(())
}
