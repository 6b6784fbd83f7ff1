//! The `coolcall call` command.

use std::path::PathBuf;

use anyhow::Result;

use coolcall_report::{write_summary, DailyLog};

use crate::commands::deck::print_deck;
use crate::session::{warn_persist, QueueLoad, Session};

pub fn execute(config_path: Option<PathBuf>, position: usize, flag: bool) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut session = Session::open(config_path, QueueLoad::Restore, &mut rng)?;

    anyhow::ensure!(
        !session.queue.is_empty(),
        "no students are in the on-deck rotation"
    );
    let on_deck = session.queue.on_deck().len();
    anyhow::ensure!(
        (1..=on_deck).contains(&position),
        "position must be between 1 and {on_deck}"
    );

    let student = session.queue.on_deck()[position - 1].clone();
    let today = chrono::Local::now().date_naive();
    student.borrow_mut().call_on(flag, today);
    let key = student.borrow().key();

    if let Err(e) = session.queue.take_off_deck(&key, &mut rng) {
        warn_persist(&e);
    }

    let config = &session.config;
    write_summary(session.roster.students(), &config.summary_path())?;
    DailyLog::new(&config.log_dir).record(&student.borrow(), flag, today)?;

    let name = student.borrow().display_name();
    if flag {
        println!("Called on {name} (flagged)");
    } else {
        println!("Called on {name}");
    }
    print_deck(&session.queue);
    Ok(())
}
